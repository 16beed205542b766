//! Error types and handling for configuration loading and resolution

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lint configuration operations
#[derive(Debug, Error)]
pub enum LintrcError {
    /// A rule entry carries a severity outside of off/warn/error
    #[error("Invalid severity for rule '{rule_id}' in {source_name}: {value}")]
    InvalidSeverity {
        rule_id: String,
        value: String,
        source_name: String,
    },

    /// A rule identifier not registered by any loaded preset or plugin
    #[error("Unknown rule '{rule_id}' in {source_name}")]
    UnknownRule {
        rule_id: String,
        source_name: String,
    },

    /// An `extends` entry that names neither a built-in preset nor a config file
    #[error("Cannot resolve preset '{name}' extended from {source_name}")]
    UnresolvablePreset { name: String, source_name: String },

    #[error("Unknown environment '{name}' in {source_name}")]
    UnknownEnvironment { name: String, source_name: String },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    #[error("Circular extends chain: {chain}")]
    CircularExtends { chain: String },

    /// Configuration loading or shape errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Syntax errors in a config file
    #[error("Failed to parse '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Severity,
    Rule,
    Preset,
    Environment,
    Glob,
    Config,
    Parse,
    Io,
    Internal,
}

impl LintrcError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LintrcError::InvalidSeverity { .. } => ErrorKind::Severity,
            LintrcError::UnknownRule { .. } => ErrorKind::Rule,
            LintrcError::UnresolvablePreset { .. } => ErrorKind::Preset,
            LintrcError::CircularExtends { .. } => ErrorKind::Preset,
            LintrcError::UnknownEnvironment { .. } => ErrorKind::Environment,
            LintrcError::InvalidGlob { .. } => ErrorKind::Glob,
            LintrcError::ConfigError { .. } => ErrorKind::Config,
            LintrcError::ParseError { .. } => ErrorKind::Parse,
            LintrcError::IoError { .. } => ErrorKind::Io,
            LintrcError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error was caused by the content of a configuration
    /// (as opposed to the environment the loader runs in)
    pub fn is_config_content_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Io | ErrorKind::Internal)
    }

    /// Create an invalid severity error
    pub fn invalid_severity(
        rule_id: impl Into<String>,
        value: impl Into<String>,
        source_name: impl Into<String>,
    ) -> Self {
        Self::InvalidSeverity {
            rule_id: rule_id.into(),
            value: value.into(),
            source_name: source_name.into(),
        }
    }

    /// Create an unknown rule error
    pub fn unknown_rule(rule_id: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self::UnknownRule {
            rule_id: rule_id.into(),
            source_name: source_name.into(),
        }
    }

    /// Create an unresolvable preset error
    pub fn unresolvable_preset(name: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self::UnresolvablePreset {
            name: name.into(),
            source_name: source_name.into(),
        }
    }

    pub fn unknown_environment(name: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self::UnknownEnvironment {
            name: name.into(),
            source_name: source_name.into(),
        }
    }

    pub fn invalid_glob(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidGlob {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a parse error for a config file
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for LintrcError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}
