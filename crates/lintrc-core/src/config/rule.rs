//! Rule settings and the mode-conditional rule form

use super::severity::Severity;
use crate::{LintrcError, Result};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Production vs development switch
///
/// Mode-conditional rule entries are evaluated against this once, when the
/// configuration is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildMode {
    Production,
    #[default]
    Development,
}

impl BuildMode {
    /// Interpret a `NODE_ENV`-style value: only `production` selects production
    pub fn from_node_env(value: &str) -> Self {
        if value.trim() == "production" {
            BuildMode::Production
        } else {
            BuildMode::Development
        }
    }

    /// Read the mode from the `NODE_ENV` process variable
    pub fn from_env() -> Self {
        std::env::var("NODE_ENV")
            .map(|v| Self::from_node_env(&v))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Production => "production",
            BuildMode::Development => "development",
        }
    }
}

impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "production" | "prod" => Ok(BuildMode::Production),
            "development" | "dev" => Ok(BuildMode::Development),
            other => Err(format!(
                "invalid mode '{other}' (expected production or development)"
            )),
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule's severity plus its options
///
/// Serializes back to the on-disk shape: a bare severity when there are no
/// options, `[severity, ...options]` otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSetting {
    pub severity: Severity,
    pub options: Vec<Value>,
}

impl RuleSetting {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            options: Vec::new(),
        }
    }

    pub fn with_options(severity: Severity, options: Vec<Value>) -> Self {
        Self { severity, options }
    }

    /// Parse the `severity | [severity, ...options]` form
    pub fn parse(rule_id: &str, value: &Value, source_name: &str) -> Result<Self> {
        if let Some(severity) = Severity::from_value(value) {
            return Ok(Self::new(severity));
        }

        if let Value::Array(items) = value
            && let Some((first, rest)) = items.split_first()
            && let Some(severity) = Severity::from_value(first)
        {
            return Ok(Self::with_options(severity, rest.to_vec()));
        }

        Err(LintrcError::invalid_severity(
            rule_id,
            value.to_string(),
            source_name,
        ))
    }

    /// Layer this setting on top of an earlier one for the same rule
    ///
    /// A severity-only setting keeps the options established earlier.
    pub fn merged_over(&self, earlier: Option<&RuleSetting>) -> RuleSetting {
        match earlier {
            Some(base) if self.options.is_empty() => RuleSetting {
                severity: self.severity,
                options: base.options.clone(),
            },
            _ => self.clone(),
        }
    }
}

impl Serialize for RuleSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.options.is_empty() {
            return self.severity.serialize(serializer);
        }
        let mut seq = serializer.serialize_seq(Some(self.options.len() + 1))?;
        seq.serialize_element(&self.severity)?;
        for option in &self.options {
            seq.serialize_element(option)?;
        }
        seq.end()
    }
}

impl fmt::Display for RuleSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.options.is_empty() {
            write!(f, "{}", self.severity)
        } else {
            let options: Vec<String> = self.options.iter().map(Value::to_string).collect();
            write!(f, "{} {}", self.severity, options.join(" "))
        }
    }
}

/// A rule value as written in a config layer
#[derive(Debug, Clone, PartialEq)]
pub enum RuleEntry {
    Setting(RuleSetting),
    /// `{"production": <setting>, "development": <setting>}`
    ByMode {
        production: RuleSetting,
        development: RuleSetting,
    },
}

impl RuleEntry {
    pub fn parse(rule_id: &str, value: &Value, source_name: &str) -> Result<Self> {
        if let Value::Object(map) = value {
            let (Some(production), Some(development), 2) =
                (map.get("production"), map.get("development"), map.len())
            else {
                return Err(LintrcError::invalid_severity(
                    rule_id,
                    value.to_string(),
                    source_name,
                ));
            };
            return Ok(RuleEntry::ByMode {
                production: RuleSetting::parse(rule_id, production, source_name)?,
                development: RuleSetting::parse(rule_id, development, source_name)?,
            });
        }
        RuleSetting::parse(rule_id, value, source_name).map(RuleEntry::Setting)
    }

    /// Pick the setting that applies under `mode`
    pub fn select(&self, mode: BuildMode) -> &RuleSetting {
        match (self, mode) {
            (RuleEntry::Setting(setting), _) => setting,
            (RuleEntry::ByMode { production, .. }, BuildMode::Production) => production,
            (RuleEntry::ByMode { development, .. }, BuildMode::Development) => development,
        }
    }
}
