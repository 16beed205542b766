//! Configuration file discovery and loading

use super::lint_config::LintConfig;
use super::preset::PresetRegistry;
use super::resolve::ConfigArray;
use super::rule::BuildMode;
use crate::error::LintrcError;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Config file names in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".lintrc.json",
    ".lintrc.jsonc",
    ".lintrc.yaml",
    ".lintrc.yml",
    ".lintrc.toml",
    "lintrc.json",
];

/// Directories never searched for nested configs or project files
pub(super) const SKIPPED_DIRS: &[&str] = &["node_modules", ".git", "target", "dist"];

/// Inputs for building a [`ConfigArray`] from disk
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Explicit config file; disables cascading discovery
    pub config_path: Option<PathBuf>,
    /// Directory discovery starts from; relative file paths resolve against it
    pub cwd: PathBuf,
    pub mode: BuildMode,
}

impl LoadOptions {
    pub fn new(cwd: impl Into<PathBuf>, mode: BuildMode) -> Self {
        Self {
            config_path: None,
            cwd: cwd.into(),
            mode,
        }
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }
}

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover the nearest config file by traversing upward from start_path
    ///
    /// Checks the names in [`CONFIG_FILE_NAMES`] in order in each directory,
    /// moving up the directory tree until a config is found or the filesystem
    /// root is reached.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = Some(Self::canonical_dir(start_path)?);

        while let Some(dir) = current {
            if let Some(found) = Self::config_in_dir(&dir) {
                tracing::debug!("Found config: {}", found.display());
                return Ok(Some(found));
            }
            current = dir.parent().map(Path::to_path_buf);
        }

        Ok(None)
    }

    /// Collect the config files that apply to `start_path`
    ///
    /// Walks upward taking the first config of each directory, and stops
    /// after a config declaring `root: true`. Returned outermost first, so
    /// configs closer to the file come later and take precedence.
    pub fn discover_cascade(start_path: &Path) -> Result<Vec<(PathBuf, LintConfig)>> {
        let mut cascade = Vec::new();
        let mut current = Some(Self::canonical_dir(start_path)?);

        while let Some(dir) = current {
            if let Some(path) = Self::config_in_dir(&dir) {
                let config = Self::load_from_file(&path)?;
                let is_root = config.is_root();
                tracing::debug!("Cascade config: {} (root: {})", path.display(), is_root);
                cascade.push((path, config));
                if is_root {
                    break;
                }
            }
            current = dir.parent().map(Path::to_path_buf);
        }

        cascade.reverse();
        Ok(cascade)
    }

    /// Collect the config files in directories below `dir`, parents before children
    pub fn discover_nested(dir: &Path) -> Result<Vec<(PathBuf, LintConfig)>> {
        let dir = Self::canonical_dir(dir)?;
        let walker = WalkDir::new(&dir)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.file_type().is_dir()
                    && !SKIPPED_DIRS.iter().any(|skipped| entry.file_name() == *skipped)
            });

        let mut nested = Vec::new();
        for entry in walker {
            let entry = entry.map_err(walk_error)?;
            if let Some(path) = Self::config_in_dir(entry.path()) {
                let config = Self::load_from_file(&path)?;
                tracing::debug!("Nested config: {} (root: {})", path.display(), config.is_root());
                nested.push((path, config));
            }
        }
        Ok(nested)
    }

    /// Every config file that can apply to files under `cwd`
    ///
    /// The upward cascade from `cwd`, followed by the configs nested below
    /// the project root (the directory of a `root: true` cascade config, or
    /// `cwd` itself). Outer configs always come before the ones they contain.
    pub fn discover_all(cwd: &Path) -> Result<Vec<(PathBuf, LintConfig)>> {
        let mut files = Self::discover_cascade(cwd)?;
        let walk_root = match files.first() {
            Some((path, config)) if config.is_root() => path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.to_path_buf()),
            _ => cwd.to_path_buf(),
        };

        let nested: Vec<_> = Self::discover_nested(&walk_root)?
            .into_iter()
            .filter(|(path, _)| !files.iter().any(|(found, _)| found == path))
            .collect();
        files.extend(nested);
        Ok(files)
    }

    /// Load configuration from a specific file
    ///
    /// `.json` and `.jsonc` accept comments and trailing commas; `.yaml`,
    /// `.yml` and `.toml` are also supported.
    pub fn load_from_file(path: &Path) -> Result<LintConfig> {
        let content =
            fs::read_to_string(path).map_err(|e| LintrcError::io_error(path, e))?;
        Self::parse(path, &content)
    }

    /// Parse config text, choosing the format from the file extension
    pub fn parse(path: &Path, content: &str) -> Result<LintConfig> {
        let ext = path.extension().and_then(|e| e.to_str());

        let parsed = match ext {
            Some("json") | Some("jsonc") => json5::from_str(content).map_err(|e| e.to_string()),
            Some("yaml") | Some("yml") => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Some("toml") => toml::from_str(content).map_err(|e| e.to_string()),
            _ => {
                return Err(LintrcError::config_error(format!(
                    "Unsupported config file extension: {} (expected .json, .jsonc, .yaml, .yml or .toml)",
                    path.display()
                )));
            }
        };

        parsed.map_err(|message| LintrcError::parse_error(path, message))
    }

    /// Load config from path or discover the cascade, then build the config array
    pub fn build(options: &LoadOptions, registry: &PresetRegistry) -> Result<ConfigArray> {
        let cwd = Self::canonical_dir(&options.cwd)?;

        let mut builder = ConfigArray::builder(registry, options.mode, &cwd);

        if let Some(path) = &options.config_path {
            let path = cwd.join(path);
            if !path.is_file() {
                return Err(LintrcError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            let config = Self::load_from_file(&path)?;
            return builder.add_file(&path, &config)?.build();
        }

        let files = Self::discover_all(&cwd)?;
        if files.is_empty() {
            return Err(LintrcError::config_error(format!(
                "No config file found ({}) in {} or any parent directory. Run 'lintrc config init' to create one",
                CONFIG_FILE_NAMES.join(", "),
                cwd.display()
            )));
        }

        for (path, config) in &files {
            builder = builder.add_cascaded_file(path, config)?;
        }
        builder.build()
    }

    fn config_in_dir(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    fn canonical_dir(path: &Path) -> Result<PathBuf> {
        path.canonicalize().map_err(|e| LintrcError::ConfigError {
            message: format!("Invalid path '{}': {e}", path.display()),
        })
    }
}

pub(super) fn walk_error(e: walkdir::Error) -> LintrcError {
    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
    match e.into_io_error() {
        Some(source) => LintrcError::io_error(path, source),
        None => LintrcError::config_error(format!(
            "Failed to walk {}: filesystem loop",
            path.display()
        )),
    }
}
