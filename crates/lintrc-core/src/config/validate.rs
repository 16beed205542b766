//! Non-fatal checks run against a built [`ConfigArray`]

use super::loader::{SKIPPED_DIRS, walk_error};
use super::resolve::{ConfigArray, LayerOrigin};
use crate::{LintrcError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A problem worth reporting that does not stop resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// An override `files` pattern matched nothing under the project root
    GlobNoMatch { pattern: String, source_name: String },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::GlobNoMatch {
                pattern,
                source_name,
            } => write!(
                f,
                "Pattern '{pattern}' in {source_name} does not match any file"
            ),
        }
    }
}

/// Check the override patterns declared by config files against the tree
/// under `project_root`
///
/// Patterns from built-in presets are skipped; they are generic and often
/// target file types a project does not have.
pub fn check_config_array(array: &ConfigArray, project_root: &Path) -> Result<Vec<ConfigWarning>> {
    if !project_root.is_dir() {
        return Err(LintrcError::config_error(format!(
            "Project root is not a directory: {}",
            project_root.display()
        )));
    }

    let files = project_files(array, project_root)?;
    let mut warnings = Vec::new();

    for layer in array.layers() {
        if matches!(layer.origin, LayerOrigin::Preset(_)) {
            continue;
        }
        // outer conditions belong to the enclosing block, only the last is this layer's own
        let Some(matcher) = layer.conditions.last() else {
            continue;
        };

        let patterns = matcher.files();
        let mut matched = vec![false; patterns.sources().len()];
        for file in &files {
            if let Some(relative) = super::glob::relative_slash_path(file, matcher.base_dir()) {
                for index in patterns.matching_sources(&relative) {
                    matched[index] = true;
                }
            }
        }

        for (pattern, _) in patterns.sources().iter().zip(&matched).filter(|(_, hit)| !**hit) {
            let warning = ConfigWarning::GlobNoMatch {
                pattern: pattern.clone(),
                source_name: layer.name.clone(),
            };
            tracing::warn!("{}", warning);
            warnings.push(warning);
        }
    }

    Ok(warnings)
}

fn project_files(array: &ConfigArray, project_root: &Path) -> Result<Vec<PathBuf>> {
    let walker = WalkDir::new(project_root).into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || !entry.file_type().is_dir()
            || !SKIPPED_DIRS.iter().any(|dir| entry.file_name() == *dir)
    });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(walk_error)?;
        if entry.file_type().is_file() {
            files.push(array.normalize_path(entry.path()));
        }
    }

    tracing::debug!(
        "Collected {} files under {} for pattern checks",
        files.len(),
        project_root.display()
    );
    Ok(files)
}
