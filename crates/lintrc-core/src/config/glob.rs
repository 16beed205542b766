//! File matching for override blocks and ignore patterns
//!
//! Patterns are compiled with `globset`, which handles `*`, `**`, `?`,
//! character classes and brace alternatives (`*.{js,ts}`). The minimatch
//! extglob groups `?(..)` and `@(..)` are expanded up front into plain
//! patterns. A pattern without a `/` matches the file name at any depth. All
//! matching is done on paths made relative to the directory of the config
//! that declared the pattern.

use crate::{LintrcError, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::{Component, Path, PathBuf};

/// Patterns as written, compiled into one `GlobSet`
#[derive(Debug, Clone)]
pub struct PatternSet {
    sources: Vec<String>,
    set: GlobSet,
    // compiled glob index -> index into `sources`
    owners: Vec<usize>,
}

impl PatternSet {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let mut sources = Vec::with_capacity(patterns.len());
        let mut owners = Vec::new();

        for (index, pattern) in patterns.iter().enumerate() {
            let source = pattern.as_ref();
            for expanded in compile_pattern(source)? {
                let glob = GlobBuilder::new(&expanded)
                    .literal_separator(true)
                    .backslash_escape(true)
                    .build()
                    .map_err(|e| LintrcError::invalid_glob(source, e.kind().to_string()))?;
                builder.add(glob);
                owners.push(index);
            }
            sources.push(source.to_string());
        }

        let set = builder
            .build()
            .map_err(|e| LintrcError::invalid_glob(sources.join(" "), e.to_string()))?;
        Ok(Self {
            sources,
            set,
            owners,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// The patterns as they were written in the config
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Match a `/`-separated path relative to the patterns' base directory
    pub fn is_match(&self, relative: &str) -> bool {
        self.set.is_match(relative)
    }

    /// Indices into [`sources`](Self::sources) of every pattern matching `relative`
    pub fn matching_sources(&self, relative: &str) -> Vec<usize> {
        let mut matched: Vec<usize> = self
            .set
            .matches(relative)
            .into_iter()
            .map(|glob| self.owners[glob])
            .collect();
        matched.sort_unstable();
        matched.dedup();
        matched
    }
}

/// The `files` / `excludedFiles` condition of an override block
#[derive(Debug, Clone)]
pub struct OverrideMatcher {
    base_dir: PathBuf,
    files: PatternSet,
    excluded: PatternSet,
}

impl OverrideMatcher {
    pub fn new<S: AsRef<str>>(base_dir: &Path, files: &[S], excluded: &[S]) -> Result<Self> {
        if files.is_empty() {
            return Err(LintrcError::config_error(
                "override block must list at least one pattern in 'files'",
            ));
        }
        Ok(Self {
            base_dir: normalize_lexically(base_dir),
            files: PatternSet::new(files)?,
            excluded: PatternSet::new(excluded)?,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn files(&self) -> &PatternSet {
        &self.files
    }

    /// `path` must already be normalized (see [`normalize_lexically`])
    pub fn matches(&self, path: &Path) -> bool {
        match relative_slash_path(path, &self.base_dir) {
            Some(relative) => self.files.is_match(&relative) && !self.excluded.is_match(&relative),
            None => false,
        }
    }
}

/// Gitignore-style ignore patterns (`dist/` ignores everything below `dist`)
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    base_dir: PathBuf,
    patterns: PatternSet,
}

impl IgnoreMatcher {
    pub fn new<S: AsRef<str>>(base_dir: &Path, patterns: &[S]) -> Result<Self> {
        let trimmed: Vec<&str> = patterns
            .iter()
            .map(|p| p.as_ref().trim_end_matches('/'))
            .filter(|p| !p.is_empty())
            .collect();
        Ok(Self {
            base_dir: normalize_lexically(base_dir),
            patterns: PatternSet::new(&trimmed)?,
        })
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        let Some(relative) = relative_slash_path(path, &self.base_dir) else {
            return false;
        };
        // a matching directory ignores everything below it
        let mut prefix = String::new();
        for segment in relative.split('/') {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);
            if self.patterns.is_match(&prefix) {
                return true;
            }
        }
        false
    }
}

/// Resolve `.` and `..` without touching the file system
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// `path` relative to `base`, joined with `/`; `None` when outside `base`
pub fn relative_slash_path(path: &Path, base: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Turn one config pattern into the globs handed to `globset`
fn compile_pattern(source: &str) -> Result<Vec<String>> {
    let trimmed = source
        .strip_prefix("./")
        .or_else(|| source.strip_prefix('/'))
        .unwrap_or(source);
    if trimmed.split('/').any(|segment| segment == "..") {
        return Err(LintrcError::invalid_glob(
            source,
            "patterns may not reach outside the config directory",
        ));
    }

    let expanded =
        expand_extglob(trimmed).map_err(|message| LintrcError::invalid_glob(source, message))?;
    Ok(expanded
        .into_iter()
        .map(|pattern| {
            if pattern.contains('/') {
                pattern
            } else {
                format!("**/{pattern}")
            }
        })
        .collect())
}

/// Expand `?(a|b)` and `@(a|b)` groups into plain patterns
pub fn expand_extglob(pattern: &str) -> std::result::Result<Vec<String>, String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;
    while i + 1 < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            kind @ ('?' | '@' | '*' | '+' | '!') if chars[i + 1] == '(' => {
                if kind != '?' && kind != '@' {
                    return Err(format!("unsupported extglob '{kind}(...)'"));
                }
                let close = chars[i + 2..]
                    .iter()
                    .position(|&c| c == ')')
                    .map(|offset| i + 2 + offset)
                    .ok_or_else(|| "unbalanced '('".to_string())?;
                if chars[i + 2..close].contains(&'(') {
                    return Err("nested extglob groups are not supported".to_string());
                }

                let prefix: String = chars[..i].iter().collect();
                let suffix: String = chars[close + 1..].iter().collect();
                let body: String = chars[i + 2..close].iter().collect();
                let mut alternatives: Vec<&str> = body.split('|').collect();
                if kind == '?' {
                    alternatives.insert(0, "");
                }

                let mut expanded = Vec::new();
                for alternative in alternatives {
                    for candidate in expand_extglob(&format!("{prefix}{alternative}{suffix}"))? {
                        if !expanded.contains(&candidate) {
                            expanded.push(candidate);
                        }
                    }
                }
                return Ok(expanded);
            }
            _ => {}
        }
        i += 1;
    }
    Ok(vec![pattern.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_optional_group_keeps_braces() {
        let expanded = expand_extglob("**/__tests__/*.{j,t}s?(x)").unwrap();
        assert_eq!(
            expanded,
            vec!["**/__tests__/*.{j,t}s", "**/__tests__/*.{j,t}sx"]
        );
    }

    #[test]
    fn test_expand_at_group() {
        let expanded = expand_extglob("src/@(x|y)/?(a).vue").unwrap();
        assert_eq!(
            expanded,
            vec!["src/x/.vue", "src/x/a.vue", "src/y/.vue", "src/y/a.vue"]
        );
    }

    #[test]
    fn test_unsupported_extglob_is_rejected() {
        assert!(expand_extglob("*.+(js|ts)").is_err());
        assert!(PatternSet::new(&["!(foo).js"]).is_err());
        assert!(PatternSet::new(&["src/?(a|@(b)).js"]).is_err());
    }

    #[test]
    fn test_invalid_glob_reports_source_pattern() {
        let err = PatternSet::new(&["src/[a.js"]).unwrap_err();
        assert!(matches!(
            err,
            LintrcError::InvalidGlob { ref pattern, .. } if pattern == "src/[a.js"
        ));
    }

    #[test]
    fn test_parent_segments_rejected() {
        assert!(matches!(
            PatternSet::new(&["../outside/*.js"]),
            Err(LintrcError::InvalidGlob { .. })
        ));
    }

    #[test]
    fn test_basename_matching_without_slash() {
        let set = PatternSet::new(&["*.ts"]).unwrap();
        assert!(set.is_match("src/deep/nested/file.ts"));
        assert!(set.is_match("file.ts"));
        assert!(!set.is_match("src/file.vue"));
    }

    #[test]
    fn test_double_star_matches_zero_directories() {
        let set = PatternSet::new(&["**/tests/unit/**/*.spec.{j,t}s?(x)"]).unwrap();
        assert!(set.is_match("tests/unit/foo.spec.ts"));
        assert!(set.is_match("packages/app/tests/unit/deep/foo.spec.jsx"));
        assert!(!set.is_match("tests/e2e/foo.spec.ts"));
        assert!(!set.is_match("tests/unit/foo.ts"));
    }

    #[test]
    fn test_star_does_not_cross_directories() {
        let set = PatternSet::new(&["./src/*.vue"]).unwrap();
        assert!(set.is_match("src/App.vue"));
        assert!(!set.is_match("src/components/Widget.vue"));
    }

    #[test]
    fn test_matching_sources_maps_back_to_written_patterns() {
        let set = PatternSet::new(&["*.{js,ts}?(x)", "src/**", "*.vue"]).unwrap();
        assert_eq!(set.sources().len(), 3);
        assert_eq!(set.matching_sources("src/main.tsx"), vec![0, 1]);
        assert_eq!(set.matching_sources("App.vue"), vec![2]);
        assert!(set.matching_sources("README.md").is_empty());
    }

    #[test]
    fn test_override_matcher_respects_base_dir_and_exclusions() {
        let matcher = OverrideMatcher::new(
            Path::new("/project/packages/web"),
            &["**/*.ts"],
            &["**/*.d.ts"],
        )
        .unwrap();

        assert!(matcher.matches(Path::new("/project/packages/web/src/main.ts")));
        assert!(!matcher.matches(Path::new("/project/packages/web/src/env.d.ts")));
        assert!(!matcher.matches(Path::new("/project/other/main.ts")));
    }

    #[test]
    fn test_override_requires_patterns() {
        let empty: [&str; 0] = [];
        assert!(OverrideMatcher::new(Path::new("/p"), &empty, &empty).is_err());
    }

    #[test]
    fn test_ignore_matcher_directory_patterns() {
        let ignore = IgnoreMatcher::new(Path::new("/p"), &["dist/", "node_modules", "*.min.js"])
            .unwrap();
        assert!(ignore.is_ignored(Path::new("/p/dist/app.js")));
        assert!(ignore.is_ignored(Path::new("/p/packages/a/node_modules/x/index.js")));
        assert!(ignore.is_ignored(Path::new("/p/public/vendor.min.js")));
        assert!(!ignore.is_ignored(Path::new("/p/src/main.ts")));
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize_lexically(Path::new("./src/x.ts")), PathBuf::from("src/x.ts"));
    }
}
