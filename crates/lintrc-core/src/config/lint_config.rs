//! On-disk configuration schema
//!
//! Field names are camelCase, matching the eslintrc layout. Rule values are
//! kept as raw JSON here and validated when the config is turned into layers,
//! so errors can name the rule and the file they came from.

use super::env::GlobalAccess;
use crate::{LintrcError, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single configuration file (or built-in preset)
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LintConfig {
    /// JSON Schema reference, ignored by the loader
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Stop looking for configuration files in parent directories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<bool>,

    /// Environment name → enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<IndexMap<String, bool>>,

    /// Additional global identifiers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub globals: Option<IndexMap<String, GlobalAccess>>,

    /// Presets or config files this one builds on, lowest precedence first
    #[serde(
        default,
        deserialize_with = "deserialize_one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<Vec<String>>")]
    pub extends: Option<Vec<String>>,

    /// Plugins whose rules this config may reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<String>>,

    /// Parser for the files this config applies to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser_options: Option<ParserOptions>,

    /// Rule id → `severity | [severity, ...options] | {production, development}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<IndexMap<String, Value>>,

    /// Per-file-pattern configuration applied on top of the base
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<Vec<OverrideBlock>>,

    /// Files never linted, gitignore-style
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_patterns: Option<Vec<String>>,
}

/// A configuration scoped to files matching `files`
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OverrideBlock {
    #[serde(deserialize_with = "deserialize_required_one_or_many")]
    #[schemars(with = "Vec<String>")]
    pub files: Vec<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<Vec<String>>")]
    pub excluded_files: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<IndexMap<String, bool>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub globals: Option<IndexMap<String, GlobalAccess>>,

    #[serde(
        default,
        deserialize_with = "deserialize_one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<Vec<String>>")]
    pub extends: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser_options: Option<ParserOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<IndexMap<String, Value>>,
}

/// Options handed to the selected parser
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParserOptions {
    /// ECMAScript edition, as a year (2021) or an edition number (12)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecma_version: Option<u32>,

    /// `script` or `module`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,

    /// Parser for embedded `<script>` blocks of component files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_file_extensions: Option<Vec<String>>,

    /// Parser-specific keys passed through untouched
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl LintConfig {
    /// Build a config from an in-memory JSON value
    pub fn from_json_value(value: Value, source_name: &str) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| {
            LintrcError::config_error(format!("Invalid configuration in {source_name}: {e}"))
        })
    }

    /// `root: true` was declared
    pub fn is_root(&self) -> bool {
        self.root.unwrap_or(false)
    }

    pub fn extends_list(&self) -> &[String] {
        self.extends.as_deref().unwrap_or_default()
    }

    pub fn override_blocks(&self) -> &[OverrideBlock] {
        self.overrides.as_deref().unwrap_or_default()
    }
}

impl ParserOptions {
    /// Later options win key by key
    pub fn merge_with(&mut self, later: &ParserOptions) {
        if later.ecma_version.is_some() {
            self.ecma_version = later.ecma_version;
        }
        if later.source_type.is_some() {
            self.source_type.clone_from(&later.source_type);
        }
        if later.parser.is_some() {
            self.parser.clone_from(&later.parser);
        }
        if let Some(extensions) = &later.extra_file_extensions {
            let merged = self.extra_file_extensions.get_or_insert_with(Vec::new);
            for ext in extensions {
                if !merged.contains(ext) {
                    merged.push(ext.clone());
                }
            }
        }
        for (key, value) in &later.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }

    /// `ecma_version` as a year; edition numbers 6..=15 map to 2015..=2024
    pub fn ecma_year(&self) -> Option<u32> {
        self.ecma_version.map(|v| match v {
            6..=15 => v + 2009,
            other => other,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Vec<String> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(one) => vec![one],
            OneOrMany::Many(many) => many,
        }
    }
}

fn deserialize_one_or_many<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<OneOrMany>::deserialize(deserializer)?.map(Vec::from))
}

fn deserialize_required_one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    OneOrMany::deserialize(deserializer).map(Vec::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extends_accepts_string_or_list() {
        let single: LintConfig =
            serde_json::from_value(json!({"extends": "eslint:recommended"})).unwrap();
        assert_eq!(single.extends_list(), ["eslint:recommended"]);

        let many: LintConfig =
            serde_json::from_value(json!({"extends": ["a", "b"]})).unwrap();
        assert_eq!(many.extends_list(), ["a", "b"]);

        let none: LintConfig = serde_json::from_value(json!({})).unwrap();
        assert!(none.extends_list().is_empty());
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let result = LintConfig::from_json_value(json!({"rulez": {}}), "test");
        assert!(matches!(result, Err(LintrcError::ConfigError { .. })));
    }

    #[test]
    fn test_override_files_required() {
        let result: std::result::Result<OverrideBlock, _> =
            serde_json::from_value(json!({"env": {"jest": true}}));
        assert!(result.is_err());

        let block: OverrideBlock =
            serde_json::from_value(json!({"files": "*.spec.ts", "excludedFiles": "*.d.ts"}))
                .unwrap();
        assert_eq!(block.files, vec!["*.spec.ts"]);
        assert_eq!(block.excluded_files, Some(vec!["*.d.ts".to_string()]));
    }

    #[test]
    fn test_parser_options_keep_extra_keys() {
        let options: ParserOptions = serde_json::from_value(json!({
            "ecmaVersion": 2021,
            "parser": "@typescript-eslint/parser",
            "ecmaFeatures": {"jsx": true}
        }))
        .unwrap();
        assert_eq!(options.ecma_version, Some(2021));
        assert_eq!(options.extra.get("ecmaFeatures"), Some(&json!({"jsx": true})));
    }

    #[test]
    fn test_parser_options_merge() {
        let mut base = ParserOptions {
            ecma_version: Some(2020),
            source_type: Some("module".to_string()),
            extra_file_extensions: Some(vec![".vue".to_string()]),
            ..Default::default()
        };
        let later = ParserOptions {
            ecma_version: Some(2021),
            parser: Some("@typescript-eslint/parser".to_string()),
            extra_file_extensions: Some(vec![".vue".to_string(), ".mdx".to_string()]),
            ..Default::default()
        };

        base.merge_with(&later);

        assert_eq!(base.ecma_version, Some(2021));
        assert_eq!(base.source_type.as_deref(), Some("module"));
        assert_eq!(base.parser.as_deref(), Some("@typescript-eslint/parser"));
        assert_eq!(base.extra_file_extensions.unwrap().len(), 2);
    }

    #[test]
    fn test_ecma_year_normalization() {
        let edition = ParserOptions {
            ecma_version: Some(12),
            ..Default::default()
        };
        assert_eq!(edition.ecma_year(), Some(2021));

        let year = ParserOptions {
            ecma_version: Some(2021),
            ..Default::default()
        };
        assert_eq!(year.ecma_year(), Some(2021));
    }
}
