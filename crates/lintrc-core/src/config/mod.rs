//! Configuration system for lintrc
//!
//! This module provides layered lint configuration with:
//! - JSON/JSONC, YAML and TOML configuration files
//! - Cascading discovery up the directory tree, stopped by `root: true`
//! - Presets and file references through the `extends` field
//! - Per-file overrides selected by glob patterns
//! - Strong typing with serde and JSON Schema generation via schemars
//!
//! ## Resolution
//!
//! A configuration is flattened into an ordered list of layers: everything
//! it extends (depth first, in declaration order), then its own settings,
//! then each override block. The effective configuration for a file is the
//! left fold of the unconditional layers and the override layers whose
//! patterns match, with later layers winning.
//!
//! ## Example Configuration
//!
//! ```jsonc
//! {
//!   "root": true,
//!   "env": { "browser": true, "es2021": true },
//!   "extends": ["plugin:vue/vue3-recommended", "eslint:recommended"],
//!   "rules": {
//!     "no-console": { "production": "warn", "development": "off" },
//!     "vue/html-indent": ["error", 2]
//!   },
//!   "overrides": [
//!     { "files": ["**/__tests__/*.{j,t}s?(x)"], "env": { "jest": true } }
//!   ]
//! }
//! ```

pub mod env;
pub mod glob;
mod lint_config;
mod loader;
mod preset;
mod resolve;
mod rule;
mod severity;
mod validate;

pub use env::{Environment, GlobalAccess};
pub use lint_config::{LintConfig, OverrideBlock, ParserOptions};
pub use loader::{CONFIG_FILE_NAMES, ConfigLoader, LoadOptions};
pub use preset::{CORE_RULES, Plugin, PresetRegistry};
pub use resolve::{ConfigArray, ConfigArrayBuilder, ConfigLayer, EffectiveConfig, LayerOrigin};
pub use rule::{BuildMode, RuleEntry, RuleSetting};
pub use severity::Severity;
pub use validate::{ConfigWarning, check_config_array};
