//! Layered resolution: config → ordered layers → effective config per file
//!
//! A [`ConfigArray`] is the flattened form of a configuration: every preset
//! in the extends chain, the config's own settings and each override block
//! become one [`ConfigLayer`], in precedence order. Resolving a file folds the
//! unconditional layers plus the override layers whose patterns match it,
//! left to right, so later layers win on conflicting keys.
//!
//! Layers that come from a cascaded config file are scoped to that file's
//! directory and only apply to files below it. A cascaded config declaring
//! `root: true` cuts off every scope above its own directory.

use super::env::{self, GlobalAccess};
use super::glob::{IgnoreMatcher, OverrideMatcher, normalize_lexically};
use super::lint_config::{LintConfig, OverrideBlock, ParserOptions};
use super::loader::ConfigLoader;
use super::preset::PresetRegistry;
use super::rule::{BuildMode, RuleEntry, RuleSetting};
use super::severity::Severity;
use crate::{LintrcError, Result};
use dashmap::DashMap;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

/// Where a layer came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerOrigin {
    Preset(String),
    File(PathBuf),
    /// Built in memory (e.g. the bundled project config)
    Inline(String),
}

impl fmt::Display for LayerOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerOrigin::Preset(name) => write!(f, "preset '{name}'"),
            LayerOrigin::File(path) => write!(f, "{}", path.display()),
            LayerOrigin::Inline(name) => write!(f, "{name}"),
        }
    }
}

/// One partial configuration in fold order
#[derive(Debug, Clone)]
pub struct ConfigLayer {
    /// e.g. `preset 'eslint:recommended'` or `.lintrc.json#overrides[0]`
    pub name: String,
    pub origin: LayerOrigin,
    /// All must match for the layer to apply; empty means unconditional
    pub conditions: Vec<OverrideMatcher>,
    /// Directory of the cascaded config file the layer belongs to;
    /// `None` applies everywhere
    pub scope: Option<PathBuf>,
    // one id per enclosing override block, outermost first
    condition_ids: Vec<usize>,
    pub env: IndexMap<String, bool>,
    pub globals: IndexMap<String, GlobalAccess>,
    pub plugins: Vec<String>,
    pub parser: Option<String>,
    pub parser_options: Option<ParserOptions>,
    pub rules: IndexMap<String, RuleSetting>,
    pub ignores: Option<IgnoreMatcher>,
}

impl ConfigLayer {
    pub fn is_conditional(&self) -> bool {
        !self.conditions.is_empty()
    }

    /// Neither scoped nor conditional
    fn is_universal(&self) -> bool {
        self.conditions.is_empty() && self.scope.is_none()
    }

    fn applies_to(&self, path: &Path, root_scopes: &[PathBuf]) -> bool {
        scope_covers(self.scope.as_deref(), path, root_scopes)
            && self.conditions.iter().all(|m| m.matches(path))
    }
}

/// Whether a layer scoped to `scope` covers `path`
///
/// A `root: true` config below `scope` that also contains `path` hides the
/// outer scope.
fn scope_covers(scope: Option<&Path>, path: &Path, root_scopes: &[PathBuf]) -> bool {
    let Some(scope) = scope else {
        return true;
    };
    path.starts_with(scope)
        && !root_scopes.iter().any(|root| {
            root.as_path() != scope && root.starts_with(scope) && path.starts_with(root)
        })
}

/// The override blocks enclosing a layer
#[derive(Debug, Clone, Default)]
struct Condition {
    matchers: Vec<OverrideMatcher>,
    ids: Vec<usize>,
}

/// The configuration in effect for one file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    pub env: BTreeMap<String, bool>,
    pub globals: BTreeMap<String, GlobalAccess>,
    pub parser: Option<String>,
    pub parser_options: ParserOptions,
    pub plugins: Vec<String>,
    pub rules: BTreeMap<String, RuleSetting>,
    /// Names of the override layers that applied
    pub matched_overrides: Vec<String>,
}

impl EffectiveConfig {
    pub fn rule(&self, rule_id: &str) -> Option<&RuleSetting> {
        self.rules.get(rule_id)
    }

    /// Severity of `rule_id`; rules nothing configured are off
    pub fn severity(&self, rule_id: &str) -> Severity {
        self.rules
            .get(rule_id)
            .map(|r| r.severity)
            .unwrap_or(Severity::Off)
    }

    pub fn enabled_rules(&self) -> impl Iterator<Item = (&String, &RuleSetting)> {
        self.rules.iter().filter(|(_, r)| r.severity.is_enabled())
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.rules.values().filter(|r| r.severity == severity).count()
    }

    pub fn is_global(&self, name: &str) -> bool {
        self.globals.contains_key(name)
    }
}

/// Accumulator for the left fold over layers
#[derive(Default)]
struct Fold {
    env: IndexMap<String, bool>,
    globals: IndexMap<String, GlobalAccess>,
    parser: Option<String>,
    parser_options: ParserOptions,
    plugins: Vec<String>,
    rules: BTreeMap<String, RuleSetting>,
    matched: Vec<String>,
}

impl Fold {
    fn apply(&mut self, layer: &ConfigLayer) {
        for (name, enabled) in &layer.env {
            self.env.insert(name.clone(), *enabled);
        }
        for (name, access) in &layer.globals {
            self.globals.insert(name.clone(), *access);
        }
        for plugin in &layer.plugins {
            if !self.plugins.contains(plugin) {
                self.plugins.push(plugin.clone());
            }
        }
        if layer.parser.is_some() {
            self.parser.clone_from(&layer.parser);
        }
        if let Some(options) = &layer.parser_options {
            self.parser_options.merge_with(options);
        }
        for (rule_id, setting) in &layer.rules {
            let merged = setting.merged_over(self.rules.get(rule_id));
            self.rules.insert(rule_id.clone(), merged);
        }
        if layer.is_conditional() {
            self.matched.push(layer.name.clone());
        }
    }

    fn finish(self) -> EffectiveConfig {
        let mut globals = env::globals_for(&self.env);
        for (name, access) in self.globals {
            if access == GlobalAccess::Off {
                globals.remove(&name);
            } else {
                globals.insert(name, access);
            }
        }

        let mut parser_options = self.parser_options;
        if parser_options.ecma_version.is_none() {
            parser_options.ecma_version = env::implied_ecma_version(&self.env);
        }

        EffectiveConfig {
            env: self.env.into_iter().collect(),
            globals,
            parser: self.parser,
            parser_options,
            plugins: self.plugins,
            rules: self.rules,
            matched_overrides: self.matched,
        }
    }
}

/// The immutable, resolved configuration for a lint run
///
/// Cheap to share across threads; effective configs are memoized by the
/// set of scoped and override layers that apply to a file.
#[derive(Debug)]
pub struct ConfigArray {
    layers: Vec<ConfigLayer>,
    root_dir: PathBuf,
    /// Directories of cascaded configs declaring `root: true`
    root_scopes: Vec<PathBuf>,
    mode: BuildMode,
    cache: DashMap<Vec<usize>, Arc<EffectiveConfig>>,
}

impl ConfigArray {
    pub fn builder<'a>(registry: &'a PresetRegistry, mode: BuildMode, root_dir: &Path) -> ConfigArrayBuilder<'a> {
        ConfigArrayBuilder {
            registry,
            mode,
            root_dir: normalize_lexically(root_dir),
            layers: Vec::new(),
            extends_stack: Vec::new(),
            scope: None,
            root_scopes: Vec::new(),
            next_condition_id: 0,
        }
    }

    pub fn layers(&self) -> &[ConfigLayer] {
        &self.layers
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    /// Absolute-or-root-relative, lexically normalized form of `path`
    pub fn normalize_path(&self, path: &Path) -> PathBuf {
        normalize_lexically(&self.root_dir.join(path))
    }

    /// Indices of the override layers that apply to `path`
    pub fn matching_overrides(&self, path: &Path) -> Vec<usize> {
        self.applicable_layers(path)
            .into_iter()
            .filter(|&index| self.layers[index].is_conditional())
            .collect()
    }

    /// Indices of the scoped or conditional layers that apply to `path`
    fn applicable_layers(&self, path: &Path) -> Vec<usize> {
        let normalized = self.normalize_path(path);
        self.layers
            .iter()
            .enumerate()
            .filter(|(_, layer)| {
                !layer.is_universal() && layer.applies_to(&normalized, &self.root_scopes)
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// The configuration in effect for `path`
    pub fn resolve(&self, path: impl AsRef<Path>) -> Arc<EffectiveConfig> {
        let key = self.applicable_layers(path.as_ref());
        if let Some(hit) = self.cache.get(&key) {
            trace!("Config cache hit for {}", path.as_ref().display());
            return Arc::clone(hit.value());
        }

        let effective = Arc::new(self.fold(&key));
        debug!(
            "Resolved config for {} ({} rules, {} overrides)",
            path.as_ref().display(),
            effective.rules.len(),
            effective.matched_overrides.len()
        );
        Arc::clone(self.cache.entry(key).or_insert(effective).value())
    }

    /// The configuration of the root directory before any override block is applied
    pub fn base_config(&self) -> EffectiveConfig {
        let scoped: Vec<usize> = self
            .layers
            .iter()
            .enumerate()
            .filter(|(_, layer)| {
                !layer.is_conditional()
                    && layer.scope.is_some()
                    && layer.applies_to(&self.root_dir, &self.root_scopes)
            })
            .map(|(index, _)| index)
            .collect();
        self.fold(&scoped)
    }

    /// Whether an `ignorePatterns` entry (or `node_modules`) excludes `path`
    pub fn is_ignored(&self, path: impl AsRef<Path>) -> bool {
        let normalized = self.normalize_path(path.as_ref());
        if normalized
            .components()
            .any(|c| c.as_os_str() == "node_modules")
        {
            return true;
        }
        self.layers
            .iter()
            .filter(|layer| scope_covers(layer.scope.as_deref(), &normalized, &self.root_scopes))
            .filter_map(|layer| layer.ignores.as_ref())
            .any(|ignores| ignores.is_ignored(&normalized))
    }

    /// Number of distinct effective configs computed so far
    pub fn cached_configs(&self) -> usize {
        self.cache.len()
    }

    /// Fold the universal layers plus the `applicable` ones
    fn fold(&self, applicable: &[usize]) -> EffectiveConfig {
        let mut fold = Fold::default();
        for (index, layer) in self.layers.iter().enumerate() {
            if layer.is_universal() || applicable.contains(&index) {
                fold.apply(layer);
            }
        }
        fold.finish()
    }
}

/// Flattens configs (and everything they extend) into layers
#[derive(Debug)]
pub struct ConfigArrayBuilder<'a> {
    registry: &'a PresetRegistry,
    mode: BuildMode,
    root_dir: PathBuf,
    layers: Vec<ConfigLayer>,
    extends_stack: Vec<String>,
    /// Scope given to layers while a cascaded file is pushed
    scope: Option<PathBuf>,
    root_scopes: Vec<PathBuf>,
    next_condition_id: usize,
}

impl ConfigArrayBuilder<'_> {
    /// Append a config loaded from `path` that applies to every file;
    /// its patterns are relative to its directory
    pub fn add_file(mut self, path: &Path, config: &LintConfig) -> Result<Self> {
        self.push_file(path, config)?;
        Ok(self)
    }

    /// Append a config found by cascading discovery
    ///
    /// Its layers (including everything it extends) only apply to files
    /// below its directory. Add outer configs before inner ones.
    pub fn add_cascaded_file(mut self, path: &Path, config: &LintConfig) -> Result<Self> {
        let dir = self.file_dir(path);
        if config.is_root() {
            self.root_scopes.push(dir.clone());
        }
        self.scope = Some(dir);
        let result = self.push_file(path, config);
        self.scope = None;
        result.map(|()| self)
    }

    /// Append an in-memory config whose patterns are relative to the root dir
    pub fn add_inline(mut self, name: &str, config: &LintConfig) -> Result<Self> {
        let origin = LayerOrigin::Inline(name.to_string());
        let base_dir = self.root_dir.clone();
        self.extends_stack.push(name.to_string());
        self.push_config(config, &origin, &base_dir, &Condition::default())?;
        self.extends_stack.pop();
        Ok(self)
    }

    /// Validate rule ids against loaded plugins and freeze the layers
    ///
    /// A rule may only name a plugin loaded by a layer that is in effect
    /// whenever the rule's own layer is: an unconditional layer, or one on
    /// the same chain of override blocks, covering the rule's directory.
    pub fn build(self) -> Result<ConfigArray> {
        for layer in &self.layers {
            let missing = layer
                .plugins
                .iter()
                .find(|p| self.registry.plugin(p.as_str()).is_none());
            if let Some(plugin) = missing {
                return Err(LintrcError::config_error(format!(
                    "Failed to load plugin '{plugin}' declared in {}",
                    layer.origin
                )));
            }
        }

        // rules switched off never run, so they may name plugins that are not loaded
        for layer in &self.layers {
            let mut loaded: Option<Vec<&str>> = None;
            for (rule_id, setting) in &layer.rules {
                if !setting.severity.is_enabled() {
                    continue;
                }
                let plugins = loaded.get_or_insert_with(|| self.plugins_visible_to(layer));
                if !self.registry.is_known_rule(rule_id, plugins.as_slice()) {
                    return Err(LintrcError::unknown_rule(rule_id, layer.origin.to_string()));
                }
            }
        }

        debug!(
            "Built config array with {} layers ({} overrides), mode {}",
            self.layers.len(),
            self.layers.iter().filter(|l| l.is_conditional()).count(),
            self.mode
        );

        Ok(ConfigArray {
            layers: self.layers,
            root_dir: self.root_dir,
            root_scopes: self.root_scopes,
            mode: self.mode,
            cache: DashMap::new(),
        })
    }

    fn plugins_visible_to(&self, layer: &ConfigLayer) -> Vec<&str> {
        let mut plugins: Vec<&str> = Vec::new();
        for other in &self.layers {
            let same_chain = layer.condition_ids.starts_with(&other.condition_ids);
            let covers = match (&other.scope, &layer.scope) {
                (None, _) => true,
                (Some(_), None) => false,
                (Some(outer), Some(inner)) => {
                    scope_covers(Some(outer.as_path()), inner, &self.root_scopes)
                }
            };
            if !same_chain || !covers {
                continue;
            }
            for plugin in &other.plugins {
                if !plugins.contains(&plugin.as_str()) {
                    plugins.push(plugin);
                }
            }
        }
        plugins
    }

    fn push_file(&mut self, path: &Path, config: &LintConfig) -> Result<()> {
        let base_dir = self.file_dir(path);
        let origin = LayerOrigin::File(path.to_path_buf());
        self.extends_stack.push(path.display().to_string());
        let result = self.push_config(config, &origin, &base_dir, &Condition::default());
        self.extends_stack.pop();
        result
    }

    fn file_dir(&self, path: &Path) -> PathBuf {
        let dir = path
            .parent()
            .map(|p| self.root_dir.join(p))
            .unwrap_or_else(|| self.root_dir.clone());
        normalize_lexically(&dir)
    }

    fn push_config(
        &mut self,
        config: &LintConfig,
        origin: &LayerOrigin,
        base_dir: &Path,
        condition: &Condition,
    ) -> Result<()> {
        for name in config.extends_list() {
            self.push_extended(name, origin, base_dir, condition)?;
        }

        let source = origin.to_string();
        let ignores = match &config.ignore_patterns {
            Some(patterns) if !patterns.is_empty() => Some(IgnoreMatcher::new(base_dir, patterns)?),
            _ => None,
        };
        let env = checked_env(config.env.as_ref(), &source)?;
        let rules = self.select_rules(config.rules.as_ref(), &source)?;
        self.layers.push(ConfigLayer {
            name: source,
            origin: origin.clone(),
            conditions: condition.matchers.clone(),
            scope: self.scope.clone(),
            condition_ids: condition.ids.clone(),
            env,
            globals: config.globals.clone().unwrap_or_default(),
            plugins: config.plugins.clone().unwrap_or_default(),
            parser: config.parser.clone(),
            parser_options: config.parser_options.clone(),
            rules,
            ignores,
        });

        for (index, block) in config.override_blocks().iter().enumerate() {
            self.push_override(block, index, origin, base_dir, condition)?;
        }
        Ok(())
    }

    fn push_override(
        &mut self,
        block: &OverrideBlock,
        index: usize,
        origin: &LayerOrigin,
        base_dir: &Path,
        outer: &Condition,
    ) -> Result<()> {
        let excluded = block.excluded_files.clone().unwrap_or_default();
        let mut condition = outer.clone();
        condition
            .matchers
            .push(OverrideMatcher::new(base_dir, &block.files, &excluded)?);
        condition.ids.push(self.next_condition_id);
        self.next_condition_id += 1;

        let name = format!("{origin}#overrides[{index}]");

        if let Some(extends) = &block.extends {
            for preset in extends {
                self.push_extended(preset, origin, base_dir, &condition)?;
            }
        }

        let env = checked_env(block.env.as_ref(), &name)?;
        let rules = self.select_rules(block.rules.as_ref(), &name)?;
        self.layers.push(ConfigLayer {
            name,
            origin: origin.clone(),
            conditions: condition.matchers,
            scope: self.scope.clone(),
            condition_ids: condition.ids,
            env,
            globals: block.globals.clone().unwrap_or_default(),
            plugins: block.plugins.clone().unwrap_or_default(),
            parser: block.parser.clone(),
            parser_options: block.parser_options.clone(),
            rules,
            ignores: None,
        });
        Ok(())
    }

    fn push_extended(
        &mut self,
        name: &str,
        from: &LayerOrigin,
        base_dir: &Path,
        condition: &Condition,
    ) -> Result<()> {
        if let Some(preset) = self.registry.preset(name) {
            let preset = preset.clone();
            return self.with_extends_guard(name, |builder| {
                let origin = LayerOrigin::Preset(name.to_string());
                builder.push_config(&preset, &origin, base_dir, condition)
            });
        }

        if is_file_reference(name) {
            let path = normalize_lexically(&base_dir.join(name));
            let key = path.display().to_string();
            let config = ConfigLoader::load_from_file(&path)?;
            let file_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            return self.with_extends_guard(&key, |builder| {
                builder.push_config(&config, &LayerOrigin::File(path.clone()), &file_dir, condition)
            });
        }

        Err(LintrcError::unresolvable_preset(name, from.to_string()))
    }

    fn with_extends_guard(
        &mut self,
        key: &str,
        push: impl FnOnce(&mut Self) -> Result<()>,
    ) -> Result<()> {
        if self.extends_stack.iter().any(|entry| entry == key) {
            let mut chain = self.extends_stack.clone();
            chain.push(key.to_string());
            return Err(LintrcError::CircularExtends {
                chain: chain.join(" -> "),
            });
        }
        self.extends_stack.push(key.to_string());
        let result = push(self);
        self.extends_stack.pop();
        result
    }

    fn select_rules(
        &self,
        rules: Option<&IndexMap<String, Value>>,
        source: &str,
    ) -> Result<IndexMap<String, RuleSetting>> {
        let Some(rules) = rules else {
            return Ok(IndexMap::new());
        };
        rules
            .iter()
            .map(|(rule_id, value)| {
                let entry = RuleEntry::parse(rule_id, value, source)?;
                Ok((rule_id.clone(), entry.select(self.mode).clone()))
            })
            .collect()
    }
}

fn checked_env(env: Option<&IndexMap<String, bool>>, source: &str) -> Result<IndexMap<String, bool>> {
    let Some(env) = env else {
        return Ok(IndexMap::new());
    };
    if let Some(unknown) = env.keys().find(|name| env::lookup(name).is_none() || *name == "builtin") {
        return Err(LintrcError::unknown_environment(unknown, source));
    }
    Ok(env.clone())
}

fn is_file_reference(name: &str) -> bool {
    name.starts_with("./")
        || name.starts_with("../")
        || name.starts_with('/')
        || [".json", ".jsonc", ".yaml", ".yml", ".toml"]
            .iter()
            .any(|ext| name.ends_with(ext))
}
