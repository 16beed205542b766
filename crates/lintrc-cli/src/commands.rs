//! Command implementations

use lintrc_core::config::{CONFIG_FILE_NAMES, CORE_RULES, LayerOrigin};
use lintrc_core::project::vue_typescript_app_value;
use lintrc_core::{
    BuildMode, ConfigArray, ConfigLoader, LintConfig, LintrcError, LoadOptions, PresetRegistry,
    Result, ResultExt, check_config_array,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::output::{OutputFormatter, ResolvedFile};
use crate::{ConfigFormat, OutputFormat};

/// Print config command implementation
pub fn print_config_command(
    files: Vec<PathBuf>,
    format: OutputFormat,
    mode: BuildMode,
    config_path: Option<PathBuf>,
    use_colors: bool,
) -> Result<()> {
    debug!("Printing config for {} file(s) in {} mode", files.len(), mode);

    let registry = PresetRegistry::builtin()?;
    let array = load_config_array(config_path, mode, &registry)?;

    let resolved: Vec<ResolvedFile> = files
        .par_iter()
        .map(|file| {
            let config = (!array.is_ignored(file)).then(|| array.resolve(file));
            ResolvedFile {
                path: file.clone(),
                config,
            }
        })
        .collect();

    debug!(
        "Resolved {} file(s) into {} distinct configuration(s)",
        resolved.len(),
        array.cached_configs()
    );

    OutputFormatter::new(format, use_colors).print_resolved(&resolved, mode)
}

/// Config init command implementation
pub fn config_init_command(format: ConfigFormat, force: bool) -> Result<()> {
    debug!("Initializing configuration file with format: {:?}", format);

    let filename = match format {
        ConfigFormat::Json => ".lintrc.json",
        ConfigFormat::Yaml => ".lintrc.yaml",
        ConfigFormat::Toml => ".lintrc.toml",
    };
    let config_path = PathBuf::from(filename);

    if config_path.exists() && !force {
        error!(
            "Configuration file '{}' already exists. Use --force to overwrite.",
            filename
        );
        return Err(LintrcError::config_error(format!(
            "Configuration file '{filename}' already exists"
        )));
    }

    let config = vue_typescript_app_value();
    let content = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(&config)
            .map(|json| json + "\n")
            .map_err(|e| LintrcError::internal_error(format!("Failed to serialize JSON: {e}")))?,
        ConfigFormat::Yaml => serde_yaml::to_string(&config)
            .map_err(|e| LintrcError::internal_error(format!("Failed to serialize YAML: {e}")))?,
        ConfigFormat::Toml => toml::to_string_pretty(&config)
            .map_err(|e| LintrcError::internal_error(format!("Failed to serialize TOML: {e}")))?,
    };

    std::fs::write(&config_path, content).map_err(|e| LintrcError::io_error(&config_path, e))?;

    println!("✅ Created configuration file: {filename}");
    println!("   It holds the Vue + TypeScript application rules; edit it to customize them.");

    Ok(())
}

/// Config validate command implementation
pub fn config_validate_command(path: Option<PathBuf>, mode: BuildMode) -> Result<()> {
    debug!("Validating configuration: {:?}", path);

    let registry = PresetRegistry::builtin()?;
    let array = match load_config_array(path.clone(), mode, &registry) {
        Ok(array) => array,
        Err(e) => {
            error!("❌ Configuration validation failed: {}", e);
            return Err(e);
        }
    };

    let project_root = match &path {
        Some(p) => absolute(p)?
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| array.root_dir().to_path_buf()),
        None => array.root_dir().to_path_buf(),
    };
    let warnings = check_config_array(&array, &project_root)
        .log_and_continue()
        .unwrap_or_default();

    let overrides = array.layers().iter().filter(|l| l.is_conditional()).count();
    let base = array.base_config();
    println!("✅ Configuration is valid");
    println!("   Mode: {mode}");
    println!("   Layers: {} ({overrides} overrides)", array.layers().len());
    println!("   Rules enabled: {}", base.enabled_rules().count());

    for warning in &warnings {
        println!("⚠️  {warning}");
    }

    Ok(())
}

/// Config show command implementation
pub fn config_show_command(
    resolved: bool,
    mode: BuildMode,
    config_path: Option<PathBuf>,
    use_colors: bool,
) -> Result<()> {
    debug!("Showing configuration (resolved: {})", resolved);

    if resolved {
        let registry = PresetRegistry::builtin()?;
        let array = load_config_array(config_path, mode, &registry)?;
        return OutputFormatter::new(OutputFormat::Human, use_colors).print_layers(&array);
    }

    let files = match config_path {
        Some(path) => {
            let config = ConfigLoader::load_from_file(&path)?;
            vec![(path, config)]
        }
        None => ConfigLoader::discover_all(&std::env::current_dir()?)?,
    };

    if files.is_empty() {
        return Err(LintrcError::config_error(format!(
            "No config file found ({})",
            CONFIG_FILE_NAMES.join(", ")
        )));
    }

    for (path, config) in &files {
        println!("# {}", path.display());
        println!("{}", to_pretty_json(config)?);
    }

    Ok(())
}

/// Config schema command implementation
pub fn config_schema_command() -> Result<()> {
    let schema = schemars::schema_for!(LintConfig);
    println!("{}", to_pretty_json(&schema)?);
    Ok(())
}

/// Presets command implementation
pub fn presets_command(detailed: bool) -> Result<()> {
    let registry = PresetRegistry::builtin()?;

    println!("Built-in Presets:");
    println!("=================");

    let mut count = 0;
    for name in registry.preset_names() {
        count += 1;
        let Some(preset) = registry.preset(name) else {
            continue;
        };
        if !detailed {
            println!("  {name}");
            continue;
        }

        println!("\n{name}");
        if !preset.extends_list().is_empty() {
            println!("  Extends: {}", preset.extends_list().join(", "));
        }
        if let Some(plugins) = &preset.plugins {
            println!("  Plugins: {}", plugins.join(", "));
        }
        if let Some(parser) = &preset.parser {
            println!("  Parser: {parser}");
        }
        let rules = preset.rules.as_ref().map_or(0, |r| r.len());
        println!("  Rules: {rules}");
        if !preset.override_blocks().is_empty() {
            println!("  Overrides: {}", preset.override_blocks().len());
        }
    }

    println!("\nTotal: {count} presets");
    Ok(())
}

/// Rules command implementation
pub fn rules_command(plugin: Option<String>) -> Result<()> {
    let registry = PresetRegistry::builtin()?;

    let groups: Vec<(&str, &[&str])> = match plugin.as_deref() {
        None => std::iter::once(("core", CORE_RULES))
            .chain(registry.plugins().map(|p| (p.name, p.rules)))
            .collect(),
        Some("core") => vec![("core", CORE_RULES)],
        Some(name) => {
            let found = registry
                .plugin(name)
                .ok_or_else(|| LintrcError::config_error(format!("Unknown plugin '{name}'")))?;
            vec![(found.name, found.rules)]
        }
    };

    let mut count = 0;
    for (name, rules) in groups {
        println!("{name} ({} rules)", rules.len());
        for rule in rules {
            println!("  {rule}");
        }
        count += rules.len();
    }

    println!("\nTotal: {count} rules");
    Ok(())
}

/// Load the config array from an explicit file, or discover it from the current directory
fn load_config_array(
    config_path: Option<PathBuf>,
    mode: BuildMode,
    registry: &PresetRegistry,
) -> Result<ConfigArray> {
    let mut options = LoadOptions::new(std::env::current_dir()?, mode);
    if let Some(path) = config_path {
        options = options.with_config_path(path);
    }
    let array = ConfigLoader::build(&options, registry)?;

    let files: Vec<String> = array
        .layers()
        .iter()
        .filter_map(|layer| match &layer.origin {
            LayerOrigin::File(path) => Some(path.display().to_string()),
            _ => None,
        })
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();
    debug!("Configuration loaded from: {}", files.join(", "));

    Ok(array)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(path))
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| LintrcError::internal_error(format!("Failed to serialize config: {e}")))
}
