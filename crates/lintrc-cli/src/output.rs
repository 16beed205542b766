//! Output formatting and reporting
//!
//! Renders effective configurations and config layers for the terminal or as JSON

use colored::*;
use lintrc_core::{BuildMode, ConfigArray, EffectiveConfig, LintrcError, Result, Severity};
use std::path::PathBuf;
use std::sync::Arc;

use crate::OutputFormat;

/// The effective configuration of one requested file
#[derive(Debug, Clone)]
pub struct ResolvedFile {
    pub path: PathBuf,
    /// `None` when the file is ignored
    pub config: Option<Arc<EffectiveConfig>>,
}

/// Output formatter for different formats
pub struct OutputFormatter {
    format: OutputFormat,
    use_colors: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, use_colors: bool) -> Self {
        Self { format, use_colors }
    }

    /// Print the effective configuration of each file
    pub fn print_resolved(&self, files: &[ResolvedFile], mode: BuildMode) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                self.print_resolved_human(files, mode);
                Ok(())
            }
            OutputFormat::Json => self.print_resolved_json(files),
        }
    }

    /// Print every layer of the array in fold order, then the base configuration
    pub fn print_layers(&self, array: &ConfigArray) -> Result<()> {
        println!("{}", "Layers:".bold());
        for (index, layer) in array.layers().iter().enumerate() {
            let rules = layer.rules.len();
            if layer.is_conditional() {
                let patterns: Vec<&str> = layer
                    .conditions
                    .iter()
                    .flat_map(|m| m.files().sources())
                    .map(String::as_str)
                    .collect();
                println!(
                    "  {index:>3}  {}  ({rules} rules, files: {})",
                    layer.name,
                    patterns.join(" ")
                );
            } else {
                println!("  {index:>3}  {}  ({rules} rules)", layer.name);
            }
        }

        println!("\n{} ({} mode)", "Base configuration:".bold(), array.mode());
        let json = serde_json::to_string_pretty(&array.base_config())
            .map_err(|e| LintrcError::internal_error(format!("Failed to serialize config: {e}")))?;
        println!("{json}");
        Ok(())
    }

    fn print_resolved_human(&self, files: &[ResolvedFile], mode: BuildMode) {
        for (i, file) in files.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{}", file.path.display().to_string().bold());

            let Some(config) = &file.config else {
                println!("  {}", "ignored by ignorePatterns".dimmed());
                continue;
            };
            self.print_config_human(config, mode);
        }
    }

    fn print_config_human(&self, config: &EffectiveConfig, mode: BuildMode) {
        println!("  Mode: {mode}");
        if let Some(parser) = &config.parser {
            println!("  Parser: {parser}");
        }
        if let Some(parser) = &config.parser_options.parser {
            println!("  Script parser: {parser}");
        }
        if let Some(version) = config.parser_options.ecma_year() {
            println!("  ECMAScript: {version}");
        }

        let envs: Vec<&str> = config
            .env
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(name, _)| name.as_str())
            .collect();
        if !envs.is_empty() {
            println!("  Environments: {}", envs.join(", "));
        }
        if !config.plugins.is_empty() {
            println!("  Plugins: {}", config.plugins.join(", "));
        }
        if !config.matched_overrides.is_empty() {
            println!("  Overrides: {}", config.matched_overrides.join(", "));
        }

        let errors = config.count_by_severity(Severity::Error);
        let warnings = config.count_by_severity(Severity::Warn);
        println!(
            "  Rules: {} enabled ({} errors, {} warnings), {} off",
            errors + warnings,
            self.paint(errors.to_string(), Severity::Error),
            self.paint(warnings.to_string(), Severity::Warn),
            config.count_by_severity(Severity::Off)
        );

        for (rule_id, setting) in config.enabled_rules() {
            let label = self.paint(format!("{:<5}", setting.severity.as_str()), setting.severity);
            if setting.options.is_empty() {
                println!("    {label}  {rule_id}");
            } else {
                let options: Vec<String> =
                    setting.options.iter().map(|o| o.to_string()).collect();
                println!("    {label}  {rule_id}  {}", options.join(" ").dimmed());
            }
        }
    }

    fn print_resolved_json(&self, files: &[ResolvedFile]) -> Result<()> {
        let mut output = serde_json::Map::new();
        for file in files {
            let value = match &file.config {
                Some(config) => serde_json::to_value(config.as_ref()).map_err(|e| {
                    LintrcError::internal_error(format!("Failed to serialize config: {e}"))
                })?,
                None => serde_json::Value::Null,
            };
            output.insert(file.path.display().to_string(), value);
        }

        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| LintrcError::internal_error(format!("Failed to serialize JSON: {e}")))?;
        println!("{json}");
        Ok(())
    }

    fn paint(&self, text: String, severity: Severity) -> ColoredString {
        if !self.use_colors {
            return text.normal();
        }
        match severity {
            Severity::Error => text.red().bold(),
            Severity::Warn => text.yellow(),
            Severity::Off => text.dimmed(),
        }
    }
}
