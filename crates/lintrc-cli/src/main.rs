//! lintrc CLI
//!
//! Command-line interface for inspecting and validating layered lint configurations

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use lintrc_core::{BuildMode, Result, init_json_tracing, init_tracing};
use std::io;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "lintrc")]
#[command(about = "lintrc: resolve, validate and inspect layered lint configurations")]
#[command(version = lintrc_core::VERSION)]
#[command(
    long_about = "lintrc loads eslintrc-style configuration (presets, cascading config files and\n\
per-file overrides) and shows the configuration that applies to each file.\n\
\n\
Examples:\n  \
lintrc print-config src/App.vue          # Effective config for one file\n  \
lintrc --mode production print-config src/main.ts\n  \
lintrc config validate                   # Check the discovered configuration\n  \
lintrc config init --format yaml         # Write the application config\n  \
lintrc rules --plugin vue                # List the vue plugin's rules"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        help = "Path to configuration file (disables cascading discovery)"
    )]
    config: Option<PathBuf>,

    /// Build mode for mode-conditional rules
    #[arg(
        short,
        long,
        global = true,
        value_parser = parse_build_mode,
        help = "Build mode: production or development (default: from NODE_ENV)"
    )]
    mode: Option<BuildMode>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log line format
    #[arg(
        long,
        global = true,
        env = "LINTRC_LOG_FORMAT",
        default_value = "text",
        help = "Format of log output on stderr"
    )]
    log_format: LogFormat,

    /// Number of threads to use for parallel processing
    #[arg(
        short = 'j',
        long,
        global = true,
        help = "Number of threads (default: number of CPU cores)"
    )]
    threads: Option<usize>,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective configuration for one or more files
    #[command(alias = "print")]
    PrintConfig {
        #[arg(required = true, help = "Files to resolve the configuration for")]
        files: Vec<PathBuf>,

        #[arg(short, long, default_value = "human", help = "Output format")]
        format: OutputFormat,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// List the built-in presets
    Presets {
        #[arg(long, help = "Show what each preset extends and configures")]
        detailed: bool,
    },

    /// List known rules
    Rules {
        #[arg(long, help = "Only list rules of this plugin ('core' for built-in rules)")]
        plugin: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the application configuration to a new config file
    Init {
        #[arg(long, default_value = "json", help = "Configuration file format")]
        format: ConfigFormat,

        #[arg(long, help = "Overwrite existing configuration file")]
        force: bool,
    },

    /// Validate a configuration file and check its override patterns
    Validate {
        #[arg(help = "Path to configuration file (default: discover from current directory)")]
        path: Option<PathBuf>,
    },

    /// Show the configuration files in effect
    Show {
        #[arg(long, help = "Show the layers and the base configuration after inheritance")]
        resolved: bool,
    },

    /// Print the JSON Schema of configuration files
    Schema,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Human,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogFormat {
    Text,
    Json,
}

fn parse_build_mode(s: &str) -> std::result::Result<BuildMode, String> {
    s.parse()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return Ok(());
    }

    if !cli.no_color && std::env::var("NO_COLOR").is_err() {
        colored::control::set_override(true);
    } else {
        colored::control::set_override(false);
    }

    // Initialize tracing based on verbosity
    let level = match cli.verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    };
    unsafe {
        std::env::set_var("RUST_LOG", format!("lintrc={level},lintrc_core={level}"));
    }
    match cli.log_format {
        LogFormat::Text => init_tracing(),
        LogFormat::Json => init_json_tracing(),
    }

    if let Some(threads) = cli.threads
        && let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
    {
        error!("Failed to set thread pool size: {}", e);
        std::process::exit(1);
    }

    match run_command(cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("lintrc failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn run_command(cli: Cli) -> Result<()> {
    let mode = cli.mode.unwrap_or_else(BuildMode::from_env);
    let use_colors = !cli.no_color;

    match cli.command {
        Some(Commands::PrintConfig { files, format }) => {
            commands::print_config_command(files, format, mode, cli.config, use_colors)
        }

        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { format, force } => commands::config_init_command(format, force),
            ConfigAction::Validate { path } => {
                commands::config_validate_command(path.or(cli.config), mode)
            }
            ConfigAction::Show { resolved } => {
                commands::config_show_command(resolved, mode, cli.config, use_colors)
            }
            ConfigAction::Schema => commands::config_schema_command(),
        },

        Some(Commands::Presets { detailed }) => commands::presets_command(detailed),

        Some(Commands::Rules { plugin }) => commands::rules_command(plugin),

        None => {
            // No subcommand provided, show help
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
