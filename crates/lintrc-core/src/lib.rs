#![recursion_limit = "256"]
//! lintrc core
//!
//! Loads, validates and resolves layered lint configurations: presets
//! chained through `extends`, config files cascading up the directory tree,
//! and per-file override blocks. The result is a [`ConfigArray`] that
//! answers "which rules, environments and parser apply to this file".

pub mod config;
pub mod error;
pub mod project;
pub mod result;

// Re-export commonly used types
pub use config::{
    BuildMode, ConfigArray, ConfigLoader, ConfigWarning, EffectiveConfig, LintConfig, LoadOptions,
    PresetRegistry, RuleSetting, Severity, check_config_array,
};
pub use error::{ErrorKind, LintrcError};
pub use result::{Result, ResultExt};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(default_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Initialize tracing with newline-delimited JSON events on stderr
pub fn init_json_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(default_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn default_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lintrc=info,lintrc_core=info"))
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
