use crate::error::ConfigError;
use config::builder::DefaultState;
use config::ConfigBuilder;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{BonusTiers, Config, LoggingSettings, OutputFormat, ReportSettings};

/// Loads the application configuration from `config.toml` and the environment.
///
/// The file is optional. Environment variables prefixed with `SALES_` override
/// it, using `__` to separate nested keys (`SALES_REPORT__TOP_PRODUCTS_LIMIT=5`).
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new("config.toml"))
}

/// Same as [`load_config`], reading the given file instead of `config.toml`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false));
    finalize(builder)
}

/// Layers the environment over `builder`, deserializes and validates.
fn finalize(builder: ConfigBuilder<DefaultState>) -> Result<Config, ConfigError> {
    let settings = builder
        .add_source(
            config::Environment::with_prefix("SALES")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = settings.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}
