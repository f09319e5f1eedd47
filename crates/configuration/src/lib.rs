use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    Config, DashboardSettings, LogFormat, LoggingSettings, PayloadFiles, SourceKind, SourceSettings,
};

/// Prefix for environment overrides, e.g. `INSIGHTS__SOURCE__BASE_URL`.
pub const ENV_PREFIX: &str = "INSIGHTS";

/// Loads the application configuration.
///
/// Sources, later ones overriding earlier ones:
/// 1. `path` if given (must exist), otherwise `config.toml` in the working
///    directory if present.
/// 2. Environment variables prefixed with `INSIGHTS__`, using `__` between
///    nested keys.
///
/// The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config.toml").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
