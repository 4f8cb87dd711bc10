use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{Config, DatabaseSettings, Logging, Pagination, ServerSettings};

/// The file read when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for environment overrides, e.g. `STOCKSCOPE__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "STOCKSCOPE";

/// Loads the application configuration.
///
/// Sources, lowest priority first: built-in defaults, the TOML file (`path`, or
/// `config.toml` in the working directory), then `STOCKSCOPE__*` environment
/// variables. A missing default file is not an error; a missing explicit file is.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(port = config.server.port, "Configuration loaded.");
    Ok(config)
}

impl Config {
    /// Rejects settings the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "must be non-zero"));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::invalid(
                "database.max_connections",
                "must be at least 1",
            ));
        }
        if self.pagination.max_limit < 1 {
            return Err(ConfigError::invalid("pagination.max_limit", "must be at least 1"));
        }
        if self.pagination.default_limit < 1 {
            return Err(ConfigError::invalid(
                "pagination.default_limit",
                "must be at least 1",
            ));
        }
        if self.pagination.default_limit > self.pagination.max_limit {
            return Err(ConfigError::invalid(
                "pagination.default_limit",
                format!(
                    "{} exceeds pagination.max_limit ({})",
                    self.pagination.default_limit, self.pagination.max_limit
                ),
            ));
        }
        Ok(())
    }
}

/// Command-line flag for choosing a configuration file.
#[cfg(feature = "clap")]
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Path to a TOML configuration file (defaults to ./config.toml if present).
    #[arg(long, short, global = true)]
    pub config: Option<std::path::PathBuf>,
}

#[cfg(feature = "clap")]
impl ConfigArgs {
    pub fn load(&self) -> Result<Config, ConfigError> {
        load_config(self.config.as_deref())
    }
}
