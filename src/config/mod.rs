//! Tries to create an `AppConfig` from config files and the environment.
//! Layers `base.toml`, the environment specific file and `APP_` prefixed env variables with `figment`.
//! Gets initialized with `OnceLock` so it only needs to get initialized once.

mod error;
mod types;

use std::{path::Path, sync::OnceLock};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use tracing::info;

// Re-export config structs
pub use error::{ConfigError, ConfigResult};
pub use types::{AppConfig, Environment, NetConfig, StoreConfig};

/// Allocates a static `OnceLock` containing `AppConfig`.
/// This ensures configuration only gets initialized the first time we call this function.
/// Every other caller gets a &'static ref to AppConfig.
/// Panics if anything goes wrong.
pub fn get_or_init_config() -> &'static AppConfig {
    static CONFIG_INIT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG_INIT.get_or_init(|| {
        info!("{:<20} - Initializing the configuration", "get_or_init_config");
        let base_path = std::env::current_dir().expect("Failed to determine the current DIR.");
        let config_dir = base_path.join("config");

        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .unwrap_or_else(|er| panic!("Fatal Error: Parsing APP_ENVIRONMENT: {er}"));

        AppConfig::load(&config_dir, &environment)
            .unwrap_or_else(|er| panic!("Fatal Error: Building config: {er}"))
    })
}

impl AppConfig {
    /// Merges `base.toml`, `<environment>.toml` from `config_dir` and the `APP_` environment variables,
    /// later sources overriding earlier ones.
    pub fn load(config_dir: &Path, environment: &Environment) -> ConfigResult<Self> {
        let environment_filename = format!("{}.toml", environment.as_ref().to_lowercase());

        let config = Figment::new()
            .merge(Toml::file(config_dir.join("base.toml")))
            .merge(Toml::file(config_dir.join(environment_filename)))
            .merge(Env::prefixed("APP_").split("__"))
            .extract()?;

        Ok(config)
    }
}
