//! The configuration structs used to build the AppConfig, and their impls.
use std::path::PathBuf;

use serde::Deserialize;
use strum_macros::AsRefStr;

use crate::config::ConfigError;

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub store_config: StoreConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

/// Where the subscriber list lives on disk.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub file_name: String,
}

// ###################################
// ->   IMPLs
// ###################################
impl StoreConfig {
    pub fn subscribers_file(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

// ###################################
// ->   TRY FROMs
// ###################################
impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail(value)),
        }
    }
}
