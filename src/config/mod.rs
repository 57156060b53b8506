pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_socket_addr, Validate};

pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_MODEL_PATH: &str = "models/churn_pipeline.json";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Fully resolved server settings: CLI flags win over the config file, the
/// config file wins over built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub model_path: String,
    pub bind: String,
}

impl ServerSettings {
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        Ok(Self {
            model_path: cli
                .model_path
                .clone()
                .or_else(|| file.model_path().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string()),
            bind: cli
                .bind
                .clone()
                .or_else(|| file.bind().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        })
    }
}

impl Validate for ServerSettings {
    fn validate(&self) -> Result<()> {
        validate_path("model_path", &self.model_path)?;
        validate_socket_addr("bind", &self.bind)?;
        Ok(())
    }
}

impl ConfigProvider for ServerSettings {
    fn model_path(&self) -> &str {
        &self.model_path
    }

    fn bind_addr(&self) -> &str {
        &self.bind
    }
}
