use crate::utils::error::{Result, ServeError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub model: Option<ModelSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSection {
    pub path: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ServeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ServeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn bind(&self) -> Option<&str> {
        self.server.as_ref()?.bind.as_deref()
    }

    pub fn model_path(&self) -> Option<&str> {
        self.model.as_ref()?.path.as_deref()
    }
}
