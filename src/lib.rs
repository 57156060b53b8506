pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use crate::config::{CliConfig, ServerSettings, TomlConfig};
pub use crate::core::pipeline::LogisticPipeline;
pub use crate::core::service::InferenceService;
pub use crate::core::validator;
pub use crate::domain::model::{ChurnLabel, CustomerRecord, Prediction};
pub use crate::domain::ports::{ChurnModel, ConfigProvider};
pub use crate::utils::error::{Result, ServeError};
