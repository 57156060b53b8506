pub mod pipeline;
pub mod service;
pub mod validator;

pub use crate::domain::model::{ChurnLabel, CustomerRecord, Prediction};
pub use crate::domain::ports::{ChurnModel, ConfigProvider};
pub use crate::utils::error::Result;
