//! Inference service: the one owner of the pipeline handle.
//!
//! The handle is injected at construction and never replaced. When the
//! artifact cannot be loaded at startup the service comes up degraded: it
//! stays reachable and answers every prediction with `ModelUnavailable` until
//! the process is restarted with a valid artifact. There is no lazy retry.

use tracing::{error, info};

use crate::core::pipeline::LogisticPipeline;
use crate::domain::model::{ChurnLabel, CustomerRecord, Prediction};
use crate::domain::ports::ChurnModel;
use crate::utils::error::{Result, ServeError};

/// Fixed cutoff converting a churn probability into a binary label.
/// Strict greater-than: a probability of exactly 0.5 resolves to "No Churn".
pub const CHURN_THRESHOLD: f64 = 0.5;

pub struct InferenceService {
    model: Option<Box<dyn ChurnModel>>,
}

impl InferenceService {
    pub fn new(model: Box<dyn ChurnModel>) -> Self {
        Self { model: Some(model) }
    }

    /// A service with no pipeline handle. Every prediction fails fast.
    pub fn degraded() -> Self {
        Self { model: None }
    }

    /// Load the pipeline artifact once at startup. A missing or corrupt
    /// artifact degrades the service instead of failing process start.
    pub fn from_artifact(path: &str) -> Self {
        match LogisticPipeline::load(path) {
            Ok(pipeline) => {
                info!("Pipeline loaded successfully");
                Self::new(Box::new(pipeline))
            }
            Err(e) => {
                error!(path, error = %e, "Failed to load pipeline artifact; serving degraded");
                Self::degraded()
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.model.is_some()
    }

    /// Run one validated record through the pipeline and threshold the result.
    pub fn predict(&self, record: &CustomerRecord) -> Result<Prediction> {
        let model = self.model.as_deref().ok_or(ServeError::ModelUnavailable)?;

        let probability = match model.predict_proba(record) {
            Ok(p) => p,
            Err(e @ ServeError::PredictionError { .. }) => return Err(e),
            Err(e) => return Err(ServeError::prediction(e.to_string())),
        };

        if !(0.0..=1.0).contains(&probability) {
            return Err(ServeError::prediction(format!(
                "pipeline returned a probability outside [0, 1]: {probability}"
            )));
        }

        let label = if probability > CHURN_THRESHOLD {
            ChurnLabel::Churn
        } else {
            ChurnLabel::NoChurn
        };

        Ok(Prediction {
            label,
            value: label.as_value(),
            probability,
        })
    }
}
