//! Loadable prediction pipeline artifact.
//!
//! The artifact is a standardized logistic regression exported at training
//! time as JSON: an intercept, a mean/scale/weight triple per numeric column,
//! and a weight per observed level of each categorical column. The serving
//! core treats it as opaque beyond `predict_proba`; a level the encoder never
//! saw during fitting is a runtime pipeline failure, not a validation failure.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::model::{CustomerRecord, CATEGORICAL_FIELDS, NUMERIC_FIELDS};
use crate::domain::ports::ChurnModel;
use crate::utils::error::{Result, ServeError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericFeature {
    pub mean: f64,
    pub scale: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticPipeline {
    pub intercept: f64,
    pub numeric: BTreeMap<String, NumericFeature>,
    pub categorical: BTreeMap<String, BTreeMap<String, f64>>,
}

impl LogisticPipeline {
    /// Load and sanity-check an artifact from disk. The feature set must
    /// cover the 19 training-schema columns exactly, else the file is corrupt.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let pipeline: LogisticPipeline = serde_json::from_str(&content)?;
        pipeline.check_schema()?;
        info!(
            path = %path.display(),
            numeric = pipeline.numeric.len(),
            categorical = pipeline.categorical.len(),
            "Pipeline artifact loaded"
        );
        Ok(pipeline)
    }

    fn check_schema(&self) -> Result<()> {
        let numeric: BTreeSet<&str> = self.numeric.keys().map(String::as_str).collect();
        let categorical: BTreeSet<&str> = self.categorical.keys().map(String::as_str).collect();
        let expected_numeric: BTreeSet<&str> = NUMERIC_FIELDS.into_iter().collect();
        let expected_categorical: BTreeSet<&str> = CATEGORICAL_FIELDS.into_iter().collect();

        if numeric != expected_numeric || categorical != expected_categorical {
            return Err(ServeError::config(
                "pipeline artifact does not match the training schema",
            ));
        }
        Ok(())
    }

    /// Linear score before the sigmoid transform.
    fn decision_value(&self, record: &CustomerRecord) -> Result<f64> {
        let mut z = self.intercept;

        for (name, feature) in &self.numeric {
            let x = record
                .numeric(name)
                .ok_or_else(|| ServeError::prediction(format!("unknown numeric column '{name}'")))?;
            let scale = if feature.scale == 0.0 { 1.0 } else { feature.scale };
            z += feature.weight * (x - feature.mean) / scale;
        }

        for (name, levels) in &self.categorical {
            let value = record.categorical(name).ok_or_else(|| {
                ServeError::prediction(format!("unknown categorical column '{name}'"))
            })?;
            let weight = levels.get(value).ok_or_else(|| {
                ServeError::prediction(format!("unseen category '{value}' for column '{name}'"))
            })?;
            z += weight;
        }

        Ok(z)
    }
}

impl ChurnModel for LogisticPipeline {
    fn predict_proba(&self, record: &CustomerRecord) -> Result<f64> {
        let z = self.decision_value(record)?;
        Ok(sigmoid(z))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
