use crate::domain::model::CustomerRecord;
use crate::utils::error::Result;

/// The single capability the serving core needs from the trained artifact.
/// Production implementations load an external artifact; tests plug in stubs.
pub trait ChurnModel: Send + Sync {
    fn predict_proba(&self, record: &CustomerRecord) -> Result<f64>;
}

pub trait ConfigProvider: Send + Sync {
    fn model_path(&self) -> &str;
    fn bind_addr(&self) -> &str;
}
