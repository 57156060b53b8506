use serde::{Deserialize, Serialize};
use std::fmt;

/// One customer as the pipeline's training schema expects it: 19 named
/// attributes, constructed fresh per request and discarded after the response.
/// Serde renames keep the wire names identical to the training-time columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub gender: String,
    #[serde(rename = "SeniorCitizen")]
    pub senior_citizen: i64,
    #[serde(rename = "Partner")]
    pub partner: String,
    #[serde(rename = "Dependents")]
    pub dependents: String,
    pub tenure: i64,
    #[serde(rename = "PhoneService")]
    pub phone_service: String,
    #[serde(rename = "MultipleLines")]
    pub multiple_lines: String,
    #[serde(rename = "InternetService")]
    pub internet_service: String,
    #[serde(rename = "OnlineSecurity")]
    pub online_security: String,
    #[serde(rename = "OnlineBackup")]
    pub online_backup: String,
    #[serde(rename = "DeviceProtection")]
    pub device_protection: String,
    #[serde(rename = "TechSupport")]
    pub tech_support: String,
    #[serde(rename = "StreamingTV")]
    pub streaming_tv: String,
    #[serde(rename = "StreamingMovies")]
    pub streaming_movies: String,
    #[serde(rename = "Contract")]
    pub contract: String,
    #[serde(rename = "PaperlessBilling")]
    pub paperless_billing: String,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: String,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f64,
    #[serde(rename = "TotalCharges")]
    pub total_charges: f64,
}

/// Free-form categorical columns (no enumerated whitelist is enforced).
pub const CATEGORICAL_FIELDS: [&str; 15] = [
    "gender",
    "Partner",
    "Dependents",
    "PhoneService",
    "MultipleLines",
    "InternetService",
    "OnlineSecurity",
    "OnlineBackup",
    "DeviceProtection",
    "TechSupport",
    "StreamingTV",
    "StreamingMovies",
    "Contract",
    "PaperlessBilling",
    "PaymentMethod",
];

/// Numeric columns, in the training schema's naming.
pub const NUMERIC_FIELDS: [&str; 4] = [
    "SeniorCitizen",
    "tenure",
    "MonthlyCharges",
    "TotalCharges",
];

impl CustomerRecord {
    /// Look up a categorical column by its training-schema name.
    pub fn categorical(&self, field: &str) -> Option<&str> {
        let value = match field {
            "gender" => &self.gender,
            "Partner" => &self.partner,
            "Dependents" => &self.dependents,
            "PhoneService" => &self.phone_service,
            "MultipleLines" => &self.multiple_lines,
            "InternetService" => &self.internet_service,
            "OnlineSecurity" => &self.online_security,
            "OnlineBackup" => &self.online_backup,
            "DeviceProtection" => &self.device_protection,
            "TechSupport" => &self.tech_support,
            "StreamingTV" => &self.streaming_tv,
            "StreamingMovies" => &self.streaming_movies,
            "Contract" => &self.contract,
            "PaperlessBilling" => &self.paperless_billing,
            "PaymentMethod" => &self.payment_method,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Look up a numeric column by its training-schema name.
    pub fn numeric(&self, field: &str) -> Option<f64> {
        match field {
            "SeniorCitizen" => Some(self.senior_citizen as f64),
            "tenure" => Some(self.tenure as f64),
            "MonthlyCharges" => Some(self.monthly_charges),
            "TotalCharges" => Some(self.total_charges),
            _ => None,
        }
    }
}

/// Binary churn outcome produced by thresholding the pipeline probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChurnLabel {
    Churn,
    #[serde(rename = "No Churn")]
    NoChurn,
}

impl ChurnLabel {
    pub fn as_value(self) -> u8 {
        match self {
            ChurnLabel::Churn => 1,
            ChurnLabel::NoChurn => 0,
        }
    }
}

impl fmt::Display for ChurnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChurnLabel::Churn => write!(f, "Churn"),
            ChurnLabel::NoChurn => write!(f, "No Churn"),
        }
    }
}

/// A completed prediction, serializing to the wire response shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "prediction_label")]
    pub label: ChurnLabel,
    #[serde(rename = "prediction_value")]
    pub value: u8,
    #[serde(rename = "churn_probability")]
    pub probability: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_round_trips_training_schema_names() {
        let payload = serde_json::json!({
            "gender": "Female",
            "SeniorCitizen": 0,
            "Partner": "Yes",
            "Dependents": "No",
            "tenure": 1,
            "PhoneService": "No",
            "MultipleLines": "No phone service",
            "InternetService": "DSL",
            "OnlineSecurity": "No",
            "OnlineBackup": "No",
            "DeviceProtection": "No",
            "TechSupport": "No",
            "StreamingTV": "No",
            "StreamingMovies": "No",
            "Contract": "Month-to-month",
            "PaperlessBilling": "Yes",
            "PaymentMethod": "Electronic check",
            "MonthlyCharges": 29.85,
            "TotalCharges": 29.85
        });

        let record: CustomerRecord = serde_json::from_value(payload.clone()).unwrap();
        assert_eq!(record.internet_service, "DSL");
        assert_eq!(record.senior_citizen, 0);
        assert_eq!(serde_json::to_value(&record).unwrap(), payload);
    }

    #[test]
    fn every_field_reachable_by_schema_name() {
        let record: CustomerRecord = serde_json::from_value(serde_json::json!({
            "gender": "Male", "SeniorCitizen": 1, "Partner": "No", "Dependents": "No",
            "tenure": 12, "PhoneService": "Yes", "MultipleLines": "Yes",
            "InternetService": "Fiber optic", "OnlineSecurity": "Yes", "OnlineBackup": "No",
            "DeviceProtection": "No", "TechSupport": "No", "StreamingTV": "Yes",
            "StreamingMovies": "Yes", "Contract": "Two year", "PaperlessBilling": "No",
            "PaymentMethod": "Mailed check", "MonthlyCharges": 70.0, "TotalCharges": 840.0
        }))
        .unwrap();

        for field in CATEGORICAL_FIELDS {
            assert!(record.categorical(field).is_some(), "missing {field}");
        }
        for field in NUMERIC_FIELDS {
            assert!(record.numeric(field).is_some(), "missing {field}");
        }
        assert_eq!(record.categorical("tenure"), None);
        assert_eq!(record.numeric("gender"), None);
    }

    #[test]
    fn prediction_serializes_to_wire_shape() {
        let prediction = Prediction {
            label: ChurnLabel::NoChurn,
            value: 0,
            probability: 0.25,
        };
        assert_eq!(
            serde_json::to_value(prediction).unwrap(),
            serde_json::json!({
                "prediction_label": "No Churn",
                "prediction_value": 0,
                "churn_probability": 0.25
            })
        );
    }
}
