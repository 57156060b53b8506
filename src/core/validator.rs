//! Schema gatekeeper: only well-formed customer records reach inference.
//!
//! The whole payload is checked in one pass and every violation is reported
//! together, so a caller can fix a bad request in one round trip. Rejection is
//! atomic; no partial record is ever produced.

use serde_json::{Map, Value};

use crate::domain::model::{CustomerRecord, CATEGORICAL_FIELDS};
use crate::utils::error::{FieldViolation, Result, ServeError};

/// Validate an untyped request payload into a `CustomerRecord`.
///
/// Fails with `ServeError::ValidationError` listing every missing field,
/// type mismatch, and bound violation. Unknown extra fields are ignored.
pub fn validate_payload(payload: &Value) -> Result<CustomerRecord> {
    let object = payload.as_object().ok_or_else(|| ServeError::ValidationError {
        violations: vec![FieldViolation::new("payload", "expected a JSON object")],
    })?;

    let mut violations = Vec::new();

    for field in CATEGORICAL_FIELDS {
        check_string(object, field, &mut violations);
    }
    check_integer(object, "SeniorCitizen", 0, Some(1), &mut violations);
    check_integer(object, "tenure", 0, None, &mut violations);
    check_float(object, "MonthlyCharges", &mut violations);
    check_float(object, "TotalCharges", &mut violations);

    if !violations.is_empty() {
        return Err(ServeError::ValidationError { violations });
    }

    // Every constraint above has passed, so this projection cannot fail for a
    // reason the caller could fix; any residual failure is still reported as a
    // validation error rather than a panic.
    serde_json::from_value(payload.clone()).map_err(|e| ServeError::ValidationError {
        violations: vec![FieldViolation::new("payload", e.to_string())],
    })
}

fn check_string(object: &Map<String, Value>, field: &str, violations: &mut Vec<FieldViolation>) {
    match object.get(field) {
        None => violations.push(FieldViolation::new(field, "missing required field")),
        Some(Value::String(_)) => {}
        Some(_) => violations.push(FieldViolation::new(field, "expected a string")),
    }
}

fn check_integer(
    object: &Map<String, Value>,
    field: &str,
    min: i64,
    max: Option<i64>,
    violations: &mut Vec<FieldViolation>,
) {
    let value = match object.get(field) {
        None => {
            violations.push(FieldViolation::new(field, "missing required field"));
            return;
        }
        Some(value) => value,
    };

    let Some(n) = value.as_i64() else {
        violations.push(FieldViolation::new(field, "expected an integer"));
        return;
    };

    match max {
        Some(max) if n < min || n > max => violations.push(FieldViolation::new(
            field,
            format!("must be between {} and {}", min, max),
        )),
        None if n < min => violations.push(FieldViolation::new(
            field,
            format!("must be greater than or equal to {}", min),
        )),
        _ => {}
    }
}

fn check_float(object: &Map<String, Value>, field: &str, violations: &mut Vec<FieldViolation>) {
    let value = match object.get(field) {
        None => {
            violations.push(FieldViolation::new(field, "missing required field"));
            return;
        }
        Some(value) => value,
    };

    let Some(x) = value.as_f64() else {
        violations.push(FieldViolation::new(field, "expected a number"));
        return;
    };

    if !x.is_finite() || x < 0.0 {
        violations.push(FieldViolation::new(
            field,
            "must be greater than or equal to 0",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn example_payload() -> Value {
        json!({
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
        })
    }

    fn violations_of(result: Result<CustomerRecord>) -> Vec<FieldViolation> {
        match result {
            Err(ServeError::ValidationError { violations }) => violations,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_the_reference_payload() {
        let record = validate_payload(&example_payload()).unwrap();
        assert_eq!(record.gender, "Female");
        assert_eq!(record.tenure, 1);
        assert_eq!(record.monthly_charges, 29.85);
    }

    #[test]
    fn rejects_each_missing_field() {
        let all_fields: Vec<String> = example_payload()
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(all_fields.len(), 19);

        for field in all_fields {
            let mut payload = example_payload();
            payload.as_object_mut().unwrap().remove(&field);
            let violations = violations_of(validate_payload(&payload));
            assert_eq!(violations.len(), 1, "field {field}");
            assert_eq!(violations[0].field, field);
            assert_eq!(violations[0].reason, "missing required field");
        }
    }

    #[test]
    fn rejects_senior_citizen_outside_zero_one() {
        for bad in [-1, 2, 7] {
            let mut payload = example_payload();
            payload["SeniorCitizen"] = json!(bad);
            let violations = violations_of(validate_payload(&payload));
            assert_eq!(violations[0].field, "SeniorCitizen");
            assert_eq!(violations[0].reason, "must be between 0 and 1");
        }
    }

    #[test]
    fn rejects_negative_numerics() {
        for (field, bad) in [
            ("tenure", json!(-1)),
            ("MonthlyCharges", json!(-0.01)),
            ("TotalCharges", json!(-100.0)),
        ] {
            let mut payload = example_payload();
            payload[field] = bad;
            let violations = violations_of(validate_payload(&payload));
            assert_eq!(violations[0].field, field);
        }
    }

    #[test]
    fn rejects_wrong_primitive_types() {
        let mut payload = example_payload();
        payload["tenure"] = json!("one");
        payload["gender"] = json!(5);
        payload["MonthlyCharges"] = json!("29.85");
        let violations = violations_of(validate_payload(&payload));
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert!(fields.contains(&"tenure"));
        assert!(fields.contains(&"gender"));
        assert!(fields.contains(&"MonthlyCharges"));
    }

    #[test]
    fn rejects_null_values() {
        let mut payload = example_payload();
        payload["Contract"] = Value::Null;
        let violations = violations_of(validate_payload(&payload));
        assert_eq!(violations[0].field, "Contract");
        assert_eq!(violations[0].reason, "expected a string");
    }

    #[test]
    fn rejects_fractional_integer_fields() {
        let mut payload = example_payload();
        payload["tenure"] = json!(1.5);
        let violations = violations_of(validate_payload(&payload));
        assert_eq!(violations[0].field, "tenure");
        assert_eq!(violations[0].reason, "expected an integer");
    }

    #[test]
    fn reports_all_violations_at_once() {
        let mut payload = example_payload();
        payload.as_object_mut().unwrap().remove("gender");
        payload["SeniorCitizen"] = json!(3);
        payload["TotalCharges"] = json!(-1.0);
        let violations = violations_of(validate_payload(&payload));
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn ignores_unknown_fields() {
        let mut payload = example_payload();
        payload["CustomerId"] = json!("abc-123");
        assert!(validate_payload(&payload).is_ok());
    }

    #[test]
    fn rejects_non_object_payloads() {
        let violations = violations_of(validate_payload(&json!([1, 2, 3])));
        assert_eq!(violations[0].field, "payload");
    }

    #[test]
    fn accepts_integer_valued_charges() {
        let mut payload = example_payload();
        payload["MonthlyCharges"] = json!(30);
        assert!(validate_payload(&payload).is_ok());
    }
}
