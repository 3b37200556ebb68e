//! Parameter validation.
//!
//! Runs eagerly when a parameter spec is built, so a bad table is rejected before
//! anything is added to the host's suite tree.

use tracing::trace;

use crate::record::ParameterRecord;
use crate::ParamsError;

/// Fails with [`ParamsError::MissingIdentifier`] when the record has no usable `testname`.
pub fn validate(record: &ParameterRecord) -> Result<(), ParamsError> {
    validate_at(0, record)
}

/// Validates every record in order, stopping at the first failure.
pub fn validate_all(records: &[ParameterRecord]) -> Result<(), ParamsError> {
    records
        .iter()
        .enumerate()
        .try_for_each(|(index, record)| validate_at(index, record))
}

fn validate_at(index: usize, record: &ParameterRecord) -> Result<(), ParamsError> {
    match record.testname() {
        Some(name) => {
            trace!(index, testname = %name, "test param validated");
            Ok(())
        }
        None => Err(ParamsError::MissingIdentifier {
            index,
            record: record.to_json(),
        }),
    }
}

#[cfg(test)]
mod validation_tests {
    use serde_json::json;

    use super::*;

    fn record(value: serde_json::Value) -> ParameterRecord {
        ParameterRecord::try_from(value).unwrap()
    }

    #[test]
    fn test_empty_record_is_rejected() {
        let err = validate(&record(json!({}))).unwrap_err();
        assert_eq!(err.to_string(), "missing/empty 'testname' in test param {}");
    }

    #[test]
    fn test_named_record_passes() {
        assert!(validate(&record(json!({"testname": "x"}))).is_ok());
    }

    #[test]
    fn test_falsy_names_are_rejected() {
        for value in [json!(""), json!(0), json!(false), json!(null)] {
            let err = validate(&record(json!({"testname": value, "a": 1}))).unwrap_err();
            assert!(matches!(err, ParamsError::MissingIdentifier { .. }));
        }
    }

    #[test]
    fn test_first_bad_record_is_reported() {
        let records = vec![
            ParameterRecord::new("ok"),
            record(json!({"a": 1})),
            record(json!({"b": 2})),
        ];
        match validate_all(&records) {
            Err(ParamsError::MissingIdentifier { index, record }) => {
                assert_eq!(index, 1);
                assert_eq!(record, r#"{"a":1}"#);
            }
            other => panic!("expected MissingIdentifier, got {:?}", other),
        }
    }
}
