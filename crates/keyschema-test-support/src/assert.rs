//! Assertions over validation failures.

use keyschema_core::{ConfigValue, ValidationError, ValidationResult};

/// Assert that `result` failed as `Invalid` with exactly `expected` as its message,
/// returning the failure for further inspection.
///
/// # Panics
///
/// Panics when the result is not an `Invalid` failure with that message.
#[track_caller]
pub fn assert_invalid(result: ValidationResult<Vec<ConfigValue>>, expected: &str) -> ValidationError {
    match result {
        Err(err @ ValidationError::Invalid { .. }) => {
            if let ValidationError::Invalid { message, .. } = &err {
                assert_eq!(message, expected);
            }
            err
        }
        other => panic!("expected an invalid failure '{expected}', got {other:?}"),
    }
}

/// Assert that `result` signalled an absent value.
///
/// # Panics
///
/// Panics when the result is anything but `EmptyValue`.
#[track_caller]
pub fn assert_empty<T: std::fmt::Debug>(result: ValidationResult<T>) {
    match result {
        Err(ValidationError::EmptyValue { .. }) => {}
        other => panic!("expected an empty-value signal, got {other:?}"),
    }
}

/// Schema field named by a `SchemaInvalid` failure.
///
/// # Panics
///
/// Panics when the result is not a `SchemaInvalid` failure.
#[track_caller]
pub fn schema_field<T: std::fmt::Debug>(result: ValidationResult<T>) -> &'static str {
    match result {
        Err(ValidationError::SchemaInvalid { field, .. }) => field,
        other => panic!("expected a schema failure, got {other:?}"),
    }
}
