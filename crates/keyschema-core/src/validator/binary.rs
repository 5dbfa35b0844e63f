//! BINARY validator; value-size bounds constrain the decoded payload in bytes.

use crate::binary_object::BinaryObject;
use crate::error::ScalarError;
use crate::model::DataType;
use crate::sizing::Measure;
use crate::value::ConfigValue;

use super::{ScalarValidator, parse_length_bound};

/// Compact binary-object literals carrying a base64 payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryValidator;

impl ScalarValidator for BinaryValidator {
    fn data_type(&self) -> DataType {
        DataType::Binary
    }

    fn parse(&self, literal: &str) -> Result<ConfigValue, ScalarError> {
        let object = BinaryObject::decode(literal).map_err(|_| {
            ScalarError::invalid("is not a valid BINARY (timestamp segment is not RFC-3339)")
        })?;
        if object.decoded_data().is_err() {
            return Err(ScalarError::invalid(
                "is not a valid BINARY (payload is not base64)",
            ));
        }
        Ok(ConfigValue::Binary(object))
    }

    fn measure(&self, value: &ConfigValue) -> Option<Measure> {
        let bytes = value.as_binary()?.decoded_data().ok()?;
        Some(Measure::Length(i64::try_from(bytes.len()).unwrap_or(i64::MAX)))
    }

    fn natural_min(&self) -> Option<Measure> {
        Some(Measure::Length(0))
    }

    fn natural_max(&self) -> Option<Measure> {
        Some(Measure::Length(i64::MAX))
    }

    fn parse_bound(&self, raw: &str) -> Option<Measure> {
        parse_length_bound(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizing::SizeLimits;

    #[test]
    fn payload_size_is_measured_in_decoded_bytes() {
        let value = BinaryValidator
            .validate("logo.png|{image/png}aGVsbG8=", None)
            .expect("valid binary");
        assert_eq!(BinaryValidator.measure(&value), Some(Measure::Length(5)));
        let object = value.as_binary().expect("binary payload");
        assert_eq!(object.name.as_deref(), Some("logo.png"));
        assert_eq!(object.mimetype.as_deref(), Some("image/png"));
    }

    #[test]
    fn payload_must_be_base64() {
        assert_eq!(
            BinaryValidator.validate("{text/plain}not base64!", None),
            Err(ScalarError::Invalid(
                "is not a valid BINARY (payload is not base64)".into()
            ))
        );
    }

    #[test]
    fn bad_timestamp_is_invalid_without_echoing_the_segment() {
        assert_eq!(
            BinaryValidator.validate("name|yesterday|aGVsbG8=", None),
            Err(ScalarError::Invalid(
                "is not a valid BINARY (timestamp segment is not RFC-3339)".into()
            ))
        );
    }

    #[test]
    fn byte_limit_applies_to_payload() {
        let sizing = BinaryValidator
            .create_sizing(&SizeLimits::new(None, Some("4")))
            .expect("sizing parses")
            .expect("sizing declared");
        assert_eq!(
            BinaryValidator.validate("aGVsbG8=", Some(&sizing)),
            Err(ScalarError::Invalid("is too big, the maximum length is [4]".into()))
        );
    }
}
