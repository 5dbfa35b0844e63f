//! UUID and URI validators; both measure the length of their canonical literal.
//!
//! A UUID is measured in its hyphenated form whatever form it was written in,
//! so simple and braced inputs count as 36 characters.

use url::Url;
use uuid::Uuid;

use crate::defaults::{URI_MIN_LENGTH, UUID_MAX_LENGTH};
use crate::error::ScalarError;
use crate::model::DataType;
use crate::sizing::Measure;
use crate::value::ConfigValue;

use super::{ScalarValidator, invalid_literal, length_of, parse_length_bound};

/// UUIDs in any form `uuid` accepts, rendered hyphenated.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidValidator;

impl ScalarValidator for UuidValidator {
    fn data_type(&self) -> DataType {
        DataType::Uuid
    }

    fn parse(&self, literal: &str) -> Result<ConfigValue, ScalarError> {
        Uuid::parse_str(literal.trim())
            .map(ConfigValue::Uuid)
            .map_err(|_| invalid_literal(DataType::Uuid))
    }

    fn measure(&self, value: &ConfigValue) -> Option<Measure> {
        match value {
            ConfigValue::Uuid(uuid) => Some(length_of(&uuid.hyphenated().to_string())),
            _ => None,
        }
    }

    fn natural_min(&self) -> Option<Measure> {
        Some(Measure::Length(0))
    }

    fn natural_max(&self) -> Option<Measure> {
        Some(Measure::Length(UUID_MAX_LENGTH))
    }

    fn parse_bound(&self, raw: &str) -> Option<Measure> {
        parse_length_bound(raw)
    }
}

/// Absolute URIs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UriValidator;

impl ScalarValidator for UriValidator {
    fn data_type(&self) -> DataType {
        DataType::Uri
    }

    fn parse(&self, literal: &str) -> Result<ConfigValue, ScalarError> {
        Url::parse(literal.trim())
            .map(ConfigValue::Uri)
            .map_err(|err| ScalarError::invalid(format!("is not a valid URI ({err})")))
    }

    fn measure(&self, value: &ConfigValue) -> Option<Measure> {
        match value {
            ConfigValue::Uri(uri) => Some(length_of(uri.as_str())),
            _ => None,
        }
    }

    fn natural_min(&self) -> Option<Measure> {
        Some(Measure::Length(URI_MIN_LENGTH))
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
    fn uuid_accepts_simple_and_hyphenated_forms() {
        let hyphenated = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        let value = UuidValidator.validate(hyphenated, None).expect("valid uuid");
        assert_eq!(value.to_string(), hyphenated);
        assert_eq!(
            UuidValidator.validate("67e5504410b1426f9247bb680e5fe0c8", None),
            Ok(value.clone())
        );
        assert_eq!(UuidValidator.measure(&value), Some(Measure::Length(36)));
        assert!(UuidValidator.validate("67e55044-10b1", None).is_err());
    }

    #[test]
    fn uri_must_be_absolute() {
        assert!(UriValidator.validate("https://example.com/path", None).is_ok());
        assert!(UriValidator.validate("mailto:ops@example.com", None).is_ok());
        assert!(matches!(
            UriValidator.validate("/relative/path", None),
            Err(ScalarError::Invalid(message)) if message.starts_with("is not a valid URI")
        ));
    }

    #[test]
    fn uuid_length_is_measured_on_the_canonical_form() {
        let sizing = UuidValidator
            .create_sizing(&SizeLimits::new(Some("36"), None))
            .expect("sizing parses")
            .expect("sizing declared");
        let simple = "67e5504410b1426f9247bb680e5fe0c8";
        assert_eq!(simple.len(), 32);
        let value = UuidValidator
            .validate(simple, Some(&sizing))
            .expect("simple form meets the hyphenated length");
        assert_eq!(UuidValidator.measure(&value), Some(Measure::Length(36)));
    }

    #[test]
    fn uri_enforces_minimum_plausible_length() {
        assert_eq!(
            UriValidator.validate("a:", None),
            Err(ScalarError::Invalid(
                "is shorter than the minimum plausible URI length of 3".into()
            ))
        );
        assert!(UriValidator.validate("a:b", None).is_ok());
    }

    #[test]
    fn uri_length_bounds() {
        let sizing = UriValidator
            .create_sizing(&SizeLimits::new(None, Some("20")))
            .expect("sizing parses")
            .expect("sizing declared");
        assert!(UriValidator.validate("http://a.io", Some(&sizing)).is_ok());
        assert_eq!(
            UriValidator.validate("https://example.com/a/very/long/path", Some(&sizing)),
            Err(ScalarError::Invalid("is too big, the maximum length is [20]".into()))
        );
    }
}
