//! BOOLEAN validator.

use crate::error::{ScalarError, SizingError};
use crate::model::DataType;
use crate::sizing::{Measure, SizeLimits, Sizing};
use crate::value::ConfigValue;

use super::ScalarValidator;

/// `true`/`yes` and `false`/`no`, case-insensitive; never size-bounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanValidator;

impl ScalarValidator for BooleanValidator {
    fn data_type(&self) -> DataType {
        DataType::Boolean
    }

    fn parse(&self, literal: &str) -> Result<ConfigValue, ScalarError> {
        match literal.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Ok(ConfigValue::Boolean(true)),
            "false" | "no" => Ok(ConfigValue::Boolean(false)),
            _ => Err(ScalarError::invalid(
                "is not a valid BOOLEAN (expected true, yes, false or no)",
            )),
        }
    }

    fn measure(&self, _value: &ConfigValue) -> Option<Measure> {
        None
    }

    fn natural_min(&self) -> Option<Measure> {
        None
    }

    fn natural_max(&self) -> Option<Measure> {
        None
    }

    fn parse_bound(&self, _raw: &str) -> Option<Measure> {
        None
    }

    fn create_sizing(&self, _limits: &SizeLimits) -> Result<Option<Sizing<Measure>>, SizingError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_spellings_in_any_case() {
        for literal in ["true", "YES", " True "] {
            assert_eq!(BooleanValidator.validate(literal, None), Ok(ConfigValue::Boolean(true)));
        }
        for literal in ["false", "No"] {
            assert_eq!(BooleanValidator.validate(literal, None), Ok(ConfigValue::Boolean(false)));
        }
        assert!(BooleanValidator.validate("1", None).is_err());
    }

    #[test]
    fn sizing_is_ignored() {
        assert_eq!(
            BooleanValidator.create_sizing(&SizeLimits::between("1", "2")),
            Ok(None)
        );
    }
}
