//! Per-type scalar validation strategies.
//!
//! # Design
//! - One stateless strategy per [`DataType`], built once and cached by the registry.
//! - Strategies only know how to convert, measure and order single scalars; the
//!   cardinality engine wraps them for multi-valued input.
//! - Ordering convention for [`ScalarValidator::is_greater_than`]: an absent left
//!   operand is never greater; an absent right operand makes a present left operand greater.

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::error::{ScalarError, SizingError, ValidationResult};
use crate::model::DataType;
use crate::sizing::{Bound, Measure, SizeLimits, Sizing};
use crate::value::ConfigValue;

mod binary;
mod boolean;
mod identifier;
mod numeric;
mod temporal;
mod text;

pub use binary::BinaryValidator;
pub use boolean::BooleanValidator;
pub use identifier::{UriValidator, UuidValidator};
pub use numeric::{DoubleValidator, NumberValidator};
pub use temporal::{DateValidator, TimeValidator, TimestampValidator};
pub use text::TextValidator;

/// Conversion, measurement and ordering rules for one data type.
pub trait ScalarValidator: Send + Sync + Debug {
    /// Data type this strategy validates.
    fn data_type(&self) -> DataType;

    /// Convert one non-blank literal into a typed value.
    ///
    /// # Errors
    ///
    /// Returns `ScalarError::Invalid` when the literal does not match the type's grammar.
    fn parse(&self, literal: &str) -> Result<ConfigValue, ScalarError>;

    /// Quantity a value-size bound constrains; `None` when the type has no size bound.
    fn measure(&self, value: &ConfigValue) -> Option<Measure>;

    /// Smallest measure the type admits.
    fn natural_min(&self) -> Option<Measure>;

    /// Largest measure the type admits.
    fn natural_max(&self) -> Option<Measure>;

    /// Parse the declared text of a value-size bound.
    fn parse_bound(&self, raw: &str) -> Option<Measure>;

    /// Type-specific ordering with the absent-operand convention described on the module.
    fn is_greater_than(&self, left: Option<&Measure>, right: Option<&Measure>) -> bool {
        match (left, right) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(left), Some(right)) => left.partial_cmp(right) == Some(Ordering::Greater),
        }
    }

    /// Parse a value-size declaration; `*` stands for the natural bound of its side.
    ///
    /// # Errors
    ///
    /// Returns `SizingError` when a side does not parse as a bound of this type.
    fn create_sizing(&self, limits: &SizeLimits) -> Result<Option<Sizing<Measure>>, SizingError> {
        let min = limits
            .min_text()
            .map(|raw| parse_side(self, "min", raw, self.natural_min()))
            .transpose()?;
        let max = limits
            .max_text()
            .map(|raw| parse_side(self, "max", raw, self.natural_max()))
            .transpose()?;
        if min.is_none() && max.is_none() {
            return Ok(None);
        }
        Ok(Some(Sizing::new(min, max)))
    }

    /// Convert a literal and enforce the natural minimum length and the declared sizing.
    ///
    /// # Errors
    ///
    /// Returns `ScalarError::Empty` for blank literals and `ScalarError::Invalid` otherwise.
    fn validate(
        &self,
        literal: &str,
        sizing: Option<&Sizing<Measure>>,
    ) -> Result<ConfigValue, ScalarError> {
        if literal.trim().is_empty() {
            return Err(ScalarError::Empty);
        }
        let value = self.parse(literal)?;
        let Some(measure) = self.measure(&value) else {
            return Ok(value);
        };

        if let Some(floor @ Measure::Length(minimum)) = self.natural_min() {
            if self.is_greater_than(Some(&floor), Some(&measure)) {
                return Err(ScalarError::invalid(format!(
                    "is shorter than the minimum plausible {} length of {minimum}",
                    self.data_type()
                )));
            }
        }

        if let Some(sizing) = sizing {
            check_sizing(self, &measure, sizing)?;
        }
        Ok(value)
    }
}

fn parse_side<V: ScalarValidator + ?Sized>(
    validator: &V,
    side: &'static str,
    raw: &str,
    natural: Option<Measure>,
) -> Result<Bound<Measure>, SizingError> {
    let parsed = if raw == crate::defaults::NATURAL_BOUND {
        natural
    } else {
        validator.parse_bound(raw)
    };
    parsed
        .map(|value| Bound::new(value, raw))
        .ok_or_else(|| SizingError {
            side,
            raw: raw.to_string(),
            reason: format!("is not a valid {} bound", validator.data_type()),
        })
}

fn check_sizing<V: ScalarValidator + ?Sized>(
    validator: &V,
    measure: &Measure,
    sizing: &Sizing<Measure>,
) -> Result<(), ScalarError> {
    let noun = if matches!(measure, Measure::Length(_)) {
        " length"
    } else {
        ""
    };
    if let Some(min) = sizing.min() {
        if validator.is_greater_than(Some(min.value()), Some(measure)) {
            return Err(ScalarError::invalid(format!(
                "is too small, the minimum{noun} is [{}]",
                min.raw()
            )));
        }
    }
    if let Some(max) = sizing.max() {
        if validator.is_greater_than(Some(measure), Some(max.value())) {
            return Err(ScalarError::invalid(format!(
                "is too big, the maximum{noun} is [{}]",
                max.raw()
            )));
        }
    }
    Ok(())
}

/// Build the strategy for `data_type`.
///
/// # Errors
///
/// Returns `ValidationError::Grammar` when a built-in pattern fails to compile.
pub fn build_validator(data_type: DataType) -> ValidationResult<Box<dyn ScalarValidator>> {
    let validator: Box<dyn ScalarValidator> = match data_type {
        DataType::String => Box::new(TextValidator::string()),
        DataType::Regexp => Box::new(TextValidator::regexp()),
        DataType::Email => Box::new(TextValidator::email()?),
        DataType::Cron => Box::new(TextValidator::cron()?),
        DataType::Color => Box::new(TextValidator::color()?),
        DataType::Certificate => Box::new(TextValidator::certificate()?),
        DataType::Cidr => Box::new(TextValidator::cidr()),
        DataType::Number => Box::new(NumberValidator),
        DataType::Double => Box::new(DoubleValidator),
        DataType::Boolean => Box::new(BooleanValidator),
        DataType::Date => Box::new(DateValidator),
        DataType::Time => Box::new(TimeValidator),
        DataType::Timestamp => Box::new(TimestampValidator),
        DataType::Uuid => Box::new(UuidValidator),
        DataType::Uri => Box::new(UriValidator),
        DataType::Binary => Box::new(BinaryValidator),
    };
    Ok(validator)
}

pub(crate) fn invalid_literal(data_type: DataType) -> ScalarError {
    ScalarError::invalid(format!("is not a valid {data_type}"))
}

pub(crate) fn length_of(text: &str) -> Measure {
    Measure::Length(i64::try_from(text.chars().count()).unwrap_or(i64::MAX))
}

pub(crate) fn parse_length_bound(raw: &str) -> Option<Measure> {
    raw.parse::<i64>()
        .ok()
        .filter(|length| *length >= 0)
        .map(Measure::Length)
}
