//! NUMBER and DOUBLE validators; value-size bounds constrain the value itself.

use crate::error::ScalarError;
use crate::model::DataType;
use crate::sizing::Measure;
use crate::value::ConfigValue;

use super::{ScalarValidator, invalid_literal};

/// 64-bit signed integers; the natural range is `[0, i64::MAX]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberValidator;

impl ScalarValidator for NumberValidator {
    fn data_type(&self) -> DataType {
        DataType::Number
    }

    fn parse(&self, literal: &str) -> Result<ConfigValue, ScalarError> {
        literal
            .trim()
            .parse::<i64>()
            .map(ConfigValue::Number)
            .map_err(|_| invalid_literal(DataType::Number))
    }

    fn measure(&self, value: &ConfigValue) -> Option<Measure> {
        value.as_i64().map(Measure::Integer)
    }

    fn natural_min(&self) -> Option<Measure> {
        Some(Measure::Integer(0))
    }

    fn natural_max(&self) -> Option<Measure> {
        Some(Measure::Integer(i64::MAX))
    }

    fn parse_bound(&self, raw: &str) -> Option<Measure> {
        raw.trim().parse::<i64>().ok().map(Measure::Integer)
    }
}

/// Finite IEEE-754 doubles; the natural range is `[0, f64::MAX]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleValidator;

impl ScalarValidator for DoubleValidator {
    fn data_type(&self) -> DataType {
        DataType::Double
    }

    fn parse(&self, literal: &str) -> Result<ConfigValue, ScalarError> {
        parse_finite(literal)
            .map(ConfigValue::Double)
            .ok_or_else(|| invalid_literal(DataType::Double))
    }

    fn measure(&self, value: &ConfigValue) -> Option<Measure> {
        value.as_f64().map(Measure::Float)
    }

    fn natural_min(&self) -> Option<Measure> {
        Some(Measure::Float(0.0))
    }

    fn natural_max(&self) -> Option<Measure> {
        Some(Measure::Float(f64::MAX))
    }

    fn parse_bound(&self, raw: &str) -> Option<Measure> {
        parse_finite(raw).map(Measure::Float)
    }
}

fn parse_finite(literal: &str) -> Option<f64> {
    literal
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
