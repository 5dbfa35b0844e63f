//! Typed values produced by the scalar validators.

use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use url::Url;
use uuid::Uuid;

use crate::binary_object::BinaryObject;

/// A converted configuration value.
///
/// `Display` renders the canonical literal, which re-validates to an equal value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// STRING, REGEXP, EMAIL, CRON, COLOR, CERTIFICATE and CIDR literals.
    Text(String),
    /// NUMBER.
    Number(i64),
    /// DOUBLE.
    Double(f64),
    /// BOOLEAN.
    Boolean(bool),
    /// DATE.
    Date(NaiveDate),
    /// TIME.
    Time(NaiveTime),
    /// TIMESTAMP, millisecond precision.
    Timestamp(DateTime<Utc>),
    /// UUID.
    Uuid(Uuid),
    /// URI.
    Uri(Url),
    /// BINARY.
    Binary(BinaryObject),
}

impl ConfigValue {
    /// Text payload for text-shaped values.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Integer payload for NUMBER values.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Floating-point payload for DOUBLE values.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(value) => Some(*value),
            _ => None,
        }
    }

    /// Boolean payload for BOOLEAN values.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Binary object payload for BINARY values.
    #[must_use]
    pub const fn as_binary(&self) -> Option<&BinaryObject> {
        match self {
            Self::Binary(value) => Some(value),
            _ => None,
        }
    }
}

impl Display for ConfigValue {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => formatter.write_str(value),
            Self::Number(value) => write!(formatter, "{value}"),
            Self::Double(value) => write!(formatter, "{value}"),
            Self::Boolean(value) => write!(formatter, "{value}"),
            Self::Date(value) => write!(formatter, "{}", value.format("%Y-%m-%d")),
            Self::Time(value) => write!(formatter, "{}", value.format("%H:%M:%S%.3f")),
            Self::Timestamp(value) => {
                formatter.write_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Self::Uuid(value) => write!(formatter, "{}", value.hyphenated()),
            Self::Uri(value) => formatter.write_str(value.as_str()),
            Self::Binary(value) => formatter.write_str(&value.encode()),
        }
    }
}
