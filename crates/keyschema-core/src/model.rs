//! Schema entries, data types and validation roles.
//!
//! # Design
//! - Pure data carriers; a `SchemaEntry` is built once by its owner and read-only afterwards.
//! - Raw value-size text is kept on the entry; each validator parses it into typed bounds.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::defaults::{epoch, max_timestamp};
use crate::sizing::{SizeLimits, Sizing};

/// Data types a schema entry may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    /// Free text.
    String,
    /// 64-bit signed integer.
    Number,
    /// IEEE-754 double.
    Double,
    /// `true`/`yes` or `false`/`no`.
    Boolean,
    /// RFC-3339 full date.
    Date,
    /// RFC-3339 partial time.
    Time,
    /// RFC-3339 date-time, truncated to milliseconds.
    Timestamp,
    /// Regular expression.
    Regexp,
    /// Hyphenated UUID.
    Uuid,
    /// Absolute URI.
    Uri,
    /// IP address or CIDR range.
    Cidr,
    /// E-mail address.
    Email,
    /// Cron expression.
    Cron,
    /// Hex colour literal or colour name.
    Color,
    /// PEM or base64 certificate.
    Certificate,
    /// Compact binary object (`name|timestamp|{mimetype}data`).
    Binary,
}

impl DataType {
    /// Every data type, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::String,
        Self::Number,
        Self::Double,
        Self::Boolean,
        Self::Date,
        Self::Time,
        Self::Timestamp,
        Self::Regexp,
        Self::Uuid,
        Self::Uri,
        Self::Cidr,
        Self::Email,
        Self::Cron,
        Self::Color,
        Self::Certificate,
        Self::Binary,
    ];

    /// Number of data types.
    pub const COUNT: usize = Self::ALL.len();

    /// Render the data type as its canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::Double => "DOUBLE",
            Self::Boolean => "BOOLEAN",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Regexp => "REGEXP",
            Self::Uuid => "UUID",
            Self::Uri => "URI",
            Self::Cidr => "CIDR",
            Self::Email => "EMAIL",
            Self::Cron => "CRON",
            Self::Color => "COLOR",
            Self::Certificate => "CERTIFICATE",
            Self::Binary => "BINARY",
        }
    }

    /// Position of the data type in [`DataType::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Display for DataType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|data_type| data_type.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown data type '{wanted}'"))
    }
}

/// Logical role of a string checked against a schema entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueRole {
    /// Caller-supplied input.
    Input,
    /// The entry's default value.
    DefaultValue,
    /// The entry's example value.
    ExampleValue,
    /// One literal of the entry's enumeration.
    EnumerationValue,
}

impl ValueRole {
    /// Render the role the way schema authors name the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::DefaultValue => "defaultValue",
            Self::ExampleValue => "exampleValue",
            Self::EnumerationValue => "enumerationValue",
        }
    }
}

impl Display for ValueRole {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Declarative description of one configuration key.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEntry {
    /// Dotted key name.
    pub key: String,
    /// Declared data type.
    pub data_type: DataType,
    /// Allowed element count; the entry is mandatory when the minimum is above zero.
    pub cardinality: Sizing<i64>,
    /// Raw value-size declaration, parsed per data type.
    pub value_size: Option<SizeLimits>,
    /// Whitelist encoded as a JSON array or a comma-separated list.
    pub enumeration_value: Option<String>,
    /// Default literal substituted by callers when input is missing.
    pub default_value: Option<String>,
    /// Example literal shown to schema readers.
    pub example_value: Option<String>,
    /// Whether multi-valued input must not contain duplicates.
    pub is_uniqueness: bool,
    /// Whether values must be masked in messages and logs.
    pub is_confidential: bool,
    /// Human-readable description.
    pub description: String,
    /// Start of the validity window (inclusive).
    pub valid_from: DateTime<Utc>,
    /// End of the validity window (exclusive).
    pub valid_till: DateTime<Utc>,
}

impl SchemaEntry {
    /// Build an optional single-valued entry valid from the Unix epoch to the latest timestamp.
    #[must_use]
    pub fn new(key: impl Into<String>, data_type: DataType, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            data_type,
            cardinality: Sizing::between(0, 1),
            value_size: None,
            enumeration_value: None,
            default_value: None,
            example_value: None,
            is_uniqueness: false,
            is_confidential: false,
            description: description.into(),
            valid_from: epoch(),
            valid_till: max_timestamp(),
        }
    }

    /// Replace the cardinality.
    #[must_use]
    pub fn with_cardinality(mut self, cardinality: Sizing<i64>) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// Replace the value-size declaration.
    #[must_use]
    pub fn with_value_size(mut self, value_size: SizeLimits) -> Self {
        self.value_size = Some(value_size);
        self
    }

    /// Replace the enumeration literal.
    #[must_use]
    pub fn with_enumeration(mut self, enumeration: impl Into<String>) -> Self {
        self.enumeration_value = Some(enumeration.into());
        self
    }

    /// Replace the default literal.
    #[must_use]
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Replace the example literal.
    #[must_use]
    pub fn with_example(mut self, example_value: impl Into<String>) -> Self {
        self.example_value = Some(example_value.into());
        self
    }

    /// Require multi-valued input to be free of duplicates.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.is_uniqueness = true;
        self
    }

    /// Mask values of this entry in messages and logs.
    #[must_use]
    pub fn confidential(mut self) -> Self {
        self.is_confidential = true;
        self
    }

    /// Replace the validity window.
    #[must_use]
    pub fn with_validity(mut self, valid_from: DateTime<Utc>, valid_till: DateTime<Utc>) -> Self {
        self.valid_from = valid_from;
        self.valid_till = valid_till;
        self
    }

    /// Minimum element count (zero when unbounded).
    #[must_use]
    pub fn min_cardinality(&self) -> i64 {
        self.cardinality.min_value().copied().unwrap_or(0)
    }

    /// Whether at least one value is required.
    #[must_use]
    pub fn is_mandatory(&self) -> bool {
        self.min_cardinality() > 0
    }

    /// Whether input is a JSON array rather than a single scalar.
    #[must_use]
    pub fn is_multi_valued(&self) -> bool {
        self.cardinality.max_value().is_none_or(|max| *max > 1)
    }

    /// Whether the entry applies at `instant` (`valid_from <= instant < valid_till`).
    #[must_use]
    pub fn is_valid_at(&self, instant: DateTime<Utc>) -> bool {
        self.valid_from <= instant && instant < self.valid_till
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn data_type_parses_case_insensitively() {
        assert_eq!("number".parse::<DataType>(), Ok(DataType::Number));
        assert_eq!(" CIDR ".parse::<DataType>(), Ok(DataType::Cidr));
        assert!("integer".parse::<DataType>().is_err());
        assert_eq!(DataType::Certificate.to_string(), "CERTIFICATE");
    }

    #[test]
    fn data_type_indices_follow_declaration_order() {
        for (position, data_type) in DataType::ALL.into_iter().enumerate() {
            assert_eq!(data_type.index(), position);
        }
        assert_eq!(DataType::COUNT, 16);
    }

    #[test]
    fn cardinality_drives_mandatory_and_multi_flags() {
        let scalar = SchemaEntry::new("a", DataType::String, "Scalar");
        assert!(!scalar.is_mandatory());
        assert!(!scalar.is_multi_valued());

        let list = scalar
            .clone()
            .with_cardinality(Sizing::between(2, 4));
        assert!(list.is_mandatory());
        assert!(list.is_multi_valued());

        let open = scalar.with_cardinality(Sizing::at_least(1));
        assert!(open.is_multi_valued());
    }

    #[test]
    fn validity_window_is_half_open() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let till = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let entry = SchemaEntry::new("a", DataType::String, "Windowed").with_validity(from, till);
        assert!(entry.is_valid_at(from));
        assert!(!entry.is_valid_at(till));
    }
}
