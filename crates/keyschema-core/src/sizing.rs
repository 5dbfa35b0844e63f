//! Min/max bound pairs used for cardinality and value-size constraints.
//!
//! # Design
//! - Each side keeps both its parsed value (for comparisons) and its declared text
//!   (quoted verbatim in messages, e.g. the `*` sentinel).
//! - An absent side means "no bound on that side".

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::defaults::NATURAL_BOUND;
use crate::error::SizingError;

/// One side of a sizing: parsed value plus declared text.
#[derive(Debug, Clone, PartialEq)]
pub struct Bound<T> {
    value: T,
    raw: String,
}

impl<T> Bound<T> {
    /// Pair a parsed value with the text it was declared as.
    pub fn new(value: T, raw: impl Into<String>) -> Self {
        Self {
            value,
            raw: raw.into(),
        }
    }

    /// Parsed value used for comparisons.
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Text the bound was declared as.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl<T: Display> Bound<T> {
    /// Build a bound whose declared text is the value's display form.
    pub fn of(value: T) -> Self {
        let raw = value.to_string();
        Self { value, raw }
    }
}

/// A (min, max) pair; either side may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Sizing<T> {
    min: Option<Bound<T>>,
    max: Option<Bound<T>>,
}

impl<T> Sizing<T> {
    /// Build a sizing from optional bounds.
    pub const fn new(min: Option<Bound<T>>, max: Option<Bound<T>>) -> Self {
        Self { min, max }
    }

    /// A sizing with no bound on either side.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Lower bound, if any.
    pub const fn min(&self) -> Option<&Bound<T>> {
        self.min.as_ref()
    }

    /// Upper bound, if any.
    pub const fn max(&self) -> Option<&Bound<T>> {
        self.max.as_ref()
    }

    /// Parsed lower bound, if any.
    pub fn min_value(&self) -> Option<&T> {
        self.min.as_ref().map(Bound::value)
    }

    /// Parsed upper bound, if any.
    pub fn max_value(&self) -> Option<&T> {
        self.max.as_ref().map(Bound::value)
    }

    /// Whether neither side is bounded.
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

impl<T: Display> Sizing<T> {
    /// Both sides bounded.
    pub fn between(min: T, max: T) -> Self {
        Self::new(Some(Bound::of(min)), Some(Bound::of(max)))
    }

    /// Lower side bounded only.
    pub fn at_least(min: T) -> Self {
        Self::new(Some(Bound::of(min)), None)
    }

    /// Upper side bounded only.
    pub fn at_most(max: T) -> Self {
        Self::new(None, Some(Bound::of(max)))
    }
}

impl Sizing<i64> {
    /// Parse a cardinality declaration.
    ///
    /// Blank sides are unbounded; `*` as the maximum is unbounded while keeping its text.
    ///
    /// # Errors
    ///
    /// Returns `SizingError` when a side is not an integer or is negative.
    pub fn parse(min: Option<&str>, max: Option<&str>) -> Result<Self, SizingError> {
        let min = match declared(min) {
            Some(raw) => Some(Bound::new(parse_count("min", raw)?, raw)),
            None => None,
        };
        let max = match declared(max) {
            Some(raw) if raw == NATURAL_BOUND => Some(Bound::new(i64::MAX, raw)),
            Some(raw) => Some(Bound::new(parse_count("max", raw)?, raw)),
            None => None,
        };
        Ok(Self { min, max })
    }
}

fn declared(side: Option<&str>) -> Option<&str> {
    side.map(str::trim).filter(|raw| !raw.is_empty())
}

fn parse_count(side: &'static str, raw: &str) -> Result<i64, SizingError> {
    let count = raw.parse::<i64>().map_err(|_| SizingError {
        side,
        raw: raw.to_string(),
        reason: "is not an integer".to_string(),
    })?;
    if count < 0 {
        return Err(SizingError {
            side,
            raw: raw.to_string(),
            reason: "must not be negative".to_string(),
        });
    }
    Ok(count)
}

/// Declared text of a value-size constraint, parsed by the entry's validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeLimits {
    /// Lower bound text; `*` stands for the type's natural minimum.
    pub min: Option<String>,
    /// Upper bound text; `*` stands for the type's natural maximum.
    pub max: Option<String>,
}

impl SizeLimits {
    /// Build limits from optional bound texts.
    #[must_use]
    pub fn new(min: Option<&str>, max: Option<&str>) -> Self {
        Self {
            min: min.map(str::to_string),
            max: max.map(str::to_string),
        }
    }

    /// Both sides declared.
    pub fn between(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            min: Some(min.into()),
            max: Some(max.into()),
        }
    }

    /// Lower side text, ignoring blanks.
    #[must_use]
    pub fn min_text(&self) -> Option<&str> {
        declared(self.min.as_deref())
    }

    /// Upper side text, ignoring blanks.
    #[must_use]
    pub fn max_text(&self) -> Option<&str> {
        declared(self.max.as_deref())
    }
}

/// Typed quantity a value-size bound constrains.
///
/// Text-shaped types measure character length, BINARY measures decoded bytes,
/// numeric and temporal types measure the value itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    /// Character or byte length.
    Length(i64),
    /// Integer value.
    Integer(i64),
    /// Floating-point value.
    Float(f64),
    /// Calendar date.
    Date(NaiveDate),
    /// Time of day.
    Time(NaiveTime),
    /// Instant, millisecond precision.
    Timestamp(DateTime<Utc>),
}

impl PartialOrd for Measure {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Length(left), Self::Length(right))
            | (Self::Integer(left), Self::Integer(right)) => left.partial_cmp(right),
            (Self::Float(left), Self::Float(right)) => left.partial_cmp(right),
            (Self::Date(left), Self::Date(right)) => left.partial_cmp(right),
            (Self::Time(left), Self::Time(right)) => left.partial_cmp(right),
            (Self::Timestamp(left), Self::Timestamp(right)) => left.partial_cmp(right),
            _ => None,
        }
    }
}

impl Display for Measure {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(value) | Self::Integer(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value}"),
            Self::Date(value) => write!(formatter, "{}", value.format("%Y-%m-%d")),
            Self::Time(value) => write!(formatter, "{}", value.format("%H:%M:%S%.3f")),
            Self::Timestamp(value) => {
                formatter.write_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinality_parse_keeps_sentinel_text() {
        let sizing = Sizing::parse(Some("1"), Some("*")).expect("cardinality should parse");
        assert_eq!(sizing.min_value(), Some(&1));
        assert_eq!(sizing.max_value(), Some(&i64::MAX));
        assert_eq!(sizing.max().map(Bound::raw), Some("*"));
    }

    #[test]
    fn cardinality_parse_treats_blank_as_unbounded() {
        let sizing = Sizing::parse(Some("  "), None).expect("blank sides are unbounded");
        assert!(sizing.is_unbounded());
    }

    #[test]
    fn cardinality_parse_rejects_negative_and_garbage() {
        let err = Sizing::parse(Some("-1"), None).unwrap_err();
        assert_eq!(err.side, "min");
        assert!(err.reason.contains("negative"));

        let err = Sizing::parse(None, Some("many")).unwrap_err();
        assert_eq!(err.side, "max");
    }

    #[test]
    fn measures_only_compare_within_a_kind() {
        assert!(Measure::Length(3) < Measure::Length(4));
        assert_eq!(
            Measure::Length(3).partial_cmp(&Measure::Integer(3)),
            None
        );
        assert!(Measure::Float(1.5) > Measure::Float(1.25));
    }

    #[test]
    fn size_limits_ignore_blank_text() {
        let limits = SizeLimits::new(Some(" "), Some("10"));
        assert_eq!(limits.min_text(), None);
        assert_eq!(limits.max_text(), Some("10"));
    }
}
