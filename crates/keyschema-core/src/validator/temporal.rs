//! DATE, TIME and TIMESTAMP validators.
//!
//! # Design
//! - DATE is `YYYY-MM-DD`; TIME is `HH:MM:SS` with optional fraction; TIMESTAMP is RFC-3339.
//! - Fractions are truncated to milliseconds on conversion and before comparison, so
//!   the canonical literal of a converted value re-validates to the same value.

use chrono::{DateTime, NaiveDate, NaiveTime, SubsecRound, Utc};

use crate::defaults::{max_date, max_time, max_timestamp, min_date, min_timestamp};
use crate::error::ScalarError;
use crate::model::DataType;
use crate::sizing::Measure;
use crate::value::ConfigValue;

use super::{ScalarValidator, invalid_literal};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// Calendar dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateValidator;

impl ScalarValidator for DateValidator {
    fn data_type(&self) -> DataType {
        DataType::Date
    }

    fn parse(&self, literal: &str) -> Result<ConfigValue, ScalarError> {
        parse_date(literal)
            .map(ConfigValue::Date)
            .ok_or_else(|| invalid_literal(DataType::Date))
    }

    fn measure(&self, value: &ConfigValue) -> Option<Measure> {
        match value {
            ConfigValue::Date(date) => Some(Measure::Date(*date)),
            _ => None,
        }
    }

    fn natural_min(&self) -> Option<Measure> {
        Some(Measure::Date(min_date()))
    }

    fn natural_max(&self) -> Option<Measure> {
        Some(Measure::Date(max_date()))
    }

    fn parse_bound(&self, raw: &str) -> Option<Measure> {
        parse_date(raw).map(Measure::Date)
    }
}

/// Times of day, millisecond precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeValidator;

impl ScalarValidator for TimeValidator {
    fn data_type(&self) -> DataType {
        DataType::Time
    }

    fn parse(&self, literal: &str) -> Result<ConfigValue, ScalarError> {
        parse_time(literal)
            .map(ConfigValue::Time)
            .ok_or_else(|| invalid_literal(DataType::Time))
    }

    fn measure(&self, value: &ConfigValue) -> Option<Measure> {
        match value {
            ConfigValue::Time(time) => Some(Measure::Time(*time)),
            _ => None,
        }
    }

    fn natural_min(&self) -> Option<Measure> {
        Some(Measure::Time(NaiveTime::MIN))
    }

    fn natural_max(&self) -> Option<Measure> {
        Some(Measure::Time(max_time()))
    }

    fn parse_bound(&self, raw: &str) -> Option<Measure> {
        parse_time(raw).map(Measure::Time)
    }
}

/// RFC-3339 instants, normalised to UTC and truncated to milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampValidator;

impl ScalarValidator for TimestampValidator {
    fn data_type(&self) -> DataType {
        DataType::Timestamp
    }

    fn parse(&self, literal: &str) -> Result<ConfigValue, ScalarError> {
        parse_timestamp(literal)
            .map(ConfigValue::Timestamp)
            .ok_or_else(|| invalid_literal(DataType::Timestamp))
    }

    fn measure(&self, value: &ConfigValue) -> Option<Measure> {
        match value {
            ConfigValue::Timestamp(instant) => Some(Measure::Timestamp(*instant)),
            _ => None,
        }
    }

    fn natural_min(&self) -> Option<Measure> {
        Some(Measure::Timestamp(min_timestamp()))
    }

    fn natural_max(&self) -> Option<Measure> {
        Some(Measure::Timestamp(max_timestamp()))
    }

    fn parse_bound(&self, raw: &str) -> Option<Measure> {
        parse_timestamp(raw).map(Measure::Timestamp)
    }

    fn is_greater_than(&self, left: Option<&Measure>, right: Option<&Measure>) -> bool {
        match (left.map(truncated), right.map(truncated)) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(left), Some(right)) => left > right,
        }
    }
}

fn truncated(measure: &Measure) -> Measure {
    match measure {
        Measure::Timestamp(instant) => Measure::Timestamp(instant.trunc_subsecs(3)),
        other => *other,
    }
}

fn parse_date(literal: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(literal.trim(), DATE_FORMAT).ok()
}

fn parse_time(literal: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(literal.trim(), TIME_FORMAT)
        .ok()
        .map(|time| time.trunc_subsecs(3))
}

fn parse_timestamp(literal: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(literal.trim())
        .ok()
        .map(|instant| instant.with_timezone(&Utc).trunc_subsecs(3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizing::SizeLimits;
    use chrono::TimeZone;

    #[test]
    fn date_requires_full_calendar_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date");
        assert_eq!(DateValidator.validate("2024-02-29", None), Ok(ConfigValue::Date(expected)));
        assert!(DateValidator.validate("2023-02-29", None).is_err());
        assert!(DateValidator.validate("29/02/2024", None).is_err());
    }

    #[test]
    fn time_truncates_to_milliseconds() {
        let expected = NaiveTime::from_hms_milli_opt(8, 30, 0, 123).expect("valid time");
        assert_eq!(
            TimeValidator.validate("08:30:00.123456", None),
            Ok(ConfigValue::Time(expected))
        );
        assert!(TimeValidator.validate("08:30:00", None).is_ok());
        assert!(TimeValidator.validate("25:00:00", None).is_err());
    }

    #[test]
    fn timestamp_normalises_offsets_and_precision() {
        let expected = Utc
            .with_ymd_and_hms(2024, 5, 1, 10, 0, 0)
            .single()
            .expect("valid instant")
            + chrono::TimeDelta::milliseconds(250);
        assert_eq!(
            TimestampValidator.validate("2024-05-01T12:00:00.250999+02:00", None),
            Ok(ConfigValue::Timestamp(expected))
        );
        assert!(TimestampValidator.validate("2024-05-01", None).is_err());
    }

    #[test]
    fn timestamp_ordering_ignores_sub_millisecond_noise() {
        let base = Utc
            .with_ymd_and_hms(2024, 5, 1, 10, 0, 0)
            .single()
            .expect("valid instant");
        let later = base + chrono::TimeDelta::microseconds(400);
        assert!(!TimestampValidator.is_greater_than(
            Some(&Measure::Timestamp(later)),
            Some(&Measure::Timestamp(base))
        ));
        assert!(TimestampValidator.is_greater_than(Some(&Measure::Timestamp(base)), None));
    }

    #[test]
    fn date_range_uses_declared_text() {
        let sizing = DateValidator
            .create_sizing(&SizeLimits::between("2020-01-01", "2020-12-31"))
            .expect("sizing parses")
            .expect("sizing declared");
        assert!(DateValidator.validate("2020-06-15", Some(&sizing)).is_ok());
        assert_eq!(
            DateValidator.validate("2021-01-01", Some(&sizing)),
            Err(ScalarError::Invalid("is too big, the maximum is [2020-12-31]".into()))
        );
    }
}
