//! Sentinel bounds and heuristic minimum lengths shared by the validators.
//!
//! # Design
//! - Centralize the natural range of every data type so validators and the
//!   compliance comparator agree on what "unbounded" means.
//! - Keep heuristic minimum literal lengths explicit for auditability.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// Minimum plausible length of a CERTIFICATE literal.
pub const CERTIFICATE_MIN_LENGTH: i64 = 16;
/// Minimum plausible length of a COLOR literal (`red`, `#fff`).
pub const COLOR_MIN_LENGTH: i64 = 3;
/// Minimum plausible length of a CRON literal (`* * * * *`).
pub const CRON_MIN_LENGTH: i64 = 9;
/// Minimum plausible length of a URI literal.
pub const URI_MIN_LENGTH: i64 = 3;
/// Length of a hyphenated UUID literal.
pub const UUID_MAX_LENGTH: i64 = 36;
/// Textual sentinel standing for a data type's natural bound.
pub const NATURAL_BOUND: &str = "*";

/// Latest representable DATE (`9999-12-31`).
#[must_use]
pub fn max_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(9_999, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Earliest DATE accepted as a natural lower bound (the Unix epoch).
#[must_use]
pub fn min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1_970, 1, 1).unwrap_or_default()
}

/// Latest representable TIME (`23:59:59.999`).
#[must_use]
pub fn max_time() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

/// Latest representable TIMESTAMP (`9999-12-31T12:00:00.000Z`).
#[must_use]
pub fn max_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(9_999, 12, 31, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// The Unix epoch as a TIMESTAMP.
#[must_use]
pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(0, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Earliest representable TIMESTAMP.
#[must_use]
pub const fn min_timestamp() -> DateTime<Utc> {
    DateTime::<Utc>::MIN_UTC
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_match_documented_literals() {
        assert_eq!(max_date().to_string(), "9999-12-31");
        assert_eq!(min_date().to_string(), "1970-01-01");
        assert_eq!(max_time().format("%H:%M:%S%.3f").to_string(), "23:59:59.999");
        assert_eq!(
            max_timestamp()
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "9999-12-31T12:00:00.000Z"
        );
        assert!(min_timestamp() < max_timestamp());
    }
}
