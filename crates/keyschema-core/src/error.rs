//! Error types for validation, sizing, CIDR and binary-object operations.
//!
//! # Design
//! - `ValidationError` is the taxonomy surfaced to callers: empty, invalid, schema invalid.
//! - Scalar validators report the narrower `ScalarError`; the engine lifts it, adding
//!   the key and the logical role of the checked string.
//! - Confidential literals are retained in the `input` field but masked in messages.

use thiserror::Error;

use crate::model::{DataType, ValueRole};
use crate::value::ConfigValue;

/// Placeholder rendered instead of confidential literals.
pub const REDACTED: &str = "****";

/// Convenience alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Convenience alias for CIDR results.
pub type CidrResult<T> = Result<T, CidrError>;

/// Failures surfaced by the validation engine.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// The checked string was absent or blank. Callers decide whether to substitute a default.
    #[error("{role} for '{key}' is empty")]
    EmptyValue {
        /// Key of the schema entry being validated.
        key: String,
        /// Logical role of the checked string.
        role: ValueRole,
    },
    /// The checked string is present but was rejected.
    #[error("{role} '{}' for '{key}' {message}", shown(.input, .confidential))]
    Invalid {
        /// Key of the schema entry being validated.
        key: String,
        /// Logical role of the checked string.
        role: ValueRole,
        /// Offending literal (the element for multi-valued input).
        input: String,
        /// Human-readable reason.
        message: String,
        /// Values already converted before the failure was detected.
        converted: Vec<ConfigValue>,
        /// Whether the literal must be masked in messages.
        confidential: bool,
    },
    /// The schema entry itself is malformed.
    #[error("schema entry '{key}' has an invalid {field}: {message}")]
    SchemaInvalid {
        /// Key of the malformed schema entry.
        key: String,
        /// Schema field that failed the check.
        field: &'static str,
        /// Human-readable reason.
        message: String,
    },
    /// A built-in grammar failed to compile.
    #[error("grammar for {data_type} failed to compile")]
    Grammar {
        /// Data type whose validator could not be built.
        data_type: DataType,
        /// Pattern that failed to compile.
        pattern: &'static str,
        /// Underlying regex error.
        source: regex::Error,
    },
}

impl ValidationError {
    /// Whether this failure only signals an absent value.
    #[must_use]
    pub const fn is_empty_value(&self) -> bool {
        matches!(self, Self::EmptyValue { .. })
    }

    /// Values converted before the failure, when the failure carries any.
    #[must_use]
    pub fn converted(&self) -> &[ConfigValue] {
        match self {
            Self::Invalid { converted, .. } => converted,
            _ => &[],
        }
    }

    /// Logical role of the checked string, when the failure relates to one.
    #[must_use]
    pub const fn role(&self) -> Option<ValueRole> {
        match self {
            Self::EmptyValue { role, .. } | Self::Invalid { role, .. } => Some(*role),
            Self::SchemaInvalid { .. } | Self::Grammar { .. } => None,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn shown<'a>(input: &'a str, confidential: &bool) -> &'a str {
    if *confidential { REDACTED } else { input }
}

/// Outcome of a single-literal conversion performed by a scalar validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScalarError {
    /// The literal was absent or blank.
    #[error("value is empty")]
    Empty,
    /// The literal was rejected; the message reads as a predicate (`is not a valid NUMBER`).
    #[error("value {0}")]
    Invalid(String),
}

impl ScalarError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Failure to parse one side of a sizing declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{side} bound '{raw}' {reason}")]
pub struct SizingError {
    /// Which side failed (`min` or `max`).
    pub side: &'static str,
    /// Declared text of the bound.
    pub raw: String,
    /// Human-readable reason.
    pub reason: String,
}

/// Failures raised by the CIDR utilities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CidrError {
    /// The literal was not `address/prefixLength`.
    #[error("'{literal}' is not CIDR notation")]
    NotCidr {
        /// Offending literal.
        literal: String,
    },
    /// The address part was not an IPv4 or IPv6 literal.
    #[error("'{literal}' is not an IP address")]
    InvalidAddress {
        /// Offending literal.
        literal: String,
    },
    /// The prefix length was not a number within the address width.
    #[error("prefix length '{prefix}' is invalid for a {width}-bit address")]
    InvalidPrefix {
        /// Declared prefix text.
        prefix: String,
        /// Address width in bits.
        width: u32,
    },
    /// Resolving a host name failed.
    #[error("failed to resolve host '{host}': {detail}")]
    Resolve {
        /// Host name that could not be resolved.
        host: String,
        /// Resolver-provided detail.
        detail: String,
    },
}

/// Failures raised while decoding the compact binary-object grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BinaryObjectError {
    /// The timestamp segment of a fully-qualified literal did not parse.
    #[error("'{segment}' is not an RFC-3339 timestamp")]
    Timestamp {
        /// Offending segment.
        segment: String,
    },
}
