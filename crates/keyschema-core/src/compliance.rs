//! Backward-compatibility check between two versions of a schema entry.
//!
//! # Design
//! - A candidate is compliant when it only narrows the current entry: same key, data
//!   type and enumeration; a validity window and value size no wider than the current one.
//! - Cardinality and uniqueness are not compared.
//! - The first violation found is reported as the reason.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::engine::{enumeration_literals, value_sizing};
use crate::error::ValidationResult;
use crate::model::SchemaEntry;
use crate::registry::ValidatorRegistry;
use crate::sizing::{Bound, Measure, Sizing};
use crate::validator::ScalarValidator;

/// Verdict of a compliance comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceResult {
    /// Whether the candidate is a compatible evolution of the current entry.
    pub compliant: bool,
    /// Why the candidate is not compliant.
    pub reason: Option<String>,
}

impl ComplianceResult {
    /// A passing verdict.
    #[must_use]
    pub const fn compliant() -> Self {
        Self {
            compliant: true,
            reason: None,
        }
    }

    /// A failing verdict with its reason.
    pub fn violation(reason: impl Into<String>) -> Self {
        Self {
            compliant: false,
            reason: Some(reason.into()),
        }
    }
}

/// Decide whether `candidate` is a compatible evolution of `current`.
///
/// # Errors
///
/// Returns `ValidationError::SchemaInvalid` when either entry's value size does not
/// parse, or `ValidationError::Grammar` when the validator cannot be built.
pub fn is_compliant(
    registry: &ValidatorRegistry,
    current: &SchemaEntry,
    candidate: &SchemaEntry,
) -> ValidationResult<ComplianceResult> {
    let verdict = compare(registry, current, candidate)?;
    if let Some(reason) = &verdict.reason {
        tracing::debug!(key = %current.key, reason = %reason, "candidate schema is not compliant");
    }
    Ok(verdict)
}

fn compare(
    registry: &ValidatorRegistry,
    current: &SchemaEntry,
    candidate: &SchemaEntry,
) -> ValidationResult<ComplianceResult> {
    if current.key != candidate.key {
        return Ok(ComplianceResult::violation(format!(
            "key changed from '{}' to '{}'",
            current.key, candidate.key
        )));
    }
    if candidate.valid_from < current.valid_from {
        return Ok(ComplianceResult::violation(format!(
            "validFrom regressed from {} to {}",
            instant(current.valid_from),
            instant(candidate.valid_from)
        )));
    }
    if candidate.valid_till > current.valid_till {
        return Ok(ComplianceResult::violation(format!(
            "validTill widened from {} to {}",
            instant(current.valid_till),
            instant(candidate.valid_till)
        )));
    }
    if current.data_type != candidate.data_type {
        return Ok(ComplianceResult::violation(format!(
            "dataType changed from {} to {}",
            current.data_type, candidate.data_type
        )));
    }
    if enumeration(current) != enumeration(candidate) {
        return Ok(ComplianceResult::violation(format!(
            "enumerationValue changed from {} to {}",
            declared(current.enumeration_value.as_deref()),
            declared(candidate.enumeration_value.as_deref())
        )));
    }

    let validator = registry.validator(current.data_type)?;
    let current_size = value_sizing(validator, current)?;
    let candidate_size = value_sizing(validator, candidate)?;
    Ok(match (current_size, candidate_size) {
        (None, _) => ComplianceResult::compliant(),
        (Some(_), None) => {
            ComplianceResult::violation("valueSize removed, accepting any value size")
        }
        (Some(current_size), Some(candidate_size)) => {
            compare_sizes(validator, &current_size, &candidate_size)
        }
    })
}

fn compare_sizes(
    validator: &dyn ScalarValidator,
    current: &Sizing<Measure>,
    candidate: &Sizing<Measure>,
) -> ComplianceResult {
    if validator.is_greater_than(current.min_value(), candidate.min_value()) {
        return ComplianceResult::violation(format!(
            "valueSize min widened from [{}] to [{}]",
            raw(current.min()),
            raw(candidate.min())
        ));
    }
    let natural = validator.natural_max();
    let current_max = current.max_value().copied().or(natural);
    let candidate_max = candidate.max_value().copied().or(natural);
    if validator.is_greater_than(candidate_max.as_ref(), current_max.as_ref()) {
        return ComplianceResult::violation(format!(
            "valueSize max widened from [{}] to [{}]",
            raw(current.max()),
            raw(candidate.max())
        ));
    }
    ComplianceResult::compliant()
}

fn enumeration(entry: &SchemaEntry) -> Option<Vec<String>> {
    let raw = entry
        .enumeration_value
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())?;
    Some(enumeration_literals(raw).unwrap_or_else(|_| vec![raw.trim().to_string()]))
}

fn declared(raw: Option<&str>) -> &str {
    raw.filter(|raw| !raw.trim().is_empty()).unwrap_or("none")
}

fn raw(bound: Option<&Bound<Measure>>) -> &str {
    bound.map_or("unbounded", Bound::raw)
}

fn instant(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
