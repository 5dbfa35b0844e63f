//! Cardinality, uniqueness and enumeration enforcement over the scalar validators.
//!
//! # Design
//! - Scalar mode when the entry's maximum cardinality is at most one, JSON-array mode
//!   otherwise; enumeration literals are always checked in scalar mode.
//! - The effective minimum cardinality depends on the role of the checked string:
//!   defaults may be absent, examples and enumeration literals must be present.
//! - Failures carry every value converted before the failure was detected. Uniqueness
//!   violations are collected over the whole array before failing.
//! - The engine never substitutes defaults; callers do that before invoking it.

use serde_json::Value;

use crate::error::{REDACTED, ScalarError, ValidationError, ValidationResult};
use crate::model::{SchemaEntry, ValueRole};
use crate::registry::ValidatorRegistry;
use crate::sizing::{Measure, Sizing};
use crate::validator::ScalarValidator;
use crate::value::ConfigValue;

/// Validate caller-supplied input for `entry`.
///
/// # Errors
///
/// Returns `EmptyValue` when the input is absent and the entry is optional,
/// `Invalid` when it is rejected, and `SchemaInvalid` when the entry's value size
/// or enumeration cannot be parsed.
pub fn validate_input(
    registry: &ValidatorRegistry,
    entry: &SchemaEntry,
    raw: Option<&str>,
) -> ValidationResult<Vec<ConfigValue>> {
    validate_role(registry, entry, raw, ValueRole::Input)
}

/// Validate a string playing `role` for `entry`.
///
/// # Errors
///
/// See [`validate_input`]; messages name `role`.
pub fn validate_role(
    registry: &ValidatorRegistry,
    entry: &SchemaEntry,
    raw: Option<&str>,
    role: ValueRole,
) -> ValidationResult<Vec<ConfigValue>> {
    let validator = registry.validator(entry.data_type)?;
    let sizing = value_sizing(validator, entry)?;
    let allowed = if role == ValueRole::EnumerationValue {
        None
    } else {
        enumeration(validator, entry, sizing.as_ref())?
    };
    let pass = Pass {
        entry,
        validator,
        sizing,
        allowed,
        role,
        min: effective_min(entry, role),
    };

    let result = if role == ValueRole::EnumerationValue || !entry.is_multi_valued() {
        pass.scalar(raw)
    } else {
        pass.multi(raw)
    };
    match &result {
        Ok(values) => tracing::trace!(
            key = %entry.key,
            %role,
            data_type = %entry.data_type,
            count = values.len(),
            "value accepted"
        ),
        Err(err) => tracing::debug!(
            key = %entry.key,
            %role,
            data_type = %entry.data_type,
            error = %err,
            "value rejected"
        ),
    }
    result
}

/// Parse the entry's value-size declaration with its validator.
pub(crate) fn value_sizing(
    validator: &dyn ScalarValidator,
    entry: &SchemaEntry,
) -> ValidationResult<Option<Sizing<Measure>>> {
    let Some(limits) = &entry.value_size else {
        return Ok(None);
    };
    validator
        .create_sizing(limits)
        .map_err(|err| ValidationError::SchemaInvalid {
            key: entry.key.clone(),
            field: "valueSize",
            message: err.to_string(),
        })
}

/// Split an enumeration declaration into its literals.
///
/// A leading `[` selects JSON-array syntax; anything else is a comma-separated list.
pub(crate) fn enumeration_literals(raw: &str) -> Result<Vec<String>, String> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        return json_elements(trimmed);
    }
    Ok(trimmed
        .split(',')
        .map(|literal| literal.trim().to_string())
        .collect())
}

fn enumeration(
    validator: &dyn ScalarValidator,
    entry: &SchemaEntry,
    sizing: Option<&Sizing<Measure>>,
) -> ValidationResult<Option<Vec<(String, ConfigValue)>>> {
    let Some(raw) = entry
        .enumeration_value
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
    else {
        return Ok(None);
    };
    let schema_invalid = |message: String| ValidationError::SchemaInvalid {
        key: entry.key.clone(),
        field: "enumerationValue",
        message,
    };

    let literals = enumeration_literals(raw).map_err(schema_invalid)?;
    let mut allowed = Vec::with_capacity(literals.len());
    for literal in literals {
        let value = validator.validate(&literal, sizing).map_err(|err| {
            let shown = if entry.is_confidential { REDACTED } else { literal.as_str() };
            schema_invalid(format!("'{shown}' {}", reason(&err)))
        })?;
        allowed.push((literal, value));
    }
    Ok(Some(allowed))
}

const fn effective_min(entry: &SchemaEntry, role: ValueRole) -> i64 {
    let min = match entry.cardinality.min() {
        Some(bound) => *bound.value(),
        None => 0,
    };
    match role {
        ValueRole::Input => min,
        ValueRole::DefaultValue => 0,
        ValueRole::ExampleValue => {
            if min > 1 {
                min
            } else {
                1
            }
        }
        ValueRole::EnumerationValue => 1,
    }
}

fn reason(err: &ScalarError) -> String {
    match err {
        ScalarError::Empty => "is empty".to_string(),
        ScalarError::Invalid(message) => message.clone(),
    }
}

fn json_elements(literal: &str) -> Result<Vec<String>, String> {
    let parsed: Value =
        serde_json::from_str(literal).map_err(|err| format!("is not valid JSON ({err})"))?;
    let Value::Array(items) = parsed else {
        return Err("is not a JSON array".to_string());
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(text) => Ok(text),
            Value::Number(number) => Ok(number.to_string()),
            Value::Bool(flag) => Ok(flag.to_string()),
            Value::Null => Ok(String::new()),
            Value::Array(_) | Value::Object(_) => {
                Err("contains a nested array or object".to_string())
            }
        })
        .collect()
}

struct Pass<'a> {
    entry: &'a SchemaEntry,
    validator: &'a dyn ScalarValidator,
    sizing: Option<Sizing<Measure>>,
    allowed: Option<Vec<(String, ConfigValue)>>,
    role: ValueRole,
    min: i64,
}

impl Pass<'_> {
    fn scalar(&self, raw: Option<&str>) -> ValidationResult<Vec<ConfigValue>> {
        let literal = raw.unwrap_or_default();
        if literal.trim().is_empty() {
            return Err(self.missing(literal));
        }
        let value = self.element(literal, &[])?;
        Ok(vec![value])
    }

    fn multi(&self, raw: Option<&str>) -> ValidationResult<Vec<ConfigValue>> {
        let literal = raw.unwrap_or_default();
        if literal.trim().is_empty() {
            return Err(self.missing(literal));
        }
        let elements =
            json_elements(literal).map_err(|message| self.invalid(literal, message, &[]))?;
        if elements.is_empty() && self.min <= 0 {
            return Err(self.empty());
        }

        let count = i64::try_from(elements.len()).unwrap_or(i64::MAX);
        if count < self.min {
            return Err(self.invalid(
                literal,
                format!("min cardinality is [{}]", self.min),
                &[],
            ));
        }
        if let Some(max) = self.entry.cardinality.max() {
            if count > *max.value() {
                return Err(self.invalid(
                    literal,
                    format!("max cardinality is [{}]", max.raw()),
                    &[],
                ));
            }
        }

        let mut converted = Vec::with_capacity(elements.len());
        let mut duplicates: Vec<&str> = Vec::new();
        for element in &elements {
            if element.trim().is_empty() {
                return Err(self.invalid(element, "is an empty element", &converted));
            }
            let value = self.element(element, &converted)?;
            if self.entry.is_uniqueness
                && converted.contains(&value)
                && !duplicates.contains(&element.as_str())
            {
                duplicates.push(element);
            }
            converted.push(value);
        }

        if !duplicates.is_empty() {
            return Err(self.invalid(&duplicates.join(", "), "already exist(s)", &converted));
        }
        Ok(converted)
    }

    fn element(&self, literal: &str, converted: &[ConfigValue]) -> ValidationResult<ConfigValue> {
        let value = self
            .validator
            .validate(literal, self.sizing.as_ref())
            .map_err(|err| self.invalid(literal, reason(&err), converted))?;
        if let Some(allowed) = &self.allowed {
            if !allowed.iter().any(|(_, candidate)| *candidate == value) {
                return Err(self.invalid(literal, self.not_allowed(allowed), converted));
            }
        }
        Ok(value)
    }

    fn not_allowed(&self, allowed: &[(String, ConfigValue)]) -> String {
        if self.entry.is_confidential {
            return "is not one of the allowed values".to_string();
        }
        let literals: Vec<&str> = allowed.iter().map(|(literal, _)| literal.as_str()).collect();
        format!("is not one of the allowed values: {}", literals.join(", "))
    }

    fn missing(&self, literal: &str) -> ValidationError {
        if self.min <= 0 {
            self.empty()
        } else {
            self.invalid(literal, "is missing but the entry is mandatory", &[])
        }
    }

    fn empty(&self) -> ValidationError {
        ValidationError::EmptyValue {
            key: self.entry.key.clone(),
            role: self.role,
        }
    }

    fn invalid(
        &self,
        input: &str,
        message: impl Into<String>,
        converted: &[ConfigValue],
    ) -> ValidationError {
        ValidationError::Invalid {
            key: self.entry.key.clone(),
            role: self.role,
            input: input.to_string(),
            message: message.into(),
            converted: converted.to_vec(),
            confidential: self.entry.is_confidential,
        }
    }
}
