//! Structural validation of schema entries.
//!
//! An entry must pass these checks before any data is validated against it:
//! key and description shape, a coherent validity window and cardinality,
//! a parseable value size, and enumeration, default and example literals that
//! are themselves valid for the entry.

use crate::engine::{enumeration_literals, validate_role, value_sizing};
use crate::error::{ValidationError, ValidationResult};
use crate::model::{SchemaEntry, ValueRole};
use crate::registry::ValidatorRegistry;

/// Check that `entry` is well formed.
///
/// # Errors
///
/// Returns `ValidationError::SchemaInvalid` naming the first offending field, or
/// `ValidationError::Grammar` when the entry's validator cannot be built.
pub fn validate_schema_entry(
    registry: &ValidatorRegistry,
    entry: &SchemaEntry,
) -> ValidationResult<()> {
    let result = check(registry, entry);
    if let Err(err) = &result {
        tracing::warn!(key = %entry.key, error = %err, "schema entry rejected");
    }
    result
}

fn check(registry: &ValidatorRegistry, entry: &SchemaEntry) -> ValidationResult<()> {
    check_key(entry)?;
    check_description(entry)?;
    if entry.valid_from >= entry.valid_till {
        return Err(schema_invalid(
            entry,
            "validity",
            "validFrom must precede validTill",
        ));
    }
    if let (Some(min), Some(max)) = (entry.cardinality.min(), entry.cardinality.max()) {
        if min.value() > max.value() {
            return Err(schema_invalid(
                entry,
                "cardinality",
                format!("min [{}] exceeds max [{}]", min.raw(), max.raw()),
            ));
        }
    }

    let validator = registry.validator(entry.data_type)?;
    if let Some(sizing) = value_sizing(validator, entry)? {
        if let (Some(min), Some(max)) = (sizing.min(), sizing.max()) {
            if validator.is_greater_than(Some(min.value()), Some(max.value())) {
                return Err(schema_invalid(
                    entry,
                    "valueSize",
                    format!("min [{}] exceeds max [{}]", min.raw(), max.raw()),
                ));
            }
        }
    }

    if let Some(raw) = entry
        .enumeration_value
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
    {
        let literals = enumeration_literals(raw)
            .map_err(|message| schema_invalid(entry, "enumerationValue", message))?;
        for literal in literals {
            check_literal(registry, entry, &literal, ValueRole::EnumerationValue)?;
        }
    }

    if let Some(default_value) = entry.default_value.as_deref() {
        match validate_role(registry, entry, Some(default_value), ValueRole::DefaultValue) {
            Ok(_) | Err(ValidationError::EmptyValue { .. }) => {}
            Err(err) => return Err(lift(entry, ValueRole::DefaultValue, err)),
        }
    }
    if let Some(example_value) = entry.example_value.as_deref() {
        check_literal(registry, entry, example_value, ValueRole::ExampleValue)?;
    }
    Ok(())
}

fn check_key(entry: &SchemaEntry) -> ValidationResult<()> {
    if entry.key.trim().is_empty() {
        return Err(schema_invalid(entry, "key", "must not be blank"));
    }
    if entry.key.chars().any(char::is_whitespace) {
        return Err(schema_invalid(entry, "key", "must not contain whitespace"));
    }
    Ok(())
}

fn check_description(entry: &SchemaEntry) -> ValidationResult<()> {
    let description = entry.description.trim();
    let Some(first) = description.chars().next() else {
        return Err(schema_invalid(entry, "description", "must not be empty"));
    };
    if !first.is_uppercase() {
        return Err(schema_invalid(
            entry,
            "description",
            "must start with an upper-case letter",
        ));
    }
    if description.split_whitespace().count() > 2 && !description.ends_with(['.', '!', '?']) {
        return Err(schema_invalid(
            entry,
            "description",
            "must end with '.', '!' or '?' when longer than two words",
        ));
    }
    Ok(())
}

fn check_literal(
    registry: &ValidatorRegistry,
    entry: &SchemaEntry,
    literal: &str,
    role: ValueRole,
) -> ValidationResult<()> {
    validate_role(registry, entry, Some(literal), role)
        .map(|_| ())
        .map_err(|err| lift(entry, role, err))
}

fn lift(entry: &SchemaEntry, role: ValueRole, err: ValidationError) -> ValidationError {
    match err {
        ValidationError::SchemaInvalid { .. } | ValidationError::Grammar { .. } => err,
        other => schema_invalid(entry, role.as_str(), other.to_string()),
    }
}

fn schema_invalid(
    entry: &SchemaEntry,
    field: &'static str,
    message: impl Into<String>,
) -> ValidationError {
    ValidationError::SchemaInvalid {
        key: entry.key.clone(),
        field,
        message: message.into(),
    }
}
