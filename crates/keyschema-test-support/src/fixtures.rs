//! Canned schema entries, instants and catalog documents.

use chrono::{DateTime, TimeZone, Utc};
use keyschema_core::{DataType, SchemaEntry, SizeLimits, Sizing, ValidatorRegistry};

/// Midnight UTC on the given calendar day.
///
/// # Panics
///
/// Panics when the date does not exist.
#[must_use]
pub fn instant(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("{year}-{month}-{day} is not a calendar date"))
}

/// A fresh validator registry.
#[must_use]
pub fn registry() -> ValidatorRegistry {
    ValidatorRegistry::new()
}

/// Optional scalar NUMBER entry bounded to `[min, max]`.
#[must_use]
pub fn number_entry(min: &str, max: &str) -> SchemaEntry {
    SchemaEntry::new("app.workers", DataType::Number, "Worker count.")
        .with_value_size(SizeLimits::between(min, max))
}

/// Multi-valued entry of `data_type` with cardinality `[min, max]`.
#[must_use]
pub fn list_entry(data_type: DataType, min: i64, max: i64) -> SchemaEntry {
    SchemaEntry::new("app.items", data_type, "Configured items.")
        .with_cardinality(Sizing::between(min, max))
}

/// Optional scalar STRING entry restricted to `enumeration`.
#[must_use]
pub fn enumerated_entry(enumeration: &str) -> SchemaEntry {
    SchemaEntry::new("app.mode", DataType::String, "Operating mode.").with_enumeration(enumeration)
}

/// NUMBER entry valid in `[from, till)`.
#[must_use]
pub fn windowed_entry(from: DateTime<Utc>, till: DateTime<Utc>) -> SchemaEntry {
    SchemaEntry::new("app.timeout", DataType::Number, "Request timeout.").with_validity(from, till)
}

/// Catalog document exercising every field the CLI reads.
#[must_use]
pub const fn catalog_json() -> &'static str {
    r#"{
  "entries": [
    {
      "key": "server.port",
      "dataType": "NUMBER",
      "cardinality": { "min": 1, "max": 1 },
      "valueSize": { "min": "1", "max": 65535 },
      "defaultValue": "8080",
      "exampleValue": "443",
      "description": "Listening port."
    },
    {
      "key": "server.allow",
      "dataType": "CIDR",
      "cardinality": { "min": 0, "max": "*" },
      "isUniqueness": true,
      "description": "Allowed client networks."
    },
    {
      "key": "server.mode",
      "dataType": "STRING",
      "enumerationValue": "[\"dev\",\"prod\"]",
      "defaultValue": "prod",
      "description": "Runtime mode."
    },
    {
      "key": "db.password",
      "dataType": "STRING",
      "valueSize": { "min": 8, "max": "*" },
      "isConfidential": true,
      "description": "Database password."
    }
  ]
}"#
}
