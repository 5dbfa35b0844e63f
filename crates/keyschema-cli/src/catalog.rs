//! JSON schema catalog loading and key lookup.
//!
//! # Design
//! - Documents use camelCase field names; the root is either an array of entries or
//!   an object with an `entries` array.
//! - Bounds may be written as strings or numbers; `"*"` passes through untouched.
//! - Enumerations may be written as a string or as a JSON array.
//! - Keys must be unique within a catalog.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use keyschema_core::{DataType, SchemaEntry, SizeLimits, Sizing};
use serde::Deserialize;
use serde_json::Value;

/// Schema entries indexed by key.
#[derive(Debug, Clone, Default)]
pub(crate) struct Catalog {
    entries: BTreeMap<String, SchemaEntry>,
}

impl Catalog {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let payload = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        Self::from_json(&payload)
            .with_context(|| format!("catalog {} is not valid", path.display()))
    }

    pub(crate) fn from_json(payload: &str) -> Result<Self> {
        let document: CatalogDocument =
            serde_json::from_str(payload).context("catalog is not valid JSON")?;
        let documents = match document {
            CatalogDocument::List(entries) | CatalogDocument::Wrapped { entries } => entries,
        };

        let mut entries = BTreeMap::new();
        for document in documents {
            let entry = document.into_entry()?;
            if entries.contains_key(&entry.key) {
                bail!("key '{}' is declared more than once", entry.key);
            }
            entries.insert(entry.key.clone(), entry);
        }
        tracing::debug!(entries = entries.len(), "catalog loaded");
        Ok(Self { entries })
    }

    /// Resolve a dotted key name to its schema entry.
    pub(crate) fn resolve(&self, key: &str) -> Option<&SchemaEntry> {
        self.entries.get(key.trim())
    }

    /// Entries in key order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.entries.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<EntryDocument>),
    Wrapped { entries: Vec<EntryDocument> },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryDocument {
    key: String,
    data_type: DataType,
    #[serde(default)]
    cardinality: Option<BoundsDocument>,
    #[serde(default)]
    value_size: Option<BoundsDocument>,
    #[serde(default)]
    enumeration_value: Option<EnumerationDocument>,
    #[serde(default)]
    default_value: Option<String>,
    #[serde(default)]
    example_value: Option<String>,
    #[serde(default)]
    is_uniqueness: bool,
    #[serde(default)]
    is_confidential: bool,
    description: String,
    #[serde(default)]
    valid_from: Option<DateTime<Utc>>,
    #[serde(default)]
    valid_till: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
struct BoundsDocument {
    #[serde(default)]
    min: Option<Value>,
    #[serde(default)]
    max: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EnumerationDocument {
    Text(String),
    List(Vec<Value>),
}

impl EntryDocument {
    fn into_entry(self) -> Result<SchemaEntry> {
        let key = self.key;
        let mut entry = SchemaEntry::new(key.clone(), self.data_type, self.description);

        if let Some(bounds) = self.cardinality {
            let (min, max) = bounds.texts().with_context(|| format!("'{key}' cardinality"))?;
            entry.cardinality = Sizing::parse(min.as_deref(), max.as_deref())
                .with_context(|| format!("'{key}' cardinality"))?;
        }
        if let Some(bounds) = self.value_size {
            let (min, max) = bounds.texts().with_context(|| format!("'{key}' valueSize"))?;
            entry.value_size = Some(SizeLimits::new(min.as_deref(), max.as_deref()));
        }
        entry.enumeration_value = match self.enumeration_value {
            None => None,
            Some(EnumerationDocument::Text(text)) => Some(text),
            Some(EnumerationDocument::List(items)) => Some(
                serde_json::to_string(&items)
                    .with_context(|| format!("'{key}' enumerationValue"))?,
            ),
        };
        entry.default_value = self.default_value;
        entry.example_value = self.example_value;
        entry.is_uniqueness = self.is_uniqueness;
        entry.is_confidential = self.is_confidential;
        if let Some(valid_from) = self.valid_from {
            entry.valid_from = valid_from;
        }
        if let Some(valid_till) = self.valid_till {
            entry.valid_till = valid_till;
        }
        Ok(entry)
    }
}

impl BoundsDocument {
    fn texts(&self) -> Result<(Option<String>, Option<String>)> {
        Ok((bound_text(self.min.as_ref())?, bound_text(self.max.as_ref())?))
    }
}

fn bound_text(value: Option<&Value>) -> Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(anyhow!("bound {other} must be a string or a number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyschema_test_support::fixtures::catalog_json;

    #[test]
    fn wrapped_catalog_populates_every_field() -> Result<()> {
        let catalog = Catalog::from_json(catalog_json())?;
        assert_eq!(catalog.len(), 4);

        let port = catalog.resolve("server.port").ok_or_else(|| anyhow!("missing port"))?;
        assert_eq!(port.data_type, DataType::Number);
        assert!(port.is_mandatory());
        assert_eq!(
            port.value_size,
            Some(SizeLimits::between("1", "65535"))
        );
        assert_eq!(port.default_value.as_deref(), Some("8080"));

        let allow = catalog.resolve(" server.allow ").ok_or_else(|| anyhow!("missing allow"))?;
        assert!(allow.is_multi_valued());
        assert!(allow.is_uniqueness);
        assert_eq!(allow.cardinality.max().map(|bound| bound.raw()), Some("*"));

        let password = catalog.resolve("db.password").ok_or_else(|| anyhow!("missing password"))?;
        assert!(password.is_confidential);
        Ok(())
    }

    #[test]
    fn bare_array_and_list_enumerations_are_accepted() -> Result<()> {
        let catalog = Catalog::from_json(
            r#"[{"key":"a.mode","dataType":"STRING","description":"Mode","enumerationValue":["x",1]}]"#,
        )?;
        let entry = catalog.resolve("a.mode").ok_or_else(|| anyhow!("missing entry"))?;
        assert_eq!(entry.enumeration_value.as_deref(), Some(r#"["x",1]"#));
        Ok(())
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let payload = r#"[
            {"key":"a","dataType":"STRING","description":"One"},
            {"key":"a","dataType":"NUMBER","description":"Two"}
        ]"#;
        let err = Catalog::from_json(payload).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn bad_bounds_are_rejected() {
        let payload =
            r#"[{"key":"a","dataType":"NUMBER","description":"One","cardinality":{"min":true}}]"#;
        assert!(Catalog::from_json(payload).is_err());
        let payload =
            r#"[{"key":"a","dataType":"NUMBER","description":"One","cardinality":{"min":"-1"}}]"#;
        assert!(Catalog::from_json(payload).is_err());
    }

    #[test]
    fn load_reads_from_disk() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.json");
        fs::write(&path, catalog_json())?;
        assert_eq!(Catalog::load(&path)?.len(), 4);
        assert!(Catalog::load(&dir.path().join("missing.json")).is_err());
        Ok(())
    }
}
