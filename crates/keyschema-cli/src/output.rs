//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use chrono::SecondsFormat;
use keyschema_core::error::REDACTED;
use keyschema_core::{BinaryObject, CidrRange, ConfigValue, SchemaEntry};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Outcome of one structural schema check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct CheckReport {
    pub(crate) key: String,
    pub(crate) valid: bool,
    pub(crate) detail: Option<String>,
}

/// Outcome of comparing one key across two catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ComplianceReport {
    pub(crate) key: String,
    pub(crate) compliant: bool,
    pub(crate) detail: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValuesView<'a> {
    key: &'a str,
    data_type: &'static str,
    empty: bool,
    values: Vec<String>,
}

#[derive(Serialize)]
struct BinaryView<'a> {
    name: Option<&'a str>,
    timestamp: Option<String>,
    mimetype: Option<&'a str>,
    data: Option<&'a str>,
    bytes: usize,
    encoded: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RangeView {
    network: String,
    broadcast: String,
    prefix_length: u32,
}

#[derive(Serialize)]
struct MembershipView<'a> {
    address: &'a str,
    scope: &'a str,
    inside: bool,
}

pub(crate) fn render_values(
    entry: &SchemaEntry,
    values: &[ConfigValue],
    format: OutputFormat,
) -> CliResult<String> {
    let shown: Vec<String> = values
        .iter()
        .map(|value| {
            if entry.is_confidential {
                REDACTED.to_string()
            } else {
                value.to_string()
            }
        })
        .collect();
    match format {
        OutputFormat::Json => to_json(&ValuesView {
            key: &entry.key,
            data_type: entry.data_type.as_str(),
            empty: shown.is_empty(),
            values: shown,
        }),
        OutputFormat::Table => {
            let mut text = format!("{} ({})\n", entry.key, entry.data_type);
            if shown.is_empty() {
                text.push_str("  <empty>\n");
            }
            for value in &shown {
                text.push_str(&format!("  {value}\n"));
            }
            Ok(text)
        }
    }
}

pub(crate) fn render_check(reports: &[CheckReport], format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(&reports),
        OutputFormat::Table => {
            let mut text = format!("{:<40} {:<8} DETAIL\n", "KEY", "STATUS");
            for report in reports {
                let status = if report.valid { "ok" } else { "invalid" };
                text.push_str(&format!(
                    "{:<40} {:<8} {}\n",
                    report.key,
                    status,
                    report.detail.as_deref().unwrap_or("")
                ));
            }
            Ok(text)
        }
    }
}

pub(crate) fn render_compliance(
    reports: &[ComplianceReport],
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(&reports),
        OutputFormat::Table => {
            let mut text = format!("{:<40} {:<10} DETAIL\n", "KEY", "COMPLIANT");
            for report in reports {
                let status = if report.compliant { "yes" } else { "no" };
                text.push_str(&format!(
                    "{:<40} {:<10} {}\n",
                    report.key,
                    status,
                    report.detail.as_deref().unwrap_or("")
                ));
            }
            Ok(text)
        }
    }
}

pub(crate) fn render_binary(
    object: &BinaryObject,
    encoded: &str,
    bytes: usize,
    format: OutputFormat,
) -> CliResult<String> {
    let timestamp = object
        .timestamp
        .map(|instant| instant.to_rfc3339_opts(SecondsFormat::Millis, true));
    match format {
        OutputFormat::Json => to_json(&BinaryView {
            name: object.name.as_deref(),
            timestamp,
            mimetype: object.mimetype.as_deref(),
            data: object.data.as_deref(),
            bytes,
            encoded,
        }),
        OutputFormat::Table => {
            let mut text = String::new();
            text.push_str(&format!("name: {}\n", object.name.as_deref().unwrap_or("-")));
            text.push_str(&format!("timestamp: {}\n", timestamp.as_deref().unwrap_or("-")));
            text.push_str(&format!(
                "mimetype: {}\n",
                object.mimetype.as_deref().unwrap_or("-")
            ));
            text.push_str(&format!("bytes: {bytes}\n"));
            text.push_str(&format!("encoded: {encoded}\n"));
            Ok(text)
        }
    }
}

pub(crate) fn render_range(range: &CidrRange, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(&RangeView {
            network: range.network().to_string(),
            broadcast: range.broadcast().to_string(),
            prefix_length: range.prefix_len(),
        }),
        OutputFormat::Table => Ok(format!(
            "range: {range}\nnetwork: {}\nbroadcast: {}\n",
            range.network(),
            range.broadcast()
        )),
    }
}

pub(crate) fn render_membership(
    address: &str,
    scope: &str,
    inside: bool,
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(&MembershipView {
            address,
            scope,
            inside,
        }),
        OutputFormat::Table => Ok(format!("{address} in {scope}: {inside}\n")),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map(|text| text + "\n")
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}
