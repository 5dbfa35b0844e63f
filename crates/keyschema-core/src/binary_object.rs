//! Compact string encoding for binary objects.
//!
//! Grammar, every part optional and `|`-delimited:
//!
//! ```text
//! [name|] [timestamp|] [{mimetype}] [base64-data]
//! ```
//!
//! One segment is the content; two segments are `timestamp|content` when the first
//! parses as a timestamp and `name|content` otherwise; three or more are
//! `name|timestamp|...|content` with the intermediate segments ignored.
//! A literal `|` or `\` inside a name is escaped with `\`.
//!
//! Names are kept verbatim, surrounding whitespace included. Blank names, blank
//! mimetypes (`{}`) and blank payloads decode as absent, so encode/decode round
//! trips only preserve fields that carry non-blank text.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BinaryObjectError;

const SEPARATOR: char = '|';
const ESCAPE: char = '\\';

/// Structured binary payload with optional metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryObject {
    /// Logical name (often a file name).
    pub name: Option<String>,
    /// Creation instant, millisecond precision.
    pub timestamp: Option<DateTime<Utc>>,
    /// MIME type of the payload.
    pub mimetype: Option<String>,
    /// Base64-encoded payload.
    pub data: Option<String>,
}

impl BinaryObject {
    /// Parse the compact grammar.
    ///
    /// # Errors
    ///
    /// Returns `BinaryObjectError::Timestamp` when a fully-qualified literal
    /// (three or more segments) carries a timestamp segment that does not parse.
    pub fn decode(input: &str) -> Result<Self, BinaryObjectError> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }

        let segments = split_segments(input);
        let object = match segments.as_slice() {
            [] => Self::default(),
            [content] => Self::from_content(None, None, content),
            [first, content] => match parse_timestamp(first) {
                Some(timestamp) => Self::from_content(None, Some(timestamp), content),
                None => Self::from_content(verbatim(first), None, content),
            },
            [name, timestamp, .., content] => {
                let timestamp = if timestamp.trim().is_empty() {
                    None
                } else {
                    Some(parse_timestamp(timestamp).ok_or_else(|| {
                        BinaryObjectError::Timestamp {
                            segment: timestamp.trim().to_string(),
                        }
                    })?)
                };
                Self::from_content(verbatim(name), timestamp, content)
            }
        };
        Ok(object)
    }

    /// Render the fully-qualified form, stamping the current time when no timestamp is set.
    #[must_use]
    pub fn encode(&self) -> String {
        self.encode_at(Utc::now())
    }

    /// Render the fully-qualified form, stamping `now` when no timestamp is set.
    #[must_use]
    pub fn encode_at(&self, now: DateTime<Utc>) -> String {
        let mut encoded = String::new();
        if let Some(name) = &self.name {
            encoded.push_str(&escape(name));
            encoded.push(SEPARATOR);
        }
        let timestamp = self.timestamp.unwrap_or(now);
        encoded.push_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true));
        encoded.push(SEPARATOR);
        if let Some(mimetype) = &self.mimetype {
            encoded.push('{');
            encoded.push_str(mimetype);
            encoded.push('}');
        }
        if let Some(data) = &self.data {
            encoded.push_str(data);
        }
        encoded
    }

    /// Copy of `self` with absent fields filled in from `other`.
    #[must_use]
    pub fn merged_with(&self, other: &Self) -> Self {
        Self {
            name: self.name.clone().or_else(|| other.name.clone()),
            timestamp: self.timestamp.or(other.timestamp),
            mimetype: self.mimetype.clone().or_else(|| other.mimetype.clone()),
            data: self.data.clone().or_else(|| other.data.clone()),
        }
    }

    /// Decode the base64 payload; an absent payload decodes to no bytes.
    ///
    /// # Errors
    ///
    /// Returns the base64 decoding error when the payload is not valid base64.
    pub fn decoded_data(&self) -> Result<Vec<u8>, base64::DecodeError> {
        self.data.as_deref().map_or_else(
            || Ok(Vec::new()),
            |data| general_purpose::STANDARD.decode(data),
        )
    }

    /// Whether no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.timestamp.is_none()
            && self.mimetype.is_none()
            && self.data.is_none()
    }

    fn from_content(
        name: Option<String>,
        timestamp: Option<DateTime<Utc>>,
        content: &str,
    ) -> Self {
        let content = content.trim();
        let (mimetype, data) = match content
            .strip_prefix('{')
            .and_then(|rest| rest.split_once('}'))
        {
            Some((mimetype, data)) => (non_blank(mimetype), non_blank(data)),
            None => (None, non_blank(content)),
        };
        Self {
            name,
            timestamp,
            mimetype,
            data,
        }
    }
}

impl FromStr for BinaryObject {
    type Err = BinaryObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl Display for BinaryObject {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.encode())
    }
}

/// Render a binary object in its fully-qualified compact form.
#[must_use]
pub fn encode_binary_object(object: &BinaryObject) -> String {
    object.encode()
}

/// Parse a compact binary-object literal.
///
/// # Errors
///
/// See [`BinaryObject::decode`].
pub fn decode_binary_object(input: &str) -> Result<BinaryObject, BinaryObjectError> {
    BinaryObject::decode(input)
}

fn split_segments(input: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        match ch {
            ESCAPE => match chars.next() {
                Some(next @ (SEPARATOR | ESCAPE)) => current.push(next),
                Some(next) => {
                    current.push(ESCAPE);
                    current.push(next);
                }
                None => current.push(ESCAPE),
            },
            SEPARATOR => segments.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    segments.push(current);
    segments
}

fn escape(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for ch in name.chars() {
        if matches!(ch, SEPARATOR | ESCAPE) {
            escaped.push(ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// Parse an RFC-3339 timestamp segment, rejecting anything whose components are not numeric.
pub(crate) fn parse_timestamp(segment: &str) -> Option<DateTime<Utc>> {
    let candidate = segment.trim();
    let numeric = candidate.starts_with(|ch: char| ch.is_ascii_digit())
        && candidate.chars().all(|ch| {
            ch.is_ascii_digit() || matches!(ch, '-' | ':' | '.' | '+' | 'T' | 't' | 'Z' | 'z')
        });
    if !numeric {
        return None;
    }
    DateTime::parse_from_rfc3339(candidate)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc).trunc_subsecs(3))
}

fn verbatim(segment: &str) -> Option<String> {
    (!segment.trim().is_empty()).then(|| segment.to_string())
}

fn non_blank(segment: &str) -> Option<String> {
    let trimmed = segment.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
