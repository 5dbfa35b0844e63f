//! Text-shaped data types: STRING, REGEXP, EMAIL, CRON, COLOR, CERTIFICATE and CIDR.
//!
//! All of them measure character length; they differ only in the grammar a literal
//! must satisfy. STRING literals are kept verbatim, every other type is trimmed.

use base64::{Engine as _, engine::general_purpose};
use regex::Regex;

use crate::cidr::{is_cidr_literal, is_ip_literal};
use crate::defaults::{CERTIFICATE_MIN_LENGTH, COLOR_MIN_LENGTH, CRON_MIN_LENGTH};
use crate::error::{ScalarError, ValidationError, ValidationResult};
use crate::model::DataType;
use crate::sizing::Measure;
use crate::value::ConfigValue;

use super::{ScalarValidator, invalid_literal, length_of, parse_length_bound};

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$";
const COLOR_PATTERN: &str = r"^(?:#(?:[0-9A-Fa-f]{3,4}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})|[A-Za-z]+)$";
const CRON_FIELD_PATTERN: &str = r"^[0-9A-Za-z*?/,#-]+$";
const PEM_PATTERN: &str =
    r"(?s)^-----BEGIN ([A-Z0-9 ]+)-----(.*?)-----END ([A-Z0-9 ]+)-----$";

#[derive(Debug)]
enum Grammar {
    Free,
    Regexp,
    Pattern(Regex),
    Cron(Regex),
    Certificate(Regex),
    Cidr,
}

/// Length-measured validator with a per-type grammar.
#[derive(Debug)]
pub struct TextValidator {
    data_type: DataType,
    natural_min: i64,
    grammar: Grammar,
}

impl TextValidator {
    const fn new(data_type: DataType, natural_min: i64, grammar: Grammar) -> Self {
        Self {
            data_type,
            natural_min,
            grammar,
        }
    }

    /// Free text, kept verbatim.
    #[must_use]
    pub const fn string() -> Self {
        Self::new(DataType::String, 0, Grammar::Free)
    }

    /// Literal that compiles as a regular expression.
    #[must_use]
    pub const fn regexp() -> Self {
        Self::new(DataType::Regexp, 0, Grammar::Regexp)
    }

    /// E-mail address.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Grammar` when the address pattern fails to compile.
    pub fn email() -> ValidationResult<Self> {
        let pattern = compile(DataType::Email, EMAIL_PATTERN)?;
        Ok(Self::new(DataType::Email, 0, Grammar::Pattern(pattern)))
    }

    /// Cron expression of five to seven fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Grammar` when the field pattern fails to compile.
    pub fn cron() -> ValidationResult<Self> {
        let field = compile(DataType::Cron, CRON_FIELD_PATTERN)?;
        Ok(Self::new(DataType::Cron, CRON_MIN_LENGTH, Grammar::Cron(field)))
    }

    /// Hex colour literal or colour name.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Grammar` when the colour pattern fails to compile.
    pub fn color() -> ValidationResult<Self> {
        let pattern = compile(DataType::Color, COLOR_PATTERN)?;
        Ok(Self::new(
            DataType::Color,
            COLOR_MIN_LENGTH,
            Grammar::Pattern(pattern),
        ))
    }

    /// PEM block or bare base64 certificate body.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Grammar` when the PEM pattern fails to compile.
    pub fn certificate() -> ValidationResult<Self> {
        let pem = compile(DataType::Certificate, PEM_PATTERN)?;
        Ok(Self::new(
            DataType::Certificate,
            CERTIFICATE_MIN_LENGTH,
            Grammar::Certificate(pem),
        ))
    }

    /// IP address or CIDR range.
    #[must_use]
    pub const fn cidr() -> Self {
        Self::new(DataType::Cidr, 0, Grammar::Cidr)
    }

    fn accepts(&self, candidate: &str) -> bool {
        match &self.grammar {
            Grammar::Free => true,
            Grammar::Regexp => Regex::new(candidate).is_ok(),
            Grammar::Pattern(pattern) => pattern.is_match(candidate),
            Grammar::Cron(field) => {
                let fields: Vec<&str> = candidate.split_whitespace().collect();
                (5..=7).contains(&fields.len()) && fields.iter().all(|part| field.is_match(part))
            }
            Grammar::Certificate(pem) => is_certificate(pem, candidate),
            Grammar::Cidr => is_ip_literal(candidate) || is_cidr_literal(candidate),
        }
    }
}

impl ScalarValidator for TextValidator {
    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn parse(&self, literal: &str) -> Result<ConfigValue, ScalarError> {
        let candidate = if self.data_type == DataType::String {
            literal
        } else {
            literal.trim()
        };
        if candidate.trim().is_empty() {
            return Err(ScalarError::Empty);
        }
        if !self.accepts(candidate) {
            return Err(invalid_literal(self.data_type));
        }
        Ok(ConfigValue::Text(candidate.to_string()))
    }

    fn measure(&self, value: &ConfigValue) -> Option<Measure> {
        value.as_text().map(length_of)
    }

    fn natural_min(&self) -> Option<Measure> {
        Some(Measure::Length(self.natural_min))
    }

    fn natural_max(&self) -> Option<Measure> {
        Some(Measure::Length(i64::MAX))
    }

    fn parse_bound(&self, raw: &str) -> Option<Measure> {
        parse_length_bound(raw)
    }
}

fn compile(data_type: DataType, pattern: &'static str) -> ValidationResult<Regex> {
    Regex::new(pattern).map_err(|source| ValidationError::Grammar {
        data_type,
        pattern,
        source,
    })
}

fn is_certificate(pem: &Regex, candidate: &str) -> bool {
    let body = match pem.captures(candidate) {
        Some(captures) => {
            if captures.get(1).map(|m| m.as_str()) != captures.get(3).map(|m| m.as_str()) {
                return false;
            }
            captures.get(2).map_or("", |m| m.as_str())
        }
        None if candidate.starts_with("-----") => return false,
        None => candidate,
    };
    let compact: String = body.split_whitespace().collect();
    !compact.is_empty() && general_purpose::STANDARD.decode(compact).is_ok()
}
