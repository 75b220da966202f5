//! Literal labels and their value space
//!
//! A [`Literal`] is identified by its lexical form, language tag and
//! datatype. Its [`LiteralValue`] is computed on demand for the XSD
//! datatypes listed in [`crate::vocab::xsd`]; every other datatype is an
//! opaque value compared lexically.

use super::{NodeError, NodeResult};
use crate::config::LiteralConfig;
use crate::prefix::PrefixMapping;
use crate::vocab::{rdf, xsd};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use oxrdf::Literal as OxLiteral;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

fn integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[+-]?[0-9]+$").unwrap())
}

fn decimal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)$").unwrap())
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(-?[0-9]{4,}-[0-9]{2}-[0-9]{2})(Z|[+-][0-9]{2}:[0-9]{2})?$").unwrap()
    })
}

fn double_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?|[+-]?INF|NaN)$").unwrap()
    })
}

/// Integer-derived datatypes with their inclusive bounds
const INTEGER_TYPES: &[(&str, Option<i128>, Option<i128>)] = &[
    (xsd::INTEGER, None, None),
    (xsd::LONG, Some(i64::MIN as i128), Some(i64::MAX as i128)),
    (xsd::INT, Some(i32::MIN as i128), Some(i32::MAX as i128)),
    (xsd::SHORT, Some(i16::MIN as i128), Some(i16::MAX as i128)),
    (xsd::BYTE, Some(i8::MIN as i128), Some(i8::MAX as i128)),
    (xsd::NON_NEGATIVE_INTEGER, Some(0), None),
    (xsd::POSITIVE_INTEGER, Some(1), None),
    (xsd::NON_POSITIVE_INTEGER, None, Some(0)),
    (xsd::NEGATIVE_INTEGER, None, Some(-1)),
    (xsd::UNSIGNED_LONG, Some(0), Some(u64::MAX as i128)),
    (xsd::UNSIGNED_INT, Some(0), Some(u32::MAX as i128)),
    (xsd::UNSIGNED_SHORT, Some(0), Some(u16::MAX as i128)),
    (xsd::UNSIGNED_BYTE, Some(0), Some(u8::MAX as i128)),
];

/// Value of a literal in its datatype's value space
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Plain literal or `xsd:string`
    String(String),
    /// Language-tagged string; the tag is lowercased
    LangString { value: String, language: String },
    Boolean(bool),
    /// `xsd:decimal` and the integer family, as a canonical decimal string
    Decimal(String),
    Float(f32),
    Double(f64),
    /// `xsd:dateTime` with a timezone
    DateTime(DateTime<FixedOffset>),
    /// `xsd:dateTime` without a timezone
    LocalDateTime(NaiveDateTime),
    /// `xsd:date` without a timezone
    Date(NaiveDate),
    /// `xsd:date` with a timezone
    ZonedDate { date: NaiveDate, offset: FixedOffset },
    /// Any other datatype
    Other { lexical: String, datatype: String },
}

impl LiteralValue {
    /// The canonical literal denoting this value
    fn canonical(&self) -> OxLiteral {
        match self {
            LiteralValue::String(s) => OxLiteral::new_simple_literal(s.clone()),
            LiteralValue::LangString { value, language } => {
                OxLiteral::new_language_tagged_literal_unchecked(value.clone(), language.clone())
            }
            LiteralValue::Boolean(b) => typed(b.to_string(), xsd::BOOLEAN),
            LiteralValue::Decimal(d) => typed(d.clone(), xsd::DECIMAL),
            LiteralValue::Float(f) => typed(format_float(f64::from(*f)), xsd::FLOAT),
            LiteralValue::Double(d) => typed(format_float(*d), xsd::DOUBLE),
            LiteralValue::DateTime(dt) => typed(
                dt.with_timezone(&Utc)
                    .to_rfc3339_opts(SecondsFormat::AutoSi, true),
                xsd::DATE_TIME,
            ),
            LiteralValue::LocalDateTime(dt) => {
                typed(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(), xsd::DATE_TIME)
            }
            LiteralValue::Date(d) => typed(d.format("%Y-%m-%d").to_string(), xsd::DATE),
            LiteralValue::ZonedDate { date, offset } => {
                let zone = if offset.local_minus_utc() == 0 {
                    "Z".to_string()
                } else {
                    offset.to_string()
                };
                typed(format!("{}{}", date.format("%Y-%m-%d"), zone), xsd::DATE)
            }
            LiteralValue::Other { lexical, datatype } => typed(lexical.clone(), datatype),
        }
    }
}

fn typed(lexical: String, datatype: &str) -> OxLiteral {
    OxLiteral::new_typed_literal(lexical, oxrdf::NamedNode::new_unchecked(datatype))
}

/// Canonical double lexical form. Both zeros map to `0E0`, matching their
/// equality in the value space.
fn format_float(value: f64) -> String {
    if value == 0.0 {
        "0E0".to_string()
    } else if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "INF".to_string()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        format!("{:E}", value)
    }
}

/// Canonical form of a lexically valid decimal: no leading `+`, no
/// superfluous zeros, no trailing `.`, and `0` for every zero.
fn canonical_decimal(lexical: &str) -> String {
    let (negative, digits) = match lexical.as_bytes().first() {
        Some(b'-') => (true, &lexical[1..]),
        Some(b'+') => (false, &lexical[1..]),
        _ => (false, lexical),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    let int_part = int_part.trim_start_matches('0');
    let frac_part = frac_part.trim_end_matches('0');

    if int_part.is_empty() && frac_part.is_empty() {
        return "0".to_string();
    }
    let mut out = String::with_capacity(lexical.len());
    if negative {
        out.push('-');
    }
    out.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn parse_offset(zone: &str) -> Option<FixedOffset> {
    if zone == "Z" {
        return FixedOffset::east_opt(0);
    }
    let sign = if zone.starts_with('-') { -1 } else { 1 };
    let (hours, minutes) = zone[1..].split_once(':')?;
    let (hours, minutes): (i32, i32) = (hours.parse().ok()?, minutes.parse().ok()?);
    if hours > 14 || minutes > 59 || (hours == 14 && minutes != 0) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn parse_date(lexical: &str) -> Option<LiteralValue> {
    let captures = date_pattern().captures(lexical)?;
    let date = NaiveDate::parse_from_str(captures.get(1)?.as_str(), "%Y-%m-%d").ok()?;
    match captures.get(2) {
        Some(zone) => Some(LiteralValue::ZonedDate {
            date,
            offset: parse_offset(zone.as_str())?,
        }),
        None => Some(LiteralValue::Date(date)),
    }
}

fn parse_float(lexical: &str) -> Option<f64> {
    if !double_pattern().is_match(lexical) {
        return None;
    }
    match lexical {
        "INF" | "+INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        _ => lexical.parse().ok(),
    }
}

/// RDF literal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(OxLiteral);

impl Literal {
    /// Create a simple literal (plain string)
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self(OxLiteral::new_simple_literal(value))
    }

    /// Create a literal with a language tag
    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> NodeResult<Self> {
        OxLiteral::new_language_tagged_literal(value, language)
            .map(Self)
            .map_err(|e| NodeError::InvalidLiteral(e.to_string()))
    }

    /// Create a typed literal. With eager validation an ill-formed lexical
    /// form for a known datatype is rejected here; otherwise the error
    /// surfaces from [`Literal::value`].
    pub fn new_typed_literal(
        value: impl Into<String>,
        datatype: &str,
        config: &LiteralConfig,
    ) -> NodeResult<Self> {
        let datatype = oxrdf::NamedNode::new(datatype)
            .map_err(|e| NodeError::InvalidIri(e.to_string()))?;
        let literal = Self(OxLiteral::new_typed_literal(value, datatype));
        if config.eager_validation {
            literal.value()?;
        }
        Ok(literal)
    }

    /// `xsd:integer` literal
    pub fn integer(value: i64) -> Self {
        Self(typed(value.to_string(), xsd::INTEGER))
    }

    /// The lexical form
    pub fn lexical_form(&self) -> &str {
        self.0.value()
    }

    /// The language tag, if any
    pub fn language(&self) -> Option<&str> {
        self.0.language()
    }

    /// The datatype IRI; `rdf:langString` for tagged literals and
    /// `xsd:string` for plain ones
    pub fn datatype(&self) -> &str {
        self.0.datatype().as_str()
    }

    /// Whether the lexical form belongs to the datatype's lexical space
    pub fn is_well_formed(&self) -> bool {
        self.value().is_ok()
    }

    /// The value denoted by this literal
    pub fn value(&self) -> NodeResult<LiteralValue> {
        let lexical = self.lexical_form();
        if let Some(language) = self.language() {
            return Ok(LiteralValue::LangString {
                value: lexical.to_string(),
                language: language.to_ascii_lowercase(),
            });
        }

        let datatype = self.datatype();
        let invalid = || NodeError::DatatypeFormat {
            lexical: lexical.to_string(),
            datatype: datatype.to_string(),
        };

        if let Some(&(_, min, max)) = INTEGER_TYPES.iter().find(|(dt, _, _)| *dt == datatype) {
            if !integer_pattern().is_match(lexical) {
                return Err(invalid());
            }
            if min.is_some() || max.is_some() {
                let n: i128 = lexical.parse().map_err(|_| invalid())?;
                if min.is_some_and(|m| n < m) || max.is_some_and(|m| n > m) {
                    return Err(invalid());
                }
            }
            return Ok(LiteralValue::Decimal(canonical_decimal(lexical)));
        }

        match datatype {
            xsd::STRING => Ok(LiteralValue::String(lexical.to_string())),
            rdf::LANG_STRING => Err(invalid()),
            xsd::BOOLEAN => match lexical {
                "true" | "1" => Ok(LiteralValue::Boolean(true)),
                "false" | "0" => Ok(LiteralValue::Boolean(false)),
                _ => Err(invalid()),
            },
            xsd::DECIMAL => {
                if decimal_pattern().is_match(lexical) {
                    Ok(LiteralValue::Decimal(canonical_decimal(lexical)))
                } else {
                    Err(invalid())
                }
            }
            xsd::DOUBLE => parse_float(lexical)
                .map(LiteralValue::Double)
                .ok_or_else(invalid),
            xsd::FLOAT => parse_float(lexical)
                .map(|f| LiteralValue::Float(f as f32))
                .ok_or_else(invalid),
            xsd::DATE_TIME => {
                if let Ok(dt) = DateTime::parse_from_rfc3339(lexical) {
                    Ok(LiteralValue::DateTime(dt))
                } else {
                    NaiveDateTime::parse_from_str(lexical, "%Y-%m-%dT%H:%M:%S%.f")
                        .map(LiteralValue::LocalDateTime)
                        .map_err(|_| invalid())
                }
            }
            xsd::DATE => parse_date(lexical).ok_or_else(invalid),
            _ => Ok(LiteralValue::Other {
                lexical: lexical.to_string(),
                datatype: datatype.to_string(),
            }),
        }
    }

    /// Value-space equality. Ill-formed literals are only the same value as
    /// an identical literal.
    pub fn same_value_as(&self, other: &Literal) -> bool {
        if self == other {
            return true;
        }
        match (self.value(), other.value()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Canonical literal for index keys, or `None` when the literal is
    /// already its own key
    pub(crate) fn indexing_key(&self) -> Option<Literal> {
        let canonical = self.value().ok()?.canonical();
        if canonical == self.0 {
            None
        } else {
            Some(Self(canonical))
        }
    }

    /// Render with the datatype abbreviated through `prefixes`
    pub fn to_string_with(&self, prefixes: &PrefixMapping) -> String {
        match self.language() {
            Some(language) => format!("{}@{}", quote(self.lexical_form()), language),
            None if self.datatype() == xsd::STRING => quote(self.lexical_form()),
            None => match prefixes.shorten(self.datatype()) {
                Some(short) => format!("{}^^{}", quote(self.lexical_form()), short),
                None => self.to_string(),
            },
        }
    }

    /// Get the inner oxrdf Literal
    pub fn inner(&self) -> &OxLiteral {
        &self.0
    }
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = quote(self.lexical_form());
        match self.language() {
            Some(language) => write!(f, "{}@{}", value, language),
            None if self.datatype() == xsd::STRING => f.write_str(&value),
            None => write!(f, "{}^^<{}>", value, self.datatype()),
        }
    }
}

impl From<OxLiteral> for Literal {
    fn from(literal: OxLiteral) -> Self {
        Self(literal)
    }
}
