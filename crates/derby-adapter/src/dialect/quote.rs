//! The quoting engine: values to dialect-correct SQL literals.
//!
//! Pure and stateless; safe for unlimited concurrent use. Escaping operates
//! on the quote character only and never reinterprets the byte stream, so
//! arbitrary multi-byte and control characters pass through unchanged.

use crate::core::schema::ColumnDescriptor;
use crate::core::value::{decimal_text, Value};
use crate::error::{AdapterError, Result};

/// Maximum identifier length accepted by [`quote_identifier`]. Derby allows
/// 128 characters for ordinary identifiers.
const MAX_IDENTIFIER_LENGTH: usize = 128;

/// A syntactically valid, injection-safe SQL literal.
///
/// Produced only by this module; the rest of the crate embeds it into SQL
/// text without further escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedLiteral(String);

impl QuotedLiteral {
    fn new(text: String) -> Self {
        QuotedLiteral(text)
    }

    /// The literal as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the literal, yielding the underlying string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for QuotedLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Escape a raw string for embedding between single quotes.
///
/// Every `'` is doubled; all other bytes are left untouched. Returns the
/// escaped fragment without the surrounding quotes.
#[must_use]
pub fn quote_string(raw: &str) -> String {
    raw.replace('\'', "''")
}

/// Wrap a raw string as a complete string literal.
fn string_literal(raw: &str) -> QuotedLiteral {
    QuotedLiteral::new(format!("'{}'", quote_string(raw)))
}

/// Quote an identifier (table or column name) for Derby.
///
/// Embedded double quotes are doubled and the result is wrapped in double
/// quotes. Rejects empty names, embedded NUL bytes and over-length names.
pub fn quote_identifier(name: &str) -> Result<String> {
    if name.is_empty() {
        return Err(AdapterError::Config(
            "identifier cannot be empty".to_string(),
        ));
    }
    if name.contains('\0') {
        return Err(AdapterError::Config(format!(
            "identifier contains NUL byte: {:?}",
            name
        )));
    }
    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(AdapterError::Config(format!(
            "identifier exceeds {} bytes (got {}): {:?}",
            MAX_IDENTIFIER_LENGTH,
            name.len(),
            name
        )));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

/// Render a value as a SQL literal, optionally targeted at a column.
///
/// When the target column is textual, any non-null value is rendered
/// through its canonical string form and quoted as a string: the engine
/// rejects type-mismatched literals for text columns, so `45` destined for
/// a `VARCHAR` becomes `'45'` and `true` becomes `'1'`.
pub fn quote_value(value: &Value, column: Option<&ColumnDescriptor>) -> Result<QuotedLiteral> {
    if value.is_null() {
        return Ok(QuotedLiteral::new("NULL".to_string()));
    }

    if let Some(col) = column {
        if col.is_textual() {
            return Ok(string_literal(&value.canonical_text()?));
        }
    }

    Ok(match value {
        Value::Null => unreachable!("handled above"),
        Value::Bool(b) => QuotedLiteral::new(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Value::Int(v) => QuotedLiteral::new(v.to_string()),
        Value::Float(v) => QuotedLiteral::new(v.to_string()),
        Value::Decimal(d) => QuotedLiteral::new(decimal_text(d)),
        Value::Text(s) => string_literal(s),
        Value::Bytes(b) => QuotedLiteral::new(blob_literal(b)),
        Value::Date(_) | Value::Time(_) | Value::DateTime(_) | Value::Timestamp(_) => {
            string_literal(&value.canonical_text()?)
        }
        Value::Struct(_) => string_literal(&value.canonical_text()?),
    })
}

/// Derby hex blob literal, `X'...'`.
fn blob_literal(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len() * 2 + 3);
    out.push_str("X'");
    for b in bytes {
        let _ = write!(out, "{:02x}", b);
    }
    out.push('\'');
    out
}
