//! SQL value types for the adapter core.
//!
//! [`Value`] is the closed tagged union every inbound assignment is mapped
//! onto before coercion and quoting. There is no open-ended runtime type
//! inspection: each variant has an exhaustive entry in the coercion table
//! and a canonical textual rendering.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use rust_decimal::Decimal;

use crate::error::Result;

/// Discriminant of a [`Value`], used in error reporting and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Decimal,
    Text,
    Bytes,
    Date,
    Time,
    DateTime,
    Timestamp,
    Struct,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Int => "integer",
            ValueKind::Float => "float",
            ValueKind::Decimal => "decimal",
            ValueKind::Text => "string",
            ValueKind::Bytes => "binary",
            ValueKind::Date => "date",
            ValueKind::Time => "time",
            ValueKind::DateTime => "datetime",
            ValueKind::Timestamp => "timestamp",
            ValueKind::Struct => "struct",
        };
        write!(f, "{}", name)
    }
}

/// SQL value enum for type-safe literal rendering and coercion.
///
/// Dynamic assignment in the original adapter becomes a closed union here:
/// callers construct the variant matching their data and the coercion table
/// decides representability per target column.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL.
    Null,

    /// Boolean value.
    Bool(bool),

    /// 64-bit signed integer.
    Int(i64),

    /// 64-bit floating point.
    Float(f64),

    /// Exact decimal with explicit scale.
    Decimal(Decimal),

    /// Text/string data.
    Text(String),

    /// Binary data.
    Bytes(Vec<u8>),

    /// Date without time component.
    Date(NaiveDate),

    /// Time without date component.
    Time(NaiveTime),

    /// Timestamp without timezone.
    DateTime(NaiveDateTime),

    /// Timestamp with timezone offset. Normalized to UTC at render time,
    /// never assumed already converted by the caller.
    Timestamp(DateTime<FixedOffset>),

    /// Structured value with no native column affinity; serialized to a
    /// textual markup form (YAML) before storage.
    Struct(serde_yaml::Value),
}

impl Value {
    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the kind discriminant for this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::Text(_) => ValueKind::Text,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Date(_) => ValueKind::Date,
            Value::Time(_) => ValueKind::Time,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::Timestamp(_) => ValueKind::Timestamp,
            Value::Struct(_) => ValueKind::Struct,
        }
    }

    /// Canonical textual rendering of this value.
    ///
    /// This is the text stored when a heterogeneous value is coerced into a
    /// text-affinity column, and the body of most quoted literals. Round
    /// trips through a text column compare against this form, not the
    /// original value.
    pub fn canonical_text(&self) -> Result<String> {
        Ok(match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Decimal(d) => decimal_text(d),
            Value::Text(s) => s.clone(),
            Value::Bytes(b) => hex_text(b),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::Time(t) => t.format("%H:%M:%S").to_string(),
            Value::DateTime(dt) => datetime_text(dt),
            Value::Timestamp(ts) => datetime_text(&ts.with_timezone(&Utc).naive_utc()),
            Value::Struct(v) => {
                let yaml = serde_yaml::to_string(v)?;
                yaml.trim_end_matches('\n').to_string()
            }
        })
    }
}

/// Canonical decimal text: declared scale preserved, with a forced single
/// fractional digit for scale-0 values so zero renders as `0.0`, never `0`.
pub(crate) fn decimal_text(d: &Decimal) -> String {
    if d.scale() == 0 {
        format!("{}.0", d)
    } else {
        d.to_string()
    }
}

/// Timestamp text in the database's canonical form,
/// `YYYY-MM-DD HH:MM:SS[.fraction]`, fraction only when nonzero.
pub(crate) fn datetime_text(dt: &NaiveDateTime) -> String {
    let mut out = dt.format("%Y-%m-%d %H:%M:%S").to_string();
    let nanos = dt.nanosecond();
    if nanos > 0 {
        let frac = format!("{:09}", nanos);
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

fn hex_text(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{:02x}", b);
    }
    out
}

// Convenience conversions for common cases
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Value::Time(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Value::Timestamp(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_canonical_bool() {
        assert_eq!(Value::Bool(true).canonical_text().unwrap(), "1");
        assert_eq!(Value::Bool(false).canonical_text().unwrap(), "0");
    }

    #[test]
    fn test_canonical_numbers() {
        assert_eq!(Value::Int(45).canonical_text().unwrap(), "45");
        assert_eq!(Value::Float(4.3).canonical_text().unwrap(), "4.3");
    }

    #[test]
    fn test_canonical_decimal_preserves_scale() {
        let d = Decimal::from_str("3.14").unwrap();
        assert_eq!(Value::Decimal(d).canonical_text().unwrap(), "3.14");
    }

    #[test]
    fn test_canonical_decimal_zero_scale_forces_fraction() {
        let zero = Decimal::from_str("0").unwrap();
        assert_eq!(Value::Decimal(zero).canonical_text().unwrap(), "0.0");

        let whole = Decimal::from_str("45").unwrap();
        assert_eq!(Value::Decimal(whole).canonical_text().unwrap(), "45.0");
    }

    #[test]
    fn test_canonical_temporal() {
        let date = NaiveDate::from_ymd_opt(2012, 4, 27).unwrap();
        assert_eq!(Value::Date(date).canonical_text().unwrap(), "2012-04-27");

        let dt = date.and_hms_opt(13, 5, 9).unwrap();
        assert_eq!(
            Value::DateTime(dt).canonical_text().unwrap(),
            "2012-04-27 13:05:09"
        );
    }

    #[test]
    fn test_canonical_timestamp_converts_to_utc() {
        use chrono::TimeZone;

        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = NaiveDate::from_ymd_opt(2012, 4, 27)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap();
        let ts = offset.from_local_datetime(&local).single().unwrap();
        assert_eq!(
            Value::Timestamp(ts).canonical_text().unwrap(),
            "2012-04-27 11:00:00"
        );
    }

    #[test]
    fn test_canonical_datetime_fraction_trimmed() {
        let dt = NaiveDate::from_ymd_opt(2012, 4, 27)
            .unwrap()
            .and_hms_micro_opt(13, 5, 9, 250_000)
            .unwrap();
        assert_eq!(
            Value::DateTime(dt).canonical_text().unwrap(),
            "2012-04-27 13:05:09.25"
        );
    }

    #[test]
    fn test_canonical_struct_is_yaml() {
        let mut map = serde_yaml::Mapping::new();
        map.insert(
            serde_yaml::Value::String("a".to_string()),
            serde_yaml::Value::Number(7.into()),
        );
        let v = Value::Struct(serde_yaml::Value::Mapping(map));
        assert_eq!(v.canonical_text().unwrap(), "a: 7");
    }

    #[test]
    fn test_canonical_bytes_hex() {
        assert_eq!(
            Value::Bytes(vec![0x0a, 0xff]).canonical_text().unwrap(),
            "0aff"
        );
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(Value::Bytes(vec![]).kind().to_string(), "binary");
        assert_eq!(Value::Null.kind().to_string(), "null");
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(42i32), Value::Int(42));
        assert_eq!(Value::from("hello"), Value::Text("hello".to_string()));
        assert!(Value::Null.is_null());
        assert!(!Value::from(false).is_null());
    }
}
