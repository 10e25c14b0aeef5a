//! The type coercion layer: values normalized per target column, and raw
//! catalog metadata normalized into column descriptors.
//!
//! Coercion is an exhaustive per-variant table keyed by the target column
//! type. There is no runtime type inspection beyond the [`Value`] tag, and
//! every unrepresentable combination reports `UnsupportedValueType` before
//! any SQL is built.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use tracing::warn;

use crate::core::schema::{ColumnDescriptor, ColumnType, RawColumn, MAX_DECIMAL_PRECISION};
use crate::core::value::Value;
use crate::dialect::policy::DialectPolicy;
use crate::error::{AdapterError, Result};

/// Derby's default precision for a bare `DECIMAL` with no declared
/// precision.
const DEFAULT_DECIMAL_PRECISION: u32 = 5;

/// Normalize a value for storage in the given column.
///
/// NULL passes through every column type. Text-affinity columns accept any
/// value by converting it to its canonical string form (when the policy
/// enables text column coercion); reading back therefore yields the string
/// form, not the original value.
pub fn coerce(value: Value, column: &ColumnDescriptor, policy: &DialectPolicy) -> Result<Value> {
    if value.is_null() {
        return Ok(Value::Null);
    }

    match &column.sql_type {
        ColumnType::String { .. } | ColumnType::Text => coerce_text(value, column, policy),
        ColumnType::Integer => coerce_int(value, column),
        ColumnType::Decimal { scale: 0, .. } => coerce_int(value, column),
        ColumnType::Decimal { scale, .. } => coerce_decimal(value, column, *scale),
        ColumnType::Float => coerce_float(value, column),
        ColumnType::Boolean => coerce_bool(value, column, policy),
        ColumnType::Date => coerce_date(value, column),
        ColumnType::Time => coerce_time(value, column),
        ColumnType::DateTime => coerce_datetime(value, column),
        ColumnType::Binary => coerce_binary(value, column),
        ColumnType::Xml => coerce_xml(value, column),
    }
}

fn unsupported(value: &Value, column: &ColumnDescriptor) -> AdapterError {
    AdapterError::unsupported_for_column(value.kind(), &column.name)
}

fn coerce_text(value: Value, column: &ColumnDescriptor, policy: &DialectPolicy) -> Result<Value> {
    match value {
        Value::Text(s) if s.is_empty() && policy.nulls_as_empty_string => Ok(Value::Null),
        Value::Text(s) => Ok(Value::Text(s)),
        other if !policy.text_column_coercion => Err(unsupported(&other, column)),
        other => Ok(Value::Text(other.canonical_text()?)),
    }
}

fn coerce_int(value: Value, column: &ColumnDescriptor) -> Result<Value> {
    match &value {
        Value::Int(_) => Ok(value),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::Float(f) => {
            if !f.is_finite() {
                return Err(unsupported(&value, column));
            }
            Ok(Value::Int(f.trunc() as i64))
        }
        Value::Decimal(d) => d
            .trunc()
            .to_i64()
            .map(Value::Int)
            .ok_or_else(|| unsupported(&value, column)),
        Value::Text(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| unsupported(&value, column)),
        _ => Err(unsupported(&value, column)),
    }
}

fn coerce_decimal(value: Value, column: &ColumnDescriptor, scale: u32) -> Result<Value> {
    let mut d = match &value {
        Value::Decimal(d) => *d,
        Value::Int(i) => Decimal::from(*i),
        Value::Float(f) => Decimal::from_f64(*f).ok_or_else(|| unsupported(&value, column))?,
        Value::Text(s) => s
            .trim()
            .parse::<Decimal>()
            .map_err(|_| unsupported(&value, column))?,
        _ => return Err(unsupported(&value, column)),
    };
    d.rescale(scale);
    Ok(Value::Decimal(d))
}

fn coerce_float(value: Value, column: &ColumnDescriptor) -> Result<Value> {
    match &value {
        Value::Float(_) => Ok(value),
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::Decimal(d) => d
            .to_f64()
            .map(Value::Float)
            .ok_or_else(|| unsupported(&value, column)),
        Value::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| unsupported(&value, column)),
        _ => Err(unsupported(&value, column)),
    }
}

fn coerce_bool(value: Value, column: &ColumnDescriptor, policy: &DialectPolicy) -> Result<Value> {
    match &value {
        Value::Bool(_) => Ok(value),
        Value::Int(0) => Ok(Value::Bool(false)),
        Value::Int(1) => Ok(Value::Bool(true)),
        Value::Text(s) => {
            if s.is_empty() && policy.nulls_as_empty_string {
                return Ok(Value::Null);
            }
            match s.trim().to_lowercase().as_str() {
                "1" | "t" | "true" => Ok(Value::Bool(true)),
                "0" | "f" | "false" => Ok(Value::Bool(false)),
                _ => Err(unsupported(&value, column)),
            }
        }
        _ => Err(unsupported(&value, column)),
    }
}

fn coerce_date(value: Value, column: &ColumnDescriptor) -> Result<Value> {
    match &value {
        Value::Date(_) => Ok(value),
        Value::DateTime(dt) => Ok(Value::Date(dt.date())),
        Value::Timestamp(ts) => Ok(Value::Date(ts.with_timezone(&Utc).date_naive())),
        Value::Text(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|_| unsupported(&value, column)),
        _ => Err(unsupported(&value, column)),
    }
}

fn coerce_time(value: Value, column: &ColumnDescriptor) -> Result<Value> {
    match &value {
        Value::Time(_) => Ok(value),
        Value::DateTime(dt) => Ok(Value::Time(dt.time())),
        Value::Text(s) => {
            let s = s.trim();
            NaiveTime::parse_from_str(s, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S%.f"))
                .map(Value::Time)
                .map_err(|_| unsupported(&value, column))
        }
        _ => Err(unsupported(&value, column)),
    }
}

fn coerce_datetime(value: Value, column: &ColumnDescriptor) -> Result<Value> {
    match &value {
        Value::DateTime(_) => Ok(value),
        Value::Timestamp(ts) => Ok(Value::DateTime(ts.with_timezone(&Utc).naive_utc())),
        Value::Date(d) => Ok(Value::DateTime(d.and_time(chrono::NaiveTime::MIN))),
        Value::Text(s) => {
            let s = s.trim();
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
                .map(Value::DateTime)
                .map_err(|_| unsupported(&value, column))
        }
        _ => Err(unsupported(&value, column)),
    }
}

fn coerce_binary(value: Value, column: &ColumnDescriptor) -> Result<Value> {
    match value {
        Value::Bytes(_) => Ok(value),
        Value::Text(s) => Ok(Value::Bytes(s.into_bytes())),
        _ => Err(unsupported(&value, column)),
    }
}

fn coerce_xml(value: Value, column: &ColumnDescriptor) -> Result<Value> {
    match value {
        Value::Text(_) => Ok(value),
        _ => Err(unsupported(&value, column)),
    }
}

/// Build a [`ColumnDescriptor`] from a raw catalog record.
///
/// Resolves the declared type token, applies the policy's default decimal
/// scale when the record carries no explicit scale, clamps precision to the
/// engine maximum, and parses the textual default into a typed value.
/// Introspection must not fail a whole table on one odd column, so unknown
/// tokens and unparsable defaults degrade with a warning instead of
/// erroring.
pub fn describe(raw: &RawColumn, policy: &DialectPolicy) -> ColumnDescriptor {
    let sql_type = resolve_type(raw, policy);
    let default = raw
        .default
        .as_deref()
        .and_then(|text| parse_default(text, &sql_type, &raw.name));

    ColumnDescriptor {
        name: raw.name.clone(),
        sql_type,
        default,
        nullable: raw.nullable,
    }
}

fn resolve_type(raw: &RawColumn, policy: &DialectPolicy) -> ColumnType {
    match raw.type_token.to_lowercase().as_str() {
        // Integer types (limits are not modeled)
        "smallint" | "int" | "integer" | "bigint" => ColumnType::Integer,

        // Decimal/numeric
        "decimal" | "numeric" => {
            let mut precision = raw.precision.unwrap_or(DEFAULT_DECIMAL_PRECISION);
            if precision > MAX_DECIMAL_PRECISION {
                warn!(
                    column = %raw.name,
                    precision,
                    "decimal precision exceeds engine maximum, clamping to {}",
                    MAX_DECIMAL_PRECISION
                );
                precision = MAX_DECIMAL_PRECISION;
            }
            ColumnType::Decimal {
                precision,
                scale: raw.scale.unwrap_or(policy.default_decimal_scale),
            }
        }

        // Floating point
        "real" | "float" | "double" | "double precision" => ColumnType::Float,

        // String types
        "char" | "character" | "varchar" | "char varying" | "character varying" => {
            ColumnType::String { limit: raw.length }
        }
        "long varchar" | "clob" | "text" => ColumnType::Text,

        // Binary types
        "blob" | "binary" | "varbinary" | "char for bit data" | "varchar for bit data"
        | "long varchar for bit data" => ColumnType::Binary,

        "boolean" => ColumnType::Boolean,

        // Date/time types; timestamp is an alias for datetime
        "date" => ColumnType::Date,
        "time" => ColumnType::Time,
        "timestamp" | "datetime" => ColumnType::DateTime,

        "xml" => ColumnType::Xml,

        other => {
            warn!(
                column = %raw.name,
                type_token = other,
                "unrecognized column type token, treating as text"
            );
            ColumnType::Text
        }
    }
}

/// Parse a catalog default-value text into a typed value.
///
/// String defaults arrive quoted (`''`, `'abc'`); numeric and boolean
/// defaults arrive bare. Unparsable defaults degrade to no default.
fn parse_default(text: &str, sql_type: &ColumnType, column: &str) -> Option<Value> {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("null") {
        return None;
    }

    let parsed = match sql_type {
        ColumnType::String { .. } | ColumnType::Text | ColumnType::Xml => {
            Some(Value::Text(strip_string_default(text)))
        }
        ColumnType::Integer => text.parse::<i64>().ok().map(Value::Int),
        ColumnType::Decimal { .. } => text.parse::<Decimal>().ok().map(Value::Decimal),
        ColumnType::Float => text.parse::<f64>().ok().map(Value::Float),
        ColumnType::Boolean => match text.to_lowercase().as_str() {
            "true" | "1" => Some(Value::Bool(true)),
            "false" | "0" => Some(Value::Bool(false)),
            _ => None,
        },
        ColumnType::Date => NaiveDate::parse_from_str(&strip_string_default(text), "%Y-%m-%d")
            .ok()
            .map(Value::Date),
        ColumnType::Time => NaiveTime::parse_from_str(&strip_string_default(text), "%H:%M:%S")
            .ok()
            .map(Value::Time),
        ColumnType::DateTime => {
            NaiveDateTime::parse_from_str(&strip_string_default(text), "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(Value::DateTime)
        }
        ColumnType::Binary => None,
    };

    if parsed.is_none() {
        warn!(column, raw = text, "unparsable column default, ignoring");
    }
    parsed
}

/// Strip the surrounding single quotes of a catalog string default and
/// undouble embedded quotes.
fn strip_string_default(text: &str) -> String {
    if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'') {
        text[1..text.len() - 1].replace("''", "'")
    } else {
        text.to_string()
    }
}
