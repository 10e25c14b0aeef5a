//! Schema metadata types: column types, descriptors, and raw catalog records.
//!
//! These types are the engine-independent model the introspection layer
//! normalizes catalog metadata into.

use serde::{Deserialize, Serialize};

use crate::core::value::Value;

/// Derby's maximum decimal precision. Catalog records claiming more are
/// clamped when described.
pub const MAX_DECIMAL_PRECISION: u32 = 31;

/// Semantic column type reported by introspection.
///
/// This is the engine-independent classification: a `DECIMAL(9,0)` column
/// reports [`TypeKind::Integer`] even though its declared SQL type is
/// decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Integer,
    Decimal,
    Float,
    String,
    Text,
    Binary,
    Boolean,
    Date,
    Time,
    DateTime,
    Xml,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TypeKind::Integer => "integer",
            TypeKind::Decimal => "decimal",
            TypeKind::Float => "float",
            TypeKind::String => "string",
            TypeKind::Text => "text",
            TypeKind::Binary => "binary",
            TypeKind::Boolean => "boolean",
            TypeKind::Date => "date",
            TypeKind::Time => "time",
            TypeKind::DateTime => "datetime",
            TypeKind::Xml => "xml",
        };
        write!(f, "{}", name)
    }
}

/// Declared SQL type of a column, with the constraints that matter for
/// coercion and literal rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    /// Integer types (smallint, int, bigint; limits are not modeled).
    Integer,
    /// Exact decimal with precision (total digits) and scale (digits after
    /// the decimal point).
    Decimal { precision: u32, scale: u32 },
    /// Floating point (real, double).
    Float,
    /// Variable-length character string with optional max length.
    String { limit: Option<u32> },
    /// Unlimited text (long varchar, clob).
    Text,
    /// Binary data.
    Binary,
    /// Boolean.
    Boolean,
    /// Date only.
    Date,
    /// Time only.
    Time,
    /// Date and time. Derby's `timestamp` is an alias for this.
    DateTime,
    /// XML document.
    Xml,
}

impl ColumnType {
    /// The semantic type this column reports at introspection time.
    ///
    /// A decimal with scale 0 is semantically reclassified as integer; the
    /// declared precision stays available as metadata.
    #[must_use]
    pub fn semantic_kind(&self) -> TypeKind {
        match self {
            ColumnType::Integer => TypeKind::Integer,
            ColumnType::Decimal { scale: 0, .. } => TypeKind::Integer,
            ColumnType::Decimal { .. } => TypeKind::Decimal,
            ColumnType::Float => TypeKind::Float,
            ColumnType::String { .. } => TypeKind::String,
            ColumnType::Text => TypeKind::Text,
            ColumnType::Binary => TypeKind::Binary,
            ColumnType::Boolean => TypeKind::Boolean,
            ColumnType::Date => TypeKind::Date,
            ColumnType::Time => TypeKind::Time,
            ColumnType::DateTime => TypeKind::DateTime,
            ColumnType::Xml => TypeKind::Xml,
        }
    }

    /// Whether the column stores character data (string or text affinity).
    #[must_use]
    pub fn is_textual(&self) -> bool {
        matches!(self, ColumnType::String { .. } | ColumnType::Text)
    }

    /// Declared decimal precision, if any.
    #[must_use]
    pub fn precision(&self) -> Option<u32> {
        match self {
            ColumnType::Decimal { precision, .. } => Some(*precision),
            _ => None,
        }
    }

    /// Declared decimal scale, if any.
    #[must_use]
    pub fn scale(&self) -> Option<u32> {
        match self {
            ColumnType::Decimal { scale, .. } => Some(*scale),
            _ => None,
        }
    }

    /// Declared character limit, if any.
    #[must_use]
    pub fn limit(&self) -> Option<u32> {
        match self {
            ColumnType::String { limit } => *limit,
            _ => None,
        }
    }
}

/// Normalized column metadata.
///
/// Built once from a [`RawColumn`] at schema-load time, immutable
/// thereafter, cached for the lifetime of the adapter session.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,

    /// Declared SQL type with constraints.
    pub sql_type: ColumnType,

    /// Typed default value, parsed from the catalog's textual default.
    pub default: Option<Value>,

    /// Whether the column allows NULL.
    pub nullable: bool,
}

impl ColumnDescriptor {
    /// The semantic type this column reports.
    #[must_use]
    pub fn semantic_kind(&self) -> TypeKind {
        self.sql_type.semantic_kind()
    }

    /// Whether the column stores character data.
    #[must_use]
    pub fn is_textual(&self) -> bool {
        self.sql_type.is_textual()
    }

    /// Precision/scale/default attributes for schema comparison.
    #[must_use]
    pub fn attrs(&self) -> ColumnAttrs {
        ColumnAttrs {
            precision: self.sql_type.precision(),
            scale: self.sql_type.scale(),
            default: self.default.clone(),
        }
    }
}

/// The attribute tuple reported alongside a column's semantic type in
/// merged schema views.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnAttrs {
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub default: Option<Value>,
}

/// Raw column metadata as fetched from the database catalog by the
/// external connectivity collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawColumn {
    /// Column name.
    pub name: String,

    /// Declared type token (e.g. "VARCHAR", "DECIMAL", "TIMESTAMP").
    pub type_token: String,

    /// Maximum length for string/binary types.
    #[serde(default)]
    pub length: Option<u32>,

    /// Numeric precision.
    #[serde(default)]
    pub precision: Option<u32>,

    /// Numeric scale. `None` means the catalog recorded no explicit scale;
    /// the dialect policy decides what that defaults to.
    #[serde(default)]
    pub scale: Option<u32>,

    /// Default value as raw catalog text (e.g. `''`, `3.14`, `-1`).
    #[serde(default)]
    pub default: Option<String>,

    /// Whether the column allows NULL.
    #[serde(default = "default_true")]
    pub nullable: bool,

    /// Ordinal position (1-based).
    #[serde(default)]
    pub ordinal: i32,
}

fn default_true() -> bool {
    true
}

impl RawColumn {
    /// Create a raw column with just a name and type token; the remaining
    /// fields take their catalog defaults.
    pub fn new(name: impl Into<String>, type_token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_token: type_token.into(),
            length: None,
            precision: None,
            scale: None,
            default: None,
            nullable: true,
            ordinal: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_scale_decimal_reports_integer() {
        let t = ColumnType::Decimal {
            precision: 9,
            scale: 0,
        };
        assert_eq!(t.semantic_kind(), TypeKind::Integer);
        assert_eq!(t.precision(), Some(9));
        assert_eq!(t.scale(), Some(0));
    }

    #[test]
    fn test_nonzero_scale_decimal_reports_decimal() {
        let t = ColumnType::Decimal {
            precision: 3,
            scale: 2,
        };
        assert_eq!(t.semantic_kind(), TypeKind::Decimal);
        assert_eq!(t.scale(), Some(2));
    }

    #[test]
    fn test_textual_affinity() {
        assert!(ColumnType::String { limit: Some(255) }.is_textual());
        assert!(ColumnType::Text.is_textual());
        assert!(!ColumnType::Binary.is_textual());
        assert!(!ColumnType::Xml.is_textual());
    }

    #[test]
    fn test_descriptor_attrs() {
        let col = ColumnDescriptor {
            name: "sample_small_decimal".to_string(),
            sql_type: ColumnType::Decimal {
                precision: 3,
                scale: 2,
            },
            default: Some(Value::Decimal("3.14".parse().unwrap())),
            nullable: true,
        };
        let attrs = col.attrs();
        assert_eq!(attrs.precision, Some(3));
        assert_eq!(attrs.scale, Some(2));
        assert_eq!(attrs.default, Some(Value::Decimal("3.14".parse().unwrap())));
    }

    #[test]
    fn test_raw_column_yaml_round_trip() {
        let raw = RawColumn {
            length: Some(255),
            default: Some("''".to_string()),
            ..RawColumn::new("sample_string", "VARCHAR")
        };
        let yaml = serde_yaml::to_string(&raw).unwrap();
        let back: RawColumn = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, raw);
    }
}
