//! Error types for the adapter core.

use thiserror::Error;

use crate::core::value::ValueKind;

/// Main error type for quoting, coercion and introspection operations.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// A value has no rendering or coercion rule for its target.
    ///
    /// Fatal to the single call: statement construction aborts before any
    /// SQL is produced.
    #[error("unsupported value type {kind} for {target}")]
    UnsupportedValueType {
        /// The kind of the offending value.
        kind: ValueKind,
        /// What the value was destined for (a column, or "SQL literal").
        target: String,
    },

    /// Coercion was requested against a column that does not exist.
    #[error("unknown column {table}.{column}")]
    UnknownColumn { table: String, column: String },

    /// The external metadata collaborator failed.
    ///
    /// Propagated unchanged; this core never masks or retries it.
    #[error("metadata fetch failed: {0}")]
    MetadataFetch(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error (invalid policy, bad identifier, etc.)
    #[error("configuration error: {0}")]
    Config(String),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl AdapterError {
    /// Create an UnsupportedValueType error for a quoting failure.
    pub fn unsupported_literal(kind: ValueKind) -> Self {
        AdapterError::UnsupportedValueType {
            kind,
            target: "SQL literal".to_string(),
        }
    }

    /// Create an UnsupportedValueType error for a coercion failure.
    pub fn unsupported_for_column(kind: ValueKind, column: impl Into<String>) -> Self {
        AdapterError::UnsupportedValueType {
            kind,
            target: format!("column {}", column.into()),
        }
    }

    /// Wrap an arbitrary collaborator error as a metadata fetch failure.
    pub fn metadata(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AdapterError::MetadataFetch(Box::new(source))
    }
}

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_value_message() {
        let err = AdapterError::unsupported_for_column(ValueKind::Bytes, "sample_boolean");
        assert_eq!(
            err.to_string(),
            "unsupported value type binary for column sample_boolean"
        );
    }

    #[test]
    fn test_unknown_column_message() {
        let err = AdapterError::UnknownColumn {
            table: "db_types".to_string(),
            column: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "unknown column db_types.missing");
    }

    #[test]
    fn test_metadata_error_preserves_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "socket closed");
        let err = AdapterError::metadata(io);
        assert!(err.to_string().contains("metadata fetch failed"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
