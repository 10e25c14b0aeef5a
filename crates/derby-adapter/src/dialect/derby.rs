//! Derby dialect (Strategy pattern).

use crate::dialect::policy::DialectPolicy;
use crate::dialect::Dialect;

/// Apache Derby dialect implementation.
///
/// Derby has no quirks beyond the defaults the generic engine already
/// handles (text-literal strictness is the `text_column_coercion` default),
/// so this is the policy holder plus the dialect name.
#[derive(Debug, Clone, Default)]
pub struct DerbyDialect {
    policy: DialectPolicy,
}

impl DerbyDialect {
    /// Create a Derby dialect with the standard policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a Derby dialect with an explicit policy, for engines that
    /// share Derby's surface but diverge on a flag (Oracle-like
    /// empty-string collapse, a nonzero implicit decimal scale).
    pub fn with_policy(policy: DialectPolicy) -> Self {
        Self { policy }
    }
}

impl Dialect for DerbyDialect {
    fn name(&self) -> &str {
        "derby"
    }

    fn policy(&self) -> &DialectPolicy {
        &self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{ColumnType, RawColumn, TypeKind};
    use crate::core::value::Value;

    #[test]
    fn test_derby_defaults() {
        let dialect = DerbyDialect::new();
        assert_eq!(dialect.name(), "derby");
        assert!(dialect.policy().text_column_coercion);
        assert!(!dialect.policy().nulls_as_empty_string);
        assert_eq!(dialect.policy().default_decimal_scale, 0);
    }

    #[test]
    fn test_dialect_trait_object() {
        let dialect: Box<dyn Dialect> = Box::new(DerbyDialect::new());
        assert_eq!(
            dialect.quote(&Value::from("it's"), None).unwrap().as_str(),
            "'it''s'"
        );
        assert_eq!(dialect.quote_ident("db_types").unwrap(), "\"db_types\"");
    }

    #[test]
    fn test_dialect_describe_uses_policy() {
        let dialect = DerbyDialect::with_policy(DialectPolicy {
            default_decimal_scale: 2,
            ..DialectPolicy::default()
        });
        let col = dialect.describe(&RawColumn::new("d", "DECIMAL"));
        assert_eq!(col.semantic_kind(), TypeKind::Decimal);
        assert_eq!(col.sql_type.scale(), Some(2));
    }

    #[test]
    fn test_dialect_coerce_into_text() {
        let dialect = DerbyDialect::new();
        let col = crate::core::schema::ColumnDescriptor {
            name: "sample_string".to_string(),
            sql_type: ColumnType::String { limit: Some(255) },
            default: None,
            nullable: true,
        };
        assert_eq!(
            dialect.coerce(Value::Float(4.3), &col).unwrap(),
            Value::Text("4.3".to_string())
        );
    }
}
