//! Per-dialect behavioral policy.
//!
//! Engine quirks (Oracle's null/empty-string collapse, Derby's text-literal
//! strictness, the implicit scale of a bare `DECIMAL`) are captured here as
//! explicit configuration injected at adapter construction, never as inline
//! conditionals at call sites.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Behavioral flags for a SQL dialect.
///
/// # Example
///
/// ```yaml
/// nulls_as_empty_string: false
/// default_decimal_scale: 0
/// text_column_coercion: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectPolicy {
    /// Whether the engine treats an empty string as NULL (Oracle-like).
    /// Assigning `''` under this policy stores NULL, and round-trip
    /// assertions must account for the divergence.
    #[serde(default)]
    pub nulls_as_empty_string: bool,

    /// Scale assumed for a decimal column whose catalog record carries no
    /// explicit scale. Derby's convention is 0, which makes a bare
    /// `DECIMAL` column report as integer.
    #[serde(default)]
    pub default_decimal_scale: u32,

    /// Whether non-text values assigned to text-affinity columns are
    /// converted to their canonical string form. Disabled reproduces the
    /// engine's native behavior of rejecting type-mismatched literals.
    #[serde(default = "default_true")]
    pub text_column_coercion: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DialectPolicy {
    fn default() -> Self {
        Self {
            nulls_as_empty_string: false,
            default_decimal_scale: 0,
            text_column_coercion: true,
        }
    }
}

impl DialectPolicy {
    /// Load a policy from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = DialectPolicy::default();
        assert!(!policy.nulls_as_empty_string);
        assert_eq!(policy.default_decimal_scale, 0);
        assert!(policy.text_column_coercion);
    }

    #[test]
    fn test_from_yaml_partial() {
        let policy = DialectPolicy::from_yaml("nulls_as_empty_string: true").unwrap();
        assert!(policy.nulls_as_empty_string);
        assert_eq!(policy.default_decimal_scale, 0);
        assert!(policy.text_column_coercion);
    }

    #[test]
    fn test_from_yaml_full() {
        let yaml = "nulls_as_empty_string: false\n\
                    default_decimal_scale: 2\n\
                    text_column_coercion: false\n";
        let policy = DialectPolicy::from_yaml(yaml).unwrap();
        assert_eq!(policy.default_decimal_scale, 2);
        assert!(!policy.text_column_coercion);
    }

    #[test]
    fn test_from_yaml_rejects_garbage() {
        assert!(DialectPolicy::from_yaml("default_decimal_scale: [1, 2]").is_err());
    }
}
