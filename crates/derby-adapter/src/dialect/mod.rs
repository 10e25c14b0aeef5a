//! Dialect strategy: quoting, coercion and metadata description for a
//! specific database engine.
//!
//! The [`Dialect`] trait bundles the pure quoting engine and the coercion
//! table behind one strategy object configured by a [`DialectPolicy`].
//! Engine quirks live in the policy, not in per-call-site conditionals.

pub mod coerce;
pub mod derby;
pub mod policy;
pub mod quote;

use crate::core::schema::{ColumnDescriptor, RawColumn};
use crate::core::value::Value;
use crate::error::Result;

pub use derby::DerbyDialect;
pub use policy::DialectPolicy;
pub use quote::{quote_identifier, quote_string, quote_value, QuotedLiteral};

/// SQL value handling strategy for a database engine.
///
/// The default methods implement the generic engine driven by the
/// dialect's [`DialectPolicy`]; implementations supply the name and the
/// policy, and override a method only when an engine needs syntax the
/// policy cannot express.
pub trait Dialect: Send + Sync {
    /// The dialect identifier (e.g. "derby").
    fn name(&self) -> &str;

    /// The behavioral policy injected at construction.
    fn policy(&self) -> &DialectPolicy;

    /// Quote an identifier (table or column name).
    fn quote_ident(&self, name: &str) -> Result<String> {
        quote::quote_identifier(name)
    }

    /// Escape a raw string for embedding between single quotes.
    fn quote_string(&self, raw: &str) -> String {
        quote::quote_string(raw)
    }

    /// Render a value as a SQL literal, optionally targeted at a column.
    fn quote(&self, value: &Value, column: Option<&ColumnDescriptor>) -> Result<QuotedLiteral> {
        quote::quote_value(value, column)
    }

    /// Normalize a value for storage in the given column.
    fn coerce(&self, value: Value, column: &ColumnDescriptor) -> Result<Value> {
        coerce::coerce(value, column, self.policy())
    }

    /// Build a column descriptor from a raw catalog record.
    fn describe(&self, raw: &RawColumn) -> ColumnDescriptor {
        coerce::describe(raw, self.policy())
    }
}
