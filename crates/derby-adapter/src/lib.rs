//! # derby-adapter
//!
//! Value quoting, type coercion and schema introspection core for a Derby
//! SQL adapter.
//!
//! The crate covers the layer between an object mapper's dynamically typed
//! values and the engine's statically typed SQL surface:
//!
//! - **Quoting**: render any [`core::Value`] as an injection-safe SQL
//!   literal ([`dialect::quote_value`])
//! - **Coercion**: normalize a value for a target column, including the
//!   canonical-string conversion Derby needs for text columns
//!   ([`Dialect::coerce`])
//! - **Introspection**: normalize catalog metadata into cached,
//!   engine-independent column descriptors
//!   ([`introspect::SchemaIntrospector`])
//!
//! SQL execution and metadata fetching are external collaborators reached
//! through the [`introspect::MetadataSource`] trait.
//!
//! ## Example
//!
//! ```rust
//! use derby_adapter::{Dialect, DerbyDialect, Value};
//!
//! let dialect = DerbyDialect::new();
//! let literal = dialect.quote(&Value::from("it's"), None)?;
//! assert_eq!(literal.as_str(), "'it''s'");
//! # Ok::<(), derby_adapter::AdapterError>(())
//! ```

pub mod core;
pub mod dialect;
pub mod error;
pub mod introspect;

// Re-exports for convenient access
pub use crate::core::{ColumnAttrs, ColumnDescriptor, ColumnType, RawColumn, TypeKind, Value};
pub use dialect::{DerbyDialect, Dialect, DialectPolicy, QuotedLiteral};
pub use error::{AdapterError, Result};
pub use introspect::{MergedColumn, MetadataSource, SchemaIntrospector};
