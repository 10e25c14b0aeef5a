//! Core value and schema types shared by quoting, coercion and
//! introspection.

pub mod schema;
pub mod value;

pub use schema::{ColumnAttrs, ColumnDescriptor, ColumnType, RawColumn, TypeKind};
pub use value::{Value, ValueKind};
