//! Schema entity model
//!
//! Typed, read-only representation of one database's structural metadata.
//! Built atomically by the loader from an information_schema snapshot and
//! shared immutably with every check.

pub mod builder;
pub mod types;

pub use types::{Column, DataType, Index, Schema, SchemaError, Table};
