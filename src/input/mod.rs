//! Schema snapshot loading
//!
//! The engine audits a snapshot, not a live server. A collector dumps the
//! relevant `information_schema` rows for one database as JSON; this
//! module deserializes that document and assembles the entity model in a
//! single atomic step.

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SchemaError;

pub mod information_schema;

pub use information_schema::Snapshot;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("column '{column}' references unknown table '{table}'")]
    UnknownColumnTable { table: String, column: String },

    #[error("index '{index}' references unknown table '{table}'")]
    UnknownIndexTable { table: String, index: String },

    #[error("column '{table}.{column}' has unknown data type '{value}'")]
    UnknownDataType {
        table: String,
        column: String,
        value: String,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}
