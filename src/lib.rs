//! mysql-schema-lint: Structural-health auditor for MySQL schemas
//!
//! This library provides the core functionality for auditing a schema
//! snapshot. It deserializes information_schema rows into a typed entity
//! model and runs structural-health checks against every table and column,
//! producing severity-graded reports.

pub mod checks;
pub mod config;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod schema;

// Re-export commonly used types
pub use checks::{Check, CheckId, CheckRegistry, Report, Severity};
pub use config::Config;
pub use input::Snapshot;
pub use pipeline::AuditPipeline;
pub use schema::{Schema, SchemaError};
