//! Output reporters for different formats
//!
//! Supports human-readable text and JSON output. Severity-to-presentation
//! mapping (labels, colors) lives here; the engine never formats anything.

use crate::checks::Report;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error writing report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Trait for output format reporters.
pub trait Reporter {
    /// Write reports to the given output directory.
    /// The filename is determined by the reporter (e.g., "findings.json").
    fn emit(&self, reports: &[Report], output_dir: &Path) -> Result<(), ReportError>;
}

/// Text reporter also supports writing to stdout (for --format text).
pub struct TextReporter {
    pub use_stdout: bool,
}

impl TextReporter {
    pub fn new(use_stdout: bool) -> Self {
        Self { use_stdout }
    }
}

pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

pub mod json;
pub mod text;
