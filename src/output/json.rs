//! JSON output reporter
//!
//! Serializes the report sequence verbatim for downstream tooling. The
//! array preserves pipeline visit order.

use crate::checks::Report;
use crate::output::{JsonReporter, ReportError, Reporter};
use std::path::Path;

impl Reporter for JsonReporter {
    /// Write `findings.json` to the given output directory.
    fn emit(&self, reports: &[Report], output_dir: &Path) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(reports)
            .map_err(|e| ReportError::Serialization(e.to_string()))?;

        std::fs::create_dir_all(output_dir)?;
        let path = output_dir.join("findings.json");
        std::fs::write(path, json)?;

        Ok(())
    }
}
