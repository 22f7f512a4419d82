//! Human-readable text output reporter
//!
//! Produces plain text output suitable for terminal display:
//! ```text
//! WARNING sane_auto_increment users.id
//!   This column should be an unsigned integer type.
//! ```

use crate::checks::{Report, Severity};
use crate::output::{ReportError, Reporter, TextReporter};
use std::fmt::Write as FmtWrite;
use std::io::{IsTerminal, Write};
use std::path::Path;

/// ANSI color for a severity, keyed purely by the severity value.
fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Ok => "\x1b[32m",       // green
        Severity::Info => "\x1b[34m",     // blue
        Severity::Concern => "\x1b[36m",  // cyan
        Severity::Warning => "\x1b[33m",  // yellow
        Severity::Critical => "\x1b[31m", // red
    }
}

const RESET: &str = "\x1b[0m";

/// Format a single report as a text block.
///
/// Returns a string of the form:
/// ```text
/// SEVERITY check_id entity
///   message
/// ```
fn format_report(report: &Report, color: bool) -> String {
    let mut buf = String::new();
    // Using write! on String is infallible, but we handle the result properly.
    if color {
        let _ = write!(
            buf,
            "{}{}{} {} {}\n",
            severity_color(report.severity),
            report.severity,
            RESET,
            report.check,
            report.entity
        );
    } else {
        let _ = write!(buf, "{} {} {}\n", report.severity, report.check, report.entity);
    }
    for message in &report.messages {
        let _ = write!(buf, "  {message}\n");
    }
    buf
}

/// Format all reports into a single text string.
///
/// Each report is separated by a blank line for readability.
fn format_all(reports: &[Report], color: bool) -> String {
    let mut output = String::new();
    for (i, report) in reports.iter().enumerate() {
        output.push_str(&format_report(report, color));
        if i < reports.len() - 1 {
            output.push('\n');
        }
    }
    output
}

impl Reporter for TextReporter {
    /// Emit reports as human-readable text.
    ///
    /// If `use_stdout` is true, writes to stdout with color when stdout is
    /// a terminal. Otherwise writes `findings.txt` to the given
    /// `output_dir`, creating the directory if it does not exist.
    fn emit(&self, reports: &[Report], output_dir: &Path) -> Result<(), ReportError> {
        if self.use_stdout {
            let stdout = std::io::stdout();
            let text = format_all(reports, stdout.is_terminal());
            let mut handle = stdout.lock();
            handle.write_all(text.as_bytes())?;
            handle.flush()?;
        } else {
            let text = format_all(reports, false);
            std::fs::create_dir_all(output_dir)?;
            let path = output_dir.join("findings.txt");
            std::fs::write(path, text)?;
        }

        Ok(())
    }
}
