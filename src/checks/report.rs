use serde::Serialize;

use crate::checks::{CheckId, Severity};

/// The immutable result of running one check against one entity.
///
/// Aggregation (grouping, filtering, counting by severity) belongs to the
/// pipeline and the reporters, never to the report itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// The check that produced this report.
    pub check: CheckId,
    /// Identifying label of the audited entity: `table` or `table.column`.
    pub entity: String,
    pub severity: Severity,
    /// Human-readable findings. Empty for clean reports.
    pub messages: Vec<String>,
}

impl Report {
    pub fn new(
        check: CheckId,
        entity: impl Into<String>,
        severity: Severity,
        messages: Vec<String>,
    ) -> Self {
        Self {
            check,
            entity: entity.into(),
            severity,
            messages,
        }
    }

    /// A clean report: the check ran and found nothing.
    pub fn ok(check: CheckId, entity: impl Into<String>) -> Self {
        Self::new(check, entity, Severity::Ok, vec![])
    }

    pub fn is_clean(&self) -> bool {
        self.severity == Severity::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_report_is_clean() {
        let report = Report::ok(CheckId::EmptyTable, "users");
        assert!(report.is_clean());
        assert!(report.messages.is_empty());
    }

    #[test]
    fn test_serialize_json() {
        let report = Report::new(
            CheckId::CorrectUtf8Encoding,
            "users.email",
            Severity::Concern,
            vec!["Character set should be utf8mb4 not utf8.".to_string()],
        );
        let json = serde_json::to_string(&report).expect("serialize");
        assert_eq!(
            json,
            "{\"check\":\"correct_utf8_encoding\",\"entity\":\"users.email\",\
             \"severity\":\"CONCERN\",\
             \"messages\":[\"Character set should be utf8mb4 not utf8.\"]}"
        );
    }
}
