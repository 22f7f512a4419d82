//! must_have_primary_key — Table without a primary key
//!
//! Flags tables that declare zero primary-key columns. Views are skipped;
//! a relation without storage has no key to declare.

use crate::checks::{Check, CheckContext, Report, SchemaObject, Severity};

pub(super) const DESCRIPTION: &str = "Table without a primary key";

pub(super) const EXPLAIN: &str = "must_have_primary_key — Table without a primary key\n\
         \n\
         What it detects:\n\
         A table whose primary key declares zero columns.\n\
         \n\
         Why it's a problem:\n\
         Tables without primary keys:\n\
         - Cannot be safely replicated row-wise; row-based replication\n\
           falls back to full-table scans to locate rows.\n\
         - Cannot be deduplicated or targeted reliably, because no column\n\
           set is guaranteed to identify a single row.\n\
         - Break ORMs and tooling that require a row identity.\n\
         \n\
         Example (bad):\n\
           CREATE TABLE events (event_type varchar(32), payload json);\n\
         \n\
         Fix:\n\
           CREATE TABLE events (\n\
             id bigint unsigned NOT NULL AUTO_INCREMENT PRIMARY KEY,\n\
             event_type varchar(32),\n\
             payload json\n\
           );";

pub(super) fn supports(object: &SchemaObject<'_>) -> bool {
    object.as_table().is_some_and(|t| !t.is_virtual())
}

pub(super) fn run(
    check: impl Check,
    object: &SchemaObject<'_>,
    _ctx: &CheckContext<'_>,
) -> Option<Report> {
    let table = object.as_table()?;

    if table.has_primary_key() {
        return Some(Report::ok(check.id(), object.label()));
    }

    Some(check.make_report(
        object,
        Severity::Warning,
        vec!["Table does not have a primary key.".to_string()],
    ))
}
