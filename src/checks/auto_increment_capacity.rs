//! auto_increment_capacity — Auto-increment counter headroom
//!
//! Compares a table's AUTO_INCREMENT counter against the representable
//! range of the counting column's declared type. Severity escalates as
//! headroom shrinks; the thresholds are policy, supplied through the
//! check context.

use crate::checks::{Check, CheckContext, Report, SchemaObject, Severity};

pub(super) const DESCRIPTION: &str = "Auto-increment counter approaching the type's maximum";

pub(super) const EXPLAIN: &str = "auto_increment_capacity — Auto-increment counter headroom\n\
         \n\
         What it detects:\n\
         An auto-increment column whose table's AUTO_INCREMENT counter has\n\
         consumed a large fraction of the values its declared integer type\n\
         can represent. WARNING past the configured warning ratio,\n\
         CRITICAL past the critical ratio (defaults 50% and 90%).\n\
         \n\
         Why it's a problem:\n\
         When the counter reaches the type's maximum, every subsequent\n\
         insert fails with a duplicate-key error on the same exhausted\n\
         value. This is a full outage for the affected table, and the fix\n\
         (widening the column) is an online-DDL operation you do not want\n\
         to run during the outage.\n\
         \n\
         Example (bad):\n\
           A signed int counter at 1.9 billion of 2.1 billion values.\n\
         \n\
         Fix:\n\
           ALTER TABLE t MODIFY id bigint unsigned NOT NULL AUTO_INCREMENT;\n\
         Widen before the WARNING becomes a CRITICAL.";

pub(super) fn supports(object: &SchemaObject<'_>) -> bool {
    match object.as_column() {
        Some((table, column)) => {
            column.auto_increment
                && column.is_integer()
                && !column.generated
                && !table.is_virtual()
        }
        None => false,
    }
}

pub(super) fn run(
    check: impl Check,
    object: &SchemaObject<'_>,
    ctx: &CheckContext<'_>,
) -> Option<Report> {
    let (table, column) = object.as_column()?;

    // The server omits the counter for tables it has never analyzed.
    let next = table.next_auto_increment?;
    let max = column.data_type.integer_max(column.unsigned)?;

    // The counter holds the next value to assign, not the last assigned.
    let consumed = next.saturating_sub(1);
    let ratio = consumed as f64 / max as f64;

    let severity = if ratio >= ctx.policy.capacity_critical_ratio {
        Severity::Critical
    } else if ratio >= ctx.policy.capacity_warning_ratio {
        Severity::Warning
    } else {
        return Some(Report::ok(check.id(), object.label()));
    };

    Some(check.make_report(
        object,
        severity,
        vec![format!(
            "Auto-increment counter has consumed {:.1}% of the {} range ({} of {} values).",
            ratio * 100.0,
            column.column_type,
            consumed,
            max
        )],
    ))
}
