//! sane_auto_increment — Auto-increment column shape
//!
//! An auto-increment column should be an unsigned integer and the sole
//! primary-key column. Each violated condition is reported independently;
//! a column can collect several messages in one report.

use crate::checks::{Check, CheckContext, Report, SchemaObject, Severity};

pub(super) const DESCRIPTION: &str = "Auto-increment column is signed, or not the sole primary key";

pub(super) const EXPLAIN: &str = "sane_auto_increment — Auto-increment column shape\n\
         \n\
         What it detects:\n\
         An auto-increment column that is any of:\n\
         - not an unsigned integer type,\n\
         - not the primary key,\n\
         - part of a compound primary key.\n\
         Every violated condition gets its own message.\n\
         \n\
         Why it's a problem:\n\
         Auto-increment counters only ever count up, so a signed type\n\
         throws away half the representable range for no benefit. A\n\
         counter that is not the (sole) primary key loses the cheap\n\
         monotonic clustering that is the main reason to use one, and a\n\
         compound key containing the counter makes every secondary index\n\
         wider than it needs to be.\n\
         \n\
         Example (bad):\n\
           CREATE TABLE orders (id int NOT NULL AUTO_INCREMENT,\n\
                                region char(2), PRIMARY KEY (id, region));\n\
         \n\
         Fix:\n\
           CREATE TABLE orders (id int unsigned NOT NULL AUTO_INCREMENT\n\
                                PRIMARY KEY, region char(2));";

pub(super) fn supports(object: &SchemaObject<'_>) -> bool {
    match object.as_column() {
        Some((table, column)) => {
            column.auto_increment && !column.generated && !table.is_virtual()
        }
        None => false,
    }
}

pub(super) fn run(
    check: impl Check,
    object: &SchemaObject<'_>,
    _ctx: &CheckContext<'_>,
) -> Option<Report> {
    let (table, column) = object.as_column()?;

    let mut messages = Vec::new();

    // A counter only counts up; signed types waste half the range.
    if !column.is_integer() || column.is_signed() {
        messages.push("This column should be an unsigned integer type.".to_string());
    }

    if !table.is_primary_key(&column.name) {
        messages.push("This column should be set as the primary key.".to_string());
    } else if table.primary_key.len() > 1 {
        messages.push("This column should be a non-compound primary key.".to_string());
    }

    if messages.is_empty() {
        return Some(Report::ok(check.id(), object.label()));
    }

    Some(check.make_report(object, Severity::Warning, messages))
}
