//! sane_innodb_primary_key — Wide or variable-length InnoDB primary key
//!
//! InnoDB physically clusters rows by primary key and stores the full
//! primary-key value in every secondary index entry. A wide or
//! variable-length primary key is therefore paid for once per secondary
//! index, per row.

use crate::checks::{Check, CheckContext, Report, SchemaObject, Severity};

pub(super) const DESCRIPTION: &str = "InnoDB primary key is wide or variable-length";

pub(super) const EXPLAIN: &str = "sane_innodb_primary_key — Wide or variable-length InnoDB primary key\n\
         \n\
         What it detects:\n\
         On InnoDB tables, a primary key that uses a variable-length type\n\
         (varchar, text, blob families) in any of its columns, or that\n\
         spans more than two columns.\n\
         \n\
         Why it's a problem:\n\
         InnoDB's table IS the primary-key B-tree; rows live in key order.\n\
         Every secondary index entry carries the complete primary-key\n\
         value as its row pointer. A 200-byte varchar primary key makes\n\
         every index on the table 200 bytes wider per row, and random\n\
         key material (like UUIDs stored as text) scatters inserts across\n\
         the tree, defeating append-friendly page splits.\n\
         \n\
         Example (bad):\n\
           CREATE TABLE sessions (token varchar(64) PRIMARY KEY, ...)\n\
             ENGINE=InnoDB;\n\
         \n\
         Fix:\n\
           An unsigned auto-increment integer primary key, with a unique\n\
           index on the natural key.";

/// Composite keys past this many columns are flagged as wide.
const MAX_COMPOSITE_COLUMNS: usize = 2;

pub(super) fn supports(object: &SchemaObject<'_>) -> bool {
    object
        .as_table()
        .is_some_and(|t| t.is_innodb() && t.has_primary_key())
}

pub(super) fn run(
    check: impl Check,
    object: &SchemaObject<'_>,
    _ctx: &CheckContext<'_>,
) -> Option<Report> {
    let table = object.as_table()?;

    let mut messages = Vec::new();

    for column in table.primary_key_columns() {
        if column.data_type.is_variable_length() {
            messages.push(format!(
                "Primary key column `{}` uses variable-length type {}. Every secondary \
                 index stores a full copy of it per row.",
                column.name, column.data_type,
            ));
        }
    }

    if table.primary_key.len() > MAX_COMPOSITE_COLUMNS {
        messages.push(format!(
            "Composite primary key spans {} columns. Every secondary index carries all \
             of them.",
            table.primary_key.len(),
        ));
    }

    if messages.is_empty() {
        return Some(Report::ok(check.id(), object.label()));
    }

    Some(check.make_report(object, Severity::Concern, messages))
}
