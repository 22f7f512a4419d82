//! Shared test helpers for check unit tests.

use crate::checks::{AuditPolicy, CheckContext, SchemaObject};
use crate::schema::Schema;

/// Build a `CheckContext` over the given policy.
pub fn make_ctx(policy: &AuditPolicy) -> CheckContext<'_> {
    CheckContext { policy }
}

/// Look up a table object by name. Panics on a missing table — that is a
/// fixture bug.
pub fn table_object<'a>(schema: &'a Schema, table: &str) -> SchemaObject<'a> {
    SchemaObject::Table(
        schema
            .get_table(table)
            .unwrap_or_else(|| panic!("fixture has no table '{table}'")),
    )
}

/// Look up a column object by table and column name.
pub fn column_object<'a>(schema: &'a Schema, table: &str, column: &str) -> SchemaObject<'a> {
    let table = schema
        .get_table(table)
        .unwrap_or_else(|| panic!("fixture has no table '{table}'"));
    let column = table
        .get_column(column)
        .unwrap_or_else(|| panic!("fixture has no column '{column}'"));
    SchemaObject::Column { table, column }
}
