//! empty_table — Table with an estimated row count of zero
//!
//! A zero-row table in a production schema often marks dead or unshipped
//! functionality. Informational only; the estimate comes from table
//! statistics and lags reality.

use crate::checks::{Check, CheckContext, Report, SchemaObject, Severity};

pub(super) const DESCRIPTION: &str = "Table with an estimated row count of zero";

pub(super) const EXPLAIN: &str = "empty_table — Table with an estimated row count of zero\n\
         \n\
         What it detects:\n\
         A table whose estimated row count is zero. Abstains when the\n\
         server reported no estimate at all.\n\
         \n\
         Why it's worth a look:\n\
         Empty tables in production schemas usually mean dead or unused\n\
         functionality: a feature that never shipped, a migration that was\n\
         rolled back halfway, or a table whose writer was removed. Each one\n\
         is schema surface that still has to be maintained and replicated.\n\
         \n\
         Note: the row count is the optimizer's estimate, not an exact\n\
         count, so a recently truncated or freshly created table also\n\
         triggers this. That is why the severity is INFO.";

pub(super) fn supports(object: &SchemaObject<'_>) -> bool {
    object.as_table().is_some_and(|t| !t.is_virtual())
}

pub(super) fn run(
    check: impl Check,
    object: &SchemaObject<'_>,
    _ctx: &CheckContext<'_>,
) -> Option<Report> {
    let table = object.as_table()?;

    // No estimate at all: nothing to say.
    let rows = table.row_count?;

    if rows == 0 {
        return Some(check.make_report(
            object,
            Severity::Info,
            vec!["Table has no rows. It may be unused.".to_string()],
        ));
    }

    Some(Report::ok(check.id(), object.label()))
}
