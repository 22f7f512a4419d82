//! redundant_indexes — Index shadowed by a wider index
//!
//! A composite index serves every query its left-to-right prefixes serve,
//! so an index whose column sequence is a strict prefix of another's buys
//! nothing and still costs write amplification. Unique indexes are exempt:
//! they enforce a constraint, not just an access path.

use crate::checks::{Check, CheckContext, Report, SchemaObject, Severity};
use crate::schema::Index;

pub(super) const DESCRIPTION: &str = "Index shadowed by a wider index on the same table";

pub(super) const EXPLAIN: &str = "redundant_indexes — Index shadowed by a wider index\n\
         \n\
         What it detects:\n\
         A non-unique index whose column sequence is a strict prefix of\n\
         another index on the same table, or an exact duplicate of one.\n\
         For exact duplicates the first-declared index (or the unique\n\
         one) is kept as canonical and the other is flagged.\n\
         \n\
         Why it's a problem:\n\
         Composite indexes are usable through every left-to-right prefix:\n\
         any lookup served by (a) is also served by (a, b). The narrower\n\
         index therefore adds write amplification, buffer-pool pressure,\n\
         and optimizer choices with no query it alone can serve.\n\
         \n\
         Unique indexes are never flagged: dropping one changes which\n\
         rows the table accepts, not just how fast it is read.\n\
         \n\
         Example (bad):\n\
           KEY idx_customer (customer_id),\n\
           KEY idx_customer_created (customer_id, created_at)\n\
         \n\
         Fix:\n\
           DROP INDEX idx_customer;";

pub(super) fn supports(object: &SchemaObject<'_>) -> bool {
    object.as_table().is_some_and(|t| t.indexes.len() >= 2)
}

/// Whether index `a` (at position `a_pos`) is redundant given `b` (at
/// `b_pos`) on the same table.
fn redundant_against(a: &Index, a_pos: usize, b: &Index, b_pos: usize) -> bool {
    if a.columns == b.columns {
        // Exact duplicate: keep the unique one, else the first declared.
        b.unique || (a.unique == b.unique && b_pos < a_pos)
    } else {
        a.is_strict_prefix_of(b)
    }
}

pub(super) fn run(
    check: impl Check,
    object: &SchemaObject<'_>,
    _ctx: &CheckContext<'_>,
) -> Option<Report> {
    let table = object.as_table()?;

    let mut messages = Vec::new();
    for (a_pos, a) in table.indexes.iter().enumerate() {
        // Uniqueness is a constraint, not only an access path.
        if a.unique {
            continue;
        }
        let shadowing = table
            .indexes
            .iter()
            .enumerate()
            .find(|(b_pos, b)| a_pos != *b_pos && redundant_against(a, a_pos, b, *b_pos));
        if let Some((_, b)) = shadowing {
            messages.push(format!(
                "Index `{}` ({}) is redundant: any lookup it serves is also served by `{}` ({}).",
                a.name,
                a.columns.join(", "),
                b.name,
                b.columns.join(", "),
            ));
        }
    }

    if messages.is_empty() {
        return Some(Report::ok(check.id(), object.label()));
    }

    Some(check.make_report(object, Severity::Concern, messages))
}
