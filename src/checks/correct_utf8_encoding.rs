//! correct_utf8_encoding — Legacy 3-byte utf8 character set
//!
//! MySQL's `utf8` is an alias for `utf8mb3`, which stores at most three
//! bytes per character and rejects anything outside the BMP. Columns that
//! carry no character set abstain.

use crate::checks::{Check, CheckContext, Report, SchemaObject, Severity};

pub(super) const DESCRIPTION: &str = "Character column uses the legacy 3-byte utf8 encoding";

pub(super) const EXPLAIN: &str = "correct_utf8_encoding — Legacy 3-byte utf8 character set\n\
         \n\
         What it detects:\n\
         A column whose character set is the legacy `utf8` (alias\n\
         `utf8mb3`) rather than `utf8mb4`.\n\
         \n\
         Why it's a problem:\n\
         `utf8mb3` stores at most three bytes per character, covering only\n\
         the Basic Multilingual Plane. Emoji, many CJK extension\n\
         characters, and other supplementary-plane input either raise an\n\
         error or get silently truncated at the first unrepresentable\n\
         character, depending on the session's strictness. `utf8mb4` is a\n\
         superset and the server default since MySQL 8.0.\n\
         \n\
         Example (bad):\n\
           CREATE TABLE posts (body text CHARACTER SET utf8);\n\
         \n\
         Fix:\n\
           ALTER TABLE posts CONVERT TO CHARACTER SET utf8mb4;";

pub(super) fn supports(object: &SchemaObject<'_>) -> bool {
    object.as_column().is_some()
}

pub(super) fn run(
    check: impl Check,
    object: &SchemaObject<'_>,
    _ctx: &CheckContext<'_>,
) -> Option<Report> {
    let (_, column) = object.as_column()?;

    // Non-character columns carry no character set; nothing to audit.
    let charset = column.character_set.as_deref()?;

    if charset.eq_ignore_ascii_case("utf8") || charset.eq_ignore_ascii_case("utf8mb3") {
        return Some(check.make_report(
            object,
            Severity::Concern,
            vec![
                format!("Character set should be utf8mb4 not {charset}."),
                "The 3-byte encoding cannot store supplementary-plane characters such as emoji."
                    .to_string(),
            ],
        ));
    }

    Some(Report::ok(check.id(), object.label()))
}
