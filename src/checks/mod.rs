//! Check engine
//!
//! Each check implements the [`Check`] trait and audits one structural
//! property of a table or column. Checks receive read-only schema objects
//! and return severity-graded reports, abstaining when the metadata they
//! need is absent.

use crate::schema::{Column, Table};

#[cfg(test)]
pub mod test_helpers;

mod check_id;
mod report;
mod severity;

pub mod auto_increment_capacity;
pub mod correct_utf8_encoding;
pub mod empty_table;
pub mod must_have_primary_key;
pub mod redundant_indexes;
pub mod reserved_keywords;
pub mod sane_auto_increment;
pub mod sane_innodb_primary_key;

pub use check_id::CheckId;
pub use report::Report;
pub use severity::Severity;

/// A table or column under audit.
///
/// Checks dispatch on the variant plus their own preconditions, so a flat
/// list of heterogeneous checks can run against a flat list of
/// heterogeneous entities without a type-keyed dispatch table.
///
/// A column is always paired with its owning table. The pairing is the
/// back-reference: the table owns its columns, and the column reaches its
/// table only through the object it arrived in.
#[derive(Debug, Clone, Copy)]
pub enum SchemaObject<'a> {
    Table(&'a Table),
    Column {
        table: &'a Table,
        column: &'a Column,
    },
}

impl<'a> SchemaObject<'a> {
    /// Identifying label: the table name, or `table.column`.
    pub fn label(&self) -> String {
        match self {
            Self::Table(table) => table.name.clone(),
            Self::Column { table, column } => format!("{}.{}", table.name, column.name),
        }
    }

    /// The table this object belongs to (itself, for tables).
    pub fn table(&self) -> &'a Table {
        match self {
            Self::Table(table) => table,
            Self::Column { table, .. } => table,
        }
    }

    pub fn as_table(&self) -> Option<&'a Table> {
        match self {
            Self::Table(table) => Some(table),
            Self::Column { .. } => None,
        }
    }

    pub fn as_column(&self) -> Option<(&'a Table, &'a Column)> {
        match self {
            Self::Table(_) => None,
            Self::Column { table, column } => Some((table, column)),
        }
    }
}

/// Severity thresholds for `auto_increment_capacity`.
///
/// Policy, not contract: the defaults follow common schema-linting
/// practice but are overridable through configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditPolicy {
    /// Consumed fraction of the representable range at which the check
    /// reports WARNING.
    pub capacity_warning_ratio: f64,
    /// Consumed fraction at which the check reports CRITICAL.
    pub capacity_critical_ratio: f64,
}

impl Default for AuditPolicy {
    fn default() -> Self {
        Self {
            capacity_warning_ratio: 0.50,
            capacity_critical_ratio: 0.90,
        }
    }
}

/// Read-only context available to checks.
pub struct CheckContext<'a> {
    pub policy: &'a AuditPolicy,
}

/// Trait that every check implements.
pub trait Check: Send + Sync {
    /// Stable check identifier.
    fn id(&self) -> CheckId;

    /// Human-readable short description.
    fn description(&self) -> &'static str;

    /// Detailed explanation for --explain. Includes failure mode, example, fix.
    fn explain(&self) -> &'static str;

    /// Whether this check applies to the given object.
    ///
    /// Pure and side-effect-free. Performs its own kind test — callers
    /// make no guarantee about the object's variant.
    fn supports(&self, object: &SchemaObject<'_>) -> bool;

    /// Audit an object this check supports.
    ///
    /// Called only after `supports` returned true. Returns `None` when the
    /// check cannot reach a verdict (missing optional metadata), otherwise
    /// exactly one report — including a clean OK report when nothing is
    /// wrong. Callers must not infer cleanliness from absence.
    fn run(&self, object: &SchemaObject<'_>, ctx: &CheckContext<'_>) -> Option<Report>;

    /// Convenience constructor for a report against `object` with this
    /// check's identity.
    fn make_report(
        &self,
        object: &SchemaObject<'_>,
        severity: Severity,
        messages: Vec<String>,
    ) -> Report {
        Report::new(self.id(), object.label(), severity, messages)
    }
}

/// Registry of all checks.
///
/// Checks run in registration order. New checks are added here without
/// touching the pipeline.
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    /// Create a new empty check registry.
    pub fn new() -> Self {
        Self { checks: vec![] }
    }

    /// Register all built-in checks.
    pub fn register_defaults(&mut self) {
        use strum::IntoEnumIterator;
        CheckId::iter().for_each(|c| self.register(c.into()));
    }

    /// Register a single check.
    pub fn register(&mut self, check: Box<dyn Check>) {
        self.checks.push(check);
    }

    /// Get a check by typed ID (for --explain and config validation).
    pub fn get(&self, id: CheckId) -> Option<&dyn Check> {
        self.checks.iter().find(|c| c.id() == id).map(|b| &**b)
    }

    /// Iterate all checks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Check> {
        self.checks.iter().map(|b| &**b)
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}
