//! Audit pipeline — the check × entity loop.
//!
//! The [`AuditPipeline`] walks a schema snapshot and runs every enabled
//! check against every object it supports, collecting the reports that
//! found something. Checks are pure and the snapshot is immutable, so the
//! loop has no shared mutable state and visit order is the only thing
//! that determines output order.

use tracing::debug;

use crate::checks::{AuditPolicy, Check, CheckContext, CheckId, Report, SchemaObject};
use crate::schema::{Schema, Table};

/// Runs checks over a schema snapshot.
pub struct AuditPipeline {
    policy: AuditPolicy,
}

impl AuditPipeline {
    pub fn new(policy: AuditPolicy) -> Self {
        Self { policy }
    }

    /// Audit the schema with the given checks, in order.
    ///
    /// Visits tables in snapshot order; per table, the table object first
    /// and then its columns in ordinal order. Returns every report whose
    /// severity is not OK. Clean reports and abstentions are dropped;
    /// abstentions are traced at debug level.
    pub fn run(&self, schema: &Schema, checks: &[CheckId]) -> Vec<Report> {
        let ctx = CheckContext {
            policy: &self.policy,
        };

        let mut reports = Vec::new();
        for table in schema.tables() {
            for object in objects_of(table) {
                for check in checks {
                    if !check.supports(&object) {
                        continue;
                    }
                    match check.run(&object, &ctx) {
                        Some(report) if !report.is_clean() => reports.push(report),
                        Some(_) => {}
                        None => {
                            debug!(check = %check, entity = %object.label(), "check abstained");
                        }
                    }
                }
            }
        }
        reports
    }
}

impl Default for AuditPipeline {
    fn default() -> Self {
        Self::new(AuditPolicy::default())
    }
}

/// The table itself, then its columns in ordinal order.
fn objects_of(table: &Table) -> impl Iterator<Item = SchemaObject<'_>> {
    std::iter::once(SchemaObject::Table(table)).chain(
        table
            .columns
            .iter()
            .map(move |column| SchemaObject::Column { table, column }),
    )
}
