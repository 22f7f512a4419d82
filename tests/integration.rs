//! End-to-end integration tests
//!
//! Drives the full path: snapshot JSON → entity model → pipeline →
//! reports, the way the CLI does.

use mysql_schema_lint::checks::{CheckId, Severity};
use mysql_schema_lint::schema::DataType;
use mysql_schema_lint::schema::builder::SchemaBuilder;
use mysql_schema_lint::{AuditPipeline, Config, Snapshot};

/// The canonical scenario: `users` with a signed auto-increment sole
/// primary key and a legacy-utf8 varchar column.
const USERS_SNAPSHOT: &str = r#"{
    "schema": "app",
    "tables": [
        {"TABLE_NAME": "users", "ENGINE": "InnoDB",
         "TABLE_ROWS": 250, "AUTO_INCREMENT": 251}
    ],
    "columns": [
        {"TABLE_NAME": "users", "COLUMN_NAME": "id",
         "ORDINAL_POSITION": 1, "COLUMN_DEFAULT": null,
         "IS_NULLABLE": "NO", "DATA_TYPE": "int",
         "COLUMN_TYPE": "int(11)",
         "CHARACTER_MAXIMUM_LENGTH": null, "NUMERIC_PRECISION": 10,
         "CHARACTER_SET_NAME": null, "COLLATION_NAME": null,
         "EXTRA": "auto_increment"},
        {"TABLE_NAME": "users", "COLUMN_NAME": "email",
         "ORDINAL_POSITION": 2, "COLUMN_DEFAULT": null,
         "IS_NULLABLE": "YES", "DATA_TYPE": "varchar",
         "COLUMN_TYPE": "varchar(255)",
         "CHARACTER_MAXIMUM_LENGTH": 255, "NUMERIC_PRECISION": null,
         "CHARACTER_SET_NAME": "utf8", "COLLATION_NAME": "utf8_general_ci",
         "EXTRA": ""}
    ],
    "statistics": [
        {"TABLE_NAME": "users", "INDEX_NAME": "PRIMARY",
         "SEQ_IN_INDEX": 1, "COLUMN_NAME": "id", "NON_UNIQUE": 0}
    ]
}"#;

#[test]
fn users_scenario_produces_exactly_two_reports() {
    let snapshot: Snapshot = serde_json::from_str(USERS_SNAPSHOT).expect("parse");
    let schema = snapshot.build().expect("build");

    let config = Config::default();
    let pipeline = AuditPipeline::new(config.policy());
    let reports = pipeline.run(&schema, &config.enabled_checks());

    assert_eq!(reports.len(), 2, "unexpected reports: {reports:?}");

    let auto_increment = reports
        .iter()
        .find(|r| r.check == CheckId::SaneAutoIncrement)
        .expect("sane_auto_increment report");
    assert_eq!(auto_increment.entity, "users.id");
    assert_eq!(auto_increment.severity, Severity::Warning);
    assert_eq!(
        auto_increment.messages,
        vec!["This column should be an unsigned integer type.".to_string()]
    );

    let encoding = reports
        .iter()
        .find(|r| r.check == CheckId::CorrectUtf8Encoding)
        .expect("correct_utf8_encoding report");
    assert_eq!(encoding.entity, "users.email");
    assert_eq!(encoding.severity, Severity::Concern);
    assert!(encoding.messages[0].contains("utf8mb4"));
}

#[test]
fn full_audit_is_idempotent_over_snapshot() {
    let config = Config::default();
    let pipeline = AuditPipeline::new(config.policy());
    let checks = config.enabled_checks();

    let first_schema = serde_json::from_str::<Snapshot>(USERS_SNAPSHOT)
        .expect("parse")
        .build()
        .expect("build");
    let second_schema = serde_json::from_str::<Snapshot>(USERS_SNAPSHOT)
        .expect("parse")
        .build()
        .expect("build");

    let first = pipeline.run(&first_schema, &checks);
    let second = pipeline.run(&second_schema, &checks);
    assert_eq!(first, second);
}

#[test]
fn disabled_checks_are_skipped_end_to_end() {
    let schema = serde_json::from_str::<Snapshot>(USERS_SNAPSHOT)
        .expect("parse")
        .build()
        .expect("build");

    let config: Config =
        toml::from_str("[checks]\ndisabled = [\"correct_utf8_encoding\"]").expect("config");
    config.validate().expect("valid");

    let reports = AuditPipeline::new(config.policy()).run(&schema, &config.enabled_checks());
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].check, CheckId::SaneAutoIncrement);
}

#[test]
fn unhealthy_schema_surfaces_every_family_of_finding() {
    // One table per problem class, audited in a single pass.
    let schema = SchemaBuilder::new("app")
        .table("keyless", |t| {
            t.rows(10).column("payload", DataType::Json);
        })
        .table("sessions", |t| {
            t.rows(10)
                .column_with("token", DataType::VarChar, |c| c.not_null().max_length(64))
                .pk(&["token"]);
        })
        .table("abandoned", |t| {
            t.rows(0).column("id", DataType::Int).pk(&["id"]);
        })
        .table("counters", |t| {
            t.rows(200)
                .next_auto_increment(250)
                .column_with("id", DataType::TinyInt, |c| {
                    c.unsigned().not_null().auto_increment()
                })
                .pk(&["id"]);
        })
        .table("orders", |t| {
            t.rows(10)
                .column("customer_id", DataType::Int)
                .column("created_at", DataType::DateTime)
                .index("idx_customer", &["customer_id"], false)
                .index("idx_customer_created", &["customer_id", "created_at"], false);
        })
        .table("select", |t| {
            t.rows(10).column("id", DataType::Int).pk(&["id"]);
        })
        .build();

    let config = Config::default();
    let reports = AuditPipeline::new(config.policy()).run(&schema, &config.enabled_checks());

    let has = |check: CheckId, entity: &str| {
        reports.iter().any(|r| r.check == check && r.entity == entity)
    };

    assert!(has(CheckId::MustHavePrimaryKey, "keyless"));
    assert!(has(CheckId::SaneInnodbPrimaryKey, "sessions"));
    assert!(has(CheckId::EmptyTable, "abandoned"));
    assert!(has(CheckId::AutoIncrementCapacity, "counters.id"));
    assert!(has(CheckId::RedundantIndexes, "orders"));
    assert!(has(CheckId::ReservedKeywords, "select"));

    // The capacity report escalates with the default policy: 249 of 255.
    let capacity = reports
        .iter()
        .find(|r| r.check == CheckId::AutoIncrementCapacity)
        .expect("capacity report");
    assert_eq!(capacity.severity, Severity::Critical);

    // orders has no primary key too; both table-level findings coexist.
    assert!(has(CheckId::MustHavePrimaryKey, "orders"));
}
