//! information_schema row DTOs and snapshot assembly
//!
//! Field names mirror the server's column names exactly (uppercase), so a
//! collector can serialize query results without renaming anything.
//! Optional server fields must arrive as JSON `null`, never as an empty
//! string or zero — checks rely on the difference between "absent" and
//! "zero".

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::input::LoadError;
use crate::schema::{Column, DataType, Index, Schema, Table};

/// One database's worth of information_schema rows.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    /// Database (schema) name.
    pub schema: String,
    /// Rows from information_schema.TABLES.
    #[serde(default)]
    pub tables: Vec<TableRow>,
    /// Rows from information_schema.COLUMNS.
    #[serde(default)]
    pub columns: Vec<ColumnRow>,
    /// Rows from information_schema.STATISTICS.
    #[serde(default)]
    pub statistics: Vec<StatisticRow>,
}

/// DTO of a record from information_schema.TABLES
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TableRow {
    pub table_name: String,
    /// NULL for views.
    pub engine: Option<String>,
    pub table_rows: Option<u64>,
    pub auto_increment: Option<u64>,
}

/// DTO of a record from information_schema.COLUMNS
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ColumnRow {
    pub table_name: String,
    pub column_name: String,
    pub ordinal_position: u32,
    pub column_default: Option<String>,
    /// "YES" or "NO".
    pub is_nullable: String,
    pub data_type: String,
    /// Full declared type, e.g. `int(10) unsigned`.
    pub column_type: String,
    pub character_maximum_length: Option<u64>,
    pub numeric_precision: Option<u32>,
    pub character_set_name: Option<String>,
    pub collation_name: Option<String>,
    /// Carries `auto_increment`, `VIRTUAL GENERATED`, `STORED GENERATED`.
    #[serde(default)]
    pub extra: String,
}

/// DTO of a record from information_schema.STATISTICS
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StatisticRow {
    pub table_name: String,
    pub index_name: String,
    /// 1-based position of the column within the index.
    pub seq_in_index: u32,
    pub column_name: String,
    /// 0 for unique indexes.
    pub non_unique: u8,
}

impl Snapshot {
    /// Read a snapshot document from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Assemble the entity model.
    ///
    /// Rows referencing tables the snapshot does not declare, and data
    /// types outside the known vocabulary, are collector contract
    /// violations — errors, not findings.
    pub fn build(self) -> Result<Schema, LoadError> {
        let mut tables: Vec<Table> = self
            .tables
            .iter()
            .map(|row| Table {
                name: row.table_name.clone(),
                engine: row.engine.clone(),
                row_count: row.table_rows,
                next_auto_increment: row.auto_increment,
                columns: vec![],
                indexes: vec![],
                primary_key: vec![],
            })
            .collect();
        let positions: HashMap<&str, usize> = self
            .tables
            .iter()
            .enumerate()
            .map(|(i, row)| (row.table_name.as_str(), i))
            .collect();

        for row in &self.columns {
            let Some(&position) = positions.get(row.table_name.as_str()) else {
                return Err(LoadError::UnknownColumnTable {
                    table: row.table_name.clone(),
                    column: row.column_name.clone(),
                });
            };
            tables[position].columns.push(row.to_column()?);
        }
        for table in &mut tables {
            table.columns.sort_by_key(|c| c.ordinal);
        }

        // Indexes: group STATISTICS rows by (table, index), columns ordered
        // by SEQ_IN_INDEX, index order = first appearance order.
        for row in &self.statistics {
            let Some(&position) = positions.get(row.table_name.as_str()) else {
                return Err(LoadError::UnknownIndexTable {
                    table: row.table_name.clone(),
                    index: row.index_name.clone(),
                });
            };
            let table = &mut tables[position];
            match table.indexes.iter_mut().find(|i| i.name == row.index_name) {
                Some(index) => place_column(index, row),
                None => {
                    let mut index = Index {
                        name: row.index_name.clone(),
                        columns: vec![],
                        unique: row.non_unique == 0,
                    };
                    place_column(&mut index, row);
                    table.indexes.push(index);
                }
            }
        }

        // The primary key is the index the server names PRIMARY.
        for table in &mut tables {
            if let Some(primary) = table.indexes.iter().find(|i| i.name == "PRIMARY") {
                table.primary_key = primary.columns.clone();
            }
        }

        debug!(schema = %self.schema, tables = tables.len(), "assembled snapshot");
        Ok(Schema::new(self.schema, tables)?)
    }
}

/// Insert an index column at its SEQ_IN_INDEX position. Rows may arrive
/// in any order.
fn place_column(index: &mut Index, row: &StatisticRow) {
    let position = (row.seq_in_index.max(1) as usize - 1).min(index.columns.len());
    index.columns.insert(position, row.column_name.clone());
}

impl ColumnRow {
    fn to_column(&self) -> Result<Column, LoadError> {
        let data_type: DataType =
            self.data_type
                .parse()
                .map_err(|_| LoadError::UnknownDataType {
                    table: self.table_name.clone(),
                    column: self.column_name.clone(),
                    value: self.data_type.clone(),
                })?;

        let extra = self.extra.to_ascii_lowercase();
        Ok(Column {
            name: self.column_name.clone(),
            ordinal: self.ordinal_position,
            data_type,
            column_type: self.column_type.clone(),
            unsigned: self.column_type.to_ascii_lowercase().contains("unsigned"),
            nullable: self.is_nullable.eq_ignore_ascii_case("YES"),
            default: self.column_default.clone(),
            max_length: self.character_maximum_length,
            numeric_precision: self.numeric_precision,
            character_set: self.character_set_name.clone(),
            collation: self.collation_name.clone(),
            auto_increment: extra.contains("auto_increment"),
            generated: extra.contains("generated"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users_snapshot() -> &'static str {
        r#"{
            "schema": "app",
            "tables": [
                {"TABLE_NAME": "users", "ENGINE": "InnoDB",
                 "TABLE_ROWS": 1500, "AUTO_INCREMENT": 1501}
            ],
            "columns": [
                {"TABLE_NAME": "users", "COLUMN_NAME": "email",
                 "ORDINAL_POSITION": 2, "COLUMN_DEFAULT": null,
                 "IS_NULLABLE": "YES", "DATA_TYPE": "varchar",
                 "COLUMN_TYPE": "varchar(255)",
                 "CHARACTER_MAXIMUM_LENGTH": 255, "NUMERIC_PRECISION": null,
                 "CHARACTER_SET_NAME": "utf8mb4",
                 "COLLATION_NAME": "utf8mb4_general_ci",
                 "EXTRA": ""},
                {"TABLE_NAME": "users", "COLUMN_NAME": "id",
                 "ORDINAL_POSITION": 1, "COLUMN_DEFAULT": null,
                 "IS_NULLABLE": "NO", "DATA_TYPE": "int",
                 "COLUMN_TYPE": "int(10) unsigned",
                 "CHARACTER_MAXIMUM_LENGTH": null, "NUMERIC_PRECISION": 10,
                 "CHARACTER_SET_NAME": null, "COLLATION_NAME": null,
                 "EXTRA": "auto_increment"}
            ],
            "statistics": [
                {"TABLE_NAME": "users", "INDEX_NAME": "PRIMARY",
                 "SEQ_IN_INDEX": 1, "COLUMN_NAME": "id", "NON_UNIQUE": 0},
                {"TABLE_NAME": "users", "INDEX_NAME": "idx_email",
                 "SEQ_IN_INDEX": 1, "COLUMN_NAME": "email", "NON_UNIQUE": 1}
            ]
        }"#
    }

    #[test]
    fn test_build_users_snapshot() {
        let snapshot: Snapshot = serde_json::from_str(users_snapshot()).expect("parse");
        let schema = snapshot.build().expect("build");

        let users = schema.get_table("users").expect("users");
        assert_eq!(users.engine.as_deref(), Some("InnoDB"));
        assert_eq!(users.row_count, Some(1500));
        assert_eq!(users.next_auto_increment, Some(1501));

        // Columns sorted by ordinal despite arrival order.
        assert_eq!(users.columns[0].name, "id");
        assert_eq!(users.columns[1].name, "email");

        let id = users.get_column("id").expect("id");
        assert_eq!(id.data_type, DataType::Int);
        assert!(id.unsigned);
        assert!(id.auto_increment);
        assert!(!id.nullable);
        assert!(id.character_set.is_none());

        let email = users.get_column("email").expect("email");
        assert_eq!(email.max_length, Some(255));
        assert_eq!(email.character_set.as_deref(), Some("utf8mb4"));
        assert!(email.numeric_precision.is_none());

        assert_eq!(users.primary_key, vec!["id".to_string()]);
        assert_eq!(users.indexes.len(), 2);
        assert!(users.indexes[0].unique);
        assert!(!users.indexes[1].unique);
    }

    #[test]
    fn test_composite_index_ordered_by_seq() {
        let json = r#"{
            "schema": "app",
            "tables": [{"TABLE_NAME": "t", "ENGINE": "InnoDB",
                        "TABLE_ROWS": null, "AUTO_INCREMENT": null}],
            "columns": [
                {"TABLE_NAME": "t", "COLUMN_NAME": "a", "ORDINAL_POSITION": 1,
                 "COLUMN_DEFAULT": null, "IS_NULLABLE": "YES",
                 "DATA_TYPE": "int", "COLUMN_TYPE": "int",
                 "CHARACTER_MAXIMUM_LENGTH": null, "NUMERIC_PRECISION": 10,
                 "CHARACTER_SET_NAME": null, "COLLATION_NAME": null, "EXTRA": ""},
                {"TABLE_NAME": "t", "COLUMN_NAME": "b", "ORDINAL_POSITION": 2,
                 "COLUMN_DEFAULT": null, "IS_NULLABLE": "YES",
                 "DATA_TYPE": "int", "COLUMN_TYPE": "int",
                 "CHARACTER_MAXIMUM_LENGTH": null, "NUMERIC_PRECISION": 10,
                 "CHARACTER_SET_NAME": null, "COLLATION_NAME": null, "EXTRA": ""}
            ],
            "statistics": [
                {"TABLE_NAME": "t", "INDEX_NAME": "idx_ab",
                 "SEQ_IN_INDEX": 2, "COLUMN_NAME": "b", "NON_UNIQUE": 1},
                {"TABLE_NAME": "t", "INDEX_NAME": "idx_ab",
                 "SEQ_IN_INDEX": 1, "COLUMN_NAME": "a", "NON_UNIQUE": 1}
            ]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).expect("parse");
        let schema = snapshot.build().expect("build");

        let index = &schema.get_table("t").expect("t").indexes[0];
        assert_eq!(index.columns, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_view_has_null_engine() {
        let json = r#"{
            "schema": "app",
            "tables": [{"TABLE_NAME": "v", "ENGINE": null,
                        "TABLE_ROWS": null, "AUTO_INCREMENT": null}],
            "columns": [],
            "statistics": []
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).expect("parse");
        let schema = snapshot.build().expect("build");
        assert!(schema.get_table("v").expect("v").is_virtual());
    }

    #[test]
    fn test_generated_column_detected() {
        let json = r#"{
            "schema": "app",
            "tables": [{"TABLE_NAME": "t", "ENGINE": "InnoDB",
                        "TABLE_ROWS": null, "AUTO_INCREMENT": null}],
            "columns": [
                {"TABLE_NAME": "t", "COLUMN_NAME": "total", "ORDINAL_POSITION": 1,
                 "COLUMN_DEFAULT": null, "IS_NULLABLE": "YES",
                 "DATA_TYPE": "decimal", "COLUMN_TYPE": "decimal(10,2)",
                 "CHARACTER_MAXIMUM_LENGTH": null, "NUMERIC_PRECISION": 10,
                 "CHARACTER_SET_NAME": null, "COLLATION_NAME": null,
                 "EXTRA": "VIRTUAL GENERATED"}
            ],
            "statistics": []
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).expect("parse");
        let schema = snapshot.build().expect("build");
        let column = schema
            .get_table("t")
            .and_then(|t| t.get_column("total"))
            .expect("total");
        assert!(column.generated);
        assert!(!column.auto_increment);
    }

    #[test]
    fn test_unknown_data_type_is_error() {
        let json = r#"{
            "schema": "app",
            "tables": [{"TABLE_NAME": "t", "ENGINE": "InnoDB",
                        "TABLE_ROWS": null, "AUTO_INCREMENT": null}],
            "columns": [
                {"TABLE_NAME": "t", "COLUMN_NAME": "c", "ORDINAL_POSITION": 1,
                 "COLUMN_DEFAULT": null, "IS_NULLABLE": "YES",
                 "DATA_TYPE": "hyperloglog", "COLUMN_TYPE": "hyperloglog",
                 "CHARACTER_MAXIMUM_LENGTH": null, "NUMERIC_PRECISION": null,
                 "CHARACTER_SET_NAME": null, "COLLATION_NAME": null, "EXTRA": ""}
            ],
            "statistics": []
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).expect("parse");
        let err = snapshot.build().unwrap_err();
        assert!(matches!(err, LoadError::UnknownDataType { .. }));
    }

    #[test]
    fn test_column_for_unknown_table_is_error() {
        let json = r#"{
            "schema": "app",
            "tables": [],
            "columns": [
                {"TABLE_NAME": "ghost", "COLUMN_NAME": "c", "ORDINAL_POSITION": 1,
                 "COLUMN_DEFAULT": null, "IS_NULLABLE": "YES",
                 "DATA_TYPE": "int", "COLUMN_TYPE": "int",
                 "CHARACTER_MAXIMUM_LENGTH": null, "NUMERIC_PRECISION": 10,
                 "CHARACTER_SET_NAME": null, "COLLATION_NAME": null, "EXTRA": ""}
            ],
            "statistics": []
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).expect("parse");
        let err = snapshot.build().unwrap_err();
        assert!(matches!(err, LoadError::UnknownColumnTable { .. }));
    }

    #[test]
    fn test_duplicate_column_is_schema_error() {
        let json = r#"{
            "schema": "app",
            "tables": [{"TABLE_NAME": "t", "ENGINE": "InnoDB",
                        "TABLE_ROWS": null, "AUTO_INCREMENT": null}],
            "columns": [
                {"TABLE_NAME": "t", "COLUMN_NAME": "c", "ORDINAL_POSITION": 1,
                 "COLUMN_DEFAULT": null, "IS_NULLABLE": "YES",
                 "DATA_TYPE": "int", "COLUMN_TYPE": "int",
                 "CHARACTER_MAXIMUM_LENGTH": null, "NUMERIC_PRECISION": 10,
                 "CHARACTER_SET_NAME": null, "COLLATION_NAME": null, "EXTRA": ""},
                {"TABLE_NAME": "t", "COLUMN_NAME": "c", "ORDINAL_POSITION": 2,
                 "COLUMN_DEFAULT": null, "IS_NULLABLE": "YES",
                 "DATA_TYPE": "int", "COLUMN_TYPE": "int",
                 "CHARACTER_MAXIMUM_LENGTH": null, "NUMERIC_PRECISION": 10,
                 "CHARACTER_SET_NAME": null, "COLLATION_NAME": null, "EXTRA": ""}
            ],
            "statistics": []
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).expect("parse");
        let err = snapshot.build().unwrap_err();
        assert!(matches!(err, LoadError::Schema(_)));
    }
}
