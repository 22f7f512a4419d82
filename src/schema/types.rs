//! Schema entity types
//!
//! The schema is an immutable snapshot of one database's structural
//! metadata: tables with their columns, indexes, and primary key. It is
//! built once by the loader and treated as read-only by every check.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

/// Violation of a structural invariant the loader is contractually
/// required to uphold. Fatal to the run — never converted into a report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("duplicate table '{table}' in schema '{schema}'")]
    DuplicateTable { schema: String, table: String },

    #[error("duplicate column '{column}' on table '{table}'")]
    DuplicateColumn { table: String, column: String },

    #[error("primary key of '{table}' references unknown column '{column}'")]
    UnknownPrimaryKeyColumn { table: String, column: String },

    #[error("index '{index}' on '{table}' references unknown column '{column}'")]
    UnknownIndexColumn {
        table: String,
        index: String,
        column: String,
    },

    #[error("index '{index}' on '{table}' has no columns")]
    EmptyIndex { table: String, index: String },
}

/// An immutable snapshot of one database schema.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    tables: Vec<Table>,
}

impl Schema {
    /// Assemble a schema snapshot, enforcing structural invariants.
    ///
    /// Table names must be unique, column names unique per table, and
    /// every primary-key or index column must resolve to an owned column.
    /// A violation means the loader broke its contract, not that the
    /// audited schema is unhealthy.
    pub fn new(name: impl Into<String>, tables: Vec<Table>) -> Result<Self, SchemaError> {
        let name = name.into();
        let mut seen = HashSet::new();
        for table in &tables {
            if !seen.insert(table.name.as_str()) {
                return Err(SchemaError::DuplicateTable {
                    schema: name,
                    table: table.name.clone(),
                });
            }
            table.validate()?;
        }
        Ok(Self { name, tables })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tables in snapshot order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// One table (or view) in the snapshot.
#[derive(Debug, Clone)]
pub struct Table {
    pub name: String,
    /// Storage engine. `None` for views and other virtual relations.
    pub engine: Option<String>,
    /// Estimated row count. `None` when the server did not report one.
    pub row_count: Option<u64>,
    /// The table's current AUTO_INCREMENT counter (next value to assign).
    pub next_auto_increment: Option<u64>,
    /// Columns in ordinal order.
    pub columns: Vec<Column>,
    /// Indexes in definition order. Order matters: the earlier of two
    /// duplicate indexes is treated as canonical.
    pub indexes: Vec<Index>,
    /// Ordered primary-key column names. Empty when the table has no
    /// primary key.
    pub primary_key: Vec<String>,
}

impl Table {
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_primary_key(&self) -> bool {
        !self.primary_key.is_empty()
    }

    /// Whether the named column is part of the primary key.
    pub fn is_primary_key(&self, column: &str) -> bool {
        self.primary_key.iter().any(|c| c == column)
    }

    /// Primary-key columns resolved against the owned columns, in key order.
    ///
    /// Columns the key references but the table does not own are filtered
    /// out here; `Schema::new` rejects such snapshots before any check runs.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.primary_key
            .iter()
            .filter_map(|name| self.get_column(name))
    }

    /// Whether this table is backed by an InnoDB storage engine.
    pub fn is_innodb(&self) -> bool {
        self.engine
            .as_deref()
            .is_some_and(|e| e.eq_ignore_ascii_case("innodb"))
    }

    /// A relation with no storage engine is a view or other virtual
    /// construct; physical-layout checks do not apply to it.
    pub fn is_virtual(&self) -> bool {
        self.engine.is_none()
    }

    fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    table: self.name.clone(),
                    column: column.name.clone(),
                });
            }
        }
        for name in &self.primary_key {
            if !seen.contains(name.as_str()) {
                return Err(SchemaError::UnknownPrimaryKeyColumn {
                    table: self.name.clone(),
                    column: name.clone(),
                });
            }
        }
        for index in &self.indexes {
            if index.columns.is_empty() {
                return Err(SchemaError::EmptyIndex {
                    table: self.name.clone(),
                    index: index.name.clone(),
                });
            }
            for name in &index.columns {
                if !seen.contains(name.as_str()) {
                    return Err(SchemaError::UnknownIndexColumn {
                        table: self.name.clone(),
                        index: index.name.clone(),
                        column: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// One column of a table.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    /// 1-based position within the table.
    pub ordinal: u32,
    pub data_type: DataType,
    /// Raw declared type as the server reports it, e.g. `int(10) unsigned`.
    pub column_type: String,
    pub unsigned: bool,
    pub nullable: bool,
    pub default: Option<String>,
    /// Maximum character length for string types.
    pub max_length: Option<u64>,
    pub numeric_precision: Option<u32>,
    /// Character set, present only for character types.
    pub character_set: Option<String>,
    pub collation: Option<String>,
    pub auto_increment: bool,
    /// Virtual or stored generated column.
    pub generated: bool,
}

impl Column {
    pub fn is_integer(&self) -> bool {
        self.data_type.is_integer()
    }

    pub fn is_signed(&self) -> bool {
        !self.unsigned
    }
}

/// One index on a table. The PRIMARY index appears here like any other
/// unique index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub name: String,
    /// Referenced column names in index order. The order defines which
    /// prefixes of the index are usable.
    pub columns: Vec<String>,
    pub unique: bool,
}

impl Index {
    pub fn new(name: impl Into<String>, columns: &[&str], unique: bool) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            unique,
        }
    }

    /// Whether this index's column sequence is a strict prefix of `other`'s.
    pub fn is_strict_prefix_of(&self, other: &Index) -> bool {
        self.columns.len() < other.columns.len()
            && self.columns.iter().zip(&other.columns).all(|(a, b)| a == b)
    }
}

/// The fixed vocabulary of MySQL scalar, text, blob, and geometric types
/// as reported in `information_schema.COLUMNS.DATA_TYPE`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    BigInt,
    Decimal,
    Float,
    Double,
    Bit,
    Char,
    VarChar,
    Binary,
    VarBinary,
    TinyText,
    Text,
    MediumText,
    LongText,
    TinyBlob,
    Blob,
    MediumBlob,
    LongBlob,
    Enum,
    Set,
    Json,
    Date,
    DateTime,
    Timestamp,
    Time,
    Year,
    Geometry,
    GeometryCollection,
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
}

impl DataType {
    /// Zero-allocation lowercase name, matching `DATA_TYPE` exactly.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Integer-family types, the only ones that can auto-increment.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::TinyInt | Self::SmallInt | Self::MediumInt | Self::Int | Self::BigInt
        )
    }

    /// Variable-length string and blob types. Unsuitable as InnoDB
    /// clustering keys.
    pub fn is_variable_length(&self) -> bool {
        matches!(
            self,
            Self::VarChar
                | Self::VarBinary
                | Self::TinyText
                | Self::Text
                | Self::MediumText
                | Self::LongText
                | Self::TinyBlob
                | Self::Blob
                | Self::MediumBlob
                | Self::LongBlob
        )
    }

    /// Largest value representable by an integer type with the given
    /// signedness. `None` for non-integer types.
    pub fn integer_max(&self, unsigned: bool) -> Option<u64> {
        let max = match (self, unsigned) {
            (Self::TinyInt, false) => i8::MAX as u64,
            (Self::TinyInt, true) => u8::MAX as u64,
            (Self::SmallInt, false) => i16::MAX as u64,
            (Self::SmallInt, true) => u16::MAX as u64,
            (Self::MediumInt, false) => (1 << 23) - 1,
            (Self::MediumInt, true) => (1 << 24) - 1,
            (Self::Int, false) => i32::MAX as u64,
            (Self::Int, true) => u32::MAX as u64,
            (Self::BigInt, false) => i64::MAX as u64,
            (Self::BigInt, true) => u64::MAX,
            _ => return None,
        };
        Some(max)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
