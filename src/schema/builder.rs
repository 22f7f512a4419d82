//! Test harness for building schema snapshots
//!
//! Fluent API for constructing `Schema` fixtures in tests without going
//! through the information_schema loader.
//!
//! # Example
//!
//! ```rust
//! use mysql_schema_lint::schema::builder::SchemaBuilder;
//! use mysql_schema_lint::schema::DataType;
//!
//! let schema = SchemaBuilder::new("app")
//!     .table("users", |t| {
//!         t.column_with("id", DataType::Int, |c| c.unsigned().auto_increment())
//!             .column_with("email", DataType::VarChar, |c| c.charset("utf8mb4"))
//!             .index("idx_email", &["email"], false)
//!             .pk(&["id"]);
//!     })
//!     .build();
//! ```

use crate::schema::types::{Column, DataType, Index, Schema, Table};

/// Builder for constructing a `Schema` in tests.
pub struct SchemaBuilder {
    name: String,
    tables: Vec<Table>,
}

impl SchemaBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tables: vec![],
        }
    }

    /// Add a table. The closure receives a `TableBuilder` to configure
    /// columns, indexes, and the primary key.
    pub fn table(mut self, name: &str, f: impl FnOnce(&mut TableBuilder)) -> Self {
        let mut builder = TableBuilder::new(name);
        f(&mut builder);
        self.tables.push(builder.build());
        self
    }

    /// Assemble the schema. Panics if the fixture violates a structural
    /// invariant — that is a bug in the test, not a test failure mode.
    pub fn build(self) -> Schema {
        Schema::new(self.name, self.tables).expect("builder produced an invalid schema fixture")
    }
}

/// Builder for constructing a `Table` in tests.
///
/// Defaults: InnoDB engine, no row estimate, no AUTO_INCREMENT counter.
pub struct TableBuilder {
    table: Table,
    next_ordinal: u32,
}

impl TableBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            table: Table {
                name: name.to_string(),
                engine: Some("InnoDB".to_string()),
                row_count: None,
                next_auto_increment: None,
                columns: vec![],
                indexes: vec![],
                primary_key: vec![],
            },
            next_ordinal: 1,
        }
    }

    pub fn engine(&mut self, engine: &str) -> &mut Self {
        self.table.engine = Some(engine.to_string());
        self
    }

    /// Mark this relation as a view (no storage engine).
    pub fn view(&mut self) -> &mut Self {
        self.table.engine = None;
        self
    }

    pub fn rows(&mut self, count: u64) -> &mut Self {
        self.table.row_count = Some(count);
        self
    }

    pub fn next_auto_increment(&mut self, value: u64) -> &mut Self {
        self.table.next_auto_increment = Some(value);
        self
    }

    /// Add a column with default attributes (nullable, signed, no charset).
    pub fn column(&mut self, name: &str, data_type: DataType) -> &mut Self {
        self.column_with(name, data_type, |c| c)
    }

    /// Add a column configured through a `ColumnBuilder`.
    pub fn column_with(
        &mut self,
        name: &str,
        data_type: DataType,
        f: impl FnOnce(&mut ColumnBuilder) -> &mut ColumnBuilder,
    ) -> &mut Self {
        let mut builder = ColumnBuilder::new(name, data_type, self.next_ordinal);
        f(&mut builder);
        self.next_ordinal += 1;
        self.table.columns.push(builder.column);
        self
    }

    /// Add an index. Indexes are stored in call order, which stands in
    /// for definition order.
    pub fn index(&mut self, name: &str, columns: &[&str], unique: bool) -> &mut Self {
        self.table.indexes.push(Index::new(name, columns, unique));
        self
    }

    /// Set the primary key. Also records the implicit PRIMARY index the
    /// server would report.
    pub fn pk(&mut self, columns: &[&str]) -> &mut Self {
        self.table.primary_key = columns.iter().map(|c| c.to_string()).collect();
        self.table
            .indexes
            .insert(0, Index::new("PRIMARY", columns, true));
        self
    }

    fn build(self) -> Table {
        self.table
    }
}

/// Builder for a single column.
pub struct ColumnBuilder {
    column: Column,
}

impl ColumnBuilder {
    fn new(name: &str, data_type: DataType, ordinal: u32) -> Self {
        Self {
            column: Column {
                name: name.to_string(),
                ordinal,
                data_type,
                column_type: data_type.as_str().to_string(),
                unsigned: false,
                nullable: true,
                default: None,
                max_length: None,
                numeric_precision: None,
                character_set: None,
                collation: None,
                auto_increment: false,
                generated: false,
            },
        }
    }

    pub fn unsigned(&mut self) -> &mut Self {
        self.column.unsigned = true;
        self.column.column_type = format!("{} unsigned", self.column.data_type);
        self
    }

    pub fn not_null(&mut self) -> &mut Self {
        self.column.nullable = false;
        self
    }

    pub fn auto_increment(&mut self) -> &mut Self {
        self.column.auto_increment = true;
        self
    }

    pub fn generated(&mut self) -> &mut Self {
        self.column.generated = true;
        self
    }

    pub fn default_value(&mut self, value: &str) -> &mut Self {
        self.column.default = Some(value.to_string());
        self
    }

    pub fn max_length(&mut self, length: u64) -> &mut Self {
        self.column.max_length = Some(length);
        self
    }

    /// Set the character set, with the server's default collation for it.
    pub fn charset(&mut self, charset: &str) -> &mut Self {
        self.column.character_set = Some(charset.to_string());
        self.column.collation = Some(format!("{charset}_general_ci"));
        self
    }

    pub fn collation(&mut self, collation: &str) -> &mut Self {
        self.column.collation = Some(collation.to_string());
        self
    }
}

/// Bare column for unit tests that construct `Table` values by hand.
#[cfg(test)]
pub(crate) fn test_column(name: &str, data_type: DataType) -> Column {
    ColumnBuilder::new(name, data_type, 1).column
}
