use serde::Serialize;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use crate::checks::{Check, CheckContext, Report, SchemaObject};

/// Strongly-typed check identifier.
///
/// A flat enum over every built-in check. Match statements are exhaustive:
/// adding a new variant forces updates everywhere a check ID is dispatched
/// on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumString, IntoStaticStr,
)]
pub enum CheckId {
    /// Table declares no primary key.
    #[strum(serialize = "must_have_primary_key")]
    MustHavePrimaryKey,
    /// InnoDB primary key is wide or variable-length.
    #[strum(serialize = "sane_innodb_primary_key")]
    SaneInnodbPrimaryKey,
    /// Table has an estimated row count of zero.
    #[strum(serialize = "empty_table")]
    EmptyTable,
    /// Auto-increment counter approaching the type's maximum.
    #[strum(serialize = "auto_increment_capacity")]
    AutoIncrementCapacity,
    /// Index shadowed by a wider index on the same table.
    #[strum(serialize = "redundant_indexes")]
    RedundantIndexes,
    /// Table or column named after a reserved word.
    #[strum(serialize = "reserved_keywords")]
    ReservedKeywords,
    /// Auto-increment column is signed, or not the sole primary key.
    #[strum(serialize = "sane_auto_increment")]
    SaneAutoIncrement,
    /// Character column uses the legacy 3-byte utf8 encoding.
    #[strum(serialize = "correct_utf8_encoding")]
    CorrectUtf8Encoding,
}

impl CheckId {
    /// Zero-allocation string representation.
    ///
    /// Delegates to the [`IntoStaticStr`] derive which maps each variant to
    /// its `#[strum(serialize = "…")]` string.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CheckId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for CheckId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s: String = serde::Deserialize::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// `FromStr` is derived via `EnumString` — strum generates a match from
// `#[strum(serialize = "…")]` attributes. `Err` type is `strum::ParseError`.

impl From<CheckId> for Box<dyn Check> {
    fn from(value: CheckId) -> Self {
        Box::new(value)
    }
}

impl Check for CheckId {
    fn id(&self) -> Self {
        *self
    }

    fn description(&self) -> &'static str {
        match self {
            Self::MustHavePrimaryKey => super::must_have_primary_key::DESCRIPTION,
            Self::SaneInnodbPrimaryKey => super::sane_innodb_primary_key::DESCRIPTION,
            Self::EmptyTable => super::empty_table::DESCRIPTION,
            Self::AutoIncrementCapacity => super::auto_increment_capacity::DESCRIPTION,
            Self::RedundantIndexes => super::redundant_indexes::DESCRIPTION,
            Self::ReservedKeywords => super::reserved_keywords::DESCRIPTION,
            Self::SaneAutoIncrement => super::sane_auto_increment::DESCRIPTION,
            Self::CorrectUtf8Encoding => super::correct_utf8_encoding::DESCRIPTION,
        }
    }

    fn explain(&self) -> &'static str {
        match self {
            Self::MustHavePrimaryKey => super::must_have_primary_key::EXPLAIN,
            Self::SaneInnodbPrimaryKey => super::sane_innodb_primary_key::EXPLAIN,
            Self::EmptyTable => super::empty_table::EXPLAIN,
            Self::AutoIncrementCapacity => super::auto_increment_capacity::EXPLAIN,
            Self::RedundantIndexes => super::redundant_indexes::EXPLAIN,
            Self::ReservedKeywords => super::reserved_keywords::EXPLAIN,
            Self::SaneAutoIncrement => super::sane_auto_increment::EXPLAIN,
            Self::CorrectUtf8Encoding => super::correct_utf8_encoding::EXPLAIN,
        }
    }

    fn supports(&self, object: &SchemaObject<'_>) -> bool {
        match self {
            Self::MustHavePrimaryKey => super::must_have_primary_key::supports(object),
            Self::SaneInnodbPrimaryKey => super::sane_innodb_primary_key::supports(object),
            Self::EmptyTable => super::empty_table::supports(object),
            Self::AutoIncrementCapacity => super::auto_increment_capacity::supports(object),
            Self::RedundantIndexes => super::redundant_indexes::supports(object),
            Self::ReservedKeywords => super::reserved_keywords::supports(object),
            Self::SaneAutoIncrement => super::sane_auto_increment::supports(object),
            Self::CorrectUtf8Encoding => super::correct_utf8_encoding::supports(object),
        }
    }

    fn run(&self, object: &SchemaObject<'_>, ctx: &CheckContext<'_>) -> Option<Report> {
        match self {
            Self::MustHavePrimaryKey => super::must_have_primary_key::run(*self, object, ctx),
            Self::SaneInnodbPrimaryKey => super::sane_innodb_primary_key::run(*self, object, ctx),
            Self::EmptyTable => super::empty_table::run(*self, object, ctx),
            Self::AutoIncrementCapacity => super::auto_increment_capacity::run(*self, object, ctx),
            Self::RedundantIndexes => super::redundant_indexes::run(*self, object, ctx),
            Self::ReservedKeywords => super::reserved_keywords::run(*self, object, ctx),
            Self::SaneAutoIncrement => super::sane_auto_increment::run(*self, object, ctx),
            Self::CorrectUtf8Encoding => super::correct_utf8_encoding::run(*self, object, ctx),
        }
    }
}
