//! Dialect-specific SQL type enumerations.

use serde::{Deserialize, Serialize};

use crate::dialect::Database;

/// A concrete SQL type on some dialect, as resolved by `MappingType::map`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    MySql(MySqlType),
    Postgres(PostgresType),
}

impl DataType {
    pub fn database(&self) -> Database {
        match self {
            DataType::MySql(_) => Database::MySql,
            DataType::Postgres(_) => Database::Postgres,
        }
    }

    /// Canonical SQL spelling of the type.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataType::MySql(t) => t.type_name(),
            DataType::Postgres(t) => t.type_name(),
        }
    }

    pub fn is_array(&self) -> bool {
        match self {
            DataType::MySql(_) => false,
            DataType::Postgres(t) => t.is_array(),
        }
    }

    pub fn is_range(&self) -> bool {
        match self {
            DataType::MySql(_) => false,
            DataType::Postgres(t) => t.is_range(),
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// MySQL column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MySqlType {
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    BigIntUnsigned,
    Decimal,
    Float,
    Double,
    Char,
    VarChar,
    TinyText,
    Text,
    MediumText,
    LongText,
    TinyBlob,
    Blob,
    MediumBlob,
    LongBlob,
    Bit,
    Enum,
    Date,
    Time,
    DateTime,
}

impl MySqlType {
    pub fn type_name(&self) -> &'static str {
        match self {
            MySqlType::Boolean => "BOOLEAN",
            MySqlType::TinyInt => "TINYINT",
            MySqlType::SmallInt => "SMALLINT",
            MySqlType::Int => "INT",
            MySqlType::BigInt => "BIGINT",
            MySqlType::BigIntUnsigned => "BIGINT UNSIGNED",
            MySqlType::Decimal => "DECIMAL",
            MySqlType::Float => "FLOAT",
            MySqlType::Double => "DOUBLE",
            MySqlType::Char => "CHAR",
            MySqlType::VarChar => "VARCHAR",
            MySqlType::TinyText => "TINYTEXT",
            MySqlType::Text => "TEXT",
            MySqlType::MediumText => "MEDIUMTEXT",
            MySqlType::LongText => "LONGTEXT",
            MySqlType::TinyBlob => "TINYBLOB",
            MySqlType::Blob => "BLOB",
            MySqlType::MediumBlob => "MEDIUMBLOB",
            MySqlType::LongBlob => "LONGBLOB",
            MySqlType::Bit => "BIT",
            MySqlType::Enum => "ENUM",
            MySqlType::Date => "DATE",
            MySqlType::Time => "TIME",
            MySqlType::DateTime => "DATETIME",
        }
    }
}

/// PostgreSQL column types, including the array and range shapes the codec
/// layer resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostgresType {
    Boolean,
    SmallInt,
    Integer,
    BigInt,
    Decimal,
    Real,
    Double,
    Char,
    VarChar,
    Text,
    Bytea,
    Bit,
    Date,
    Time,
    Timestamp,
    Uuid,
    Int4Range,
    Int8Range,
    NumRange,
    DateRange,
    TsRange,
    BooleanArray,
    SmallIntArray,
    IntegerArray,
    BigIntArray,
    DecimalArray,
    TextArray,
    UuidArray,
    DateArray,
    TimestampArray,
}

impl PostgresType {
    pub fn type_name(&self) -> &'static str {
        match self {
            PostgresType::Boolean => "BOOLEAN",
            PostgresType::SmallInt => "SMALLINT",
            PostgresType::Integer => "INTEGER",
            PostgresType::BigInt => "BIGINT",
            PostgresType::Decimal => "DECIMAL",
            PostgresType::Real => "REAL",
            PostgresType::Double => "DOUBLE PRECISION",
            PostgresType::Char => "CHAR",
            PostgresType::VarChar => "VARCHAR",
            PostgresType::Text => "TEXT",
            PostgresType::Bytea => "BYTEA",
            PostgresType::Bit => "BIT",
            PostgresType::Date => "DATE",
            PostgresType::Time => "TIME",
            PostgresType::Timestamp => "TIMESTAMP",
            PostgresType::Uuid => "UUID",
            PostgresType::Int4Range => "INT4RANGE",
            PostgresType::Int8Range => "INT8RANGE",
            PostgresType::NumRange => "NUMRANGE",
            PostgresType::DateRange => "DATERANGE",
            PostgresType::TsRange => "TSRANGE",
            PostgresType::BooleanArray => "BOOLEAN[]",
            PostgresType::SmallIntArray => "SMALLINT[]",
            PostgresType::IntegerArray => "INTEGER[]",
            PostgresType::BigIntArray => "BIGINT[]",
            PostgresType::DecimalArray => "DECIMAL[]",
            PostgresType::TextArray => "TEXT[]",
            PostgresType::UuidArray => "UUID[]",
            PostgresType::DateArray => "DATE[]",
            PostgresType::TimestampArray => "TIMESTAMP[]",
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            PostgresType::BooleanArray
                | PostgresType::SmallIntArray
                | PostgresType::IntegerArray
                | PostgresType::BigIntArray
                | PostgresType::DecimalArray
                | PostgresType::TextArray
                | PostgresType::UuidArray
                | PostgresType::DateArray
                | PostgresType::TimestampArray
        )
    }

    pub fn is_range(&self) -> bool {
        matches!(
            self,
            PostgresType::Int4Range
                | PostgresType::Int8Range
                | PostgresType::NumRange
                | PostgresType::DateRange
                | PostgresType::TsRange
        )
    }

    /// The array type whose element is `self`, when one exists.
    pub fn array_of(&self) -> Option<PostgresType> {
        match self {
            PostgresType::Boolean => Some(PostgresType::BooleanArray),
            PostgresType::SmallInt => Some(PostgresType::SmallIntArray),
            PostgresType::Integer => Some(PostgresType::IntegerArray),
            PostgresType::BigInt => Some(PostgresType::BigIntArray),
            PostgresType::Decimal => Some(PostgresType::DecimalArray),
            PostgresType::Char | PostgresType::VarChar | PostgresType::Text => {
                Some(PostgresType::TextArray)
            }
            PostgresType::Uuid => Some(PostgresType::UuidArray),
            PostgresType::Date => Some(PostgresType::DateArray),
            PostgresType::Timestamp => Some(PostgresType::TimestampArray),
            _ => None,
        }
    }

    /// The range type whose element is `self`, when one exists.
    pub fn range_of(&self) -> Option<PostgresType> {
        match self {
            PostgresType::Integer => Some(PostgresType::Int4Range),
            PostgresType::BigInt => Some(PostgresType::Int8Range),
            PostgresType::Decimal => Some(PostgresType::NumRange),
            PostgresType::Date => Some(PostgresType::DateRange),
            PostgresType::Timestamp => Some(PostgresType::TsRange),
            _ => None,
        }
    }
}
