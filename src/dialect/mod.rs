//! Target dialects and per-dialect SQL grammar.

pub mod mysql;
pub mod postgres;

use serde::{Deserialize, Serialize};

use crate::error::{SqlError, SqlResult};
use crate::meta::ServerMeta;
use mysql::MySqlWriter;
use postgres::PostgresWriter;

/// Database family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Database {
    MySql,
    Postgres,
}

impl std::fmt::Display for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Database::MySql => write!(f, "MySQL"),
            Database::Postgres => write!(f, "PostgreSQL"),
        }
    }
}

/// A concrete (family, version) rendering target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    MySql57,
    MySql80,
    Postgres11,
    Postgres15,
}

impl Dialect {
    pub fn database(self) -> Database {
        match self {
            Dialect::MySql57 | Dialect::MySql80 => Database::MySql,
            Dialect::Postgres11 | Dialect::Postgres15 => Database::Postgres,
        }
    }

    /// The server descriptor this dialect renders for.
    pub fn server(self) -> ServerMeta {
        match self {
            Dialect::MySql57 => ServerMeta::new(Database::MySql, 5, 7),
            Dialect::MySql80 => ServerMeta::new(Database::MySql, 8, 0),
            Dialect::Postgres11 => ServerMeta::new(Database::Postgres, 11, 0),
            Dialect::Postgres15 => ServerMeta::new(Database::Postgres, 15, 0),
        }
    }

    /// Pick the newest dialect the described server can run.
    pub fn from_server(server: &ServerMeta) -> SqlResult<Dialect> {
        match server.database {
            Database::MySql if server.meets(8, 0) => Ok(Dialect::MySql80),
            Database::MySql if server.meets(5, 7) => Ok(Dialect::MySql57),
            Database::Postgres if server.meets(15, 0) => Ok(Dialect::Postgres15),
            Database::Postgres if server.meets(11, 0) => Ok(Dialect::Postgres11),
            _ => Err(SqlError::unsupported("statement rendering", server)),
        }
    }

    pub fn writer(self) -> Box<dyn SqlWriter> {
        match self {
            Dialect::MySql57 | Dialect::MySql80 => Box::new(MySqlWriter::new(self)),
            Dialect::Postgres11 | Dialect::Postgres15 => Box::new(PostgresWriter::new(self)),
        }
    }

    /// WITH-clause support.
    pub fn supports_cte(self) -> bool {
        !matches!(self, Dialect::MySql57)
    }

    /// `WITH name AS (UPDATE/DELETE ... RETURNING ...)` support. MySQL CTEs
    /// accept SELECT bodies only, so the linked-pair splitter needs Postgres.
    pub fn supports_dml_cte(self) -> bool {
        self.database() == Database::Postgres
    }

    /// RETURNING clause on INSERT/UPDATE/DELETE.
    pub fn supports_returning(self) -> bool {
        self.database() == Database::Postgres
    }

    /// Standalone VALUES statement.
    pub fn supports_values_statement(self) -> bool {
        !matches!(self, Dialect::MySql57)
    }

    /// Window functions and the WINDOW clause.
    pub fn supports_window_functions(self) -> bool {
        !matches!(self, Dialect::MySql57)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::MySql57 => write!(f, "MySQL 5.7"),
            Dialect::MySql80 => write!(f, "MySQL 8.0"),
            Dialect::Postgres11 => write!(f, "PostgreSQL 11"),
            Dialect::Postgres15 => write!(f, "PostgreSQL 15"),
        }
    }
}

/// Per-dialect grammar hooks. One writer instance per render; writers hold
/// no state of their own.
pub trait SqlWriter {
    fn dialect(&self) -> Dialect;

    /// The identifier delimiter character.
    fn identifier_quote(&self) -> char;

    /// Whether `word` is reserved and must be quoted as an identifier.
    fn is_reserved(&self, word: &str) -> bool;

    /// Whether unquoted identifiers are case-folded, making any identifier
    /// with an uppercase character require quoting to keep its spelling.
    fn folds_unquoted(&self) -> bool;

    /// Positional placeholder text for the 1-based `index`.
    fn placeholder(&self, index: usize) -> String;

    fn bool_literal(&self, value: bool) -> &'static str;

    /// A complete single-quoted string literal, escaped for the dialect.
    fn string_literal(&self, s: &str) -> String;

    /// A complete binary-string literal.
    fn bytes_literal(&self, bytes: &[u8]) -> String;

    /// A complete bit-string literal from binary digit text.
    fn bits_literal(&self, digits: &str) -> String;

    /// LIMIT/OFFSET clause text, including the leading space when non-empty.
    fn limit_offset(&self, row_count: Option<u64>, offset: Option<u64>) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_server_picks_newest() {
        let server = ServerMeta::new(Database::MySql, 8, 4);
        assert_eq!(Dialect::from_server(&server).unwrap(), Dialect::MySql80);
        let server = ServerMeta::new(Database::Postgres, 12, 1);
        assert_eq!(Dialect::from_server(&server).unwrap(), Dialect::Postgres11);
    }

    #[test]
    fn test_from_server_rejects_ancient() {
        let server = ServerMeta::new(Database::MySql, 5, 5);
        assert!(Dialect::from_server(&server).is_err());
    }

    #[test]
    fn test_capability_matrix() {
        assert!(!Dialect::MySql57.supports_cte());
        assert!(Dialect::MySql80.supports_cte());
        assert!(!Dialect::MySql80.supports_dml_cte());
        assert!(Dialect::Postgres15.supports_dml_cte());
        assert!(!Dialect::MySql80.supports_returning());
        assert!(Dialect::Postgres11.supports_returning());
    }
}
