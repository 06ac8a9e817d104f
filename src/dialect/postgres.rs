//! PostgreSQL grammar writer.

use super::{Dialect, SqlWriter};

const RESERVED: &[&str] = &[
    "ALL", "ANALYSE", "ANALYZE", "AND", "ANY", "ARRAY", "AS", "ASC", "BETWEEN", "BOTH", "CASE",
    "CAST", "CHECK", "COLLATE", "COLUMN", "CONSTRAINT", "CREATE", "CROSS", "CURRENT_DATE",
    "CURRENT_TIME", "CURRENT_TIMESTAMP", "DEFAULT", "DESC", "DISTINCT", "DO", "ELSE", "END",
    "EXCEPT", "FALSE", "FOR", "FOREIGN", "FROM", "GROUP", "HAVING", "IN", "INITIALLY", "INNER",
    "INTERSECT", "INTO", "IS", "JOIN", "LEADING", "LEFT", "LIKE", "LIMIT", "LOCALTIME", "NOT",
    "NULL", "OFFSET", "ON", "ONLY", "OR", "ORDER", "OUTER", "PLACING", "PRIMARY", "REFERENCES",
    "RETURNING", "RIGHT", "SELECT", "SOME", "TABLE", "THEN", "TO", "TRAILING", "TRUE", "UNION",
    "UNIQUE", "USER", "USING", "VALUES", "WHEN", "WHERE", "WINDOW", "WITH",
];

pub struct PostgresWriter {
    dialect: Dialect,
}

impl PostgresWriter {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }
}

impl SqlWriter for PostgresWriter {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn identifier_quote(&self) -> char {
        '"'
    }

    fn is_reserved(&self, word: &str) -> bool {
        RESERVED.iter().any(|w| w.eq_ignore_ascii_case(word))
    }

    fn folds_unquoted(&self) -> bool {
        // Unquoted identifiers fold to lowercase; mixed case needs quotes to
        // keep its spelling.
        true
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }

    fn string_literal(&self, s: &str) -> String {
        // standard_conforming_strings: only the quote itself is doubled.
        format!("'{}'", s.replace('\'', "''"))
    }

    fn bytes_literal(&self, bytes: &[u8]) -> String {
        let mut out = String::with_capacity(bytes.len() * 2 + 5);
        out.push_str("'\\x");
        for b in bytes {
            out.push_str(&format!("{:02x}", b));
        }
        out.push('\'');
        out
    }

    fn bits_literal(&self, digits: &str) -> String {
        format!("B'{}'", digits)
    }

    fn limit_offset(&self, row_count: Option<u64>, offset: Option<u64>) -> String {
        let mut sql = String::new();
        if let Some(n) = row_count {
            sql.push_str(&format!(" LIMIT {}", n));
        }
        if let Some(o) = offset {
            sql.push_str(&format!(" OFFSET {}", o));
        }
        sql
    }
}
