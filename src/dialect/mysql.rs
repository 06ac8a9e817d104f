//! MySQL grammar writer.

use super::{Dialect, SqlWriter};

/// Reserved words that force identifier quoting. Not the full manual list,
/// just the words that plausibly collide with column names.
const RESERVED: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "AS", "ASC", "BETWEEN", "BY", "CASE", "CHAR", "COLUMN",
    "CREATE", "CROSS", "DELETE", "DESC", "DISTINCT", "DROP", "ELSE", "EXISTS", "FALSE", "FOR",
    "FROM", "GROUP", "HAVING", "IN", "INDEX", "INNER", "INSERT", "INTERVAL", "INTO", "IS",
    "JOIN", "KEY", "LEFT", "LIKE", "LIMIT", "NOT", "NULL", "ON", "OR", "ORDER", "OUTER",
    "PARTITION", "PRIMARY", "RANGE", "RIGHT", "SELECT", "SET", "TABLE", "THEN", "TO", "TRUE",
    "UNION", "UPDATE", "USING", "VALUES", "WHEN", "WHERE", "WITH",
];

pub struct MySqlWriter {
    dialect: Dialect,
}

impl MySqlWriter {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }
}

impl SqlWriter for MySqlWriter {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn is_reserved(&self, word: &str) -> bool {
        RESERVED.iter().any(|w| w.eq_ignore_ascii_case(word))
    }

    fn folds_unquoted(&self) -> bool {
        false
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }

    fn string_literal(&self, s: &str) -> String {
        // Backslash is an escape character unless NO_BACKSLASH_ESCAPES is on.
        let escaped = s.replace('\\', "\\\\").replace('\'', "''");
        format!("'{}'", escaped)
    }

    fn bytes_literal(&self, bytes: &[u8]) -> String {
        let mut out = String::with_capacity(bytes.len() * 2 + 3);
        out.push_str("x'");
        for b in bytes {
            out.push_str(&format!("{:02X}", b));
        }
        out.push('\'');
        out
    }

    fn bits_literal(&self, digits: &str) -> String {
        format!("b'{}'", digits)
    }

    fn limit_offset(&self, row_count: Option<u64>, offset: Option<u64>) -> String {
        match (row_count, offset) {
            (Some(n), Some(o)) => format!(" LIMIT {}, {}", o, n),
            (Some(n), None) => format!(" LIMIT {}", n),
            _ => String::new(),
        }
    }
}
