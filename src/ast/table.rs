//! Table references and joins.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Predicate;
use crate::meta::TableMeta;

/// Join kinds. The first table in a FROM list carries `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    None,
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    pub fn keyword(self) -> &'static str {
        match self {
            JoinKind::None => "",
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

/// MySQL index hint kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexHintKind {
    Use,
    Force,
    Ignore,
}

impl IndexHintKind {
    pub fn keyword(self) -> &'static str {
        match self {
            IndexHintKind::Use => "USE INDEX",
            IndexHintKind::Force => "FORCE INDEX",
            IndexHintKind::Ignore => "IGNORE INDEX",
        }
    }
}

/// One index hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexHint {
    pub kind: IndexHintKind,
    pub indexes: Vec<String>,
}

/// What a table reference points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableSource {
    /// A base table.
    Table(Arc<TableMeta>),
    /// A parenthesized sub-query (requires an alias).
    Query(Box<super::SelectStmt>),
    /// A CTE declared in the statement's WITH clause.
    Cte(String),
}

/// One entry in a FROM/JOIN list. Owned exclusively by its statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRef {
    pub source: TableSource,
    pub alias: Option<String>,
    pub join: JoinKind,
    /// ON predicates; ANDed together.
    pub on: Vec<Predicate>,
    /// MySQL PARTITION (...) selection.
    pub partitions: Vec<String>,
    /// MySQL index hints.
    pub index_hints: Vec<IndexHint>,
}

impl TableRef {
    pub fn table(meta: &Arc<TableMeta>) -> Self {
        Self {
            source: TableSource::Table(meta.clone()),
            alias: None,
            join: JoinKind::None,
            on: Vec::new(),
            partitions: Vec::new(),
            index_hints: Vec::new(),
        }
    }

    pub fn cte(name: impl Into<String>) -> Self {
        Self {
            source: TableSource::Cte(name.into()),
            alias: None,
            join: JoinKind::None,
            on: Vec::new(),
            partitions: Vec::new(),
            index_hints: Vec::new(),
        }
    }

    pub fn query(query: super::SelectStmt) -> Self {
        Self {
            source: TableSource::Query(Box::new(query)),
            alias: None,
            join: JoinKind::None,
            on: Vec::new(),
            partitions: Vec::new(),
            index_hints: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn join(mut self, kind: JoinKind) -> Self {
        self.join = kind;
        self
    }

    pub fn on(mut self, predicate: Predicate) -> Self {
        self.on.push(predicate);
        self
    }

    pub fn partition(mut self, name: impl Into<String>) -> Self {
        self.partitions.push(name.into());
        self
    }

    pub fn index_hint(mut self, kind: IndexHintKind, indexes: &[&str]) -> Self {
        self.index_hints.push(IndexHint {
            kind,
            indexes: indexes.iter().map(|s| (*s).to_string()).collect(),
        });
        self
    }

    /// The name this reference exposes to column qualifiers.
    pub fn exposed_name(&self) -> Option<&str> {
        if let Some(alias) = &self.alias {
            return Some(alias);
        }
        match &self.source {
            TableSource::Table(meta) => Some(&meta.name),
            TableSource::Cte(name) => Some(name),
            TableSource::Query(_) => None,
        }
    }
}
