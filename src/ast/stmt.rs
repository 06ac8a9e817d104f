//! Statement variants and their fluent construction helpers.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Expr, ItemPair, JoinKind, Predicate, SortItem, TableRef, WindowDef};
use crate::meta::{FieldMeta, TableMeta};

/// A complete statement. Logically frozen once handed to a renderer;
/// [`Statement::clear`] only releases retained subtrees for reuse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Select(SelectStmt),
    Insert(InsertStmt),
    Update(UpdateStmt),
    Delete(DeleteStmt),
    Values(ValuesStmt),
}

impl Statement {
    /// Release retained subtrees. Never called mid-render.
    pub fn clear(&mut self) {
        match self {
            Statement::Select(s) => *s = SelectStmt::new(),
            Statement::Insert(s) => {
                s.fields.clear();
                s.source = InsertSource::Values(Vec::new());
                s.returning.clear();
            }
            Statement::Update(s) => {
                s.with = None;
                s.items.clear();
                s.from.clear();
                s.wheres.clear();
                s.returning.clear();
            }
            Statement::Delete(s) => {
                s.with = None;
                s.using.clear();
                s.wheres.clear();
                s.returning.clear();
            }
            Statement::Values(s) => {
                s.rows.clear();
                s.order_by.clear();
                s.limit = None;
            }
        }
    }
}

impl From<SelectStmt> for Statement {
    fn from(s: SelectStmt) -> Self {
        Statement::Select(s)
    }
}

impl From<InsertStmt> for Statement {
    fn from(s: InsertStmt) -> Self {
        Statement::Insert(s)
    }
}

impl From<UpdateStmt> for Statement {
    fn from(s: UpdateStmt) -> Self {
        Statement::Update(s)
    }
}

impl From<DeleteStmt> for Statement {
    fn from(s: DeleteStmt) -> Self {
        Statement::Delete(s)
    }
}

impl From<ValuesStmt> for Statement {
    fn from(s: ValuesStmt) -> Self {
        Statement::Values(s)
    }
}

/// One CTE definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CteDef {
    pub name: String,
    /// Optional projected column list.
    pub columns: Vec<String>,
    pub query: Box<Statement>,
}

impl CteDef {
    pub fn new(name: impl Into<String>, query: impl Into<Statement>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            query: Box::new(query.into()),
        }
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| (*c).to_string()).collect();
        self
    }
}

/// WITH clause: CTE list plus the recursive flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WithClause {
    pub recursive: bool,
    pub ctes: Vec<CteDef>,
}

/// One item of a selection list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Selection {
    /// `*`
    Star,
    /// `qualifier.*`
    TableStar(String),
    /// An expression with an optional alias.
    Expr { expr: Expr, alias: Option<String> },
}

impl Selection {
    pub fn expr(expr: Expr) -> Self {
        Selection::Expr { expr, alias: None }
    }

    pub fn aliased(expr: Expr, alias: impl Into<String>) -> Self {
        Selection::Expr {
            expr,
            alias: Some(alias.into()),
        }
    }
}

/// Set operations chaining sibling selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetOp {
    Union,
    UnionAll,
    Intersect,
    Except,
}

impl SetOp {
    pub fn keyword(self) -> &'static str {
        match self {
            SetOp::Union => "UNION",
            SetOp::UnionAll => "UNION ALL",
            SetOp::Intersect => "INTERSECT",
            SetOp::Except => "EXCEPT",
        }
    }
}

/// OFFSET / row-count pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitClause {
    pub offset: Option<u64>,
    pub row_count: u64,
}

/// SELECT statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SelectStmt {
    pub with: Option<WithClause>,
    pub distinct: bool,
    pub selections: Vec<Selection>,
    pub from: Vec<TableRef>,
    pub wheres: Vec<Predicate>,
    pub group_by: Vec<Expr>,
    pub having: Vec<Predicate>,
    pub windows: Vec<WindowDef>,
    pub order_by: Vec<SortItem>,
    pub limit: Option<LimitClause>,
    pub set_ops: Vec<(SetOp, Box<SelectStmt>)>,
    /// Declared by the builder when this query references an enclosing
    /// statement's tables.
    pub correlated: bool,
}

impl SelectStmt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, expr: Expr) -> Self {
        self.selections.push(Selection::expr(expr));
        self
    }

    pub fn select_as(mut self, expr: Expr, alias: impl Into<String>) -> Self {
        self.selections.push(Selection::aliased(expr, alias));
        self
    }

    pub fn select_star(mut self) -> Self {
        self.selections.push(Selection::Star);
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn from_table(mut self, meta: &Arc<TableMeta>) -> Self {
        self.from.push(TableRef::table(meta));
        self
    }

    pub fn from_ref(mut self, table: TableRef) -> Self {
        self.from.push(table);
        self
    }

    pub fn join(mut self, kind: JoinKind, meta: &Arc<TableMeta>, on: Predicate) -> Self {
        self.from.push(TableRef::table(meta).join(kind).on(on));
        self
    }

    pub fn and_where(mut self, predicate: Predicate) -> Self {
        self.wheres.push(predicate);
        self
    }

    pub fn group_by(mut self, expr: Expr) -> Self {
        self.group_by.push(expr);
        self
    }

    pub fn having(mut self, predicate: Predicate) -> Self {
        self.having.push(predicate);
        self
    }

    pub fn window(mut self, def: WindowDef) -> Self {
        self.windows.push(def);
        self
    }

    pub fn order_by(mut self, item: SortItem) -> Self {
        self.order_by.push(item);
        self
    }

    pub fn limit(mut self, row_count: u64) -> Self {
        self.limit = Some(LimitClause {
            offset: None,
            row_count,
        });
        self
    }

    pub fn limit_offset(mut self, row_count: u64, offset: u64) -> Self {
        self.limit = Some(LimitClause {
            offset: Some(offset),
            row_count,
        });
        self
    }

    pub fn with_cte(mut self, cte: CteDef) -> Self {
        self.with.get_or_insert_with(WithClause::default).ctes.push(cte);
        self
    }

    pub fn recursive(mut self) -> Self {
        self.with.get_or_insert_with(WithClause::default).recursive = true;
        self
    }

    pub fn union(mut self, other: SelectStmt) -> Self {
        self.set_ops.push((SetOp::Union, Box::new(other)));
        self
    }

    pub fn union_all(mut self, other: SelectStmt) -> Self {
        self.set_ops.push((SetOp::UnionAll, Box::new(other)));
        self
    }

    pub fn correlated(mut self) -> Self {
        self.correlated = true;
        self
    }
}

/// Row source of an INSERT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InsertSource {
    /// Multi-row VALUES; each row parallel to the declared field list.
    Values(Vec<Vec<Expr>>),
    /// INSERT ... SELECT.
    Query(Box<SelectStmt>),
}

/// INSERT statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStmt {
    pub table: Arc<TableMeta>,
    pub fields: Vec<Arc<FieldMeta>>,
    pub source: InsertSource,
    pub returning: Vec<Selection>,
}

impl InsertStmt {
    pub fn into_table(meta: &Arc<TableMeta>) -> Self {
        Self {
            table: meta.clone(),
            fields: Vec::new(),
            source: InsertSource::Values(Vec::new()),
            returning: Vec::new(),
        }
    }

    pub fn field(mut self, field: &Arc<FieldMeta>) -> Self {
        self.fields.push(field.clone());
        self
    }

    pub fn row(mut self, row: Vec<Expr>) -> Self {
        if let InsertSource::Values(rows) = &mut self.source {
            rows.push(row);
        }
        self
    }

    pub fn from_query(mut self, query: SelectStmt) -> Self {
        self.source = InsertSource::Query(Box::new(query));
        self
    }

    pub fn returning(mut self, selection: Selection) -> Self {
        self.returning.push(selection);
        self
    }
}

/// UPDATE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStmt {
    pub with: Option<WithClause>,
    pub table: Arc<TableMeta>,
    pub alias: Option<String>,
    pub items: Vec<ItemPair>,
    /// Additional tables (multi-table update).
    pub from: Vec<TableRef>,
    pub wheres: Vec<Predicate>,
    pub returning: Vec<Selection>,
}

impl UpdateStmt {
    pub fn table(meta: &Arc<TableMeta>) -> Self {
        Self {
            with: None,
            table: meta.clone(),
            alias: None,
            items: Vec::new(),
            from: Vec::new(),
            wheres: Vec::new(),
            returning: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn set(mut self, field: &Arc<FieldMeta>, value: Expr) -> Self {
        self.items.push(ItemPair::set(field, value));
        self
    }

    pub fn item(mut self, item: ItemPair) -> Self {
        self.items.push(item);
        self
    }

    pub fn from_ref(mut self, table: TableRef) -> Self {
        self.from.push(table);
        self
    }

    pub fn and_where(mut self, predicate: Predicate) -> Self {
        self.wheres.push(predicate);
        self
    }

    pub fn returning(mut self, selection: Selection) -> Self {
        self.returning.push(selection);
        self
    }

    pub fn with_cte(mut self, cte: CteDef) -> Self {
        self.with.get_or_insert_with(WithClause::default).ctes.push(cte);
        self
    }
}

/// DELETE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteStmt {
    pub with: Option<WithClause>,
    pub table: Arc<TableMeta>,
    pub alias: Option<String>,
    /// Additional tables (DELETE ... USING).
    pub using: Vec<TableRef>,
    pub wheres: Vec<Predicate>,
    pub returning: Vec<Selection>,
}

impl DeleteStmt {
    pub fn from_table(meta: &Arc<TableMeta>) -> Self {
        Self {
            with: None,
            table: meta.clone(),
            alias: None,
            using: Vec::new(),
            wheres: Vec::new(),
            returning: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn using(mut self, table: TableRef) -> Self {
        self.using.push(table);
        self
    }

    pub fn and_where(mut self, predicate: Predicate) -> Self {
        self.wheres.push(predicate);
        self
    }

    pub fn returning(mut self, selection: Selection) -> Self {
        self.returning.push(selection);
        self
    }

    pub fn with_cte(mut self, cte: CteDef) -> Self {
        self.with.get_or_insert_with(WithClause::default).ctes.push(cte);
        self
    }
}

/// Standalone VALUES statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ValuesStmt {
    pub rows: Vec<Vec<Expr>>,
    pub order_by: Vec<SortItem>,
    pub limit: Option<LimitClause>,
}

impl ValuesStmt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, row: Vec<Expr>) -> Self {
        self.rows.push(row);
        self
    }

    pub fn order_by(mut self, item: SortItem) -> Self {
        self.order_by.push(item);
        self
    }

    pub fn limit(mut self, row_count: u64) -> Self {
        self.limit = Some(LimitClause {
            offset: None,
            row_count,
        });
        self
    }
}
