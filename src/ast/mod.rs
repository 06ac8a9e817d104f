//! The statement AST.
//!
//! Statements are built incrementally through the fluent helpers, then
//! handed to a renderer, at which point they are logically frozen. The AST
//! is dialect-agnostic; whether a shape can actually be rendered is decided
//! at render time.

pub mod assign;
pub mod expr;
pub mod stmt;
pub mod table;

pub use self::assign::ItemPair;
pub use self::expr::{
    BinaryOp, CmpOp, Expr, FrameBound, InList, OverClause, Predicate, SortItem, SortOrder,
    WindowDef, WindowFrame, WindowSpec,
};
pub use self::stmt::{
    CteDef, DeleteStmt, InsertSource, InsertStmt, LimitClause, SelectStmt, Selection, SetOp,
    Statement, UpdateStmt, ValuesStmt, WithClause,
};
pub use self::table::{IndexHint, IndexHintKind, JoinKind, TableRef, TableSource};
