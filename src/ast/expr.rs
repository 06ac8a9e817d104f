//! Expression and predicate trees.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec::CodecKey;
use crate::meta::FieldMeta;
use crate::value::Value;

/// Binary operators for expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    /// String concatenation (||)
    Concat,
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mul,
    /// Division (/)
    Div,
    /// Modulo (%)
    Rem,
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOp::Concat => write!(f, "||"),
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::Div => write!(f, "/"),
            BinaryOp::Rem => write!(f, "%"),
        }
    }
}

/// Comparison operators for predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Ne => "<>",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        }
    }
}

/// A scalar expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A value rendered inline as a literal.
    Literal { value: Value, codec: CodecKey },
    /// A value bound through a positional placeholder.
    Param { value: Value, codec: CodecKey },
    /// A column backed by a field descriptor, optionally qualified.
    Field {
        qualifier: Option<String>,
        field: Arc<FieldMeta>,
    },
    /// A bare column reference with no descriptor (CTE projections).
    Column {
        qualifier: Option<String>,
        name: String,
    },
    /// left op right
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    /// Function call (COALESCE, LOWER, ...).
    Func { name: String, args: Vec<Expr> },
    /// CASE WHEN ... THEN ... [ELSE ...] END
    Case {
        branches: Vec<(Predicate, Expr)>,
        else_value: Option<Box<Expr>>,
    },
    /// Scalar sub-query.
    SubQuery(Box<super::SelectStmt>),
    /// Window function invocation.
    Window {
        func: String,
        args: Vec<Expr>,
        over: OverClause,
    },
}

impl Expr {
    pub fn literal(value: impl Into<Value>, codec: CodecKey) -> Self {
        Expr::Literal {
            value: value.into(),
            codec,
        }
    }

    pub fn param(value: impl Into<Value>, codec: CodecKey) -> Self {
        Expr::Param {
            value: value.into(),
            codec,
        }
    }

    pub fn field(field: &Arc<FieldMeta>) -> Self {
        Expr::Field {
            qualifier: None,
            field: field.clone(),
        }
    }

    pub fn qualified_field(qualifier: impl Into<String>, field: &Arc<FieldMeta>) -> Self {
        Expr::Field {
            qualifier: Some(qualifier.into()),
            field: field.clone(),
        }
    }

    pub fn column(name: impl Into<String>) -> Self {
        Expr::Column {
            qualifier: None,
            name: name.into(),
        }
    }

    pub fn qualified_column(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Expr::Column {
            qualifier: Some(qualifier.into()),
            name: name.into(),
        }
    }

    pub fn func(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Func {
            name: name.into(),
            args,
        }
    }

    /// Whether this expression can evaluate to NULL.
    pub fn nullable(&self) -> bool {
        match self {
            Expr::Literal { value, .. } | Expr::Param { value, .. } => value.is_null(),
            Expr::Field { field, .. } => field.nullable,
            Expr::Column { .. } => true,
            Expr::Binary { left, right, .. } => left.nullable() || right.nullable(),
            Expr::Func { .. } => true,
            Expr::Case {
                branches,
                else_value,
            } => {
                else_value.is_none()
                    || branches.iter().any(|(_, e)| e.nullable())
                    || else_value.as_ref().is_some_and(|e| e.nullable())
            }
            Expr::SubQuery(_) => true,
            Expr::Window { .. } => true,
        }
    }

    /// Whether this expression contains a correlated sub-query.
    pub fn has_correlation(&self) -> bool {
        match self {
            Expr::Literal { .. }
            | Expr::Param { .. }
            | Expr::Field { .. }
            | Expr::Column { .. } => false,
            Expr::Binary { left, right, .. } => left.has_correlation() || right.has_correlation(),
            Expr::Func { args, .. } => args.iter().any(Expr::has_correlation),
            Expr::Case {
                branches,
                else_value,
            } => {
                branches
                    .iter()
                    .any(|(p, e)| p.has_correlation() || e.has_correlation())
                    || else_value.as_ref().is_some_and(|e| e.has_correlation())
            }
            Expr::SubQuery(q) => q.correlated,
            Expr::Window { args, .. } => args.iter().any(Expr::has_correlation),
        }
    }
}

/// A boolean predicate node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    Cmp {
        left: Expr,
        op: CmpOp,
        right: Expr,
    },
    Like {
        expr: Expr,
        pattern: Expr,
        negated: bool,
    },
    IsNull {
        expr: Expr,
        negated: bool,
    },
    In {
        expr: Expr,
        list: InList,
        negated: bool,
    },
    Between {
        expr: Expr,
        low: Expr,
        high: Expr,
    },
    Exists {
        query: Box<super::SelectStmt>,
        negated: bool,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

/// Right side of an IN predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InList {
    Values(Vec<Expr>),
    Query(Box<super::SelectStmt>),
}

impl Predicate {
    pub fn eq(left: Expr, right: Expr) -> Self {
        Predicate::Cmp {
            left,
            op: CmpOp::Eq,
            right,
        }
    }

    pub fn cmp(left: Expr, op: CmpOp, right: Expr) -> Self {
        Predicate::Cmp { left, op, right }
    }

    pub fn is_null(expr: Expr) -> Self {
        Predicate::IsNull {
            expr,
            negated: false,
        }
    }

    /// Whether any expression under this predicate contains a correlated
    /// sub-query.
    pub fn has_correlation(&self) -> bool {
        match self {
            Predicate::Cmp { left, right, .. } => left.has_correlation() || right.has_correlation(),
            Predicate::Like { expr, pattern, .. } => {
                expr.has_correlation() || pattern.has_correlation()
            }
            Predicate::IsNull { expr, .. } => expr.has_correlation(),
            Predicate::In { expr, list, .. } => {
                expr.has_correlation()
                    || match list {
                        InList::Values(items) => items.iter().any(Expr::has_correlation),
                        InList::Query(q) => q.correlated,
                    }
            }
            Predicate::Between { expr, low, high } => {
                expr.has_correlation() || low.has_correlation() || high.has_correlation()
            }
            Predicate::Exists { query, .. } => query.correlated,
            Predicate::And(items) | Predicate::Or(items) => {
                items.iter().any(Predicate::has_correlation)
            }
            Predicate::Not(inner) => inner.has_correlation(),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// One ORDER BY item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortItem {
    pub expr: Expr,
    pub order: SortOrder,
}

impl SortItem {
    pub fn asc(expr: Expr) -> Self {
        Self {
            expr,
            order: SortOrder::Asc,
        }
    }

    pub fn desc(expr: Expr) -> Self {
        Self {
            expr,
            order: SortOrder::Desc,
        }
    }
}

/// A named window declared in a WINDOW clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowDef {
    pub name: String,
    pub spec: WindowSpec,
}

/// The body of an OVER clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WindowSpec {
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<SortItem>,
    pub frame: Option<WindowFrame>,
}

/// OVER target of a window invocation: a declared window or an inline spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OverClause {
    Named(String),
    Inline(WindowSpec),
}

/// Window frame definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WindowFrame {
    /// ROWS BETWEEN start AND end
    Rows { start: FrameBound, end: FrameBound },
    /// RANGE BETWEEN start AND end
    Range { start: FrameBound, end: FrameBound },
}

/// Window frame boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameBound {
    UnboundedPreceding,
    Preceding(u32),
    CurrentRow,
    Following(u32),
    UnboundedFollowing,
}
