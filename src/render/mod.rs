//! Statement rendering.
//!
//! One render call walks a frozen [`Statement`] and produces dialect SQL
//! text plus the ordered parameter list; placeholder positions always match
//! that list exactly. All dialect-legality checks happen here, never at
//! build time.

pub mod cte;
pub mod delete;
pub mod expr;
pub mod identifier;
pub mod insert;
pub mod literal;
pub mod select;
pub mod split;
pub mod update;
pub mod values;

#[cfg(test)]
mod tests;

use tracing::debug;

use crate::ast::Statement;
use crate::codec::{DataType, MappingEnv};
use crate::dialect::{Dialect, SqlWriter};
use crate::error::SqlResult;
use crate::value::Value;

pub use identifier::{IdentifierClass, classify_identifier};

/// Soft-visibility rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visible {
    /// Append the visibility predicate for tables that declare a
    /// soft-visibility field.
    Only,
    /// Render rows regardless of visibility.
    Both,
}

/// One ordered parameter: the resolved dialect type and the bind-ready value.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlParam {
    pub data_type: DataType,
    pub value: Value,
}

/// One rendered statement: SQL text plus its ordered parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStmt {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

/// Render output: a single statement, or the parent/child pair produced by
/// the splitter for child-table inserts.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Simple(SqlStmt),
    Pair { parent: SqlStmt, child: SqlStmt },
}

impl Rendered {
    /// The single statement, when this render produced one.
    pub fn simple(self) -> Option<SqlStmt> {
        match self {
            Rendered::Simple(stmt) => Some(stmt),
            Rendered::Pair { .. } => None,
        }
    }
}

/// Per-render scratch state: output buffer, parameter accumulator, and the
/// bound dialect writer.
pub(crate) struct RenderContext {
    pub writer: Box<dyn SqlWriter>,
    pub env: MappingEnv,
    pub visible: Visible,
    pub annotate: bool,
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl RenderContext {
    pub(crate) fn new(dialect: Dialect, visible: Visible, annotate: bool, env: MappingEnv) -> Self {
        Self {
            writer: dialect.writer(),
            env,
            visible,
            annotate,
            sql: String::new(),
            params: Vec::new(),
        }
    }

    pub(crate) fn dialect(&self) -> Dialect {
        self.writer.dialect()
    }

    pub(crate) fn push(&mut self, text: &str) {
        self.sql.push_str(text);
    }

    pub(crate) fn push_char(&mut self, c: char) {
        self.sql.push(c);
    }

    /// Write one identifier, quoting/escaping exactly once.
    pub(crate) fn identifier(&mut self, name: &str) -> SqlResult<()> {
        identifier::write_identifier(self, name)
    }

    /// Write `qualifier.name`.
    pub(crate) fn qualified(&mut self, qualifier: Option<&str>, name: &str) -> SqlResult<()> {
        if let Some(q) = qualifier {
            self.identifier(q)?;
            self.push_char('.');
        }
        self.identifier(name)
    }

    /// Append a placeholder and record its parameter.
    pub(crate) fn bind(&mut self, data_type: DataType, value: Value) {
        let placeholder = self.writer.placeholder(self.params.len() + 1);
        self.sql.push_str(&placeholder);
        self.params.push(SqlParam { data_type, value });
    }

    pub(crate) fn finish(self) -> SqlStmt {
        SqlStmt {
            sql: self.sql,
            params: self.params,
        }
    }
}

/// Render a statement for a dialect.
///
/// `visible` controls soft-visibility predicates; `annotate` requests typed
/// literal prefixes/suffixes for top-level literals.
pub fn render(
    statement: &Statement,
    dialect: Dialect,
    visible: Visible,
    annotate: bool,
) -> SqlResult<Rendered> {
    render_with_env(
        statement,
        dialect,
        visible,
        annotate,
        MappingEnv::new(dialect.server()),
    )
}

/// [`render`] with a caller-supplied conversion environment (error hooks).
pub fn render_with_env(
    statement: &Statement,
    dialect: Dialect,
    visible: Visible,
    annotate: bool,
    env: MappingEnv,
) -> SqlResult<Rendered> {
    debug!(%dialect, "rendering statement");
    match statement {
        Statement::Update(stmt) => {
            if let Some(link) = stmt.table.child_link() {
                return split::render_child_update(stmt, &link, dialect, visible, annotate, env);
            }
        }
        Statement::Delete(stmt) => {
            if let Some(link) = stmt.table.child_link() {
                return split::render_child_delete(stmt, &link, dialect, visible, annotate, env);
            }
        }
        Statement::Insert(stmt) => {
            if let Some(link) = stmt.table.child_link() {
                return split::render_child_insert(stmt, &link, dialect, visible, annotate, env);
            }
        }
        _ => {}
    }
    let mut ctx = RenderContext::new(dialect, visible, annotate, env);
    write_statement(&mut ctx, statement)?;
    Ok(Rendered::Simple(ctx.finish()))
}

/// Dispatch one statement into the buffer. Shared by the top-level entry,
/// WITH bodies, and sub-queries.
pub(crate) fn write_statement(ctx: &mut RenderContext, statement: &Statement) -> SqlResult<()> {
    match statement {
        Statement::Select(stmt) => select::write_select(ctx, stmt),
        Statement::Insert(stmt) => insert::write_insert(ctx, stmt),
        Statement::Update(stmt) => update::write_update(ctx, stmt),
        Statement::Delete(stmt) => delete::write_delete(ctx, stmt),
        Statement::Values(stmt) => values::write_values(ctx, stmt),
    }
}
