//! WITH-clause assembly.

use super::{RenderContext, write_statement};
use crate::ast::{Statement, WithClause};
use crate::error::{SqlError, SqlResult};

/// Write a WITH clause (including the trailing space), if one is present.
pub(crate) fn write_with(ctx: &mut RenderContext, with: Option<&WithClause>) -> SqlResult<()> {
    let Some(with) = with else {
        return Ok(());
    };
    if with.ctes.is_empty() {
        return Ok(());
    }
    if !ctx.dialect().supports_cte() {
        return Err(SqlError::UnsupportedClause {
            clause: "WITH",
            dialect: ctx.dialect(),
        });
    }
    ctx.push("WITH ");
    if with.recursive {
        ctx.push("RECURSIVE ");
    }
    for (i, cte) in with.ctes.iter().enumerate() {
        if i > 0 {
            ctx.push(", ");
        }
        ctx.identifier(&cte.name)?;
        if !cte.columns.is_empty() {
            ctx.push_char('(');
            for (j, column) in cte.columns.iter().enumerate() {
                if j > 0 {
                    ctx.push(", ");
                }
                ctx.identifier(column)?;
            }
            ctx.push_char(')');
        }
        ctx.push(" AS (");
        if !matches!(cte.query.as_ref(), Statement::Select(_) | Statement::Values(_))
            && !ctx.dialect().supports_dml_cte()
        {
            return Err(SqlError::UnsupportedClause {
                clause: "data-modifying WITH",
                dialect: ctx.dialect(),
            });
        }
        write_statement(ctx, &cte.query)?;
        ctx.push_char(')');
    }
    ctx.push_char(' ');
    Ok(())
}
