//! Standalone VALUES rendering.

use super::expr::{write_expr, write_sort_item};
use super::RenderContext;
use crate::ast::ValuesStmt;
use crate::dialect::Database;
use crate::error::{SqlError, SqlResult};

pub(crate) fn write_values(ctx: &mut RenderContext, stmt: &ValuesStmt) -> SqlResult<()> {
    if !ctx.dialect().supports_values_statement() {
        return Err(SqlError::shape("standalone VALUES", ctx.dialect()));
    }
    if stmt.rows.is_empty() {
        return Err(SqlError::illegal_mode("VALUES without rows"));
    }
    let arity = stmt.rows[0].len();
    ctx.push("VALUES ");
    for (i, row) in stmt.rows.iter().enumerate() {
        if row.len() != arity {
            return Err(SqlError::illegal_mode(format!(
                "row {} carries {} values, expected {}",
                i,
                row.len(),
                arity
            )));
        }
        if i > 0 {
            ctx.push(", ");
        }
        // MySQL 8.0 spells table-value rows with the ROW constructor.
        if ctx.dialect().database() == Database::MySql {
            ctx.push("ROW");
        }
        ctx.push_char('(');
        for (j, value) in row.iter().enumerate() {
            if j > 0 {
                ctx.push(", ");
            }
            write_expr(ctx, value, false)?;
        }
        ctx.push_char(')');
    }
    if !stmt.order_by.is_empty() {
        ctx.push(" ORDER BY ");
        for (i, item) in stmt.order_by.iter().enumerate() {
            if i > 0 {
                ctx.push(", ");
            }
            write_sort_item(ctx, item)?;
        }
    }
    if let Some(limit) = &stmt.limit {
        let clause = ctx.writer.limit_offset(Some(limit.row_count), limit.offset);
        ctx.push(&clause);
    }
    Ok(())
}
