//! INSERT rendering.

use super::expr::{write_expr, write_selection};
use super::{RenderContext, select};
use crate::ast::{InsertSource, InsertStmt};
use crate::error::{SqlError, SqlResult};
use crate::meta::Generation;

pub(crate) fn write_insert(ctx: &mut RenderContext, stmt: &InsertStmt) -> SqlResult<()> {
    if stmt.fields.is_empty() {
        return Err(SqlError::illegal_mode("INSERT without a field list"));
    }
    if let Some(field) = stmt
        .fields
        .iter()
        .find(|f| f.generated == Generation::Database)
    {
        return Err(SqlError::illegal_mode(format!(
            "field {} is database-generated and cannot be inserted",
            field.name
        )));
    }
    if !stmt.returning.is_empty() && !ctx.dialect().supports_returning() {
        return Err(SqlError::UnsupportedClause {
            clause: "RETURNING",
            dialect: ctx.dialect(),
        });
    }

    ctx.push("INSERT INTO ");
    ctx.identifier(&stmt.table.name)?;
    ctx.push(" (");
    for (i, field) in stmt.fields.iter().enumerate() {
        if i > 0 {
            ctx.push(", ");
        }
        ctx.identifier(&field.name)?;
    }
    ctx.push(") ");

    match &stmt.source {
        InsertSource::Values(rows) => {
            if rows.is_empty() {
                return Err(SqlError::illegal_mode("INSERT without rows"));
            }
            ctx.push("VALUES ");
            for (i, row) in rows.iter().enumerate() {
                if row.len() != stmt.fields.len() {
                    return Err(SqlError::illegal_mode(format!(
                        "row {} carries {} values for {} fields",
                        i,
                        row.len(),
                        stmt.fields.len()
                    )));
                }
                if i > 0 {
                    ctx.push(", ");
                }
                ctx.push_char('(');
                for (j, value) in row.iter().enumerate() {
                    if j > 0 {
                        ctx.push(", ");
                    }
                    write_expr(ctx, value, true)?;
                }
                ctx.push_char(')');
            }
        }
        InsertSource::Query(query) => select::write_select(ctx, query)?,
    }

    if !stmt.returning.is_empty() {
        ctx.push(" RETURNING ");
        for (i, selection) in stmt.returning.iter().enumerate() {
            if i > 0 {
                ctx.push(", ");
            }
            write_selection(ctx, selection)?;
        }
    }
    Ok(())
}
