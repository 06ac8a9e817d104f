//! UPDATE rendering.
//!
//! Multi-table updates use the dialect's own grammar: `UPDATE ... FROM`
//! plus a WHERE join on Postgres, inline JOINs before SET on MySQL.

use super::expr::{write_and_list, write_expr, write_selection};
use super::select::{
    visibility_terms, write_from_list, write_table_primary, write_visibility_terms,
};
use super::{RenderContext, Visible, cte};
use crate::ast::{ItemPair, UpdateStmt};
use crate::dialect::Database;
use crate::error::{SqlError, SqlResult};

pub(crate) fn write_update(ctx: &mut RenderContext, stmt: &UpdateStmt) -> SqlResult<()> {
    cte::write_with(ctx, stmt.with.as_ref())?;
    if stmt.items.is_empty() {
        return Err(SqlError::illegal_mode("UPDATE without SET items"));
    }
    if !stmt.returning.is_empty() && !ctx.dialect().supports_returning() {
        return Err(SqlError::UnsupportedClause {
            clause: "RETURNING",
            dialect: ctx.dialect(),
        });
    }

    ctx.push("UPDATE ");
    ctx.identifier(&stmt.table.name)?;
    if let Some(alias) = &stmt.alias {
        ctx.push(" AS ");
        ctx.identifier(alias)?;
    }

    let mut visibility = Vec::new();
    if ctx.visible == Visible::Only {
        if let Some(field) = &stmt.table.visible_field {
            let qualifier = stmt.alias.clone().unwrap_or_else(|| stmt.table.name.clone());
            visibility.push((qualifier, field.clone()));
        }
    }
    visibility.extend(visibility_terms(ctx.visible, &stmt.from));

    match ctx.dialect().database() {
        Database::MySql => {
            // Joined tables come before SET, carrying their ON predicates.
            write_joined_tables(ctx, stmt)?;
            write_items(ctx, stmt)?;
            let has_where = !stmt.wheres.is_empty() || !visibility.is_empty();
            if has_where {
                ctx.push(" WHERE ");
                write_and_list(ctx, &stmt.wheres)?;
                write_visibility_terms(ctx, &visibility, stmt.wheres.is_empty())?;
            }
        }
        Database::Postgres => {
            write_items(ctx, stmt)?;
            if !stmt.from.is_empty() {
                ctx.push(" FROM ");
                write_from_list(ctx, &stmt.from, false)?;
            }
            // ON predicates of the FROM list fold into WHERE.
            let mut wheres = stmt.wheres.clone();
            for table in &stmt.from {
                wheres.extend(table.on.iter().cloned());
            }
            if !wheres.is_empty() || !visibility.is_empty() {
                ctx.push(" WHERE ");
                write_and_list(ctx, &wheres)?;
                write_visibility_terms(ctx, &visibility, wheres.is_empty())?;
            }
        }
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

fn write_joined_tables(ctx: &mut RenderContext, stmt: &UpdateStmt) -> SqlResult<()> {
    for table in &stmt.from {
        if table.join == crate::ast::JoinKind::None {
            ctx.push(", ");
        } else {
            ctx.push_char(' ');
            ctx.push(table.join.keyword());
            ctx.push_char(' ');
        }
        write_table_primary(ctx, table)?;
        if !table.on.is_empty() {
            ctx.push(" ON ");
            write_and_list(ctx, &table.on)?;
        }
    }
    Ok(())
}

fn write_items(ctx: &mut RenderContext, stmt: &UpdateStmt) -> SqlResult<()> {
    ctx.push(" SET ");
    for (i, item) in stmt.items.iter().enumerate() {
        if i > 0 {
            ctx.push(", ");
        }
        match item {
            ItemPair::Single { field, value } => {
                ctx.identifier(&field.name)?;
                ctx.push(" = ");
                write_expr(ctx, value, true)?;
            }
            ItemPair::Row { fields, value } => {
                if ctx.dialect().database() != Database::Postgres {
                    return Err(SqlError::shape("row-value SET assignment", ctx.dialect()));
                }
                ctx.push_char('(');
                for (j, field) in fields.iter().enumerate() {
                    if j > 0 {
                        ctx.push(", ");
                    }
                    ctx.identifier(&field.name)?;
                }
                ctx.push(") = (");
                super::select::write_select(ctx, value)?;
                ctx.push_char(')');
            }
        }
    }
    Ok(())
}
