//! DELETE rendering.

use super::expr::{write_and_list, write_selection};
use super::select::{
    visibility_terms, write_from_list, write_table_primary, write_visibility_terms,
};
use super::{RenderContext, Visible, cte};
use crate::ast::DeleteStmt;
use crate::dialect::Database;
use crate::error::{SqlError, SqlResult};

pub(crate) fn write_delete(ctx: &mut RenderContext, stmt: &DeleteStmt) -> SqlResult<()> {
    cte::write_with(ctx, stmt.with.as_ref())?;
    if !stmt.returning.is_empty() && !ctx.dialect().supports_returning() {
        return Err(SqlError::UnsupportedClause {
            clause: "RETURNING",
            dialect: ctx.dialect(),
        });
    }

    let mut visibility = Vec::new();
    if ctx.visible == Visible::Only {
        if let Some(field) = &stmt.table.visible_field {
            let qualifier = stmt.alias.clone().unwrap_or_else(|| stmt.table.name.clone());
            visibility.push((qualifier, field.clone()));
        }
    }
    visibility.extend(visibility_terms(ctx.visible, &stmt.using));

    let mut wheres = stmt.wheres.clone();

    if stmt.using.is_empty() {
        ctx.push("DELETE FROM ");
        ctx.identifier(&stmt.table.name)?;
        if let Some(alias) = &stmt.alias {
            ctx.push(" AS ");
            ctx.identifier(alias)?;
        }
    } else {
        match ctx.dialect().database() {
            Database::Postgres => {
                ctx.push("DELETE FROM ");
                ctx.identifier(&stmt.table.name)?;
                if let Some(alias) = &stmt.alias {
                    ctx.push(" AS ");
                    ctx.identifier(alias)?;
                }
                ctx.push(" USING ");
                write_from_list(ctx, &stmt.using, false)?;
                for table in &stmt.using {
                    wheres.extend(table.on.iter().cloned());
                }
            }
            Database::MySql => {
                // Multi-table form: DELETE t FROM t JOIN ... ON ...
                ctx.push("DELETE ");
                let target = stmt.alias.as_deref().unwrap_or(&stmt.table.name);
                ctx.identifier(target)?;
                ctx.push(" FROM ");
                ctx.identifier(&stmt.table.name)?;
                if let Some(alias) = &stmt.alias {
                    ctx.push(" AS ");
                    ctx.identifier(alias)?;
                }
                for table in &stmt.using {
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
            }
        }
    }

    if !wheres.is_empty() || !visibility.is_empty() {
        ctx.push(" WHERE ");
        write_and_list(ctx, &wheres)?;
        write_visibility_terms(ctx, &visibility, wheres.is_empty())?;
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
