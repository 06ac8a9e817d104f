//! SELECT rendering, plus the FROM-list helpers shared by UPDATE and DELETE.

use std::sync::Arc;

use super::expr::{write_and_list, write_expr, write_selection, write_sort_item, write_window_spec};
use super::{RenderContext, Visible, cte};
use crate::ast::{JoinKind, SelectStmt, TableRef, TableSource};
use crate::dialect::Database;
use crate::error::{SqlError, SqlResult};
use crate::meta::FieldMeta;

pub(crate) fn write_select(ctx: &mut RenderContext, stmt: &SelectStmt) -> SqlResult<()> {
    cte::write_with(ctx, stmt.with.as_ref())?;
    ctx.push("SELECT ");
    if stmt.distinct {
        ctx.push("DISTINCT ");
    }
    if stmt.selections.is_empty() {
        ctx.push_char('*');
    } else {
        for (i, selection) in stmt.selections.iter().enumerate() {
            if i > 0 {
                ctx.push(", ");
            }
            write_selection(ctx, selection)?;
        }
    }
    if !stmt.from.is_empty() {
        ctx.push(" FROM ");
        write_from_list(ctx, &stmt.from, true)?;
    }

    let visibility = visibility_terms(ctx.visible, &stmt.from);
    if !stmt.wheres.is_empty() || !visibility.is_empty() {
        ctx.push(" WHERE ");
        write_and_list(ctx, &stmt.wheres)?;
        write_visibility_terms(ctx, &visibility, stmt.wheres.is_empty())?;
    }

    if !stmt.group_by.is_empty() {
        ctx.push(" GROUP BY ");
        for (i, expr) in stmt.group_by.iter().enumerate() {
            if i > 0 {
                ctx.push(", ");
            }
            write_expr(ctx, expr, true)?;
        }
    }

    if !stmt.having.is_empty() {
        ctx.push(" HAVING ");
        write_and_list(ctx, &stmt.having)?;
    }

    if !stmt.windows.is_empty() {
        if !ctx.dialect().supports_window_functions() {
            return Err(SqlError::UnsupportedClause {
                clause: "WINDOW",
                dialect: ctx.dialect(),
            });
        }
        ctx.push(" WINDOW ");
        for (i, def) in stmt.windows.iter().enumerate() {
            if i > 0 {
                ctx.push(", ");
            }
            ctx.identifier(&def.name)?;
            ctx.push(" AS (");
            write_window_spec(ctx, &def.spec)?;
            ctx.push_char(')');
        }
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

    for (op, other) in &stmt.set_ops {
        ctx.push_char(' ');
        ctx.push(op.keyword());
        ctx.push_char(' ');
        write_select(ctx, other)?;
    }
    Ok(())
}

/// Write a FROM/JOIN list. With `include_on` the ON predicates render in
/// place; without it the caller folds them into its own WHERE (the
/// UPDATE ... FROM / DELETE ... USING forms).
pub(crate) fn write_from_list(
    ctx: &mut RenderContext,
    refs: &[TableRef],
    include_on: bool,
) -> SqlResult<()> {
    for (i, table) in refs.iter().enumerate() {
        if i > 0 {
            if table.join == JoinKind::None {
                ctx.push(", ");
            } else {
                ctx.push_char(' ');
                ctx.push(table.join.keyword());
                ctx.push_char(' ');
            }
        }
        write_table_primary(ctx, table)?;
        if include_on && i > 0 && !table.on.is_empty() {
            ctx.push(" ON ");
            write_and_list(ctx, &table.on)?;
        }
    }
    Ok(())
}

/// Write one table reference: source, partition selection, alias, hints.
pub(crate) fn write_table_primary(ctx: &mut RenderContext, table: &TableRef) -> SqlResult<()> {
    match &table.source {
        TableSource::Table(meta) => ctx.identifier(&meta.name)?,
        TableSource::Cte(name) => ctx.identifier(name)?,
        TableSource::Query(query) => {
            ctx.push_char('(');
            write_select(ctx, query)?;
            ctx.push_char(')');
        }
    }
    if !table.partitions.is_empty() {
        if ctx.dialect().database() != Database::MySql {
            return Err(SqlError::shape("PARTITION selection", ctx.dialect()));
        }
        ctx.push(" PARTITION (");
        for (i, name) in table.partitions.iter().enumerate() {
            if i > 0 {
                ctx.push(", ");
            }
            ctx.identifier(name)?;
        }
        ctx.push_char(')');
    }
    if let Some(alias) = &table.alias {
        ctx.push(" AS ");
        ctx.identifier(alias)?;
    }
    if !table.index_hints.is_empty() {
        if ctx.dialect().database() != Database::MySql {
            return Err(SqlError::shape("index hints", ctx.dialect()));
        }
        for hint in &table.index_hints {
            ctx.push_char(' ');
            ctx.push(hint.kind.keyword());
            ctx.push(" (");
            for (i, index) in hint.indexes.iter().enumerate() {
                if i > 0 {
                    ctx.push(", ");
                }
                ctx.identifier(index)?;
            }
            ctx.push_char(')');
        }
    }
    Ok(())
}

/// Soft-visibility predicates for the tables of a FROM list.
pub(crate) fn visibility_terms(
    visible: Visible,
    refs: &[TableRef],
) -> Vec<(String, Arc<FieldMeta>)> {
    if visible == Visible::Both {
        return Vec::new();
    }
    refs.iter()
        .filter_map(|table| match &table.source {
            TableSource::Table(meta) => meta.visible_field.as_ref().map(|field| {
                let qualifier = table
                    .alias
                    .clone()
                    .unwrap_or_else(|| meta.name.clone());
                (qualifier, field.clone())
            }),
            _ => None,
        })
        .collect()
}

/// Append `qualifier.field = TRUE` terms to an open WHERE clause.
pub(crate) fn write_visibility_terms(
    ctx: &mut RenderContext,
    terms: &[(String, Arc<FieldMeta>)],
    mut first: bool,
) -> SqlResult<()> {
    for (qualifier, field) in terms {
        if !first {
            ctx.push(" AND ");
        }
        first = false;
        ctx.qualified(Some(qualifier), &field.name)?;
        ctx.push(" = ");
        let text = ctx.writer.bool_literal(true);
        ctx.push(text);
    }
    Ok(())
}
