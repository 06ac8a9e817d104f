//! Expression, predicate, and window rendering.

use super::{RenderContext, literal, select};
use crate::ast::{
    Expr, FrameBound, InList, OverClause, Predicate, Selection, SortItem, SortOrder, WindowFrame,
    WindowSpec,
};
use crate::codec::codec_for;
use crate::error::SqlResult;

/// Write one expression. `typed_context` marks positions whose type is
/// already pinned (comparisons against fields, insert value lists), which
/// suppresses literal type annotations.
pub(crate) fn write_expr(ctx: &mut RenderContext, expr: &Expr, typed_context: bool) -> SqlResult<()> {
    match expr {
        Expr::Literal { value, codec } => literal::write_literal(ctx, codec, value, typed_context),
        Expr::Param { value, codec } => {
            let mapping = codec_for(codec);
            let data_type = mapping.map(&ctx.env.server)?;
            match mapping.before_bind(&data_type, &ctx.env, value)? {
                crate::codec::BindValue::Param(v) => ctx.bind(data_type, v),
                crate::codec::BindValue::Literal(text) => ctx.push(&text),
            }
            Ok(())
        }
        Expr::Field { qualifier, field } => ctx.qualified(qualifier.as_deref(), &field.name),
        Expr::Column { qualifier, name } => ctx.qualified(qualifier.as_deref(), name),
        Expr::Binary { left, op, right } => {
            ctx.push_char('(');
            write_expr(ctx, left, typed_context)?;
            ctx.push_char(' ');
            ctx.push(&op.to_string());
            ctx.push_char(' ');
            write_expr(ctx, right, typed_context)?;
            ctx.push_char(')');
            Ok(())
        }
        Expr::Func { name, args } => {
            ctx.push(&name.to_uppercase());
            ctx.push_char('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    ctx.push(", ");
                }
                write_expr(ctx, arg, true)?;
            }
            ctx.push_char(')');
            Ok(())
        }
        Expr::Case {
            branches,
            else_value,
        } => {
            ctx.push("CASE");
            for (when, then) in branches {
                ctx.push(" WHEN ");
                write_predicate(ctx, when)?;
                ctx.push(" THEN ");
                write_expr(ctx, then, true)?;
            }
            if let Some(e) = else_value {
                ctx.push(" ELSE ");
                write_expr(ctx, e, true)?;
            }
            ctx.push(" END");
            Ok(())
        }
        Expr::SubQuery(query) => {
            ctx.push_char('(');
            select::write_select(ctx, query)?;
            ctx.push_char(')');
            Ok(())
        }
        Expr::Window { func, args, over } => {
            if !ctx.dialect().supports_window_functions() {
                return Err(crate::error::SqlError::UnsupportedClause {
                    clause: "window functions",
                    dialect: ctx.dialect(),
                });
            }
            ctx.push(&func.to_uppercase());
            ctx.push_char('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    ctx.push(", ");
                }
                write_expr(ctx, arg, true)?;
            }
            ctx.push(") OVER ");
            match over {
                OverClause::Named(name) => ctx.identifier(name)?,
                OverClause::Inline(spec) => {
                    ctx.push_char('(');
                    write_window_spec(ctx, spec)?;
                    ctx.push_char(')');
                }
            }
            Ok(())
        }
    }
}

/// Write one predicate.
pub(crate) fn write_predicate(ctx: &mut RenderContext, predicate: &Predicate) -> SqlResult<()> {
    match predicate {
        Predicate::Cmp { left, op, right } => {
            // A field on either side pins the other side's type.
            let typed = matches!(left, Expr::Field { .. } | Expr::Column { .. })
                || matches!(right, Expr::Field { .. } | Expr::Column { .. });
            write_expr(ctx, left, typed)?;
            ctx.push_char(' ');
            ctx.push(op.symbol());
            ctx.push_char(' ');
            write_expr(ctx, right, typed)?;
            Ok(())
        }
        Predicate::Like {
            expr,
            pattern,
            negated,
        } => {
            write_expr(ctx, expr, true)?;
            ctx.push(if *negated { " NOT LIKE " } else { " LIKE " });
            write_expr(ctx, pattern, true)?;
            Ok(())
        }
        Predicate::IsNull { expr, negated } => {
            write_expr(ctx, expr, true)?;
            ctx.push(if *negated { " IS NOT NULL" } else { " IS NULL" });
            Ok(())
        }
        Predicate::In {
            expr,
            list,
            negated,
        } => {
            write_expr(ctx, expr, true)?;
            ctx.push(if *negated { " NOT IN (" } else { " IN (" });
            match list {
                InList::Values(items) => {
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            ctx.push(", ");
                        }
                        write_expr(ctx, item, true)?;
                    }
                }
                InList::Query(query) => select::write_select(ctx, query)?,
            }
            ctx.push_char(')');
            Ok(())
        }
        Predicate::Between { expr, low, high } => {
            write_expr(ctx, expr, true)?;
            ctx.push(" BETWEEN ");
            write_expr(ctx, low, true)?;
            ctx.push(" AND ");
            write_expr(ctx, high, true)?;
            Ok(())
        }
        Predicate::Exists { query, negated } => {
            ctx.push(if *negated { "NOT EXISTS (" } else { "EXISTS (" });
            select::write_select(ctx, query)?;
            ctx.push_char(')');
            Ok(())
        }
        Predicate::And(items) => write_group(ctx, items, " AND "),
        Predicate::Or(items) => write_group(ctx, items, " OR "),
        Predicate::Not(inner) => {
            ctx.push("NOT (");
            write_predicate(ctx, inner)?;
            ctx.push_char(')');
            Ok(())
        }
    }
}

fn write_group(ctx: &mut RenderContext, items: &[Predicate], joiner: &str) -> SqlResult<()> {
    ctx.push_char('(');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            ctx.push(joiner);
        }
        write_predicate(ctx, item)?;
    }
    ctx.push_char(')');
    Ok(())
}

/// Write a predicate list joined by AND, without outer parentheses.
pub(crate) fn write_and_list(ctx: &mut RenderContext, predicates: &[Predicate]) -> SqlResult<()> {
    for (i, predicate) in predicates.iter().enumerate() {
        if i > 0 {
            ctx.push(" AND ");
        }
        write_predicate(ctx, predicate)?;
    }
    Ok(())
}

pub(crate) fn write_sort_item(ctx: &mut RenderContext, item: &SortItem) -> SqlResult<()> {
    write_expr(ctx, &item.expr, true)?;
    ctx.push(match item.order {
        SortOrder::Asc => " ASC",
        SortOrder::Desc => " DESC",
    });
    Ok(())
}

pub(crate) fn write_selection(ctx: &mut RenderContext, selection: &Selection) -> SqlResult<()> {
    match selection {
        Selection::Star => {
            ctx.push_char('*');
            Ok(())
        }
        Selection::TableStar(qualifier) => {
            ctx.identifier(qualifier)?;
            ctx.push(".*");
            Ok(())
        }
        Selection::Expr { expr, alias } => {
            write_expr(ctx, expr, false)?;
            if let Some(a) = alias {
                ctx.push(" AS ");
                ctx.identifier(a)?;
            }
            Ok(())
        }
    }
}

pub(crate) fn write_window_spec(ctx: &mut RenderContext, spec: &WindowSpec) -> SqlResult<()> {
    let mut wrote = false;
    if !spec.partition_by.is_empty() {
        ctx.push("PARTITION BY ");
        for (i, expr) in spec.partition_by.iter().enumerate() {
            if i > 0 {
                ctx.push(", ");
            }
            write_expr(ctx, expr, true)?;
        }
        wrote = true;
    }
    if !spec.order_by.is_empty() {
        if wrote {
            ctx.push_char(' ');
        }
        ctx.push("ORDER BY ");
        for (i, item) in spec.order_by.iter().enumerate() {
            if i > 0 {
                ctx.push(", ");
            }
            write_sort_item(ctx, item)?;
        }
        wrote = true;
    }
    if let Some(frame) = &spec.frame {
        if wrote {
            ctx.push_char(' ');
        }
        write_frame(ctx, frame);
    }
    Ok(())
}

fn write_frame(ctx: &mut RenderContext, frame: &WindowFrame) {
    let (kind, start, end) = match frame {
        WindowFrame::Rows { start, end } => ("ROWS", start, end),
        WindowFrame::Range { start, end } => ("RANGE", start, end),
    };
    ctx.push(kind);
    ctx.push(" BETWEEN ");
    write_frame_bound(ctx, start);
    ctx.push(" AND ");
    write_frame_bound(ctx, end);
}

fn write_frame_bound(ctx: &mut RenderContext, bound: &FrameBound) {
    match bound {
        FrameBound::UnboundedPreceding => ctx.push("UNBOUNDED PRECEDING"),
        FrameBound::Preceding(n) => ctx.push(&format!("{} PRECEDING", n)),
        FrameBound::CurrentRow => ctx.push("CURRENT ROW"),
        FrameBound::Following(n) => ctx.push(&format!("{} FOLLOWING", n)),
        FrameBound::UnboundedFollowing => ctx.push("UNBOUNDED FOLLOWING"),
    }
}
