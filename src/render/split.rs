//! Child-statement splitting.
//!
//! A statement targeting the child half of a parent/child table pair cannot
//! run as written: one logical row spans two physical tables sharing a
//! primary key. The splitter rewrites it.
//!
//! UPDATE/DELETE run in one of two modes. When every SET item stays on the
//! child side, a single statement joined to the parent suffices. When items
//! span both tables (and always for DELETE), a linked pair is emitted into
//! one buffer: first a synthetic CTE running the child-side statement and
//! returning the shared key, then the parent-side statement joined against
//! that CTE. The two halves must affect identical row counts; the caller
//! verifies that after execution.
//!
//! INSERT becomes two independently issued statements; the generated parent
//! key is propagated to the child by the execution layer, so no CTE is
//! needed.

use std::sync::Arc;

use tracing::debug;

use super::{RenderContext, Rendered, Visible, delete, insert, update};
use crate::ast::{
    CteDef, DeleteStmt, Expr, InsertSource, InsertStmt, ItemPair, JoinKind, Predicate, Selection,
    TableRef, UpdateStmt, WithClause,
};
use crate::codec::MappingEnv;
use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::meta::{ChildTableLink, FieldMeta, Generation};

/// Name of the synthetic CTE carrying the child half.
fn synthetic_name(link: &ChildTableLink) -> String {
    format!("{}_sub", link.child.name)
}

/// The key-join predicate `child.key = parent.key`.
fn key_join(link: &ChildTableLink, child_qualifier: &str) -> SqlResult<Predicate> {
    let parent_key = link
        .parent
        .field(&link.key.name)
        .ok_or_else(|| SqlError::illegal_mode("parent table lost the shared key"))?;
    Ok(Predicate::eq(
        Expr::qualified_field(child_qualifier, &link.key),
        Expr::qualified_field(&link.parent.name, parent_key),
    ))
}

/// The CTE-join predicate `parent.key = <cte>.id`.
fn cte_join(link: &ChildTableLink, cte: &str) -> SqlResult<Predicate> {
    let parent_key = link
        .parent
        .field(&link.key.name)
        .ok_or_else(|| SqlError::illegal_mode("parent table lost the shared key"))?;
    Ok(Predicate::eq(
        Expr::qualified_field(&link.parent.name, parent_key),
        Expr::qualified_column(cte, "id"),
    ))
}

/// `RETURNING child.key AS id`, the CTE's single projection.
fn key_projection(link: &ChildTableLink, child_qualifier: &str) -> Selection {
    Selection::aliased(Expr::qualified_field(child_qualifier, &link.key), "id")
}

fn check_synthetic_collision(with: Option<&WithClause>, name: &str) -> SqlResult<()> {
    if let Some(with) = with {
        if with.ctes.iter().any(|cte| cte.name == name) {
            return Err(SqlError::illegal_mode(format!(
                "a CTE named {} collides with the synthetic child statement",
                name
            )));
        }
    }
    Ok(())
}

/// Split items by owning side. An item whose field lives on neither table is
/// a statement-shape violation.
fn partition_items(
    stmt: &UpdateStmt,
    link: &ChildTableLink,
) -> SqlResult<(Vec<ItemPair>, Vec<ItemPair>)> {
    let mut child_items = Vec::new();
    let mut parent_items = Vec::new();
    for item in &stmt.items {
        let fields = item.fields();
        if fields.iter().all(|f| link.child.has_field(f)) {
            child_items.push(item.clone());
        } else if fields.iter().all(|f| link.parent.has_field(f)) {
            parent_items.push(item.clone());
        } else {
            let name = fields.first().map(|f| f.name.clone()).unwrap_or_default();
            return Err(SqlError::illegal_mode(format!(
                "SET item {} belongs to neither {} nor {}",
                name, link.child.name, link.parent.name
            )));
        }
    }
    Ok((child_items, parent_items))
}

pub(crate) fn render_child_update(
    stmt: &UpdateStmt,
    link: &ChildTableLink,
    dialect: Dialect,
    visible: Visible,
    annotate: bool,
    env: MappingEnv,
) -> SqlResult<Rendered> {
    let (child_items, parent_items) = partition_items(stmt, link)?;
    let child_qualifier = stmt.alias.clone().unwrap_or_else(|| link.child.name.clone());
    let join = key_join(link, &child_qualifier)?;

    if parent_items.is_empty() {
        // Single-statement mode: the parent joins in only for the WHERE.
        debug!(child = %link.child.name, "child update stays single-statement");
        let mut single = stmt.clone();
        single
            .from
            .push(TableRef::table(&link.parent).join(JoinKind::Inner).on(join));
        let mut ctx = RenderContext::new(dialect, visible, annotate, env);
        update::write_update(&mut ctx, &single)?;
        return Ok(Rendered::Simple(ctx.finish()));
    }

    if !dialect.supports_dml_cte() {
        return Err(SqlError::shape("child-table UPDATE pair", dialect));
    }
    if !stmt.returning.is_empty() {
        return Err(SqlError::illegal_mode(
            "RETURNING cannot span a linked-pair update",
        ));
    }
    let name = synthetic_name(link);
    check_synthetic_collision(stmt.with.as_ref(), &name)?;
    debug!(child = %link.child.name, cte = %name, "child update becomes a linked pair");

    let inner = UpdateStmt {
        with: None,
        table: link.child.clone(),
        alias: stmt.alias.clone(),
        items: child_items,
        from: vec![TableRef::table(&link.parent).join(JoinKind::Inner).on(join)],
        wheres: stmt.wheres.clone(),
        returning: vec![key_projection(link, &child_qualifier)],
    };

    let mut with = stmt.with.clone().unwrap_or_default();
    with.ctes.push(CteDef::new(name.clone(), inner));

    let outer = UpdateStmt {
        with: Some(with),
        table: link.parent.clone(),
        alias: None,
        items: parent_items,
        from: vec![TableRef::cte(name.clone())
            .join(JoinKind::Inner)
            .on(cte_join(link, &name)?)],
        wheres: Vec::new(),
        returning: Vec::new(),
    };

    let mut ctx = RenderContext::new(dialect, visible, annotate, env);
    update::write_update(&mut ctx, &outer)?;
    Ok(Rendered::Simple(ctx.finish()))
}

pub(crate) fn render_child_delete(
    stmt: &DeleteStmt,
    link: &ChildTableLink,
    dialect: Dialect,
    visible: Visible,
    annotate: bool,
    env: MappingEnv,
) -> SqlResult<Rendered> {
    if !dialect.supports_dml_cte() {
        return Err(SqlError::shape("child-table DELETE pair", dialect));
    }
    if !stmt.returning.is_empty() {
        return Err(SqlError::illegal_mode(
            "RETURNING cannot span a linked-pair delete",
        ));
    }
    let name = synthetic_name(link);
    check_synthetic_collision(stmt.with.as_ref(), &name)?;
    let child_qualifier = stmt.alias.clone().unwrap_or_else(|| link.child.name.clone());
    debug!(child = %link.child.name, cte = %name, "child delete becomes a linked pair");

    let inner = DeleteStmt {
        with: None,
        table: link.child.clone(),
        alias: stmt.alias.clone(),
        using: vec![TableRef::table(&link.parent)
            .join(JoinKind::Inner)
            .on(key_join(link, &child_qualifier)?)],
        wheres: stmt.wheres.clone(),
        returning: vec![key_projection(link, &child_qualifier)],
    };

    let mut with = stmt.with.clone().unwrap_or_default();
    with.ctes.push(CteDef::new(name.clone(), inner));

    let outer = DeleteStmt {
        with: Some(with),
        table: link.parent.clone(),
        alias: None,
        using: vec![TableRef::cte(name.clone())
            .join(JoinKind::Inner)
            .on(cte_join(link, &name)?)],
        wheres: Vec::new(),
        returning: Vec::new(),
    };

    let mut ctx = RenderContext::new(dialect, visible, annotate, env);
    delete::write_delete(&mut ctx, &outer)?;
    Ok(Rendered::Simple(ctx.finish()))
}

pub(crate) fn render_child_insert(
    stmt: &InsertStmt,
    link: &ChildTableLink,
    dialect: Dialect,
    visible: Visible,
    annotate: bool,
    env: MappingEnv,
) -> SqlResult<Rendered> {
    if !stmt.returning.is_empty() {
        return Err(SqlError::illegal_mode(
            "RETURNING cannot span a two-statement insert",
        ));
    }
    let rows = match &stmt.source {
        InsertSource::Values(rows) => rows,
        InsertSource::Query(_) => {
            return Err(SqlError::illegal_mode(
                "a child-table INSERT requires literal rows",
            ));
        }
    };

    // Partition the declared fields by owning side; the shared key is
    // tracked separately.
    let mut parent_cols: Vec<usize> = Vec::new();
    let mut child_cols: Vec<usize> = Vec::new();
    let mut key_col: Option<usize> = None;
    for (i, field) in stmt.fields.iter().enumerate() {
        if field.name == link.key.name {
            key_col = Some(i);
        } else if link.parent.has_field(field) {
            parent_cols.push(i);
        } else if link.child.has_field(field) {
            child_cols.push(i);
        } else {
            return Err(SqlError::illegal_mode(format!(
                "field {} belongs to neither {} nor {}",
                field.name, link.child.name, link.parent.name
            )));
        }
    }

    let parent_key = link
        .parent
        .field(&link.key.name)
        .ok_or_else(|| SqlError::illegal_mode("parent table lost the shared key"))?
        .clone();
    let key_generated = parent_key.generated == Generation::Database;
    if key_col.is_none() && !key_generated {
        return Err(SqlError::illegal_mode(
            "the shared key must be supplied when the parent does not generate it",
        ));
    }
    if key_col.is_some() && key_generated {
        return Err(SqlError::illegal_mode(
            "the shared key is database-generated and cannot be supplied",
        ));
    }

    // Parent half: its own columns, plus the key when the caller supplies it.
    let mut parent_fields: Vec<Arc<FieldMeta>> = Vec::new();
    if key_col.is_some() {
        parent_fields.push(parent_key.clone());
    }
    for &i in &parent_cols {
        let field = link
            .parent
            .field(&stmt.fields[i].name)
            .ok_or_else(|| SqlError::illegal_mode("parent field vanished"))?;
        parent_fields.push(field.clone());
    }
    let mut parent = InsertStmt {
        table: link.parent.clone(),
        fields: parent_fields,
        source: InsertSource::Values(Vec::new()),
        returning: Vec::new(),
    };
    // The generated key comes back through RETURNING where the dialect has
    // it; MySQL callers read last_insert_id() instead.
    if key_generated && dialect.supports_returning() {
        parent.returning.push(Selection::aliased(
            Expr::qualified_field(&link.parent.name, &parent_key),
            "id",
        ));
    }

    // Child half: the key always travels, synthesized as a deferred
    // placeholder when the parent generates it.
    let mut child_fields: Vec<Arc<FieldMeta>> = vec![link.key.clone()];
    for &i in &child_cols {
        child_fields.push(stmt.fields[i].clone());
    }
    let mut child = InsertStmt {
        table: link.child.clone(),
        fields: child_fields,
        source: InsertSource::Values(Vec::new()),
        returning: Vec::new(),
    };

    for row in rows {
        if row.len() != stmt.fields.len() {
            return Err(SqlError::illegal_mode(format!(
                "row carries {} values for {} fields",
                row.len(),
                stmt.fields.len()
            )));
        }
        let mut parent_row = Vec::new();
        if let Some(i) = key_col {
            parent_row.push(row[i].clone());
        }
        for &i in &parent_cols {
            parent_row.push(row[i].clone());
        }
        if let InsertSource::Values(rows) = &mut parent.source {
            rows.push(parent_row);
        }

        let key_expr = match key_col {
            Some(i) => row[i].clone(),
            // Placeholder slot the execution layer fills with the key the
            // parent insert produced.
            None => Expr::Param {
                value: crate::value::Value::Null,
                codec: link.key.codec.clone(),
            },
        };
        let mut child_row = vec![key_expr];
        for &i in &child_cols {
            child_row.push(row[i].clone());
        }
        if let InsertSource::Values(rows) = &mut child.source {
            rows.push(child_row);
        }
    }

    debug!(child = %link.child.name, parent = %link.parent.name, "child insert becomes two statements");
    let mut parent_ctx = RenderContext::new(dialect, visible, annotate, env.clone());
    insert::write_insert(&mut parent_ctx, &parent)?;
    let mut child_ctx = RenderContext::new(dialect, visible, annotate, env);
    insert::write_insert(&mut child_ctx, &child)?;
    Ok(Rendered::Pair {
        parent: parent_ctx.finish(),
        child: child_ctx.finish(),
    })
}
