//! Core statement assembly tests (Postgres grammar unless noted).

use pretty_assertions::assert_eq;

use super::{profiles, users};
use crate::ast::*;
use crate::codec::CodecKey;
use crate::dialect::Dialect;
use crate::render::{Rendered, Visible, render};
use crate::value::Value;

fn pg(statement: impl Into<Statement>) -> (String, Vec<Value>) {
    let rendered = render(
        &statement.into(),
        Dialect::Postgres15,
        Visible::Both,
        false,
    )
    .unwrap();
    match rendered {
        Rendered::Simple(stmt) => (stmt.sql, stmt.params.into_iter().map(|p| p.value).collect()),
        Rendered::Pair { .. } => panic!("expected a single statement"),
    }
}

#[test]
fn test_simple_select() {
    let users = users();
    let (sql, params) = pg(SelectStmt::new().select_star().from_table(&users));
    assert_eq!(sql, "SELECT * FROM users");
    assert!(params.is_empty());
}

#[test]
fn test_select_columns_and_alias() {
    let users = users();
    let stmt = SelectStmt::new()
        .select(Expr::field(users.field("id").unwrap()))
        .select_as(Expr::field(users.field("name").unwrap()), "user_name")
        .from_table(&users);
    let (sql, _) = pg(stmt);
    assert_eq!(sql, "SELECT id, name AS user_name FROM users");
}

#[test]
fn test_select_where_param() {
    let users = users();
    let stmt = SelectStmt::new()
        .select_star()
        .from_table(&users)
        .and_where(Predicate::eq(
            Expr::field(users.field("id").unwrap()),
            Expr::param(42i64, CodecKey::I64),
        ));
    let (sql, params) = pg(stmt);
    assert_eq!(sql, "SELECT * FROM users WHERE id = $1");
    assert_eq!(params, vec![Value::I64(42)]);
}

#[test]
fn test_select_join() {
    let users = users();
    let profiles = profiles();
    let stmt = SelectStmt::new()
        .select_star()
        .from_table(&users)
        .join(
            JoinKind::Left,
            &profiles,
            Predicate::eq(
                Expr::qualified_field("users", users.field("id").unwrap()),
                Expr::qualified_field("profiles", profiles.field("user_id").unwrap()),
            ),
        );
    let (sql, _) = pg(stmt);
    assert_eq!(
        sql,
        "SELECT * FROM users LEFT JOIN profiles ON users.id = profiles.user_id"
    );
}

#[test]
fn test_select_order_limit_offset() {
    let users = users();
    let stmt = SelectStmt::new()
        .select_star()
        .from_table(&users)
        .order_by(SortItem::desc(Expr::field(users.field("created_at").unwrap())))
        .limit_offset(10, 20);
    let (sql, _) = pg(stmt);
    assert_eq!(
        sql,
        "SELECT * FROM users ORDER BY created_at DESC LIMIT 10 OFFSET 20"
    );
}

#[test]
fn test_select_group_having() {
    let users = users();
    let count = Expr::func("count", vec![Expr::field(users.field("id").unwrap())]);
    let stmt = SelectStmt::new()
        .select(Expr::field(users.field("active").unwrap()))
        .select_as(count.clone(), "cnt")
        .from_table(&users)
        .group_by(Expr::field(users.field("active").unwrap()))
        .having(Predicate::cmp(
            count,
            CmpOp::Gt,
            Expr::literal(5i64, CodecKey::I64),
        ));
    let (sql, _) = pg(stmt);
    assert_eq!(
        sql,
        "SELECT active, COUNT(id) AS cnt FROM users GROUP BY active HAVING COUNT(id) > 5"
    );
}

#[test]
fn test_select_distinct_union() {
    let users = users();
    let stmt = SelectStmt::new()
        .distinct()
        .select(Expr::field(users.field("name").unwrap()))
        .from_table(&users)
        .union_all(
            SelectStmt::new()
                .select(Expr::field(users.field("name").unwrap()))
                .from_table(&users),
        );
    let (sql, _) = pg(stmt);
    assert_eq!(
        sql,
        "SELECT DISTINCT name FROM users UNION ALL SELECT name FROM users"
    );
}

#[test]
fn test_select_subquery_in() {
    let users = users();
    let profiles = profiles();
    let sub = SelectStmt::new()
        .select(Expr::field(profiles.field("user_id").unwrap()))
        .from_table(&profiles);
    let stmt = SelectStmt::new()
        .select_star()
        .from_table(&users)
        .and_where(Predicate::In {
            expr: Expr::field(users.field("id").unwrap()),
            list: InList::Query(Box::new(sub)),
            negated: false,
        });
    let (sql, _) = pg(stmt);
    assert_eq!(
        sql,
        "SELECT * FROM users WHERE id IN (SELECT user_id FROM profiles)"
    );
}

#[test]
fn test_select_window_clause() {
    let users = users();
    let stmt = SelectStmt::new()
        .select_as(
            Expr::Window {
                func: "row_number".into(),
                args: vec![],
                over: OverClause::Named("w".into()),
            },
            "rn",
        )
        .from_table(&users)
        .window(WindowDef {
            name: "w".into(),
            spec: WindowSpec {
                partition_by: vec![Expr::field(users.field("active").unwrap())],
                order_by: vec![SortItem::desc(Expr::field(users.field("id").unwrap()))],
                frame: None,
            },
        });
    let (sql, _) = pg(stmt);
    assert_eq!(
        sql,
        "SELECT ROW_NUMBER() OVER w AS rn FROM users WINDOW w AS (PARTITION BY active ORDER BY id DESC)"
    );
}

#[test]
fn test_window_frame() {
    let users = users();
    let stmt = SelectStmt::new()
        .select_as(
            Expr::Window {
                func: "sum".into(),
                args: vec![Expr::field(users.field("id").unwrap())],
                over: OverClause::Inline(WindowSpec {
                    partition_by: vec![],
                    order_by: vec![SortItem::asc(Expr::field(users.field("id").unwrap()))],
                    frame: Some(WindowFrame::Rows {
                        start: FrameBound::UnboundedPreceding,
                        end: FrameBound::CurrentRow,
                    }),
                }),
            },
            "running",
        )
        .from_table(&users);
    let (sql, _) = pg(stmt);
    assert_eq!(
        sql,
        "SELECT SUM(id) OVER (ORDER BY id ASC ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW) AS running FROM users"
    );
}

#[test]
fn test_cte_select() {
    let users = users();
    let inner = SelectStmt::new()
        .select_star()
        .from_table(&users)
        .and_where(Predicate::eq(
            Expr::field(users.field("active").unwrap()),
            Expr::literal(true, CodecKey::Bool),
        ));
    let stmt = SelectStmt::new()
        .with_cte(CteDef::new("active_users", inner))
        .select_star()
        .from_ref(TableRef::cte("active_users"));
    let (sql, _) = pg(stmt);
    assert_eq!(
        sql,
        "WITH active_users AS (SELECT * FROM users WHERE active = TRUE) SELECT * FROM active_users"
    );
}

#[test]
fn test_recursive_cte() {
    let users = users();
    let base = SelectStmt::new()
        .select(Expr::field(users.field("id").unwrap()))
        .from_table(&users)
        .union_all(
            SelectStmt::new()
                .select(Expr::column("id"))
                .from_ref(TableRef::cte("tree")),
        );
    let stmt = SelectStmt::new()
        .with_cte(CteDef::new("tree", base).columns(&["id"]))
        .recursive()
        .select_star()
        .from_ref(TableRef::cte("tree"));
    let (sql, _) = pg(stmt);
    assert_eq!(
        sql,
        "WITH RECURSIVE tree(id) AS (SELECT id FROM users UNION ALL SELECT id FROM tree) SELECT * FROM tree"
    );
}

#[test]
fn test_update() {
    let users = users();
    let stmt = UpdateStmt::table(&users)
        .set(
            users.field("name").unwrap(),
            Expr::param("alice", CodecKey::text()),
        )
        .and_where(Predicate::eq(
            Expr::field(users.field("id").unwrap()),
            Expr::param(7i64, CodecKey::I64),
        ));
    let (sql, params) = pg(stmt);
    assert_eq!(sql, "UPDATE users SET name = $1 WHERE id = $2");
    assert_eq!(
        params,
        vec![Value::Str("alice".into()), Value::I64(7)]
    );
}

#[test]
fn test_update_from() {
    let users = users();
    let profiles = profiles();
    let stmt = UpdateStmt::table(&users)
        .set(
            users.field("active").unwrap(),
            Expr::literal(false, CodecKey::Bool),
        )
        .from_ref(TableRef::table(&profiles).join(JoinKind::Inner).on(
            Predicate::eq(
                Expr::qualified_field("users", users.field("id").unwrap()),
                Expr::qualified_field("profiles", profiles.field("user_id").unwrap()),
            ),
        ));
    let (sql, _) = pg(stmt);
    assert_eq!(
        sql,
        "UPDATE users SET active = FALSE FROM profiles WHERE users.id = profiles.user_id"
    );
}

#[test]
fn test_update_returning() {
    let users = users();
    let stmt = UpdateStmt::table(&users)
        .set(
            users.field("active").unwrap(),
            Expr::literal(true, CodecKey::Bool),
        )
        .returning(Selection::expr(Expr::field(users.field("id").unwrap())));
    let (sql, _) = pg(stmt);
    assert_eq!(sql, "UPDATE users SET active = TRUE RETURNING id");
}

#[test]
fn test_delete() {
    let users = users();
    let stmt = DeleteStmt::from_table(&users).and_where(Predicate::eq(
        Expr::field(users.field("id").unwrap()),
        Expr::param(3i64, CodecKey::I64),
    ));
    let (sql, params) = pg(stmt);
    assert_eq!(sql, "DELETE FROM users WHERE id = $1");
    assert_eq!(params, vec![Value::I64(3)]);
}

#[test]
fn test_delete_using() {
    let users = users();
    let profiles = profiles();
    let stmt = DeleteStmt::from_table(&users).using(
        TableRef::table(&profiles).join(JoinKind::Inner).on(Predicate::eq(
            Expr::qualified_field("users", users.field("id").unwrap()),
            Expr::qualified_field("profiles", profiles.field("user_id").unwrap()),
        )),
    );
    let (sql, _) = pg(stmt);
    assert_eq!(
        sql,
        "DELETE FROM users USING profiles WHERE users.id = profiles.user_id"
    );
}

#[test]
fn test_insert_rows() {
    let users = users();
    let stmt = InsertStmt::into_table(&users)
        .field(users.field("id").unwrap())
        .field(users.field("name").unwrap())
        .row(vec![
            Expr::param(1i64, CodecKey::I64),
            Expr::param("a", CodecKey::text()),
        ])
        .row(vec![
            Expr::param(2i64, CodecKey::I64),
            Expr::param("b", CodecKey::text()),
        ]);
    let (sql, params) = pg(stmt);
    assert_eq!(sql, "INSERT INTO users (id, name) VALUES ($1, $2), ($3, $4)");
    assert_eq!(params.len(), 4);
}

#[test]
fn test_insert_select_returning() {
    let users = users();
    let profiles = profiles();
    let source = SelectStmt::new()
        .select(Expr::field(profiles.field("user_id").unwrap()))
        .select(Expr::field(profiles.field("bio").unwrap()))
        .from_table(&profiles);
    let stmt = InsertStmt::into_table(&users)
        .field(users.field("id").unwrap())
        .field(users.field("name").unwrap())
        .from_query(source)
        .returning(Selection::expr(Expr::field(users.field("id").unwrap())));
    let (sql, _) = pg(stmt);
    assert_eq!(
        sql,
        "INSERT INTO users (id, name) SELECT user_id, bio FROM profiles RETURNING id"
    );
}

#[test]
fn test_insert_arity_checked() {
    let users = users();
    let stmt: Statement = InsertStmt::into_table(&users)
        .field(users.field("id").unwrap())
        .field(users.field("name").unwrap())
        .row(vec![Expr::param(1i64, CodecKey::I64)])
        .into();
    assert!(render(&stmt, Dialect::Postgres15, Visible::Both, false).is_err());
}

#[test]
fn test_insert_rejects_generated_field() {
    let animal = super::animal_dog().0;
    let stmt: Statement = InsertStmt::into_table(&animal)
        .field(animal.field("id").unwrap())
        .row(vec![Expr::param(1i64, CodecKey::I64)])
        .into();
    assert!(render(&stmt, Dialect::Postgres15, Visible::Both, false).is_err());
}

#[test]
fn test_values_statement() {
    let stmt = ValuesStmt::new()
        .row(vec![
            Expr::literal(1i32, CodecKey::I32),
            Expr::literal("a", CodecKey::text()),
        ])
        .row(vec![
            Expr::literal(2i32, CodecKey::I32),
            Expr::literal("b", CodecKey::text()),
        ])
        .limit(1);
    let (sql, _) = pg(stmt);
    assert_eq!(sql, "VALUES (1, 'a'), (2, 'b') LIMIT 1");
}

#[test]
fn test_visibility_predicate() {
    let users = users().with_visible_field("active");
    let stmt: Statement = SelectStmt::new()
        .select_star()
        .from_table(&users)
        .and_where(Predicate::eq(
            Expr::field(users.field("id").unwrap()),
            Expr::param(1i64, CodecKey::I64),
        ))
        .into();
    let out = render(&stmt, Dialect::Postgres15, Visible::Only, false)
        .unwrap()
        .simple()
        .unwrap();
    assert_eq!(
        out.sql,
        "SELECT * FROM users WHERE id = $1 AND active = TRUE"
    );
    // Visible::Both renders rows regardless.
    let out = render(&stmt, Dialect::Postgres15, Visible::Both, false)
        .unwrap()
        .simple()
        .unwrap();
    assert_eq!(out.sql, "SELECT * FROM users WHERE id = $1");
}

#[test]
fn test_case_expression() {
    let users = users();
    let stmt = SelectStmt::new()
        .select_as(
            Expr::Case {
                branches: vec![(
                    Predicate::eq(
                        Expr::field(users.field("active").unwrap()),
                        Expr::literal(true, CodecKey::Bool),
                    ),
                    Expr::literal("yes", CodecKey::text()),
                )],
                else_value: Some(Box::new(Expr::literal("no", CodecKey::text()))),
            },
            "flag",
        )
        .from_table(&users);
    let (sql, _) = pg(stmt);
    assert_eq!(
        sql,
        "SELECT CASE WHEN active = TRUE THEN 'yes' ELSE 'no' END AS flag FROM users"
    );
}

#[test]
fn test_clear_releases_subtrees() {
    let users = users();
    let mut stmt: Statement = SelectStmt::new()
        .select_star()
        .from_table(&users)
        .and_where(Predicate::is_null(Expr::field(users.field("created_at").unwrap())))
        .into();
    stmt.clear();
    match stmt {
        Statement::Select(s) => {
            assert!(s.from.is_empty());
            assert!(s.wheres.is_empty());
        }
        _ => panic!("variant changed by clear"),
    }
}
