//! Per-dialect grammar differences and render-time rejections.

use pretty_assertions::assert_eq;

use super::{profiles, users};
use crate::ast::*;
use crate::codec::CodecKey;
use crate::dialect::Dialect;
use crate::error::SqlError;
use crate::render::{Visible, render};

fn sql(statement: impl Into<Statement>, dialect: Dialect) -> String {
    render(&statement.into(), dialect, Visible::Both, false)
        .unwrap()
        .simple()
        .unwrap()
        .sql
}

#[test]
fn test_mysql_placeholders() {
    let users = users();
    let stmt = SelectStmt::new()
        .select_star()
        .from_table(&users)
        .and_where(Predicate::eq(
            Expr::field(users.field("id").unwrap()),
            Expr::param(42i64, CodecKey::I64),
        ));
    assert_eq!(sql(stmt, Dialect::MySql80), "SELECT * FROM users WHERE id = ?");
}

#[test]
fn test_mysql_limit_offset_comma() {
    let users = users();
    let stmt = SelectStmt::new()
        .select_star()
        .from_table(&users)
        .limit_offset(10, 20);
    assert_eq!(sql(stmt, Dialect::MySql80), "SELECT * FROM users LIMIT 20, 10");
}

#[test]
fn test_identifier_quoting_per_dialect() {
    let order = crate::meta::TableMeta::new(
        "order",
        vec![crate::meta::FieldMeta::new("id", CodecKey::I64)],
        "id",
    );
    let stmt = SelectStmt::new().select_star().from_table(&order);
    assert_eq!(sql(stmt.clone(), Dialect::Postgres15), "SELECT * FROM \"order\"");
    assert_eq!(sql(stmt, Dialect::MySql80), "SELECT * FROM `order`");
}

#[test]
fn test_mixed_case_quoted_only_under_folding() {
    let camel = crate::meta::TableMeta::new(
        "UserEvents",
        vec![crate::meta::FieldMeta::new("id", CodecKey::I64)],
        "id",
    );
    let stmt = SelectStmt::new().select_star().from_table(&camel);
    assert_eq!(
        sql(stmt.clone(), Dialect::Postgres15),
        "SELECT * FROM \"UserEvents\""
    );
    assert_eq!(sql(stmt, Dialect::MySql80), "SELECT * FROM UserEvents");
}

#[test]
fn test_escaped_identifier_applied_once() {
    let weird = crate::meta::TableMeta::new(
        "we\"ird",
        vec![crate::meta::FieldMeta::new("id", CodecKey::I64)],
        "id",
    );
    let stmt = SelectStmt::new().select_star().from_table(&weird);
    // The embedded quote is doubled exactly once.
    assert_eq!(sql(stmt, Dialect::Postgres15), "SELECT * FROM \"we\"\"ird\"");
}

#[test]
fn test_mysql_update_join_grammar() {
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
    assert_eq!(
        sql(stmt, Dialect::MySql80),
        "UPDATE users INNER JOIN profiles ON users.id = profiles.user_id SET active = FALSE"
    );
}

#[test]
fn test_mysql_multi_table_delete_grammar() {
    let users = users();
    let profiles = profiles();
    let stmt = DeleteStmt::from_table(&users).using(
        TableRef::table(&profiles).join(JoinKind::Inner).on(Predicate::eq(
            Expr::qualified_field("users", users.field("id").unwrap()),
            Expr::qualified_field("profiles", profiles.field("user_id").unwrap()),
        )),
    );
    assert_eq!(
        sql(stmt, Dialect::MySql80),
        "DELETE users FROM users INNER JOIN profiles ON users.id = profiles.user_id"
    );
}

#[test]
fn test_mysql_values_row_constructor() {
    let stmt = ValuesStmt::new().row(vec![
        Expr::literal(1i32, CodecKey::I32),
        Expr::literal("a", CodecKey::text()),
    ]);
    assert_eq!(sql(stmt, Dialect::MySql80), "VALUES ROW(1, 'a')");
}

#[test]
fn test_mysql57_rejects_values_statement() {
    let stmt: Statement = ValuesStmt::new()
        .row(vec![Expr::literal(1i32, CodecKey::I32)])
        .into();
    let err = render(&stmt, Dialect::MySql57, Visible::Both, false).unwrap_err();
    assert!(matches!(err, SqlError::UnsupportedStatementShape { .. }));
}

#[test]
fn test_mysql57_rejects_cte() {
    let users = users();
    let stmt: Statement = SelectStmt::new()
        .with_cte(CteDef::new(
            "u",
            SelectStmt::new().select_star().from_table(&users),
        ))
        .select_star()
        .from_ref(TableRef::cte("u"))
        .into();
    let err = render(&stmt, Dialect::MySql57, Visible::Both, false).unwrap_err();
    assert!(matches!(err, SqlError::UnsupportedClause { clause: "WITH", .. }));
}

#[test]
fn test_mysql57_rejects_window_functions() {
    let users = users();
    let stmt: Statement = SelectStmt::new()
        .select(Expr::Window {
            func: "row_number".into(),
            args: vec![],
            over: OverClause::Inline(WindowSpec::default()),
        })
        .from_table(&users)
        .into();
    let err = render(&stmt, Dialect::MySql57, Visible::Both, false).unwrap_err();
    assert!(matches!(err, SqlError::UnsupportedClause { .. }));
}

#[test]
fn test_mysql_rejects_returning() {
    let users = users();
    let stmt: Statement = UpdateStmt::table(&users)
        .set(
            users.field("active").unwrap(),
            Expr::literal(true, CodecKey::Bool),
        )
        .returning(Selection::expr(Expr::field(users.field("id").unwrap())))
        .into();
    let err = render(&stmt, Dialect::MySql80, Visible::Both, false).unwrap_err();
    assert!(matches!(
        err,
        SqlError::UnsupportedClause {
            clause: "RETURNING",
            ..
        }
    ));
}

#[test]
fn test_mysql_rejects_row_value_set() {
    let users = users();
    let profiles = profiles();
    let sub = SelectStmt::new()
        .select(Expr::field(profiles.field("bio").unwrap()))
        .from_table(&profiles);
    let stmt: Statement = UpdateStmt::table(&users)
        .item(ItemPair::set_row(&[users.field("name").unwrap()], sub))
        .into();
    let err = render(&stmt, Dialect::MySql80, Visible::Both, false).unwrap_err();
    assert!(matches!(err, SqlError::UnsupportedStatementShape { .. }));
}

#[test]
fn test_pg_rejects_index_hints() {
    let users = users();
    let stmt: Statement = SelectStmt::new()
        .select_star()
        .from_ref(
            TableRef::table(&users)
                .index_hint(IndexHintKind::Force, &["idx_users_id"]),
        )
        .into();
    let err = render(&stmt, Dialect::Postgres15, Visible::Both, false).unwrap_err();
    assert!(matches!(err, SqlError::UnsupportedStatementShape { .. }));
}

#[test]
fn test_mysql_index_hints() {
    let users = users();
    let stmt = SelectStmt::new().select_star().from_ref(
        TableRef::table(&users).index_hint(IndexHintKind::Use, &["idx_users_id"]),
    );
    assert_eq!(
        sql(stmt, Dialect::MySql80),
        "SELECT * FROM users USE INDEX (idx_users_id)"
    );
}

#[test]
fn test_annotated_literals() {
    let users = users();
    let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let stmt: Statement = SelectStmt::new()
        .select(Expr::literal(date, CodecKey::Date))
        .from_table(&users)
        .into();
    let out = render(&stmt, Dialect::Postgres15, Visible::Both, true)
        .unwrap()
        .simple()
        .unwrap();
    assert_eq!(out.sql, "SELECT DATE '2024-01-02' FROM users");
}

#[test]
fn test_annotations_suppressed_in_typed_context() {
    let users = users();
    let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let stmt: Statement = SelectStmt::new()
        .select_star()
        .from_table(&users)
        .and_where(Predicate::eq(
            Expr::field(users.field("created_at").unwrap()),
            Expr::literal(date, CodecKey::Date),
        ))
        .into();
    let out = render(&stmt, Dialect::Postgres15, Visible::Both, true)
        .unwrap()
        .simple()
        .unwrap();
    // The field pins the type; no DATE prefix on the right side.
    assert_eq!(out.sql, "SELECT * FROM users WHERE created_at = '2024-01-02'");
}

#[test]
fn test_mysql_string_escaping() {
    let users = users();
    let stmt = SelectStmt::new()
        .select_star()
        .from_table(&users)
        .and_where(Predicate::eq(
            Expr::field(users.field("name").unwrap()),
            Expr::literal(r"a\b'c", CodecKey::text()),
        ));
    assert_eq!(
        sql(stmt, Dialect::MySql80),
        r"SELECT * FROM users WHERE name = 'a\\b''c'"
    );
}
