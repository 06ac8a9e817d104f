//! Parent/child statement splitting tests.

use pretty_assertions::assert_eq;

use super::animal_dog;
use crate::ast::*;
use crate::codec::CodecKey;
use crate::dialect::Dialect;
use crate::error::SqlError;
use crate::render::{Rendered, Visible, render};
use crate::value::Value;

#[test]
fn test_child_update_spanning_both_tables_links_a_pair() {
    let (animal, dog) = animal_dog();
    let stmt: Statement = UpdateStmt::table(&dog)
        .set(
            dog.field("breed").unwrap(),
            Expr::param("akita", CodecKey::text()),
        )
        .set(
            animal.field("name").unwrap(),
            Expr::param("Hachiko", CodecKey::text()),
        )
        .and_where(Predicate::eq(
            Expr::field(dog.field("breed").unwrap()),
            Expr::param("shiba", CodecKey::text()),
        ))
        .into();
    let out = render(&stmt, Dialect::Postgres15, Visible::Both, false)
        .unwrap()
        .simple()
        .unwrap();
    assert_eq!(
        out.sql,
        "WITH dog_sub AS (UPDATE dog SET breed = $1 FROM animal WHERE breed = $2 AND dog.id = animal.id RETURNING dog.id AS id) \
         UPDATE animal SET name = $3 FROM dog_sub WHERE animal.id = dog_sub.id"
    );
    // Child half binds first, parent half after; order matches placeholders.
    assert_eq!(
        out.params.iter().map(|p| p.value.clone()).collect::<Vec<_>>(),
        vec![
            Value::Str("akita".into()),
            Value::Str("shiba".into()),
            Value::Str("Hachiko".into()),
        ]
    );
}

#[test]
fn test_synthetic_cte_appears_once_and_is_joined_once() {
    let (animal, dog) = animal_dog();
    let stmt: Statement = UpdateStmt::table(&dog)
        .set(
            dog.field("breed").unwrap(),
            Expr::param("akita", CodecKey::text()),
        )
        .set(
            animal.field("name").unwrap(),
            Expr::param("Hachiko", CodecKey::text()),
        )
        .and_where(Predicate::eq(
            Expr::field(dog.field("breed").unwrap()),
            Expr::param("shiba", CodecKey::text()),
        ))
        .into();
    let out = render(&stmt, Dialect::Postgres15, Visible::Both, false)
        .unwrap()
        .simple()
        .unwrap();
    assert_eq!(out.sql.matches("dog_sub AS (").count(), 1);
    assert_eq!(out.sql.matches("FROM dog_sub").count(), 1);
}

#[test]
fn test_child_update_confined_to_child_stays_single() {
    let (_, dog) = animal_dog();
    let stmt: Statement = UpdateStmt::table(&dog)
        .set(
            dog.field("breed").unwrap(),
            Expr::param("akita", CodecKey::text()),
        )
        .and_where(Predicate::eq(
            Expr::field(dog.field("breed").unwrap()),
            Expr::param("shiba", CodecKey::text()),
        ))
        .into();
    let out = render(&stmt, Dialect::Postgres15, Visible::Both, false)
        .unwrap()
        .simple()
        .unwrap();
    assert_eq!(
        out.sql,
        "UPDATE dog SET breed = $1 FROM animal WHERE breed = $2 AND dog.id = animal.id"
    );
}

#[test]
fn test_child_update_pair_requires_dml_cte() {
    let (animal, dog) = animal_dog();
    let stmt: Statement = UpdateStmt::table(&dog)
        .set(
            animal.field("name").unwrap(),
            Expr::param("Hachiko", CodecKey::text()),
        )
        .set(
            dog.field("breed").unwrap(),
            Expr::param("akita", CodecKey::text()),
        )
        .into();
    let err = render(&stmt, Dialect::MySql80, Visible::Both, false).unwrap_err();
    assert!(matches!(err, SqlError::UnsupportedStatementShape { .. }));
}

#[test]
fn test_child_update_rejects_foreign_fields() {
    let (_, dog) = animal_dog();
    let stray = crate::meta::FieldMeta::new("color", CodecKey::text());
    let stmt: Statement = UpdateStmt::table(&dog)
        .set(
            &std::sync::Arc::new(stray),
            Expr::param("red", CodecKey::text()),
        )
        .into();
    let err = render(&stmt, Dialect::Postgres15, Visible::Both, false).unwrap_err();
    assert!(matches!(err, SqlError::IllegalStatementMode { .. }));
}

#[test]
fn test_child_update_rejects_returning_on_pair() {
    let (animal, dog) = animal_dog();
    let stmt: Statement = UpdateStmt::table(&dog)
        .set(
            animal.field("name").unwrap(),
            Expr::param("Hachiko", CodecKey::text()),
        )
        .set(
            dog.field("breed").unwrap(),
            Expr::param("akita", CodecKey::text()),
        )
        .returning(Selection::Star)
        .into();
    let err = render(&stmt, Dialect::Postgres15, Visible::Both, false).unwrap_err();
    assert!(matches!(err, SqlError::IllegalStatementMode { .. }));
}

#[test]
fn test_child_update_rejects_colliding_cte_name() {
    let (animal, dog) = animal_dog();
    let decoy = SelectStmt::new().select_star().from_table(&animal);
    let stmt: Statement = UpdateStmt::table(&dog)
        .with_cte(CteDef::new("dog_sub", decoy))
        .set(
            animal.field("name").unwrap(),
            Expr::param("Hachiko", CodecKey::text()),
        )
        .set(
            dog.field("breed").unwrap(),
            Expr::param("akita", CodecKey::text()),
        )
        .into();
    let err = render(&stmt, Dialect::Postgres15, Visible::Both, false).unwrap_err();
    assert!(matches!(err, SqlError::IllegalStatementMode { .. }));
}

#[test]
fn test_child_delete_links_a_pair() {
    let (_, dog) = animal_dog();
    let stmt: Statement = DeleteStmt::from_table(&dog)
        .and_where(Predicate::eq(
            Expr::field(dog.field("breed").unwrap()),
            Expr::param("shiba", CodecKey::text()),
        ))
        .into();
    let out = render(&stmt, Dialect::Postgres15, Visible::Both, false)
        .unwrap()
        .simple()
        .unwrap();
    assert_eq!(
        out.sql,
        "WITH dog_sub AS (DELETE FROM dog USING animal WHERE breed = $1 AND dog.id = animal.id RETURNING dog.id AS id) \
         DELETE FROM animal USING dog_sub WHERE animal.id = dog_sub.id"
    );
}

#[test]
fn test_child_insert_becomes_two_statements() {
    let (animal, dog) = animal_dog();
    let stmt: Statement = InsertStmt::into_table(&dog)
        .field(animal.field("name").unwrap())
        .field(dog.field("breed").unwrap())
        .row(vec![
            Expr::param("Hachiko", CodecKey::text()),
            Expr::param("akita", CodecKey::text()),
        ])
        .into();
    let out = render(&stmt, Dialect::Postgres15, Visible::Both, false).unwrap();
    let (parent, child) = match out {
        Rendered::Pair { parent, child } => (parent, child),
        Rendered::Simple(_) => panic!("expected a pair"),
    };
    assert_eq!(
        parent.sql,
        "INSERT INTO animal (name) VALUES ($1) RETURNING animal.id AS id"
    );
    assert_eq!(child.sql, "INSERT INTO dog (id, breed) VALUES ($1, $2)");
    // The child's key slot is a deferred placeholder the execution layer
    // fills from the parent's generated key.
    assert_eq!(child.params[0].value, Value::Null);
    assert_eq!(child.params[1].value, Value::Str("akita".into()));
}

#[test]
fn test_child_insert_on_mysql_skips_returning() {
    let (animal, dog) = animal_dog();
    let stmt: Statement = InsertStmt::into_table(&dog)
        .field(animal.field("name").unwrap())
        .field(dog.field("breed").unwrap())
        .row(vec![
            Expr::param("Hachiko", CodecKey::text()),
            Expr::param("akita", CodecKey::text()),
        ])
        .into();
    let out = render(&stmt, Dialect::MySql80, Visible::Both, false).unwrap();
    match out {
        Rendered::Pair { parent, child } => {
            assert_eq!(parent.sql, "INSERT INTO animal (name) VALUES (?)");
            assert_eq!(child.sql, "INSERT INTO dog (id, breed) VALUES (?, ?)");
        }
        Rendered::Simple(_) => panic!("expected a pair"),
    }
}

#[test]
fn test_child_insert_rejects_returning() {
    let (animal, dog) = animal_dog();
    let stmt: Statement = InsertStmt::into_table(&dog)
        .field(animal.field("name").unwrap())
        .row(vec![Expr::param("Hachiko", CodecKey::text())])
        .returning(Selection::Star)
        .into();
    let err = render(&stmt, Dialect::Postgres15, Visible::Both, false).unwrap_err();
    assert!(matches!(err, SqlError::IllegalStatementMode { .. }));
}

#[test]
fn test_child_insert_rejects_supplied_generated_key() {
    let (animal, dog) = animal_dog();
    let stmt: Statement = InsertStmt::into_table(&dog)
        .field(dog.field("id").unwrap())
        .field(animal.field("name").unwrap())
        .row(vec![
            Expr::param(1i64, CodecKey::I64),
            Expr::param("Hachiko", CodecKey::text()),
        ])
        .into();
    let err = render(&stmt, Dialect::Postgres15, Visible::Both, false).unwrap_err();
    assert!(matches!(err, SqlError::IllegalStatementMode { .. }));
}
