//! Renderer test modules.
//!
//! Tests are organized by category:
//! - `core`: SELECT, UPDATE, DELETE, INSERT, VALUES assembly
//! - `dialects`: per-dialect grammar differences and render-time rejections
//! - `split`: parent/child statement splitting

mod core;
mod dialects;
mod split;

use std::sync::Arc;

use crate::codec::CodecKey;
use crate::meta::{FieldMeta, TableMeta};

pub(crate) fn users() -> Arc<TableMeta> {
    TableMeta::new(
        "users",
        vec![
            FieldMeta::new("id", CodecKey::I64),
            FieldMeta::new("name", CodecKey::text()),
            FieldMeta::new("active", CodecKey::Bool),
            FieldMeta::new("created_at", CodecKey::DateTime).nullable(),
        ],
        "id",
    )
}

pub(crate) fn profiles() -> Arc<TableMeta> {
    TableMeta::new(
        "profiles",
        vec![
            FieldMeta::new("user_id", CodecKey::I64),
            FieldMeta::new("bio", CodecKey::text()).nullable(),
            FieldMeta::new("active", CodecKey::Bool),
        ],
        "user_id",
    )
}

/// A parent/child pair sharing the `id` primary key.
pub(crate) fn animal_dog() -> (Arc<TableMeta>, Arc<TableMeta>) {
    let animal = TableMeta::new(
        "animal",
        vec![
            FieldMeta::new("id", CodecKey::I64).generated(),
            FieldMeta::new("name", CodecKey::text()),
        ],
        "id",
    );
    let dog = TableMeta::child_of(
        "dog",
        vec![
            FieldMeta::new("id", CodecKey::I64),
            FieldMeta::new("breed", CodecKey::text()),
        ],
        "id",
        animal.clone(),
    );
    (animal, dog)
}
