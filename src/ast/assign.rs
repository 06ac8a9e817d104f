//! SET assignment pairs.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Expr, SelectStmt};
use crate::meta::FieldMeta;

/// One SET assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemPair {
    /// `field = expr`
    Single { field: Arc<FieldMeta>, value: Expr },
    /// `(f1, f2, ...) = (sub-query)`
    Row {
        fields: Vec<Arc<FieldMeta>>,
        value: Box<SelectStmt>,
    },
}

impl ItemPair {
    pub fn set(field: &Arc<FieldMeta>, value: Expr) -> Self {
        ItemPair::Single {
            field: field.clone(),
            value,
        }
    }

    pub fn set_row(fields: &[&Arc<FieldMeta>], value: SelectStmt) -> Self {
        ItemPair::Row {
            fields: fields.iter().map(|f| (*f).clone()).collect(),
            value: Box::new(value),
        }
    }

    /// The fields this assignment writes.
    pub fn fields(&self) -> Vec<&Arc<FieldMeta>> {
        match self {
            ItemPair::Single { field, .. } => vec![field],
            ItemPair::Row { fields, .. } => fields.iter().collect(),
        }
    }
}
