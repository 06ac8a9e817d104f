//! Schema descriptors consumed from the metadata layer.
//!
//! Table and field descriptors are supplied read-only at statement build
//! time; this crate never reflects over application types. A field names its
//! codec explicitly through a [`CodecKey`], so value mapping is declared
//! rather than discovered.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec::CodecKey;
use crate::dialect::Database;

/// Generated-value policy for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Generation {
    /// The caller supplies the value.
    None,
    /// The database generates the value on insert (identity / auto-increment).
    Database,
}

/// One column descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    pub name: String,
    pub codec: CodecKey,
    pub nullable: bool,
    pub generated: Generation,
}

impl FieldMeta {
    pub fn new(name: impl Into<String>, codec: CodecKey) -> Self {
        Self {
            name: name.into(),
            codec,
            nullable: false,
            generated: Generation::None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn generated(mut self) -> Self {
        self.generated = Generation::Database;
        self
    }
}

/// One table descriptor.
///
/// A child table in a parent/child pair points at its parent; the two share
/// the primary-key field name, which is what the statement splitter joins on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMeta {
    pub name: String,
    pub fields: Vec<Arc<FieldMeta>>,
    primary_key: usize,
    pub visible_field: Option<Arc<FieldMeta>>,
    pub parent: Option<Arc<TableMeta>>,
}

impl TableMeta {
    /// Build a table descriptor. `primary_key` must name one of `fields`.
    pub fn new(
        name: impl Into<String>,
        fields: Vec<FieldMeta>,
        primary_key: &str,
    ) -> Arc<Self> {
        let fields: Vec<Arc<FieldMeta>> = fields.into_iter().map(Arc::new).collect();
        let primary_key = fields
            .iter()
            .position(|f| f.name == primary_key)
            .unwrap_or(0);
        Arc::new(Self {
            name: name.into(),
            fields,
            primary_key,
            visible_field: None,
            parent: None,
        })
    }

    /// Build a child table descriptor linked to `parent`.
    pub fn child_of(
        name: impl Into<String>,
        fields: Vec<FieldMeta>,
        primary_key: &str,
        parent: Arc<TableMeta>,
    ) -> Arc<Self> {
        let fields: Vec<Arc<FieldMeta>> = fields.into_iter().map(Arc::new).collect();
        let primary_key = fields
            .iter()
            .position(|f| f.name == primary_key)
            .unwrap_or(0);
        Arc::new(Self {
            name: name.into(),
            fields,
            primary_key,
            visible_field: None,
            parent: Some(parent),
        })
    }

    /// Attach a soft-visibility field by name. Renderers append a predicate
    /// on this field under `Visible::Only`.
    pub fn with_visible_field(self: &Arc<Self>, name: &str) -> Arc<Self> {
        let mut meta = (**self).clone();
        meta.visible_field = self.field(name).cloned();
        Arc::new(meta)
    }

    pub fn primary_key(&self) -> &Arc<FieldMeta> {
        &self.fields[self.primary_key]
    }

    pub fn field(&self, name: &str) -> Option<&Arc<FieldMeta>> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, field: &FieldMeta) -> bool {
        self.fields.iter().any(|f| f.name == field.name)
    }

    /// The parent/child link, when this table is a child sharing its
    /// primary-key field name with a parent table.
    pub fn child_link(self: &Arc<Self>) -> Option<ChildTableLink> {
        let parent = self.parent.as_ref()?;
        let key = self.primary_key();
        parent.field(&key.name)?;
        Some(ChildTableLink {
            parent: parent.clone(),
            child: self.clone(),
            key: key.clone(),
        })
    }
}

/// Parent table + child table + the shared primary-key field.
/// Used only by the child-statement splitter.
#[derive(Debug, Clone)]
pub struct ChildTableLink {
    pub parent: Arc<TableMeta>,
    pub child: Arc<TableMeta>,
    pub key: Arc<FieldMeta>,
}

/// Database family and version, as reported by the server descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerMeta {
    pub database: Database,
    pub major: u16,
    pub minor: u16,
}

impl ServerMeta {
    pub fn new(database: Database, major: u16, minor: u16) -> Self {
        Self {
            database,
            major,
            minor,
        }
    }

    /// Whether the server is at least `major.minor`.
    pub fn meets(&self, major: u16, minor: u16) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}

impl std::fmt::Display for ServerMeta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}.{}", self.database, self.major, self.minor)
    }
}
