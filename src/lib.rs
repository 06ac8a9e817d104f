//! stanza — statement-construction and dialect-compilation core.
//!
//! Build SQL statements as a validated object graph, independent of any
//! target database, then render them into dialect-correct SQL text plus an
//! ordered parameter list. A pluggable codec registry converts domain
//! values to bind/literal representations and back.
//!
//! ```
//! use stanza::prelude::*;
//!
//! let users = TableMeta::new(
//!     "users",
//!     vec![
//!         FieldMeta::new("id", CodecKey::I64),
//!         FieldMeta::new("name", CodecKey::text()),
//!     ],
//!     "id",
//! );
//! let stmt: Statement = SelectStmt::new()
//!     .select_star()
//!     .from_table(&users)
//!     .and_where(Predicate::eq(
//!         Expr::field(users.field("id").unwrap()),
//!         Expr::param(42i64, CodecKey::I64),
//!     ))
//!     .into();
//! let out = render(&stmt, Dialect::Postgres15, Visible::Both, false)
//!     .unwrap()
//!     .simple()
//!     .unwrap();
//! assert_eq!(out.sql, "SELECT * FROM users WHERE id = $1");
//! ```

pub mod ast;
pub mod codec;
pub mod dialect;
pub mod error;
pub mod meta;
pub mod render;
pub mod text;
pub mod value;

pub use codec::codec_for;
pub use render::render;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::codec::{
        BindValue, CodecKey, DataType, EnumDef, MappingEnv, MappingType, TextWidth, codec_for,
    };
    pub use crate::dialect::{Database, Dialect};
    pub use crate::error::{SqlError, SqlResult};
    pub use crate::meta::{FieldMeta, Generation, ServerMeta, TableMeta};
    pub use crate::render::{Rendered, SqlParam, SqlStmt, Visible, render, render_with_env};
    pub use crate::text::{parse_array, parse_range, serialize_array, serialize_range};
    pub use crate::value::{RangeBound, RangeValue, Value};
}
