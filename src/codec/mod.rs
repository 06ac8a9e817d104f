//! Value codecs: bidirectional converters between domain values and dialect
//! bind/literal representations.
//!
//! A [`MappingType`] is one tagged variant per data-type family instead of a
//! class hierarchy; parameterized families (text widths, bit lengths, enum
//! definitions, array/range elements) carry their parameters in the variant.
//! Instances are process-wide singletons owned by the registry and are never
//! mutated after first publication.

pub mod array;
pub mod boolean;
pub mod datatype;
pub mod enums;
pub mod numeric;
pub mod range;
pub mod registry;
pub mod temporal;
pub mod text;

pub use datatype::{DataType, MySqlType, PostgresType};
pub use registry::codec_for;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{SqlError, SqlResult};
use crate::meta::ServerMeta;
use crate::value::Value;

/// Byte/char-length tiers shared by the TEXT and BLOB families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextWidth {
    Tiny,
    Regular,
    Medium,
    Long,
}

impl TextWidth {
    /// Maximum byte length for this tier.
    pub fn max_len(self) -> u64 {
        match self {
            TextWidth::Tiny => 0x7F,
            TextWidth::Regular => 0x7FFF,
            TextWidth::Medium => 0xFF_FFFF,
            TextWidth::Long => 0xFFFF_FFFF,
        }
    }
}

/// One declared enumeration variant: the domain label and the text stored in
/// the column. The two coincide for by-name enums.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumVariant {
    pub label: String,
    pub text: String,
}

/// A declared enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: String,
    pub variants: Vec<EnumVariant>,
}

impl EnumDef {
    /// An enum whose stored text is the label itself.
    pub fn new(name: impl Into<String>, labels: &[&str]) -> Self {
        Self {
            name: name.into(),
            variants: labels
                .iter()
                .map(|l| EnumVariant {
                    label: (*l).to_string(),
                    text: (*l).to_string(),
                })
                .collect(),
        }
    }

    /// An enum with a declared text per label.
    pub fn with_text(name: impl Into<String>, pairs: &[(&str, &str)]) -> Self {
        Self {
            name: name.into(),
            variants: pairs
                .iter()
                .map(|(label, text)| EnumVariant {
                    label: (*label).to_string(),
                    text: (*text).to_string(),
                })
                .collect(),
        }
    }

    pub fn by_label(&self, label: &str) -> Option<&EnumVariant> {
        self.variants.iter().find(|v| v.label == label)
    }

    pub fn by_text(&self, text: &str) -> Option<&EnumVariant> {
        self.variants.iter().find(|v| v.text == text)
    }
}

/// Registry key: the domain shape plus its parameterization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodecKey {
    Bool,
    YesNo,
    I8,
    I16,
    I32,
    I64,
    U64,
    F32,
    F64,
    Decimal,
    Text(TextWidth),
    Binary(TextWidth),
    Bit(u8),
    Date,
    Time,
    DateTime,
    Uuid,
    EnumByName(EnumDef),
    EnumByText(EnumDef),
    Array(Box<CodecKey>),
    Range(Box<CodecKey>),
}

impl CodecKey {
    /// Shorthand for the regular text tier.
    pub fn text() -> Self {
        CodecKey::Text(TextWidth::Regular)
    }

    pub fn array(element: CodecKey) -> Self {
        CodecKey::Array(Box::new(element))
    }

    pub fn range(element: CodecKey) -> Self {
        CodecKey::Range(Box::new(element))
    }
}

/// Signed integer widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
}

/// Float widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    F32,
    F64,
}

/// The bind-ready representation produced by `before_bind`: either a value
/// the driver can bind natively, or literal SQL text a codec insists on.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Param(Value),
    Literal(String),
}

impl BindValue {
    /// Collapse to a plain value; literals become strings. Primarily for the
    /// round-trip law, where `after_get` receives what was bound.
    pub fn into_value(self) -> Value {
        match self {
            BindValue::Param(v) => v,
            BindValue::Literal(s) => Value::Str(s),
        }
    }
}

/// Error hook: receives the codec, the resolved data type, the offending
/// value, and the error the codec produced; returns the error to surface.
pub type ErrorHook = Arc<dyn Fn(&MappingType, &DataType, &Value, SqlError) -> SqlError + Send + Sync>;

/// Conversion environment: server descriptor plus the two injectable error
/// hooks (bind-time and result-parsing). The execution layer customizes
/// error wrapping here without this crate depending on it.
#[derive(Clone)]
pub struct MappingEnv {
    pub server: ServerMeta,
    param_hook: Option<ErrorHook>,
    access_hook: Option<ErrorHook>,
}

impl MappingEnv {
    pub fn new(server: ServerMeta) -> Self {
        Self {
            server,
            param_hook: None,
            access_hook: None,
        }
    }

    pub fn with_param_hook(mut self, hook: ErrorHook) -> Self {
        self.param_hook = Some(hook);
        self
    }

    pub fn with_access_hook(mut self, hook: ErrorHook) -> Self {
        self.access_hook = Some(hook);
        self
    }

    fn wrap_param(
        &self,
        codec: &MappingType,
        data_type: &DataType,
        value: &Value,
        err: SqlError,
    ) -> SqlError {
        match &self.param_hook {
            Some(hook) => hook(codec, data_type, value, err),
            None => err,
        }
    }

    fn wrap_access(
        &self,
        codec: &MappingType,
        data_type: &DataType,
        value: &Value,
        err: SqlError,
    ) -> SqlError {
        match &self.access_hook {
            Some(hook) => hook(codec, data_type, value, err),
            None => err,
        }
    }
}

impl std::fmt::Debug for MappingEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingEnv")
            .field("server", &self.server)
            .field("param_hook", &self.param_hook.is_some())
            .field("access_hook", &self.access_hook.is_some())
            .finish()
    }
}

/// A codec: one domain shape, its dialect types, and the three conversion
/// operations.
#[derive(Debug, Clone)]
pub enum MappingType {
    Bool,
    YesNo,
    Int(IntWidth),
    UInt64,
    Float(FloatWidth),
    Decimal,
    Text(TextWidth),
    Binary(TextWidth),
    Bit { bits: u8 },
    Date,
    Time,
    DateTime,
    Uuid,
    EnumByName(EnumDef),
    EnumByText(EnumDef),
    Array { element: Arc<MappingType> },
    Range { element: Arc<MappingType> },
}

impl MappingType {
    /// Build the codec for a key. Composite keys pull their element codec
    /// from the registry so nested shapes share singletons.
    pub fn from_key(key: &CodecKey) -> Self {
        match key {
            CodecKey::Bool => MappingType::Bool,
            CodecKey::YesNo => MappingType::YesNo,
            CodecKey::I8 => MappingType::Int(IntWidth::I8),
            CodecKey::I16 => MappingType::Int(IntWidth::I16),
            CodecKey::I32 => MappingType::Int(IntWidth::I32),
            CodecKey::I64 => MappingType::Int(IntWidth::I64),
            CodecKey::U64 => MappingType::UInt64,
            CodecKey::F32 => MappingType::Float(FloatWidth::F32),
            CodecKey::F64 => MappingType::Float(FloatWidth::F64),
            CodecKey::Decimal => MappingType::Decimal,
            CodecKey::Text(w) => MappingType::Text(*w),
            CodecKey::Binary(w) => MappingType::Binary(*w),
            CodecKey::Bit(bits) => MappingType::Bit { bits: *bits },
            CodecKey::Date => MappingType::Date,
            CodecKey::Time => MappingType::Time,
            CodecKey::DateTime => MappingType::DateTime,
            CodecKey::Uuid => MappingType::Uuid,
            CodecKey::EnumByName(def) => MappingType::EnumByName(def.clone()),
            CodecKey::EnumByText(def) => MappingType::EnumByText(def.clone()),
            CodecKey::Array(elem) => MappingType::Array {
                element: registry::codec_for(elem),
            },
            CodecKey::Range(elem) => MappingType::Range {
                element: registry::codec_for(elem),
            },
        }
    }

    /// The key this codec was built from.
    pub fn key(&self) -> CodecKey {
        match self {
            MappingType::Bool => CodecKey::Bool,
            MappingType::YesNo => CodecKey::YesNo,
            MappingType::Int(IntWidth::I8) => CodecKey::I8,
            MappingType::Int(IntWidth::I16) => CodecKey::I16,
            MappingType::Int(IntWidth::I32) => CodecKey::I32,
            MappingType::Int(IntWidth::I64) => CodecKey::I64,
            MappingType::UInt64 => CodecKey::U64,
            MappingType::Float(FloatWidth::F32) => CodecKey::F32,
            MappingType::Float(FloatWidth::F64) => CodecKey::F64,
            MappingType::Decimal => CodecKey::Decimal,
            MappingType::Text(w) => CodecKey::Text(*w),
            MappingType::Binary(w) => CodecKey::Binary(*w),
            MappingType::Bit { bits } => CodecKey::Bit(*bits),
            MappingType::Date => CodecKey::Date,
            MappingType::Time => CodecKey::Time,
            MappingType::DateTime => CodecKey::DateTime,
            MappingType::Uuid => CodecKey::Uuid,
            MappingType::EnumByName(def) => CodecKey::EnumByName(def.clone()),
            MappingType::EnumByText(def) => CodecKey::EnumByText(def.clone()),
            MappingType::Array { element } => CodecKey::Array(Box::new(element.key())),
            MappingType::Range { element } => CodecKey::Range(Box::new(element.key())),
        }
    }

    /// Resolve the concrete dialect type for the described server.
    pub fn map(&self, server: &ServerMeta) -> SqlResult<DataType> {
        use crate::dialect::Database::{MySql, Postgres};
        let dt = match (self, server.database) {
            (MappingType::Bool, MySql) => DataType::MySql(MySqlType::Boolean),
            (MappingType::Bool, Postgres) => DataType::Postgres(PostgresType::Boolean),
            (MappingType::YesNo, MySql) => DataType::MySql(MySqlType::Char),
            (MappingType::YesNo, Postgres) => DataType::Postgres(PostgresType::Char),
            (MappingType::Int(w), MySql) => DataType::MySql(match w {
                IntWidth::I8 => MySqlType::TinyInt,
                IntWidth::I16 => MySqlType::SmallInt,
                IntWidth::I32 => MySqlType::Int,
                IntWidth::I64 => MySqlType::BigInt,
            }),
            (MappingType::Int(w), Postgres) => DataType::Postgres(match w {
                // No 8-bit type on Postgres; SMALLINT is the narrowest.
                IntWidth::I8 | IntWidth::I16 => PostgresType::SmallInt,
                IntWidth::I32 => PostgresType::Integer,
                IntWidth::I64 => PostgresType::BigInt,
            }),
            (MappingType::UInt64, MySql) => DataType::MySql(MySqlType::BigIntUnsigned),
            (MappingType::UInt64, Postgres) => {
                return Err(SqlError::unsupported("BIGINT UNSIGNED", server));
            }
            (MappingType::Float(FloatWidth::F32), MySql) => DataType::MySql(MySqlType::Float),
            (MappingType::Float(FloatWidth::F64), MySql) => DataType::MySql(MySqlType::Double),
            (MappingType::Float(FloatWidth::F32), Postgres) => {
                DataType::Postgres(PostgresType::Real)
            }
            (MappingType::Float(FloatWidth::F64), Postgres) => {
                DataType::Postgres(PostgresType::Double)
            }
            (MappingType::Decimal, MySql) => DataType::MySql(MySqlType::Decimal),
            (MappingType::Decimal, Postgres) => DataType::Postgres(PostgresType::Decimal),
            (MappingType::Text(w), MySql) => DataType::MySql(match w {
                TextWidth::Tiny => MySqlType::TinyText,
                TextWidth::Regular => MySqlType::Text,
                TextWidth::Medium => MySqlType::MediumText,
                TextWidth::Long => MySqlType::LongText,
            }),
            (MappingType::Text(_), Postgres) => DataType::Postgres(PostgresType::Text),
            (MappingType::Binary(w), MySql) => DataType::MySql(match w {
                TextWidth::Tiny => MySqlType::TinyBlob,
                TextWidth::Regular => MySqlType::Blob,
                TextWidth::Medium => MySqlType::MediumBlob,
                TextWidth::Long => MySqlType::LongBlob,
            }),
            (MappingType::Binary(_), Postgres) => DataType::Postgres(PostgresType::Bytea),
            (MappingType::Bit { .. }, MySql) => DataType::MySql(MySqlType::Bit),
            (MappingType::Bit { .. }, Postgres) => DataType::Postgres(PostgresType::Bit),
            (MappingType::Date, MySql) => DataType::MySql(MySqlType::Date),
            (MappingType::Date, Postgres) => DataType::Postgres(PostgresType::Date),
            (MappingType::Time, MySql) => DataType::MySql(MySqlType::Time),
            (MappingType::Time, Postgres) => DataType::Postgres(PostgresType::Time),
            (MappingType::DateTime, MySql) => DataType::MySql(MySqlType::DateTime),
            (MappingType::DateTime, Postgres) => DataType::Postgres(PostgresType::Timestamp),
            // MySQL stores UUIDs in CHAR(36) columns.
            (MappingType::Uuid, MySql) => DataType::MySql(MySqlType::Char),
            (MappingType::Uuid, Postgres) => DataType::Postgres(PostgresType::Uuid),
            (MappingType::EnumByName(_) | MappingType::EnumByText(_), MySql) => {
                DataType::MySql(MySqlType::Enum)
            }
            (MappingType::EnumByName(_) | MappingType::EnumByText(_), Postgres) => {
                DataType::Postgres(PostgresType::VarChar)
            }
            (MappingType::Array { .. }, MySql) => {
                return Err(SqlError::unsupported("array types", server));
            }
            (MappingType::Array { element }, Postgres) => {
                let inner = match element.map(server)? {
                    DataType::Postgres(t) => t,
                    DataType::MySql(_) => {
                        return Err(SqlError::unsupported("array element", server));
                    }
                };
                match inner.array_of() {
                    Some(t) => DataType::Postgres(t),
                    None => {
                        return Err(SqlError::unsupported(
                            format!("{}[]", inner.type_name()),
                            server,
                        ));
                    }
                }
            }
            (MappingType::Range { .. }, MySql) => {
                return Err(SqlError::unsupported("range types", server));
            }
            (MappingType::Range { element }, Postgres) => {
                let inner = match element.map(server)? {
                    DataType::Postgres(t) => t,
                    DataType::MySql(_) => {
                        return Err(SqlError::unsupported("range element", server));
                    }
                };
                match inner.range_of() {
                    Some(t) => DataType::Postgres(t),
                    None => {
                        return Err(SqlError::unsupported(
                            format!("range over {}", inner.type_name()),
                            server,
                        ));
                    }
                }
            }
        };
        Ok(dt)
    }

    /// Validate shape and bounds, producing a bind-ready representation.
    pub fn before_bind(
        &self,
        data_type: &DataType,
        env: &MappingEnv,
        value: &Value,
    ) -> SqlResult<BindValue> {
        if value.is_null() {
            return Ok(BindValue::Param(Value::Null));
        }
        let result = match self {
            MappingType::Bool => boolean::bind_bool(data_type, value),
            MappingType::YesNo => boolean::bind_yes_no(data_type, value),
            MappingType::Int(w) => numeric::bind_int(*w, data_type, value),
            MappingType::UInt64 => numeric::bind_uint(data_type, value),
            MappingType::Float(w) => numeric::bind_float(*w, data_type, value),
            MappingType::Decimal => numeric::bind_decimal(data_type, value),
            MappingType::Text(w) => text::bind_text(*w, data_type, value),
            MappingType::Binary(w) => text::bind_binary(*w, data_type, value),
            MappingType::Bit { bits } => numeric::bind_bit(*bits, data_type, value),
            MappingType::Date => temporal::bind_date(data_type, value),
            MappingType::Time => temporal::bind_time(data_type, value),
            MappingType::DateTime => temporal::bind_datetime(data_type, value),
            MappingType::Uuid => text::bind_uuid(data_type, value),
            MappingType::EnumByName(def) => enums::bind_by_name(def, data_type, value),
            MappingType::EnumByText(def) => enums::bind_by_text(def, data_type, value),
            MappingType::Array { element } => array::bind_array(element, data_type, env, value),
            MappingType::Range { element } => range::bind_range(element, data_type, env, value),
        };
        result.map_err(|err| env.wrap_param(self, data_type, value, err))
    }

    /// Convert a raw result value back to the domain shape.
    pub fn after_get(
        &self,
        data_type: &DataType,
        env: &MappingEnv,
        raw: Value,
    ) -> SqlResult<Value> {
        if raw.is_null() {
            return Ok(Value::Null);
        }
        let result = match self {
            MappingType::Bool => boolean::get_bool(data_type, &raw),
            MappingType::YesNo => boolean::get_yes_no(data_type, &raw),
            MappingType::Int(w) => numeric::get_int(*w, data_type, &raw),
            MappingType::UInt64 => numeric::get_uint(data_type, &raw),
            MappingType::Float(w) => numeric::get_float(*w, data_type, &raw),
            MappingType::Decimal => numeric::get_decimal(data_type, &raw),
            MappingType::Text(_) => text::get_text(data_type, &raw),
            MappingType::Binary(_) => text::get_binary(data_type, &raw),
            MappingType::Bit { bits } => numeric::get_bit(*bits, data_type, &raw),
            MappingType::Date => temporal::get_date(data_type, &raw),
            MappingType::Time => temporal::get_time(data_type, &raw),
            MappingType::DateTime => temporal::get_datetime(data_type, &raw),
            MappingType::Uuid => text::get_uuid(data_type, &raw),
            MappingType::EnumByName(def) => enums::get_by_name(def, data_type, &raw),
            MappingType::EnumByText(def) => enums::get_by_text(def, data_type, &raw),
            MappingType::Array { element } => array::get_array(element, data_type, env, &raw),
            MappingType::Range { element } => range::get_range(element, data_type, env, &raw),
        };
        result.map_err(|err| env.wrap_access(self, data_type, &raw, err))
    }

    /// The element text a composite literal carries for one leaf value,
    /// before array/range quoting. Shared by the array and range codecs.
    pub(crate) fn leaf_text(&self, env: &MappingEnv, value: &Value) -> SqlResult<String> {
        let data_type = self.map(&env.server)?;
        match self.before_bind(&data_type, env, value)? {
            BindValue::Param(v) => Ok(leaf_value_text(&v)),
            BindValue::Literal(s) => Ok(s),
        }
    }

    /// Parse one composite-literal element back to a domain value.
    /// Inverse of [`MappingType::leaf_text`].
    pub(crate) fn parse_leaf(&self, env: &MappingEnv, text: &str) -> SqlResult<Value> {
        let data_type = self.map(&env.server)?;
        let raw = match self {
            MappingType::Bool => match text {
                "t" | "T" | "true" | "TRUE" => Value::Bool(true),
                "f" | "F" | "false" | "FALSE" => Value::Bool(false),
                _ => return Err(SqlError::malformed(text, "expected boolean element")),
            },
            MappingType::Int(_) | MappingType::UInt64 | MappingType::Bit { .. } => {
                if let Ok(n) = text.parse::<i64>() {
                    Value::I64(n)
                } else if let Ok(n) = text.parse::<u64>() {
                    Value::U64(n)
                } else {
                    return Err(SqlError::malformed(text, "expected integer element"));
                }
            }
            MappingType::Float(_) => match text.parse::<f64>() {
                Ok(n) => Value::F64(n),
                Err(_) => return Err(SqlError::malformed(text, "expected float element")),
            },
            MappingType::Decimal => match text.parse::<rust_decimal::Decimal>() {
                Ok(d) => Value::Decimal(d),
                Err(_) => return Err(SqlError::malformed(text, "expected decimal element")),
            },
            _ => Value::Str(text.to_string()),
        };
        self.after_get(&data_type, env, raw)
    }
}

/// Bare element text for a bind-normalized leaf value.
fn leaf_value_text(value: &Value) -> String {
    match value {
        Value::Bool(b) => (if *b { "t" } else { "f" }).to_string(),
        Value::Str(s) => s.clone(),
        Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        Value::Time(t) => t.format("%H:%M:%S%.f").to_string(),
        Value::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
        Value::Uuid(u) => u.to_string(),
        other => other.to_string(),
    }
}
