//! Domain values carried between callers and codecs.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A domain-level value as handed to `before_bind` or produced by
/// `after_get`. This is the currency of the codec layer; the renderer never
/// formats one of these without going through a mapping type first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// NULL value
    Null,
    /// Boolean
    Bool(bool),
    /// 8-bit signed integer
    I8(i8),
    /// 16-bit signed integer
    I16(i16),
    /// 32-bit signed integer
    I32(i32),
    /// 64-bit signed integer
    I64(i64),
    /// 64-bit unsigned integer (MySQL BIGINT UNSIGNED, bit fields)
    U64(u64),
    /// 32-bit float
    F32(f32),
    /// 64-bit float
    F64(f64),
    /// Exact decimal
    Decimal(Decimal),
    /// String
    Str(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Calendar date
    Date(NaiveDate),
    /// Time of day
    Time(NaiveTime),
    /// Date and time without zone
    DateTime(NaiveDateTime),
    /// UUID value
    Uuid(Uuid),
    /// Bit vector, most significant bit first
    Bits(Vec<bool>),
    /// Array of values (possibly nested for multi-dimensional arrays)
    Array(Vec<Value>),
    /// Range of values
    Range(Box<RangeValue>),
}

/// A range value: either the canonical empty range or a pair of bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RangeValue {
    /// The canonical empty range (`empty` literal).
    Empty,
    /// A pair of bounds; either side may be unbounded.
    Span {
        lower: RangeBound,
        upper: RangeBound,
    },
}

/// One bound of a range. A `None` value is an unbounded side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeBound {
    pub value: Option<Value>,
    pub inclusive: bool,
}

impl RangeBound {
    /// An inclusive bound at `value`.
    pub fn inclusive(value: Value) -> Self {
        Self {
            value: Some(value),
            inclusive: true,
        }
    }

    /// An exclusive bound at `value`.
    pub fn exclusive(value: Value) -> Self {
        Self {
            value: Some(value),
            inclusive: false,
        }
    }

    /// An unbounded side.
    pub fn unbounded() -> Self {
        Self {
            value: None,
            inclusive: false,
        }
    }
}

impl Value {
    /// Short tag for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::I8(_) => "INT8",
            Value::I16(_) => "INT16",
            Value::I32(_) => "INT32",
            Value::I64(_) => "INT64",
            Value::U64(_) => "UINT64",
            Value::F32(_) => "FLOAT32",
            Value::F64(_) => "FLOAT64",
            Value::Decimal(_) => "DECIMAL",
            Value::Str(_) => "STRING",
            Value::Bytes(_) => "BYTES",
            Value::Date(_) => "DATE",
            Value::Time(_) => "TIME",
            Value::DateTime(_) => "DATETIME",
            Value::Uuid(_) => "UUID",
            Value::Bits(_) => "BITS",
            Value::Array(_) => "ARRAY",
            Value::Range(_) => "RANGE",
        }
    }

    /// Whether this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Read any signed integer variant as `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I8(n) => Some(i64::from(*n)),
            Value::I16(n) => Some(i64::from(*n)),
            Value::I32(n) => Some(i64::from(*n)),
            Value::I64(n) => Some(*n),
            Value::U64(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::I8(n) => write!(f, "{}", n),
            Value::I16(n) => write!(f, "{}", n),
            Value::I32(n) => write!(f, "{}", n),
            Value::I64(n) => write!(f, "{}", n),
            Value::U64(n) => write!(f, "{}", n),
            Value::F32(n) => write!(f, "{}", n),
            Value::F64(n) => write!(f, "{}", n),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::Str(s) => write!(f, "'{}'", s),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Value::Date(d) => write!(f, "{}", d),
            Value::Time(t) => write!(f, "{}", t),
            Value::DateTime(dt) => write!(f, "{}", dt),
            Value::Uuid(u) => write!(f, "'{}'", u),
            Value::Bits(bits) => {
                for bit in bits {
                    write!(f, "{}", if *bit { '1' } else { '0' })?;
                }
                Ok(())
            }
            Value::Array(arr) => {
                write!(f, "[")?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Value::Range(r) => match r.as_ref() {
                RangeValue::Empty => write!(f, "empty"),
                RangeValue::Span { lower, upper } => {
                    write!(f, "{}", if lower.inclusive { '[' } else { '(' })?;
                    if let Some(v) = &lower.value {
                        write!(f, "{}", v)?;
                    }
                    write!(f, ",")?;
                    if let Some(v) = &upper.value {
                        write!(f, "{}", v)?;
                    }
                    write!(f, "{}", if upper.inclusive { ']' } else { ')' })
                }
            },
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i8> for Value {
    fn from(n: i8) -> Self {
        Value::I8(n)
    }
}

impl From<i16> for Value {
    fn from(n: i16) -> Self {
        Value::I16(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::I32(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::I64(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::U64(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::F32(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::F64(n)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveTime> for Value {
    fn from(t: NaiveTime) -> Self {
        Value::Time(t)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Value::Uuid(u)
    }
}

impl From<RangeValue> for Value {
    fn from(r: RangeValue) -> Self {
        Value::Range(Box::new(r))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
