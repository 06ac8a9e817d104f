//! Integer, float, decimal, and bit-field conversions.

use rust_decimal::Decimal;

use super::{BindValue, DataType, FloatWidth, IntWidth};
use crate::error::{SqlError, SqlResult};
use crate::value::Value;

pub(crate) fn bind_int(width: IntWidth, data_type: &DataType, value: &Value) -> SqlResult<BindValue> {
    let n = value
        .as_i64()
        .ok_or_else(|| SqlError::mismatch("INTEGER", data_type, value))?;
    Ok(BindValue::Param(narrow_int(width, n, data_type, value)?))
}

pub(crate) fn get_int(width: IntWidth, data_type: &DataType, raw: &Value) -> SqlResult<Value> {
    let n = raw
        .as_i64()
        .ok_or_else(|| SqlError::access("INTEGER", data_type, raw))?;
    narrow_int(width, n, data_type, raw)
}

/// Range-check `n` against the declared width and normalize to its variant.
fn narrow_int(width: IntWidth, n: i64, data_type: &DataType, value: &Value) -> SqlResult<Value> {
    let out_of_range = |min: i64, max: i64| {
        SqlError::out_of_range(value, format!("{}..={}", min, max), data_type)
    };
    match width {
        IntWidth::I8 => match i8::try_from(n) {
            Ok(v) => Ok(Value::I8(v)),
            Err(_) => Err(out_of_range(i64::from(i8::MIN), i64::from(i8::MAX))),
        },
        IntWidth::I16 => match i16::try_from(n) {
            Ok(v) => Ok(Value::I16(v)),
            Err(_) => Err(out_of_range(i64::from(i16::MIN), i64::from(i16::MAX))),
        },
        IntWidth::I32 => match i32::try_from(n) {
            Ok(v) => Ok(Value::I32(v)),
            Err(_) => Err(out_of_range(i64::from(i32::MIN), i64::from(i32::MAX))),
        },
        IntWidth::I64 => Ok(Value::I64(n)),
    }
}

pub(crate) fn bind_uint(data_type: &DataType, value: &Value) -> SqlResult<BindValue> {
    Ok(BindValue::Param(Value::U64(to_u64(data_type, value)?)))
}

pub(crate) fn get_uint(data_type: &DataType, raw: &Value) -> SqlResult<Value> {
    match raw {
        Value::U64(n) => Ok(Value::U64(*n)),
        Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) => {
            Ok(Value::U64(to_u64(data_type, raw)?))
        }
        other => Err(SqlError::access("UNSIGNED INTEGER", data_type, other)),
    }
}

fn to_u64(data_type: &DataType, value: &Value) -> SqlResult<u64> {
    match value {
        Value::U64(n) => Ok(*n),
        Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) => {
            let n = value.as_i64().unwrap_or(0);
            u64::try_from(n)
                .map_err(|_| SqlError::out_of_range(value, "0..=u64::MAX", data_type))
        }
        other => Err(SqlError::mismatch("UNSIGNED INTEGER", data_type, other)),
    }
}

pub(crate) fn bind_float(
    width: FloatWidth,
    data_type: &DataType,
    value: &Value,
) -> SqlResult<BindValue> {
    let v = match (width, value) {
        (FloatWidth::F32, Value::F32(n)) => Value::F32(*n),
        (FloatWidth::F64, Value::F64(n)) => Value::F64(*n),
        (FloatWidth::F64, Value::F32(n)) => Value::F64(f64::from(*n)),
        (FloatWidth::F32, other) => return Err(SqlError::mismatch("FLOAT32", data_type, other)),
        (FloatWidth::F64, other) => return Err(SqlError::mismatch("FLOAT64", data_type, other)),
    };
    Ok(BindValue::Param(v))
}

pub(crate) fn get_float(width: FloatWidth, data_type: &DataType, raw: &Value) -> SqlResult<Value> {
    match (width, raw) {
        (FloatWidth::F32, Value::F32(n)) => Ok(Value::F32(*n)),
        (FloatWidth::F64, Value::F64(n)) => Ok(Value::F64(*n)),
        (FloatWidth::F64, Value::F32(n)) => Ok(Value::F64(f64::from(*n))),
        (FloatWidth::F32, other) => Err(SqlError::access("FLOAT32", data_type, other)),
        (FloatWidth::F64, other) => Err(SqlError::access("FLOAT64", data_type, other)),
    }
}

pub(crate) fn bind_decimal(data_type: &DataType, value: &Value) -> SqlResult<BindValue> {
    let d = match value {
        Value::Decimal(d) => *d,
        Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) => {
            Decimal::from(value.as_i64().unwrap_or(0))
        }
        Value::U64(n) => Decimal::from(*n),
        other => return Err(SqlError::mismatch("DECIMAL", data_type, other)),
    };
    Ok(BindValue::Param(Value::Decimal(d)))
}

pub(crate) fn get_decimal(data_type: &DataType, raw: &Value) -> SqlResult<Value> {
    match raw {
        Value::Decimal(d) => Ok(Value::Decimal(*d)),
        Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) => {
            Ok(Value::Decimal(Decimal::from(raw.as_i64().unwrap_or(0))))
        }
        Value::Str(s) => s
            .parse::<Decimal>()
            .map(Value::Decimal)
            .map_err(|_| SqlError::access("DECIMAL", data_type, raw)),
        other => Err(SqlError::access("DECIMAL", data_type, other)),
    }
}

/// Normalize any accepted bit-field shape to an unsigned 64-bit value and
/// check it against the declared bit length.
pub(crate) fn bind_bit(bits: u8, data_type: &DataType, value: &Value) -> SqlResult<BindValue> {
    let n = match value {
        Value::U64(n) => *n,
        Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) => {
            let signed = value.as_i64().unwrap_or(0);
            u64::try_from(signed)
                .map_err(|_| SqlError::out_of_range(value, "0..", data_type))?
        }
        Value::Bits(vec) => fold_bits(vec, data_type, value)?,
        Value::Str(s) => {
            if s.is_empty() || !s.bytes().all(|b| b == b'0' || b == b'1') {
                return Err(SqlError::mismatch("BINARY DIGIT STRING", data_type, value));
            }
            if s.len() > 64 {
                return Err(SqlError::out_of_range(value, "64 bits", data_type));
            }
            u64::from_str_radix(s, 2)
                .map_err(|_| SqlError::mismatch("BINARY DIGIT STRING", data_type, value))?
        }
        other => return Err(SqlError::mismatch("BIT FIELD", data_type, other)),
    };
    check_bit_len(bits, n, data_type, value)?;
    Ok(BindValue::Param(Value::U64(n)))
}

pub(crate) fn get_bit(bits: u8, data_type: &DataType, raw: &Value) -> SqlResult<Value> {
    let n = match raw {
        Value::U64(n) => *n,
        Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) => {
            let signed = raw.as_i64().unwrap_or(0);
            u64::try_from(signed).map_err(|_| SqlError::access("BIT FIELD", data_type, raw))?
        }
        // MySQL drivers hand BIT columns back as big-endian bytes.
        Value::Bytes(b) => {
            if b.len() > 8 {
                return Err(SqlError::access("BIT FIELD", data_type, raw));
            }
            b.iter().fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
        }
        Value::Str(s) if !s.is_empty() && s.bytes().all(|b| b == b'0' || b == b'1') => {
            if s.len() > 64 {
                return Err(SqlError::access("BIT FIELD", data_type, raw));
            }
            u64::from_str_radix(s, 2).map_err(|_| SqlError::access("BIT FIELD", data_type, raw))?
        }
        other => return Err(SqlError::access("BIT FIELD", data_type, other)),
    };
    check_bit_len(bits, n, data_type, raw)?;
    Ok(Value::U64(n))
}

fn fold_bits(vec: &[bool], data_type: &DataType, value: &Value) -> SqlResult<u64> {
    if vec.len() > 64 {
        return Err(SqlError::out_of_range(value, "64 bits", data_type));
    }
    Ok(vec.iter().fold(0u64, |acc, bit| (acc << 1) | u64::from(*bit)))
}

fn check_bit_len(bits: u8, n: u64, data_type: &DataType, value: &Value) -> SqlResult<()> {
    if bits < 64 && n >= (1u64 << bits) {
        return Err(SqlError::out_of_range(
            value,
            format!("{} bits", bits),
            data_type,
        ));
    }
    Ok(())
}

/// Minimal binary-digit spelling of a bit-field value.
pub(crate) fn bit_digits(n: u64) -> String {
    format!("{:b}", n)
}
