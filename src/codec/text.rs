//! Text, binary, and UUID conversions with per-tier length ceilings.

use uuid::Uuid;

use super::{BindValue, DataType, TextWidth};
use crate::error::{SqlError, SqlResult};
use crate::value::Value;

pub(crate) fn bind_text(
    width: TextWidth,
    data_type: &DataType,
    value: &Value,
) -> SqlResult<BindValue> {
    match value {
        Value::Str(s) => {
            check_len(s.len() as u64, width, data_type, value)?;
            Ok(BindValue::Param(Value::Str(s.clone())))
        }
        other => Err(SqlError::mismatch("STRING", data_type, other)),
    }
}

pub(crate) fn get_text(data_type: &DataType, raw: &Value) -> SqlResult<Value> {
    match raw {
        Value::Str(s) => Ok(Value::Str(s.clone())),
        other => Err(SqlError::access("STRING", data_type, other)),
    }
}

pub(crate) fn bind_binary(
    width: TextWidth,
    data_type: &DataType,
    value: &Value,
) -> SqlResult<BindValue> {
    match value {
        Value::Bytes(b) => {
            check_len(b.len() as u64, width, data_type, value)?;
            Ok(BindValue::Param(Value::Bytes(b.clone())))
        }
        other => Err(SqlError::mismatch("BYTES", data_type, other)),
    }
}

pub(crate) fn get_binary(data_type: &DataType, raw: &Value) -> SqlResult<Value> {
    match raw {
        Value::Bytes(b) => Ok(Value::Bytes(b.clone())),
        other => Err(SqlError::access("BYTES", data_type, other)),
    }
}

fn check_len(len: u64, width: TextWidth, data_type: &DataType, value: &Value) -> SqlResult<()> {
    if len > width.max_len() {
        return Err(SqlError::out_of_range(
            value,
            format!("{} bytes", width.max_len()),
            data_type,
        ));
    }
    Ok(())
}

pub(crate) fn bind_uuid(data_type: &DataType, value: &Value) -> SqlResult<BindValue> {
    match value {
        Value::Uuid(u) => Ok(BindValue::Param(Value::Uuid(*u))),
        Value::Str(s) => match Uuid::parse_str(s) {
            Ok(u) => Ok(BindValue::Param(Value::Uuid(u))),
            Err(_) => Err(SqlError::mismatch("UUID", data_type, value)),
        },
        other => Err(SqlError::mismatch("UUID", data_type, other)),
    }
}

pub(crate) fn get_uuid(data_type: &DataType, raw: &Value) -> SqlResult<Value> {
    match raw {
        Value::Uuid(u) => Ok(Value::Uuid(*u)),
        Value::Str(s) => Uuid::parse_str(s)
            .map(Value::Uuid)
            .map_err(|_| SqlError::access("UUID", data_type, raw)),
        Value::Bytes(b) => Uuid::from_slice(b)
            .map(Value::Uuid)
            .map_err(|_| SqlError::access("UUID", data_type, raw)),
        other => Err(SqlError::access("UUID", data_type, other)),
    }
}
