//! Boolean conversions, including the legacy single-character Y/N form.

use super::{BindValue, DataType};
use crate::error::{SqlError, SqlResult};
use crate::value::Value;

pub(crate) fn bind_bool(data_type: &DataType, value: &Value) -> SqlResult<BindValue> {
    match value {
        Value::Bool(b) => Ok(BindValue::Param(Value::Bool(*b))),
        other => Err(SqlError::mismatch("BOOLEAN", data_type, other)),
    }
}

pub(crate) fn get_bool(data_type: &DataType, raw: &Value) -> SqlResult<Value> {
    match raw {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        // MySQL BOOLEAN columns come back as TINYINT 0/1.
        Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) => {
            match raw.as_i64().unwrap_or(0) {
                0 => Ok(Value::Bool(false)),
                1 => Ok(Value::Bool(true)),
                _ => Err(SqlError::access("BOOLEAN", data_type, raw)),
            }
        }
        other => Err(SqlError::access("BOOLEAN", data_type, other)),
    }
}

pub(crate) fn bind_yes_no(data_type: &DataType, value: &Value) -> SqlResult<BindValue> {
    match value {
        Value::Bool(b) => Ok(BindValue::Param(Value::Str(
            (if *b { "Y" } else { "N" }).to_string(),
        ))),
        other => Err(SqlError::mismatch("BOOLEAN", data_type, other)),
    }
}

pub(crate) fn get_yes_no(data_type: &DataType, raw: &Value) -> SqlResult<Value> {
    match raw {
        Value::Str(s) if s == "Y" || s == "y" => Ok(Value::Bool(true)),
        Value::Str(s) if s == "N" || s == "n" => Ok(Value::Bool(false)),
        other => Err(SqlError::access("Y/N CHAR", data_type, other)),
    }
}
