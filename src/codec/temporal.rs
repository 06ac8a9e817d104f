//! Date and time conversions.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::{BindValue, DataType};
use crate::error::{SqlError, SqlResult};
use crate::value::Value;

pub(crate) fn bind_date(data_type: &DataType, value: &Value) -> SqlResult<BindValue> {
    match value {
        Value::Date(d) => Ok(BindValue::Param(Value::Date(*d))),
        other => Err(SqlError::mismatch("DATE", data_type, other)),
    }
}

pub(crate) fn get_date(data_type: &DataType, raw: &Value) -> SqlResult<Value> {
    match raw {
        Value::Date(d) => Ok(Value::Date(*d)),
        Value::DateTime(dt) => Ok(Value::Date(dt.date())),
        Value::Str(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|_| SqlError::access("DATE", data_type, raw)),
        other => Err(SqlError::access("DATE", data_type, other)),
    }
}

pub(crate) fn bind_time(data_type: &DataType, value: &Value) -> SqlResult<BindValue> {
    match value {
        Value::Time(t) => Ok(BindValue::Param(Value::Time(*t))),
        other => Err(SqlError::mismatch("TIME", data_type, other)),
    }
}

pub(crate) fn get_time(data_type: &DataType, raw: &Value) -> SqlResult<Value> {
    match raw {
        Value::Time(t) => Ok(Value::Time(*t)),
        Value::Str(s) => NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
            .map(Value::Time)
            .map_err(|_| SqlError::access("TIME", data_type, raw)),
        other => Err(SqlError::access("TIME", data_type, other)),
    }
}

pub(crate) fn bind_datetime(data_type: &DataType, value: &Value) -> SqlResult<BindValue> {
    match value {
        Value::DateTime(dt) => Ok(BindValue::Param(Value::DateTime(*dt))),
        other => Err(SqlError::mismatch("DATETIME", data_type, other)),
    }
}

pub(crate) fn get_datetime(data_type: &DataType, raw: &Value) -> SqlResult<Value> {
    match raw {
        Value::DateTime(dt) => Ok(Value::DateTime(*dt)),
        Value::Str(s) => parse_datetime(s)
            .map(Value::DateTime)
            .ok_or_else(|| SqlError::access("DATETIME", data_type, raw)),
        other => Err(SqlError::access("DATETIME", data_type, other)),
    }
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}
