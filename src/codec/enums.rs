//! Enumeration conversions: by symbolic name, or by a declared text.
//!
//! The two families are interchangeable at the call site; both accept the
//! domain label in `before_bind` and produce it again in `after_get`. Only
//! the stored column text differs.

use super::{BindValue, DataType, EnumDef};
use crate::error::{SqlError, SqlResult};
use crate::value::Value;

pub(crate) fn bind_by_name(
    def: &EnumDef,
    data_type: &DataType,
    value: &Value,
) -> SqlResult<BindValue> {
    let variant = lookup_label(def, data_type, value)?;
    Ok(BindValue::Param(Value::Str(variant.label.clone())))
}

pub(crate) fn get_by_name(def: &EnumDef, data_type: &DataType, raw: &Value) -> SqlResult<Value> {
    match raw {
        Value::Str(s) => match def.by_label(s) {
            Some(v) => Ok(Value::Str(v.label.clone())),
            None => Err(SqlError::access("ENUM LABEL", data_type, raw)),
        },
        other => Err(SqlError::access("ENUM LABEL", data_type, other)),
    }
}

pub(crate) fn bind_by_text(
    def: &EnumDef,
    data_type: &DataType,
    value: &Value,
) -> SqlResult<BindValue> {
    let variant = lookup_label(def, data_type, value)?;
    Ok(BindValue::Param(Value::Str(variant.text.clone())))
}

pub(crate) fn get_by_text(def: &EnumDef, data_type: &DataType, raw: &Value) -> SqlResult<Value> {
    match raw {
        Value::Str(s) => match def.by_text(s) {
            Some(v) => Ok(Value::Str(v.label.clone())),
            None => Err(SqlError::access("ENUM TEXT", data_type, raw)),
        },
        other => Err(SqlError::access("ENUM TEXT", data_type, other)),
    }
}

fn lookup_label<'a>(
    def: &'a EnumDef,
    data_type: &DataType,
    value: &Value,
) -> SqlResult<&'a super::EnumVariant> {
    let label = match value {
        Value::Str(s) => s,
        other => return Err(SqlError::mismatch("ENUM LABEL", data_type, other)),
    };
    def.by_label(label).ok_or_else(|| {
        SqlError::out_of_range(value, format!("enum {}", def.name), data_type)
    })
}
