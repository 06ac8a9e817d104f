//! Array codec: delegates the text form to the shared literal parser.

use std::sync::Arc;

use super::{BindValue, DataType, MappingEnv, MappingType};
use crate::error::{SqlError, SqlResult};
use crate::text::{ArrayText, parse_array, serialize_array};
use crate::value::Value;

/// Array element delimiter for every supported element type.
const DELIM: char = ',';

pub(crate) fn bind_array(
    element: &Arc<MappingType>,
    data_type: &DataType,
    env: &MappingEnv,
    value: &Value,
) -> SqlResult<BindValue> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(SqlError::mismatch("ARRAY", data_type, other)),
    };
    let tree = to_text_tree(element, env, items)?;
    let text = serialize_array(&tree, DELIM, &|s: &String| s.clone());
    Ok(BindValue::Param(Value::Str(text)))
}

fn to_text_tree(
    element: &Arc<MappingType>,
    env: &MappingEnv,
    items: &[Value],
) -> SqlResult<ArrayText<String>> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        out.push(match item {
            Value::Null => ArrayText::Null,
            Value::Array(nested) => to_text_tree(element, env, nested)?,
            leaf => ArrayText::Leaf(element.leaf_text(env, leaf)?),
        });
    }
    Ok(ArrayText::List(out))
}

pub(crate) fn get_array(
    element: &Arc<MappingType>,
    data_type: &DataType,
    env: &MappingEnv,
    raw: &Value,
) -> SqlResult<Value> {
    let text = match raw {
        Value::Str(s) => s,
        Value::Array(_) => return Ok(raw.clone()),
        other => return Err(SqlError::access("ARRAY TEXT", data_type, other)),
    };
    let tree = parse_array(text, DELIM, &|t: &str| element.parse_leaf(env, t))?;
    Ok(from_text_tree(&tree))
}

fn from_text_tree(tree: &ArrayText<Value>) -> Value {
    match tree {
        ArrayText::Null => Value::Null,
        ArrayText::Leaf(v) => v.clone(),
        ArrayText::List(items) => Value::Array(items.iter().map(from_text_tree).collect()),
    }
}
