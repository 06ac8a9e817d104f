//! Range codec: delegates the text form to the shared literal parser.

use std::sync::Arc;

use super::{BindValue, DataType, MappingEnv, MappingType};
use crate::error::{SqlError, SqlResult};
use crate::text::{RangeText, TextBound, parse_range, serialize_range};
use crate::value::{RangeBound, RangeValue, Value};

pub(crate) fn bind_range(
    element: &Arc<MappingType>,
    data_type: &DataType,
    env: &MappingEnv,
    value: &Value,
) -> SqlResult<BindValue> {
    let range = match value {
        Value::Range(r) => r.as_ref(),
        other => return Err(SqlError::mismatch("RANGE", data_type, other)),
    };
    let tree = match range {
        RangeValue::Empty => RangeText::Empty,
        RangeValue::Span { lower, upper } => RangeText::Span {
            lower: to_text_bound(element, env, lower)?,
            upper: to_text_bound(element, env, upper)?,
        },
    };
    let text = serialize_range(&tree, &|s: &String| s.clone());
    Ok(BindValue::Param(Value::Str(text)))
}

fn to_text_bound(
    element: &Arc<MappingType>,
    env: &MappingEnv,
    bound: &RangeBound,
) -> SqlResult<TextBound<String>> {
    let value = match &bound.value {
        Some(v) => Some(element.leaf_text(env, v)?),
        None => None,
    };
    Ok(TextBound {
        value,
        inclusive: bound.inclusive,
    })
}

pub(crate) fn get_range(
    element: &Arc<MappingType>,
    data_type: &DataType,
    env: &MappingEnv,
    raw: &Value,
) -> SqlResult<Value> {
    let text = match raw {
        Value::Str(s) => s,
        Value::Range(_) => return Ok(raw.clone()),
        other => return Err(SqlError::access("RANGE TEXT", data_type, other)),
    };
    let tree = parse_range(text, &|t: &str| element.parse_leaf(env, t))?;
    let range = match tree {
        RangeText::Empty => RangeValue::Empty,
        RangeText::Span { lower, upper } => RangeValue::Span {
            lower: RangeBound {
                value: lower.value,
                inclusive: lower.inclusive,
            },
            upper: RangeBound {
                value: upper.value,
                inclusive: upper.inclusive,
            },
        },
    };
    Ok(Value::Range(Box::new(range)))
}
