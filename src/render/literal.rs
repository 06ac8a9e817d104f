//! Literal rendering: dispatch on the resolved data type, validating the
//! value's runtime shape through the codec before any text is emitted.

use super::RenderContext;
use crate::codec::{BindValue, CodecKey, DataType, MappingType, codec_for, numeric};
use crate::dialect::Database;
use crate::error::{SqlError, SqlResult};
use crate::value::Value;

/// Write one literal occurrence.
///
/// `typed_context` suppresses type annotations inside contexts that already
/// carry a type (a comparison against a field, an insert value list), so
/// annotated renders do not pile up redundant casts.
pub(crate) fn write_literal(
    ctx: &mut RenderContext,
    key: &CodecKey,
    value: &Value,
    typed_context: bool,
) -> SqlResult<()> {
    let codec = codec_for(key);
    let data_type = codec.map(&ctx.env.server)?;
    let bound = codec.before_bind(&data_type, &ctx.env, value)?;
    let annotate = ctx.annotate && !typed_context;
    match bound {
        // A codec that insists on literal text supplies it ready to embed.
        BindValue::Literal(text) => {
            ctx.push(&text);
            Ok(())
        }
        BindValue::Param(v) => write_bound_literal(ctx, &codec, &data_type, &v, annotate),
    }
}

fn write_bound_literal(
    ctx: &mut RenderContext,
    codec: &MappingType,
    data_type: &DataType,
    value: &Value,
    annotate: bool,
) -> SqlResult<()> {
    // Families whose literal grammar is not determined by the value alone.
    match codec {
        MappingType::Bit { .. } => {
            let n = match value {
                Value::U64(n) => *n,
                other => return Err(SqlError::mismatch("BIT FIELD", data_type, other)),
            };
            let text = ctx.writer.bits_literal(&numeric::bit_digits(n));
            ctx.push(&text);
            return Ok(());
        }
        MappingType::Array { .. } | MappingType::Range { .. } => {
            let text = match value {
                Value::Str(s) => ctx.writer.string_literal(s),
                other => return Err(SqlError::mismatch("COMPOSITE TEXT", data_type, other)),
            };
            ctx.push(&text);
            if annotate && data_type.database() == Database::Postgres {
                ctx.push("::");
                ctx.push(data_type.type_name());
            }
            return Ok(());
        }
        _ => {}
    }
    match value {
        Value::Null => ctx.push("NULL"),
        Value::Bool(b) => {
            let text = ctx.writer.bool_literal(*b);
            ctx.push(text);
        }
        Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) | Value::U64(_) => {
            ctx.push(&value.to_string());
        }
        Value::F32(n) => ctx.push(&n.to_string()),
        Value::F64(n) => ctx.push(&n.to_string()),
        Value::Decimal(d) => ctx.push(&d.to_string()),
        Value::Str(s) => {
            let text = ctx.writer.string_literal(s);
            ctx.push(&text);
        }
        Value::Bytes(b) => {
            let text = ctx.writer.bytes_literal(b);
            ctx.push(&text);
        }
        Value::Date(d) => {
            if annotate {
                ctx.push("DATE ");
            }
            let text = ctx.writer.string_literal(&d.format("%Y-%m-%d").to_string());
            ctx.push(&text);
        }
        Value::Time(t) => {
            if annotate {
                ctx.push("TIME ");
            }
            let text = ctx
                .writer
                .string_literal(&t.format("%H:%M:%S%.f").to_string());
            ctx.push(&text);
        }
        Value::DateTime(dt) => {
            if annotate {
                ctx.push("TIMESTAMP ");
            }
            let text = ctx
                .writer
                .string_literal(&dt.format("%Y-%m-%d %H:%M:%S%.f").to_string());
            ctx.push(&text);
        }
        Value::Uuid(u) => {
            if annotate && data_type.database() == Database::Postgres {
                ctx.push("UUID ");
            }
            let text = ctx.writer.string_literal(&u.to_string());
            ctx.push(&text);
        }
        other => return Err(SqlError::mismatch("SCALAR", data_type, other)),
    }
    Ok(())
}
