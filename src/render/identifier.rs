//! Identifier classification and quoting.

use super::RenderContext;
use crate::dialect::SqlWriter;
use crate::error::{SqlError, SqlResult};

/// How an identifier must travel in SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierClass {
    /// Safe bare.
    Simple,
    /// Needs delimiter quoting.
    Quoting,
    /// Needs delimiter quoting plus escape sequences.
    Escapes,
    /// Empty or contains NUL; cannot be rendered.
    Error,
}

/// Classify an identifier for a dialect writer.
///
/// Single left-to-right scan; NUL exits early with `Error`. Deterministic
/// for a given input and independent of call order.
pub fn classify_identifier(name: &str, writer: &dyn SqlWriter) -> IdentifierClass {
    if name.is_empty() {
        return IdentifierClass::Error;
    }
    let quote = writer.identifier_quote();
    let mut class = IdentifierClass::Simple;
    for (i, c) in name.chars().enumerate() {
        if c == '\0' {
            return IdentifierClass::Error;
        }
        if c == quote || c.is_control() {
            class = IdentifierClass::Escapes;
            continue;
        }
        let simple_char = c.is_ascii_lowercase()
            || c == '_'
            || (c.is_ascii_digit() && i > 0)
            || (c.is_ascii_uppercase() && !writer.folds_unquoted());
        if !simple_char && class == IdentifierClass::Simple {
            class = IdentifierClass::Quoting;
        }
    }
    if class == IdentifierClass::Simple && writer.is_reserved(name) {
        return IdentifierClass::Quoting;
    }
    class
}

/// Write one identifier occurrence, applying quoting/escaping exactly once.
pub(crate) fn write_identifier(ctx: &mut RenderContext, name: &str) -> SqlResult<()> {
    match classify_identifier(name, ctx.writer.as_ref()) {
        IdentifierClass::Simple => {
            ctx.push(name);
            Ok(())
        }
        IdentifierClass::Quoting => {
            let quote = ctx.writer.identifier_quote();
            ctx.push_char(quote);
            ctx.push(name);
            ctx.push_char(quote);
            Ok(())
        }
        IdentifierClass::Escapes => {
            let quote = ctx.writer.identifier_quote();
            ctx.push_char(quote);
            for c in name.chars() {
                if c == quote {
                    // The delimiter is escaped by doubling.
                    ctx.push_char(quote);
                }
                ctx.push_char(c);
            }
            ctx.push_char(quote);
            Ok(())
        }
        IdentifierClass::Error => Err(SqlError::InvalidIdentifier {
            name: name.to_string(),
        }),
    }
}
