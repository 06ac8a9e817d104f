//! Literal text parsing for composite values.
//!
//! Array and range column types travel as delimited text (`{1,2,3}`,
//! `[1,4)`, `empty`). The routines here are shared by the array/range codecs
//! and exposed for user-defined codecs; both directions are pure, and
//! serialization is the exact inverse of parsing up to canonical whitespace.

pub mod array;
pub mod range;

pub use array::{ArrayText, parse_array, serialize_array};
pub use range::{RangeText, TextBound, parse_range, serialize_range};

use nom::IResult;
use nom::error::{Error as NomError, ErrorKind};

/// Parse a double-quoted element, unescaping `\"` and `\\`.
///
/// Written by hand rather than with `escaped_transform` so that the empty
/// quoted string `""` parses.
pub(crate) fn quoted(input: &str) -> IResult<&str, String> {
    let mut chars = input.char_indices();
    match chars.next() {
        Some((_, '"')) => {}
        _ => return Err(nom::Err::Error(NomError::new(input, ErrorKind::Char))),
    }
    let mut out = String::new();
    let mut escaped = false;
    for (idx, c) in chars {
        if escaped {
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return Ok((&input[idx + 1..], out));
        } else {
            out.push(c);
        }
    }
    // Unterminated quote.
    Err(nom::Err::Error(NomError::new(input, ErrorKind::Char)))
}

/// Quote and escape an element that cannot travel bare.
pub(crate) fn quote_elem(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
