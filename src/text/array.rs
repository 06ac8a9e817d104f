//! Array literal parsing and serialization.

use nom::IResult;
use nom::character::complete::{char as tok, multispace0};
use nom::error::{Error as NomError, ErrorKind};

use super::{quote_elem, quoted};
use crate::error::{SqlError, SqlResult};

/// Parsed array literal. The outer node is always a `List`; nested lists are
/// further dimensions.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayText<T> {
    /// The unquoted `NULL` element sentinel.
    Null,
    /// A leaf element produced by the caller's element parser.
    Leaf(T),
    /// One array dimension.
    List(Vec<ArrayText<T>>),
}

impl<T> ArrayText<T> {
    /// Number of elements in the outermost dimension; zero for leaves.
    pub fn len(&self) -> usize {
        match self {
            ArrayText::List(items) => items.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Raw structure before leaves are interpreted.
enum RawElem<'a> {
    List(Vec<RawElem<'a>>),
    Quoted(String),
    Bare(&'a str),
}

fn raw_array(input: &str, delim: char) -> IResult<&str, RawElem<'_>> {
    let (input, _) = tok('{')(input)?;
    let (mut input, _) = multispace0(input)?;
    let mut items = Vec::new();
    if let Ok((rest, _)) = tok::<_, NomError<&str>>('}')(input) {
        return Ok((rest, RawElem::List(items)));
    }
    loop {
        let (rest, elem) = raw_elem(input, delim)?;
        items.push(elem);
        let (rest, _) = multispace0(rest)?;
        if let Ok((rest, _)) = tok::<_, NomError<&str>>(delim)(rest) {
            let (rest, _) = multispace0(rest)?;
            input = rest;
            continue;
        }
        let (rest, _) = tok('}')(rest)?;
        return Ok((rest, RawElem::List(items)));
    }
}

fn raw_elem<'a>(input: &'a str, delim: char) -> IResult<&'a str, RawElem<'a>> {
    if input.starts_with('{') {
        return raw_array(input, delim);
    }
    if input.starts_with('"') {
        let (rest, s) = quoted(input)?;
        return Ok((rest, RawElem::Quoted(s)));
    }
    let end = input
        .find(|c: char| c == delim || c == '{' || c == '}' || c == '"' || c == '\\' || c.is_whitespace())
        .unwrap_or(input.len());
    if end == 0 {
        return Err(nom::Err::Error(NomError::new(input, ErrorKind::TakeWhile1)));
    }
    Ok((&input[end..], RawElem::Bare(&input[..end])))
}

fn interpret<T, F>(raw: RawElem<'_>, leaf: &F) -> SqlResult<ArrayText<T>>
where
    F: Fn(&str) -> SqlResult<T>,
{
    match raw {
        RawElem::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(interpret(item, leaf)?);
            }
            Ok(ArrayText::List(out))
        }
        // A quoted NULL is the literal string, not the sentinel.
        RawElem::Quoted(s) => Ok(ArrayText::Leaf(leaf(&s)?)),
        RawElem::Bare(s) if s.eq_ignore_ascii_case("null") => Ok(ArrayText::Null),
        RawElem::Bare(s) => Ok(ArrayText::Leaf(leaf(s)?)),
    }
}

/// Parse a brace-delimited array literal.
///
/// `delim` separates top-level elements (`,` for every type except a few
/// geometric ones); nested braces open further dimensions; double-quoted
/// elements may contain the delimiter, braces, and backslash escapes. The
/// unquoted word `NULL` (any case) is the null element.
///
/// The whole input must be consumed; unbalanced or missing braces and stray
/// trailing text fail with `MalformedLiteral`.
pub fn parse_array<T, F>(text: &str, delim: char, leaf: &F) -> SqlResult<ArrayText<T>>
where
    F: Fn(&str) -> SqlResult<T>,
{
    let trimmed = text.trim();
    if !trimmed.starts_with('{') {
        return Err(SqlError::malformed(text, "array literal must start with '{'"));
    }
    let (rest, raw) = raw_array(trimmed, delim)
        .map_err(|_| SqlError::malformed(text, "unbalanced braces or bad element"))?;
    if !rest.trim().is_empty() {
        return Err(SqlError::malformed(text, "trailing text after closing '}'"));
    }
    interpret(raw, leaf)
}

/// Serialize an array back to literal text. Exact inverse of [`parse_array`]
/// up to canonical whitespace: elements are joined by the bare delimiter.
pub fn serialize_array<T, F>(array: &ArrayText<T>, delim: char, write_leaf: &F) -> String
where
    F: Fn(&T) -> String,
{
    let mut out = String::new();
    write_elem(array, delim, write_leaf, &mut out);
    out
}

fn write_elem<T, F>(elem: &ArrayText<T>, delim: char, write_leaf: &F, out: &mut String)
where
    F: Fn(&T) -> String,
{
    match elem {
        ArrayText::Null => out.push_str("NULL"),
        ArrayText::Leaf(t) => {
            let text = write_leaf(t);
            if needs_quoting(&text, delim) {
                out.push_str(&quote_elem(&text));
            } else {
                out.push_str(&text);
            }
        }
        ArrayText::List(items) => {
            out.push('{');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(delim);
                }
                write_elem(item, delim, write_leaf, out);
            }
            out.push('}');
        }
    }
}

fn needs_quoting(text: &str, delim: char) -> bool {
    text.is_empty()
        || text.eq_ignore_ascii_case("null")
        || text.chars().any(|c| {
            c == delim || c == '{' || c == '}' || c == '"' || c == '\\' || c.is_whitespace()
        })
}
