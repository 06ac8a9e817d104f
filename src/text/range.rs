//! Range literal parsing and serialization.

use nom::IResult;
use nom::character::complete::multispace0;
use nom::error::{Error as NomError, ErrorKind};

use super::{quote_elem, quoted};
use crate::error::{SqlError, SqlResult};

/// Parsed range literal.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeText<T> {
    /// The canonical `empty` sentinel.
    Empty,
    /// A bound pair.
    Span {
        lower: TextBound<T>,
        upper: TextBound<T>,
    },
}

/// One parsed bound. `value: None` is an unbounded side.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBound<T> {
    pub value: Option<T>,
    pub inclusive: bool,
}

/// Scan one bound's text: quoted, or bare up to the delimiter/closer.
fn bound_text(input: &str) -> IResult<&str, Option<String>> {
    let (input, _) = multispace0(input)?;
    if input.starts_with('"') {
        let (rest, s) = quoted(input)?;
        return Ok((rest, Some(s)));
    }
    let end = input
        .find(|c: char| c == ',' || c == ']' || c == ')' || c == '"' || c.is_whitespace())
        .unwrap_or(input.len());
    if end == 0 {
        return Ok((input, None));
    }
    Ok((&input[end..], Some(input[..end].to_string())))
}

fn marker(input: &str, open: bool) -> IResult<&str, bool> {
    let mut chars = input.chars();
    let inclusive = match (open, chars.next()) {
        (true, Some('[')) => true,
        (true, Some('(')) => false,
        (false, Some(']')) => true,
        (false, Some(')')) => false,
        _ => return Err(nom::Err::Error(NomError::new(input, ErrorKind::Char))),
    };
    Ok((chars.as_str(), inclusive))
}

/// Parse a range literal.
///
/// Recognizes the `empty` sentinel; otherwise expects
/// `[`/`(` lower `,` upper `]`/`)` with inclusive (`[` `]`) or exclusive
/// (`(` `)`) bound markers. An absent bound is unbounded. Bound text may be
/// double-quoted to carry commas or whitespace.
pub fn parse_range<T, F>(text: &str, leaf: &F) -> SqlResult<RangeText<T>>
where
    F: Fn(&str) -> SqlResult<T>,
{
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("empty") {
        return Ok(RangeText::Empty);
    }
    let parsed: IResult<&str, (bool, Option<String>, Option<String>, bool)> = (|| {
        let (rest, lower_inclusive) = marker(trimmed, true)?;
        let (rest, lower) = bound_text(rest)?;
        let (rest, _) = multispace0(rest)?;
        let (rest, _) = nom::character::complete::char(',')(rest)?;
        let (rest, upper) = bound_text(rest)?;
        let (rest, _) = multispace0(rest)?;
        let (rest, upper_inclusive) = marker(rest, false)?;
        Ok((rest, (lower_inclusive, lower, upper, upper_inclusive)))
    })();
    let (rest, (lower_inclusive, lower, upper, upper_inclusive)) = parsed
        .map_err(|_| SqlError::malformed(text, "expected empty or [|( bound , bound )|]"))?;
    if !rest.trim().is_empty() {
        return Err(SqlError::malformed(text, "trailing text after range"));
    }
    let lower = match lower {
        Some(s) => Some(leaf(&s)?),
        None => None,
    };
    let upper = match upper {
        Some(s) => Some(leaf(&s)?),
        None => None,
    };
    Ok(RangeText::Span {
        lower: TextBound {
            value: lower,
            inclusive: lower_inclusive,
        },
        upper: TextBound {
            value: upper,
            inclusive: upper_inclusive,
        },
    })
}

/// Serialize a range back to literal text. Exact inverse of [`parse_range`]
/// up to canonical whitespace; bound markers are preserved as given, never
/// canonicalized to half-open form.
pub fn serialize_range<T, F>(range: &RangeText<T>, write_leaf: &F) -> String
where
    F: Fn(&T) -> String,
{
    match range {
        RangeText::Empty => "empty".to_string(),
        RangeText::Span { lower, upper } => {
            let mut out = String::new();
            out.push(if lower.inclusive { '[' } else { '(' });
            if let Some(v) = &lower.value {
                push_bound(&write_leaf(v), &mut out);
            }
            out.push(',');
            if let Some(v) = &upper.value {
                push_bound(&write_leaf(v), &mut out);
            }
            out.push(if upper.inclusive { ']' } else { ')' });
            out
        }
    }
}

fn push_bound(text: &str, out: &mut String) {
    let needs_quoting = text.is_empty()
        || text.chars().any(|c| {
            matches!(c, ',' | '[' | ']' | '(' | ')' | '"' | '\\') || c.is_whitespace()
        });
    if needs_quoting {
        out.push_str(&quote_elem(text));
    } else {
        out.push_str(text);
    }
}
