//! # Whitespace Handling
//!
//! Whitespace and line breaks are kept as spans of their own so the rewriter can
//! reason about line boundaries and indentation.
//!
//! * [`parse_whitespace`]: runs of spaces, tabs and form feeds
//! * [`parse_newline`]: `\r\n`, `\n`, or a lone `\r`

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    error::context,
};

use super::token::ParserResult;

pub fn is_inline_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\x0c'
}

/// Parses a run of inline whitespace, returning the matched slice.
///
/// # Examples
///
/// ```
/// # use decomment::tokenizer::whitespace::parse_whitespace;
/// let (rest, ws) = parse_whitespace("   hello").unwrap();
/// assert_eq!(ws, "   ");
/// assert_eq!(rest, "hello");
/// ```
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_whitespace(input: &str) -> ParserResult<&str> {
    context("whitespace expected", take_while1(is_inline_whitespace))(input)
}

/// Parses one line terminator. `\r\n` is tried first so it stays a single span.
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_newline(input: &str) -> ParserResult<&str> {
    context("newline expected", alt((tag("\r\n"), tag("\n"), tag("\r"))))(input)
}
