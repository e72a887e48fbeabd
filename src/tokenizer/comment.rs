//! # Comment Handling
//!
//! Comment delimiters come from the [`LanguageProfile`](crate::profile::LanguageProfile),
//! so both parsers take the delimiter text as an argument.
//!
//! * **Line comments** run up to the next line terminator, which is not consumed.
//! * **Block comments** run up to the first closing delimiter. Nesting is not
//!   recognized: `/* a /* b */` ends at the first `*/`.
//!
//! Once a block comment has opened, a missing close is a hard failure
//! (`nom::Err::Failure`) so the tokenizer reports it instead of backtracking.

use nom::{
    bytes::complete::{tag, take_till, take_until},
    combinator::{cut, recognize},
    error::context,
    sequence::{pair, preceded},
};

use super::token::ParserResult;

/// Parses a line comment introduced by `prefix`.
///
/// # Examples
///
/// ```
/// # use decomment::tokenizer::comment::parse_line_comment;
/// let (rest, comment) = parse_line_comment("# note\nx = 1", "#").unwrap();
/// assert_eq!(comment, "# note");
/// assert_eq!(rest, "\nx = 1");
/// ```
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_line_comment<'a>(input: &'a str, prefix: &str) -> ParserResult<'a, &'a str> {
    context(
        "line comment",
        recognize(pair(tag(prefix), take_till(|c: char| c == '\n' || c == '\r'))),
    )(input)
}

/// Parses a block comment delimited by `open` and `close`, delimiters included.
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_block_comment<'a>(
    input: &'a str,
    open: &str,
    close: &str,
) -> ParserResult<'a, &'a str> {
    context(
        "block comment",
        recognize(preceded(
            tag(open),
            cut(context(
                "block comment terminator",
                pair(take_until(close), tag(close)),
            )),
        )),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_comment() {
        let (rest, comment) = parse_line_comment("// This is a comment\ncode", "//").unwrap();
        assert_eq!(comment, "// This is a comment");
        assert_eq!(rest, "\ncode");
    }

    #[test]
    fn test_line_comment_leaves_crlf() {
        let (rest, comment) = parse_line_comment("# windows\r\nnext", "#").unwrap();
        assert_eq!(comment, "# windows");
        assert_eq!(rest, "\r\nnext");
    }

    #[test]
    fn test_line_comment_at_end_of_input() {
        let (rest, comment) = parse_line_comment("# last", "#").unwrap();
        assert_eq!(comment, "# last");
        assert_eq!(rest, "");
    }

    #[test]
    fn test_block_comment() {
        let input = "/* This is a\n block comment */code";
        let (rest, comment) = parse_block_comment(input, "/*", "*/").unwrap();
        assert_eq!(comment, "/* This is a\n block comment */");
        assert_eq!(rest, "code");
    }

    #[test]
    fn test_nested_looking_comment() {
        let input = "/* outer /* not nested */ */";
        let (rest, comment) = parse_block_comment(input, "/*", "*/").unwrap();
        assert_eq!(comment, "/* outer /* not nested */");
        assert_eq!(rest, " */");
    }

    #[test]
    fn test_not_a_block_comment() {
        let result = parse_block_comment("x / y", "/*", "*/");
        assert!(matches!(result, Err(nom::Err::Error(_))));
    }

    #[test]
    fn test_unterminated_block_comment_is_failure() {
        let result = parse_block_comment("/* never closed", "/*", "*/");
        assert!(matches!(result, Err(nom::Err::Failure(_))));
    }
}
