//! # String Literal Handling
//!
//! String literals are recognized so that comment markers inside them are never
//! mistaken for comments. The parser does not interpret the literal's content; it
//! only finds where the literal ends.
//!
//! * The opening delimiter may be preceded by a prefix such as `r`, `b` or `f`.
//! * The escape character (usually `\`) makes the following character inert, so an
//!   escaped closing delimiter does not end the literal.
//! * Raw literals disable the escape character entirely.
//! * Once a delimiter has opened, reaching the end of input is a hard failure.
//! * Regular expression literals (`/a+/g`) are literals too, so `'` or `/*`
//!   inside them is inert.

use nom::{
    bytes::complete::{tag, take_while},
    error::{context, ErrorKind, ParseError, VerboseError},
};

use super::token::ParserResult;
use crate::profile::StringDelimiter;

/// Finds the byte offset of the closing delimiter in `body`, skipping escaped
/// characters and interpolated expressions.
///
/// Inside an interpolation the literal's own delimiter does not close it, so
/// `f"{d["k"]}"` and `` `${`x`}` `` are read whole. A doubled opener (`{{`) is a
/// literal brace.
fn find_close(
    body: &str,
    close: &str,
    escape: Option<char>,
    interpolation: Option<&str>,
) -> Option<usize> {
    let mut depth = 0usize;
    let mut nested_quote: Option<char> = None;
    let mut escaped = false;
    let mut index = 0;
    while let Some(c) = body[index..].chars().next() {
        let rest = &body[index..];
        if escaped {
            escaped = false;
        } else if depth > 0 {
            match (nested_quote, c) {
                (Some(_), '\\') => escaped = true,
                (Some(quote), _) if c == quote => nested_quote = None,
                (Some(_), _) => {}
                (None, '\'' | '"' | '`') => nested_quote = Some(c),
                (None, '{') => depth += 1,
                (None, '}') => depth -= 1,
                (None, _) => {}
            }
        } else if Some(c) == escape {
            escaped = true;
        } else if let Some(open) = interpolation.filter(|open| rest.starts_with(open)) {
            if rest[open.len()..].starts_with(open) {
                index += 2 * open.len();
            } else {
                depth = 1;
                index += open.len();
            }
            continue;
        } else if rest.starts_with(close) {
            return Some(index);
        }
        index += c.len_utf8();
    }
    None
}

/// Parses a string literal opened by `prefix` followed by `delimiter.open`.
///
/// `prefix` may be empty. When `raw` is set the delimiter's escape character is
/// ignored. `interpolation` is the opener of embedded expressions, if the
/// literal has them.
///
/// # Examples
///
/// ```
/// # use decomment::profile::StringDelimiter;
/// # use decomment::tokenizer::literal::parse_string_literal;
/// let quote = StringDelimiter { open: "\"", close: "\"", escape: Some('\\') };
/// let (rest, literal) =
///     parse_string_literal(r#""a \" # b" + c"#, "", &quote, false, None).unwrap();
/// assert_eq!(literal, r#""a \" # b""#);
/// assert_eq!(rest, " + c");
/// ```
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_string_literal<'a>(
    input: &'a str,
    prefix: &str,
    delimiter: &StringDelimiter,
    raw: bool,
    interpolation: Option<&str>,
) -> ParserResult<'a, &'a str> {
    context("string literal", |input: &'a str| {
        let (after_prefix, _) = tag::<_, &'a str, VerboseError<&'a str>>(prefix)(input)?;
        let (body, _) = tag::<_, &'a str, VerboseError<&'a str>>(delimiter.open)(after_prefix)?;
        let escape = if raw { None } else { delimiter.escape };
        match find_close(body, delimiter.close, escape, interpolation) {
            Some(close_at) => {
                let consumed = input.len() - body.len() + close_at + delimiter.close.len();
                Ok((&input[consumed..], &input[..consumed]))
            }
            None => Err(nom::Err::Failure(VerboseError::from_error_kind(
                body,
                ErrorKind::TakeUntil,
            ))),
        }
    })(input)
}

/// Byte offset of the slash that closes a regular expression body, honoring
/// escapes and `[...]` classes. A line break means it was not a regex.
fn find_regex_close(body: &str) -> Option<usize> {
    let mut escaped = false;
    let mut in_class = false;
    for (index, c) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '\n' | '\r' => return None,
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => return Some(index),
            _ => {}
        }
    }
    None
}

/// Parses a `/pattern/flags` regular expression literal.
///
/// Fails softly (`nom::Err::Error`) when no closing slash is found on the same
/// line, so the caller can fall back to reading the slash as division.
///
/// ```
/// # use decomment::tokenizer::literal::parse_regex_literal;
/// let (rest, regex) = parse_regex_literal(r"/[/*]'/gi.test(s)").unwrap();
/// assert_eq!(regex, r"/[/*]'/gi");
/// assert_eq!(rest, ".test(s)");
/// ```
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_regex_literal<'a>(input: &'a str) -> ParserResult<'a, &'a str> {
    context("regex literal", |input: &'a str| {
        let (body, _) = tag::<_, &'a str, VerboseError<&'a str>>("/")(input)?;
        // `//` and `/*` open comments, never a regex
        let close_at = if body.starts_with(['/', '*']) {
            None
        } else {
            find_regex_close(body)
        };
        let close_at = close_at.ok_or_else(|| {
            nom::Err::Error(VerboseError::from_error_kind(body, ErrorKind::TakeUntil))
        })?;
        let (rest, _) = take_while::<_, &'a str, VerboseError<&'a str>>(|c: char| {
            c.is_alphanumeric()
        })(&body[close_at + 1..])?;
        let consumed = input.len() - rest.len();
        Ok((rest, &input[..consumed]))
    })(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOUBLE: StringDelimiter = StringDelimiter {
        open: "\"",
        close: "\"",
        escape: Some('\\'),
    };

    const TRIPLE: StringDelimiter = StringDelimiter {
        open: "\"\"\"",
        close: "\"\"\"",
        escape: Some('\\'),
    };

    const SINGLE: StringDelimiter = StringDelimiter {
        open: "'",
        close: "'",
        escape: Some('\\'),
    };

    #[test]
    fn test_simple_string() {
        let (rest, literal) = parse_string_literal("\"hello world\"", "", &DOUBLE, false, None).unwrap();
        assert_eq!(literal, "\"hello world\"");
        assert_eq!(rest, "");
    }

    #[test]
    fn test_comment_marker_inside_string() {
        let (rest, literal) =
            parse_string_literal("\"color: #fff // not a comment\")", "", &DOUBLE, false, None)
                .unwrap();
        assert_eq!(literal, "\"color: #fff // not a comment\"");
        assert_eq!(rest, ")");
    }

    #[test]
    fn test_escaped_delimiter() {
        let (rest, literal) = parse_string_literal(r#"'it\'s' + x"#, "", &SINGLE, false, None).unwrap();
        assert_eq!(literal, r#"'it\'s'"#);
        assert_eq!(rest, " + x");
    }

    #[test]
    fn test_escaped_backslash_before_close() {
        let (rest, literal) = parse_string_literal(r#""dir\\" rest"#, "", &DOUBLE, false, None).unwrap();
        assert_eq!(literal, r#""dir\\""#);
        assert_eq!(rest, " rest");
    }

    #[test]
    fn test_raw_string_ignores_escape() {
        let (rest, literal) = parse_string_literal(r#"r'C:\' + x"#, "r", &SINGLE, true, None).unwrap();
        assert_eq!(literal, r#"r'C:\'"#);
        assert_eq!(rest, " + x");
    }

    #[test]
    fn test_triple_quoted_multiline() {
        let input = "\"\"\"\nDocs with \"quotes\" inside.\n\"\"\"\nx = 1";
        let (rest, literal) = parse_string_literal(input, "", &TRIPLE, false, None).unwrap();
        assert_eq!(literal, "\"\"\"\nDocs with \"quotes\" inside.\n\"\"\"");
        assert_eq!(rest, "\nx = 1");
    }

    #[test]
    fn test_prefixed_string() {
        let (rest, literal) = parse_string_literal("f\"{x}\" if y", "f", &DOUBLE, false, None).unwrap();
        assert_eq!(literal, "f\"{x}\"");
        assert_eq!(rest, " if y");
    }

    #[test]
    fn test_fstring_reusing_its_quote() {
        let input = r#"f"{d["k"]} and {{braces}}" + x"#;
        let (rest, literal) = parse_string_literal(input, "f", &DOUBLE, false, Some("{")).unwrap();
        assert_eq!(literal, r#"f"{d["k"]} and {{braces}}""#);
        assert_eq!(rest, " + x");
    }

    #[test]
    fn test_template_literal_with_nested_template() {
        let backtick = StringDelimiter {
            open: "`",
            close: "`",
            escape: Some('\\'),
        };
        let input = "`a ${b ? `c` : '}'} d`;";
        let (rest, literal) = parse_string_literal(input, "", &backtick, false, Some("${")).unwrap();
        assert_eq!(literal, "`a ${b ? `c` : '}'} d`");
        assert_eq!(rest, ";");
    }

    #[test]
    fn test_plain_string_braces_are_inert() {
        let (rest, literal) = parse_string_literal("\"{\" + x", "", &DOUBLE, false, None).unwrap();
        assert_eq!(literal, "\"{\"");
        assert_eq!(rest, " + x");
    }

    #[test]
    fn test_regex_literal() {
        let (rest, regex) = parse_regex_literal(r"/https?:\/\//;").unwrap();
        assert_eq!(regex, r"/https?:\/\//");
        assert_eq!(rest, ";");

        let (rest, regex) = parse_regex_literal("/'/g, \"x\")").unwrap();
        assert_eq!(regex, "/'/g");
        assert_eq!(rest, ", \"x\")");
    }

    #[test]
    fn test_regex_class_holds_slash() {
        let (rest, regex) = parse_regex_literal("/[/*]/.test(s)").unwrap();
        assert_eq!(regex, "/[/*]/");
        assert_eq!(rest, ".test(s)");
    }

    #[test]
    fn test_not_a_regex() {
        assert!(matches!(parse_regex_literal("/ 2\nx / 3"), Err(nom::Err::Error(_))));
        assert!(matches!(parse_regex_literal("// note"), Err(nom::Err::Error(_))));
        assert!(matches!(parse_regex_literal("/* note */"), Err(nom::Err::Error(_))));
    }

    #[test]
    fn test_not_a_string() {
        let result = parse_string_literal("value", "", &DOUBLE, false, None);
        assert!(matches!(result, Err(nom::Err::Error(_))));
    }

    #[test]
    fn test_unterminated_string_is_failure() {
        let result = parse_string_literal("\"\"\"open forever", "", &TRIPLE, false, None);
        assert!(matches!(result, Err(nom::Err::Failure(_))));
    }
}
