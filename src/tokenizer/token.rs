use nom::{error::VerboseError, IResult};
use serde::Serialize;
use thiserror::Error;

use super::{
    comment::{parse_block_comment, parse_line_comment},
    literal::{parse_regex_literal, parse_string_literal},
    whitespace::{parse_newline, parse_whitespace},
};
use crate::profile::LanguageProfile;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SpanKind {
    Code,
    StringLiteral,
    LineComment,
    BlockComment,
    Whitespace,
    Newline,
}

impl SpanKind {
    pub fn is_comment(&self) -> bool {
        matches!(self, SpanKind::LineComment | SpanKind::BlockComment)
    }

    /// Whitespace and line breaks.
    pub fn is_blank(&self) -> bool {
        matches!(self, SpanKind::Whitespace | SpanKind::Newline)
    }

    /// Spans that never affect program structure: blanks and comments.
    pub fn is_trivia(&self) -> bool {
        self.is_blank() || self.is_comment()
    }
}

/// A contiguous region of the source.
///
/// `start`/`end` are byte offsets, `line`/`column` are 1-based and count
/// characters. Concatenating the `text` of every span in order yields the
/// input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub kind: SpanKind,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
    pub text: String,
}

impl Span {
    pub fn contains_newline(&self) -> bool {
        self.text.contains(['\n', '\r'])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line: {}, column: {}, offset: {}",
            self.line, self.column, self.offset
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum LiteralKind {
    #[strum(serialize = "string literal")]
    String,
    #[strum(serialize = "block comment")]
    BlockComment,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizerError {
    #[error("unterminated {what} opened at {position}")]
    UnterminatedLiteral {
        what: LiteralKind,
        position: Position,
    },
}

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

pub type TokenizerResult<T> = Result<T, TokenizerError>;

/// Splits source text into [`Span`]s according to a [`LanguageProfile`].
#[derive(Debug, Clone)]
pub struct Tokenizer<'p> {
    profile: &'p LanguageProfile,
    current_position: usize,
    current_line: usize,
    current_column: usize,
    previous_char: Option<char>,
    /// Whether a `/` here would start a regex literal rather than divide.
    regex_allowed: bool,
}

impl<'p> Tokenizer<'p> {
    pub fn new(profile: &'p LanguageProfile) -> Self {
        Self {
            profile,
            current_position: 0,
            current_line: 1,   // 1-based
            current_column: 1, // 1-based
            previous_char: None,
            regex_allowed: true,
        }
    }

    /// Scans `input` left to right. At every position the first match wins, in
    /// this order: string literal, block comment, line comment, newline,
    /// whitespace, and finally a single code character. Consecutive code
    /// characters are merged into one span.
    #[tracing::instrument(level = "debug", skip(self, input), fields(language = self.profile.name))]
    pub fn tokenize(&mut self, input: &str) -> TokenizerResult<Vec<Span>> {
        let mut spans: Vec<Span> = Vec::new();
        let mut remaining = input;

        while !remaining.is_empty() {
            let start_position = self.current_position;
            let start_line = self.current_line;
            let start_column = self.current_column;

            let (kind, consumed) = self.next_span(remaining).map_err(|e| {
                tracing::error!("{}", e);
                e
            })?;
            let text = &remaining[..consumed];
            self.update_position(text);
            self.note_span(kind, text, spans.last());

            match spans.last_mut() {
                Some(last) if kind == SpanKind::Code && last.kind == SpanKind::Code => {
                    last.end = self.current_position;
                    last.text.push_str(text);
                }
                _ => spans.push(Span {
                    kind,
                    start: start_position,
                    end: self.current_position,
                    line: start_line,
                    column: start_column,
                    text: text.to_string(),
                }),
            }

            remaining = &remaining[consumed..];
        }

        tracing::debug!(spans = spans.len(), "tokenized");
        Ok(spans)
    }

    /// Returns the kind and byte length of the span starting at `input`.
    fn next_span(&self, input: &str) -> TokenizerResult<(SpanKind, usize)> {
        let consumed = |rest: &str| input.len() - rest.len();

        if let Some(len) = self.string_literal(input)? {
            return Ok((SpanKind::StringLiteral, len));
        }

        if self.profile.regex_literals && self.regex_allowed {
            if let Ok((rest, _)) = parse_regex_literal(input) {
                return Ok((SpanKind::StringLiteral, consumed(rest)));
            }
        }

        for block in self.profile.block_comment_delimiters {
            match parse_block_comment(input, block.open, block.close) {
                Ok((rest, _)) => return Ok((SpanKind::BlockComment, consumed(rest))),
                Err(nom::Err::Failure(_)) => {
                    return Err(self.unterminated(LiteralKind::BlockComment))
                }
                Err(_) => continue,
            }
        }

        for prefix in self.profile.line_comment_prefixes {
            if let Ok((rest, _)) = parse_line_comment(input, prefix) {
                return Ok((SpanKind::LineComment, consumed(rest)));
            }
        }

        if let Ok((rest, _)) = parse_newline(input) {
            return Ok((SpanKind::Newline, consumed(rest)));
        }

        if let Ok((rest, _)) = parse_whitespace(input) {
            return Ok((SpanKind::Whitespace, consumed(rest)));
        }

        let width = input.chars().next().map_or(0, char::len_utf8);
        Ok((SpanKind::Code, width))
    }

    /// Tries every string delimiter, with and without a prefix, and returns the
    /// length of the longest opening match's literal.
    fn string_literal(&self, input: &str) -> TokenizerResult<Option<usize>> {
        let prefix_allowed = !self
            .previous_char
            .is_some_and(|c| c.is_alphanumeric() || c == '_');

        let prefixes = std::iter::once("").chain(
            self.profile
                .string_prefixes
                .iter()
                .filter(|_| prefix_allowed)
                .filter_map(|prefix| {
                    input
                        .get(..prefix.len())
                        .filter(|candidate| candidate.eq_ignore_ascii_case(prefix))
                }),
        );

        let opening = prefixes
            .flat_map(|prefix| {
                self.profile
                    .string_delimiters
                    .iter()
                    .filter(move |delimiter| input[prefix.len()..].starts_with(delimiter.open))
                    .map(move |delimiter| (prefix, delimiter))
            })
            .max_by_key(|(prefix, delimiter)| prefix.len() + delimiter.open.len());

        let Some((prefix, delimiter)) = opening else {
            return Ok(None);
        };

        let raw = !prefix.is_empty() && self.profile.is_raw_prefix(prefix);
        let interpolation = self.profile.interpolation(prefix, delimiter, raw);
        match parse_string_literal(input, prefix, delimiter, raw, interpolation) {
            Ok((rest, _)) => Ok(Some(input.len() - rest.len())),
            Err(nom::Err::Failure(_)) => Err(self.unterminated(LiteralKind::String)),
            Err(_) => Ok(None),
        }
    }

    /// Tracks whether the next `/` can open a regex. Trivia leaves the answer
    /// unchanged; a literal ends an operand; code decides by its last token.
    fn note_span(&mut self, kind: SpanKind, text: &str, previous: Option<&Span>) {
        match kind {
            SpanKind::StringLiteral => self.regex_allowed = false,
            SpanKind::Code => {
                let run = match previous {
                    Some(last) if last.kind == SpanKind::Code => last.text.as_str(),
                    _ => "",
                };
                self.regex_allowed = regex_may_follow(run, text);
            }
            _ => {}
        }
    }

    fn unterminated(&self, what: LiteralKind) -> TokenizerError {
        TokenizerError::UnterminatedLiteral {
            what,
            position: Position {
                offset: self.current_position,
                line: self.current_line,
                column: self.current_column,
            },
        }
    }

    fn update_position(&mut self, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            self.current_position += c.len_utf8();
            let line_break = c == '\n' || (c == '\r' && chars.peek() != Some(&'\n'));
            if line_break {
                self.current_line += 1;
                self.current_column = 1;
            } else {
                self.current_column += 1;
            }
            self.previous_char = Some(c);
        }
    }
}

const REGEX_PRECEDING_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case",
    "do", "else", "yield", "await",
];

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Whether a `/` after the code run `run` extended by `text` starts an
/// expression. Identifiers, numbers and closing brackets end an operand, so a
/// slash after them divides; keywords such as `return` do not.
fn regex_may_follow(run: &str, text: &str) -> bool {
    let Some(last) = text.chars().last() else {
        return true;
    };
    if !is_word_char(last) {
        return !matches!(last, ')' | ']');
    }
    REGEX_PRECEDING_KEYWORDS.iter().any(|keyword| {
        keyword.strip_suffix(text).is_some_and(|head| {
            run.strip_suffix(head)
                .is_some_and(|before| !before.ends_with(is_word_char))
        })
    })
}

/// Tokenizes `source` with a fresh [`Tokenizer`].
pub fn tokenize(source: &str, profile: &LanguageProfile) -> TokenizerResult<Vec<Span>> {
    Tokenizer::new(profile).tokenize(source)
}
