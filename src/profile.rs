//! # Language Profiles
//!
//! A [`LanguageProfile`] is the immutable set of lexical rules that parameterizes
//! every stage of the pipeline: which delimiters open strings and comments, which
//! markers denote documentation comments, and where a string literal counts as a
//! docstring.
//!
//! Profiles are `'static` values. They are looked up by identifier with [`lookup`]
//! or by file extension with [`for_extension`] / [`for_path`].
//!
//! ## Supported Languages
//!
//! | Language   | Line | Block     | Strings                          | Docstrings |
//! |------------|------|-----------|----------------------------------|------------|
//! | Python     | `#`  | -         | `"""` `'''` `"` `'` (+ prefixes) | yes        |
//! | JavaScript | `//` | `/* */`   | `"` `'` `` ` ``                  | no         |
//! | TypeScript | `//` | `/* */`   | `"` `'` `` ` ``                  | no         |
//! | Dart       | `//` | `/* */`   | `"""` `'''` `"` `'` (+ `r`)      | no         |
//!
//! JavaScript and TypeScript also have `/.../` regular expression literals, told
//! apart from division by the code just before the slash.
//!
//! Interpolated expressions (`f"{d["k"]}"`, `` `${`x`}` ``, `'${m['k']}'`) may
//! reuse the enclosing quote. One level of quoting inside an interpolation is
//! understood; a literal nested in an interpolation nested in another literal's
//! interpolation is not.

use std::path::Path;

use crate::error::{Error, Result};

/// A string literal delimiter pair and its escape character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringDelimiter {
    pub open: &'static str,
    pub close: &'static str,
    pub escape: Option<char>,
}

impl StringDelimiter {
    const fn escaped(quote: &'static str) -> Self {
        Self {
            open: quote,
            close: quote,
            escape: Some('\\'),
        }
    }
}

/// A block comment delimiter pair, e.g. `/*` and `*/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDelimiter {
    pub open: &'static str,
    pub close: &'static str,
}

/// Where a statement-level string literal counts as documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocstringRule {
    /// String literals are always code; none of them is ever classified.
    None,
    /// A statement-level literal is a docstring at the start of the module, or as
    /// the first statement after a header that starts with one of
    /// `header_keywords` and ends with `header_terminator`.
    BlockStart {
        header_keywords: &'static [&'static str],
        header_terminator: char,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    pub name: &'static str,
    /// Lowercase identifiers accepted by [`lookup`].
    pub identifiers: &'static [&'static str],
    /// File extensions without the leading dot.
    pub extensions: &'static [&'static str],
    pub line_comment_prefixes: &'static [&'static str],
    pub block_comment_delimiters: &'static [BlockDelimiter],
    pub string_delimiters: &'static [StringDelimiter],
    /// Prefixes that may directly precede a string delimiter (`r"..."`, `f'...'`).
    /// Matched case-insensitively.
    pub string_prefixes: &'static [&'static str],
    /// Prefixes that turn the escape character off for the literal they start.
    pub raw_string_prefixes: &'static [&'static str],
    /// Comment openers that mark documentation comments (`/**`, `///`).
    pub doc_comment_markers: &'static [&'static str],
    /// Opener of an embedded expression (`{` in `f"{x}"`, `${` in `` `${x}` ``).
    /// Inside one, the literal's own closing delimiter does not end it.
    pub interpolation_open: Option<&'static str>,
    /// Prefixes whose literals interpolate, whatever their delimiter.
    pub interpolated_prefixes: &'static [&'static str],
    /// Delimiters whose non-raw literals interpolate without a prefix.
    pub interpolated_delimiters: &'static [&'static str],
    /// Whether `/.../flags` regular expression literals exist.
    pub regex_literals: bool,
    pub docstring_rule: DocstringRule,
}

impl LanguageProfile {
    pub fn has_docstrings(&self) -> bool {
        !matches!(self.docstring_rule, DocstringRule::None)
    }

    /// Whether `prefix` disables escapes for the string literal it introduces.
    pub fn is_raw_prefix(&self, prefix: &str) -> bool {
        self.raw_string_prefixes
            .iter()
            .any(|raw| raw.eq_ignore_ascii_case(prefix))
    }

    /// The interpolation opener that applies to a literal, if any.
    pub fn interpolation(
        &self,
        prefix: &str,
        delimiter: &StringDelimiter,
        raw: bool,
    ) -> Option<&'static str> {
        let open = self.interpolation_open?;
        let prefixed = !prefix.is_empty()
            && self
                .interpolated_prefixes
                .iter()
                .any(|known| known.eq_ignore_ascii_case(prefix));
        let delimited = !raw && self.interpolated_delimiters.contains(&delimiter.open);
        (prefixed || delimited).then_some(open)
    }

    /// Whether a comment's text opens with a documentation marker.
    ///
    /// An empty block comment such as `/**/` is not documentation.
    pub fn is_doc_comment(&self, text: &str) -> bool {
        let empty_block = self.block_comment_delimiters.iter().any(|block| {
            text.len() == block.open.len() + block.close.len()
                && text.starts_with(block.open)
                && text.ends_with(block.close)
        });
        !empty_block
            && self
                .doc_comment_markers
                .iter()
                .any(|marker| text.starts_with(marker))
    }
}

const C_BLOCK: &[BlockDelimiter] = &[BlockDelimiter {
    open: "/*",
    close: "*/",
}];

const ECMA_STRINGS: &[StringDelimiter] = &[
    StringDelimiter::escaped("\""),
    StringDelimiter::escaped("'"),
    StringDelimiter::escaped("`"),
];

const TRIPLE_QUOTED_STRINGS: &[StringDelimiter] = &[
    StringDelimiter::escaped("\"\"\""),
    StringDelimiter::escaped("'''"),
    StringDelimiter::escaped("\""),
    StringDelimiter::escaped("'"),
];

pub static PYTHON: LanguageProfile = LanguageProfile {
    name: "Python",
    identifiers: &["python", "python3", "py"],
    extensions: &["py", "pyw", "pyi"],
    line_comment_prefixes: &["#"],
    block_comment_delimiters: &[],
    string_delimiters: TRIPLE_QUOTED_STRINGS,
    string_prefixes: &["r", "u", "b", "f", "br", "rb", "fr", "rf"],
    raw_string_prefixes: &[],
    doc_comment_markers: &[],
    interpolation_open: Some("{"),
    interpolated_prefixes: &["f", "fr", "rf"],
    interpolated_delimiters: &[],
    regex_literals: false,
    docstring_rule: DocstringRule::BlockStart {
        header_keywords: &["def", "class", "async def"],
        header_terminator: ':',
    },
};

pub static JAVASCRIPT: LanguageProfile = LanguageProfile {
    name: "JavaScript",
    identifiers: &["javascript", "js", "jsx"],
    extensions: &["js", "jsx", "mjs", "cjs"],
    line_comment_prefixes: &["//"],
    block_comment_delimiters: C_BLOCK,
    string_delimiters: ECMA_STRINGS,
    string_prefixes: &[],
    raw_string_prefixes: &[],
    doc_comment_markers: &["/**"],
    interpolation_open: Some("${"),
    interpolated_prefixes: &[],
    interpolated_delimiters: &["`"],
    regex_literals: true,
    docstring_rule: DocstringRule::None,
};

pub static TYPESCRIPT: LanguageProfile = LanguageProfile {
    name: "TypeScript",
    identifiers: &["typescript", "ts", "tsx"],
    extensions: &["ts", "tsx", "mts", "cts"],
    line_comment_prefixes: &["//"],
    block_comment_delimiters: C_BLOCK,
    string_delimiters: ECMA_STRINGS,
    string_prefixes: &[],
    raw_string_prefixes: &[],
    doc_comment_markers: &["/**"],
    interpolation_open: Some("${"),
    interpolated_prefixes: &[],
    interpolated_delimiters: &["`"],
    regex_literals: true,
    docstring_rule: DocstringRule::None,
};

pub static DART: LanguageProfile = LanguageProfile {
    name: "Dart",
    identifiers: &["dart"],
    extensions: &["dart"],
    line_comment_prefixes: &["//"],
    block_comment_delimiters: C_BLOCK,
    string_delimiters: TRIPLE_QUOTED_STRINGS,
    string_prefixes: &["r"],
    raw_string_prefixes: &["r"],
    doc_comment_markers: &["/**", "///"],
    interpolation_open: Some("${"),
    interpolated_prefixes: &[],
    interpolated_delimiters: &["\"\"\"", "'''", "\"", "'"],
    regex_literals: false,
    docstring_rule: DocstringRule::None,
};

static PROFILES: [&LanguageProfile; 4] = [&PYTHON, &JAVASCRIPT, &TYPESCRIPT, &DART];

/// All registered profiles.
pub fn profiles() -> impl Iterator<Item = &'static LanguageProfile> {
    PROFILES.iter().copied()
}

/// Looks a profile up by language identifier, ignoring ASCII case.
pub fn lookup(language_id: &str) -> Result<&'static LanguageProfile> {
    let id = language_id.trim();
    profiles()
        .find(|profile| {
            profile.name.eq_ignore_ascii_case(id)
                || profile
                    .identifiers
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(id))
        })
        .ok_or_else(|| Error::UnsupportedLanguage {
            id: language_id.to_string(),
        })
}

/// Resolves a profile from a file extension; the leading dot is optional.
pub fn for_extension(extension: &str) -> Option<&'static LanguageProfile> {
    let extension = extension.strip_prefix('.').unwrap_or(extension);
    profiles().find(|profile| {
        profile
            .extensions
            .iter()
            .any(|known| known.eq_ignore_ascii_case(extension))
    })
}

pub fn for_path<P: AsRef<Path>>(path: P) -> Option<&'static LanguageProfile> {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(for_extension)
}
