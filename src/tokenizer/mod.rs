//! # Tokenizer Component
//!
//! The tokenizer turns raw source text into an ordered sequence of
//! [`Span`](token::Span)s, each tagged with a [`SpanKind`](token::SpanKind):
//! code, string literal, line comment, block comment, whitespace or newline.
//!
//! ## Design Principles
//!
//! * **Lossless**: spans are contiguous and non-overlapping; concatenating their
//!   text reproduces the input byte for byte.
//! * **Literal safety**: a string literal is consumed as a whole before any comment
//!   rule is tried, so comment markers inside strings stay code.
//! * **Profile driven**: every delimiter comes from the
//!   [`LanguageProfile`](crate::profile::LanguageProfile); the tokenizer has no
//!   knowledge of any particular language.
//!
//! ## Component Structure
//!
//! * [`token`]: span types, errors and the [`Tokenizer`](token::Tokenizer) itself
//! * [`literal`]: string literals with prefixes and escapes
//! * [`comment`]: line and block comments
//! * [`whitespace`]: whitespace runs and line terminators
//!
//! ## Error Handling
//!
//! A string literal or block comment that opens but never closes fails the whole
//! scan with [`TokenizerError::UnterminatedLiteral`](token::TokenizerError), which
//! carries the opening position.
//!
//! ## Usage Example
//!
//! ```rust
//! use decomment::profile::PYTHON;
//! use decomment::tokenizer::token::{SpanKind, Tokenizer};
//!
//! let spans = Tokenizer::new(&PYTHON).tokenize("x = '#'  # real\n").unwrap();
//! let comments: Vec<_> = spans.iter().filter(|s| s.kind == SpanKind::LineComment).collect();
//! assert_eq!(comments.len(), 1);
//! assert_eq!(comments[0].text, "# real");
//! ```

pub mod comment;
pub mod literal;
pub mod token;
pub mod whitespace;

pub use token::{tokenize, Span, SpanKind, Tokenizer, TokenizerError};
