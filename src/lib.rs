//! # decomment: comment classification and removal
//!
//! Removes disposable commentary from source files while leaving
//! documentation and mandatory header directives in place. One source text is
//! processed per call, and the rewritten text has the same code as the input.
//!
//! ## What is kept
//!
//! - Docstrings: a string literal that is the first statement of a module,
//!   class or function
//! - Interpreter directives (`#!` on the first line) and encoding declarations
//! - Documentation comments such as `/** ... */` and `/// ...` (configurable)
//!
//! Everything else that is a comment, plus statement-level string literals that
//! are not docstrings, is removed.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source → Profile Registry → Tokenizer → Docstring Detector → Classifier → Rewriter
//! ```
//!
//! ### Stage 1: Profile lookup
//!
//! The [`profile`] module holds one immutable [`LanguageProfile`] per supported
//! language, found by identifier or file extension.
//!
//! ### Stage 2: Tokenization
//!
//! The [`tokenizer`] module splits the source into contiguous spans of code,
//! string literals, comments, whitespace and newlines. Comment markers inside
//! string literals stay part of the literal.
//!
//! ### Stage 3: Docstring detection
//!
//! The [`docstring`] module marks the literals that document a block, using the
//! positional helpers in [`layout`].
//!
//! ### Stage 4: Classification
//!
//! The [`classifier`] module decides Keep or Remove for each comment and each
//! statement-level literal, with a [`Reason`] for every decision. [`Options`]
//! adjusts the policy.
//!
//! ### Stage 5: Rewriting
//!
//! The [`rewriter`] module rebuilds the text without the removed spans, taking
//! care not to leave blank lines or glued tokens behind.
//!
//! ## Usage
//!
//! ```
//! let source = "#!/usr/bin/env python3\n# Suma dos números\ndef add(a, b):\n    return a + b  # total\n";
//! let result = decomment::process(source, "python").unwrap();
//! assert_eq!(
//!     result.text,
//!     "#!/usr/bin/env python3\ndef add(a, b):\n    return a + b\n"
//! );
//! assert_eq!(result.removed_count, 2);
//! ```
//!
//! Failures, such as an unterminated string literal, produce no output at all;
//! see [`Error`] and its serializable [`Failure`] view.

pub mod classifier;
pub mod config;
pub mod docstring;
pub mod engine;
pub mod error;
pub mod layout;
pub mod profile;
pub mod rewriter;
pub mod tokenizer;

// Re-exports
pub use classifier::{ClassificationDecision, Reason, Verdict};
pub use config::{LineRange, Options};
pub use engine::{analyze, process, process_with, Analysis, CommentInfo};
pub use error::*;
pub use profile::LanguageProfile;
pub use rewriter::RewriteResult;

#[cfg(test)]
mod tests {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    #[ctor::ctor]
    fn init_tests() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
    }
}
