//! # Comment Classification
//!
//! Assigns a [`Verdict`] to every comment span and to every statement-level
//! string literal. All other spans are code and are never classified.
//!
//! Rules, first match wins:
//!
//! 1. a line comment at offset 0 starting with `#!` is an interpreter directive;
//! 2. a line comment on one of the first two non-empty lines that declares a
//!    source encoding is an encoding directive;
//! 3. a docstring is kept;
//! 4. a documentation comment (`/**`, `///`) is kept unless disabled in
//!    [`Options`];
//! 5. floating literals are kept when [`Options::remove_floating_strings`] is off;
//! 6. a floating literal that is the only thing left in its block is kept, since
//!    removing it would leave the block empty;
//! 7. spans starting outside [`Options::line_range`] are kept;
//! 8. everything else is disposable commentary and is removed.

use std::collections::{BTreeSet, HashSet};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::config::Options;
use crate::docstring::ends_header;
use crate::layout::{indentation, is_statement_literal, next_significant, previous_significant};
use crate::profile::{DocstringRule, LanguageProfile};
use crate::tokenizer::{Span, SpanKind};

lazy_static! {
    static ref ENCODING_DECLARATION: Regex =
        Regex::new(r"coding[:=]\s*[-\w.]+").expect("encoding pattern is valid");
}

const SHEBANG: &str = "#!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Verdict {
    Keep,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Reason {
    InterpreterDirective,
    EncodingDirective,
    Docstring,
    DocComment,
    FloatingStringRetained,
    BlockPlaceholder,
    OutsideRange,
    UserRetained,
    Commentary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassificationDecision {
    /// Index of the classified span.
    pub span: usize,
    pub verdict: Verdict,
    pub reason: Reason,
}

impl ClassificationDecision {
    fn keep(span: usize, reason: Reason) -> Self {
        Self {
            span,
            verdict: Verdict::Keep,
            reason,
        }
    }

    fn remove(span: usize) -> Self {
        Self {
            span,
            verdict: Verdict::Remove,
            reason: Reason::Commentary,
        }
    }

    pub fn is_removal(&self) -> bool {
        self.verdict == Verdict::Remove
    }
}

/// Classifies every comment span and every statement-level string literal.
#[tracing::instrument(level = "debug", skip_all, fields(language = profile.name))]
pub fn classify(
    spans: &[Span],
    docstrings: &BTreeSet<usize>,
    profile: &LanguageProfile,
    options: &Options,
) -> Vec<ClassificationDecision> {
    let header_lines = first_non_empty_lines(spans, 2);
    let classifier = Classifier {
        spans,
        docstrings,
        profile,
        options,
        header_lines,
    };

    let decisions: Vec<ClassificationDecision> = (0..spans.len())
        .filter(|&index| classifier.is_candidate(index))
        .map(|index| classifier.decide(index))
        .collect();

    tracing::debug!(
        classified = decisions.len(),
        removed = decisions.iter().filter(|d| d.is_removal()).count(),
        "spans classified"
    );
    decisions
}

struct Classifier<'a> {
    spans: &'a [Span],
    docstrings: &'a BTreeSet<usize>,
    profile: &'a LanguageProfile,
    options: &'a Options,
    header_lines: HashSet<usize>,
}

impl Classifier<'_> {
    fn is_candidate(&self, index: usize) -> bool {
        let span = &self.spans[index];
        span.kind.is_comment()
            || (span.kind == SpanKind::StringLiteral
                && self.profile.has_docstrings()
                && (self.docstrings.contains(&index) || is_statement_literal(self.spans, index)))
    }

    fn decide(&self, index: usize) -> ClassificationDecision {
        let span = &self.spans[index];
        let keep = |reason| ClassificationDecision::keep(index, reason);

        if span.kind == SpanKind::LineComment && span.start == 0 && span.text.starts_with(SHEBANG)
        {
            return keep(Reason::InterpreterDirective);
        }
        if span.kind == SpanKind::LineComment
            && self.header_lines.contains(&span.line)
            && ENCODING_DECLARATION.is_match(&span.text)
        {
            return keep(Reason::EncodingDirective);
        }
        if self.docstrings.contains(&index) {
            return keep(Reason::Docstring);
        }
        if span.kind.is_comment()
            && self.options.keep_doc_comments
            && self.profile.is_doc_comment(&span.text)
        {
            return keep(Reason::DocComment);
        }
        if span.kind == SpanKind::StringLiteral {
            if !self.options.remove_floating_strings {
                return keep(Reason::FloatingStringRetained);
            }
            if self.holds_block_open(index) {
                return keep(Reason::BlockPlaceholder);
            }
        }
        if let Some(range) = &self.options.line_range {
            if !range.contains(span.line) {
                return keep(Reason::OutsideRange);
            }
        }
        ClassificationDecision::remove(index)
    }

    /// Whether the floating literal at `index` opens a block that would be left
    /// with no statements once every floating literal in it is removed.
    fn holds_block_open(&self, index: usize) -> bool {
        let DocstringRule::BlockStart {
            header_terminator, ..
        } = self.profile.docstring_rule
        else {
            return false;
        };
        let opens_block = previous_significant(self.spans, index)
            .is_some_and(|previous| ends_header(&self.spans[previous], header_terminator));
        if !opens_block {
            return false;
        }

        let block_indent = indentation(self.spans, index);
        let mut cursor = index;
        while let Some(next) = next_significant(self.spans, cursor) {
            if indentation(self.spans, next) < block_indent {
                return true;
            }
            if !is_statement_literal(self.spans, next) {
                return false;
            }
            cursor = next;
        }
        true
    }
}

/// Line numbers of the first `count` lines that hold anything besides whitespace.
fn first_non_empty_lines(spans: &[Span], count: usize) -> HashSet<usize> {
    let mut lines: Vec<usize> = Vec::with_capacity(count);
    for span in spans.iter().filter(|span| !span.kind.is_blank()) {
        if lines.len() == count {
            break;
        }
        if !lines.contains(&span.line) {
            lines.push(span.line);
        }
    }
    lines.into_iter().collect()
}
