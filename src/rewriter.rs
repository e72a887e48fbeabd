//! # Rewriting
//!
//! Rebuilds source text from the span sequence, leaving out every span the
//! classifier marked for removal.
//!
//! Spans are processed one line group at a time, a group being the spans up to
//! and including the next [`SpanKind::Newline`]. A string or block comment that
//! crosses lines stays inside the group it starts in.
//!
//! * A group made only of removed spans and whitespace disappears entirely,
//!   indentation and newline included.
//! * A removed span trailing code takes the whitespace before it along.
//! * A removed span leading code takes the whitespace after it along, so the
//!   line keeps its own indentation.
//! * A removed span between two pieces of code leaves a separator behind when
//!   the neighbours would otherwise fuse into a different token.

use std::collections::HashSet;

use serde::Serialize;

use crate::classifier::ClassificationDecision;
use crate::tokenizer::whitespace::is_inline_whitespace;
use crate::tokenizer::{Span, SpanKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteResult {
    pub text: String,
    pub removed_count: usize,
}

impl RewriteResult {
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            removed_count: 0,
        }
    }
}

#[tracing::instrument(level = "debug", skip_all, fields(spans = spans.len()))]
pub fn rewrite(spans: &[Span], decisions: &[ClassificationDecision]) -> RewriteResult {
    let removed: HashSet<usize> = decisions
        .iter()
        .filter(|decision| decision.is_removal())
        .map(|decision| decision.span)
        .collect();

    let capacity = spans.last().map_or(0, |span| span.end);
    let mut text = String::with_capacity(capacity);
    let mut group_start = 0;
    for (index, span) in spans.iter().enumerate() {
        if span.kind == SpanKind::Newline || index + 1 == spans.len() {
            let group = LineGroup {
                spans: &spans[group_start..=index],
                offset: group_start,
                removed: &removed,
            };
            group.write_to(&mut text);
            group_start = index + 1;
        }
    }

    tracing::debug!(
        removed = removed.len(),
        bytes_in = capacity,
        bytes_out = text.len(),
        "rewritten"
    );
    RewriteResult {
        text,
        removed_count: removed.len(),
    }
}

struct LineGroup<'a> {
    spans: &'a [Span],
    offset: usize,
    removed: &'a HashSet<usize>,
}

impl LineGroup<'_> {
    fn is_removed(&self, index: usize) -> bool {
        self.removed.contains(&(self.offset + index))
    }

    fn is_kept_content(&self, index: usize) -> bool {
        !self.is_removed(index) && !self.spans[index].kind.is_blank()
    }

    fn write_to(&self, out: &mut String) {
        let has_removal = (0..self.spans.len()).any(|i| self.is_removed(i));
        if !has_removal {
            self.spans.iter().for_each(|span| out.push_str(&span.text));
            return;
        }
        if !(0..self.spans.len()).any(|i| self.is_kept_content(i)) {
            return;
        }

        let mut line = String::new();
        let mut index = 0;
        while index < self.spans.len() {
            let span = &self.spans[index];
            index += 1;
            if !self.is_removed(index - 1) {
                line.push_str(&span.text);
                continue;
            }

            let code_before = line.chars().any(|c| !c.is_whitespace());
            let code_after = (index..self.spans.len()).find(|&i| self.is_kept_content(i));
            match (code_before, code_after) {
                (_, None) => {
                    trim_inline_end(&mut line);
                    index = self.skip_whitespace(index);
                }
                (false, Some(_)) => {
                    index = self.skip_whitespace(index);
                }
                (true, Some(next)) => {
                    if span.contains_newline() {
                        trim_inline_end(&mut line);
                        line.push('\n');
                        index = self.skip_whitespace(index);
                    } else if line.ends_with(is_inline_whitespace) {
                        index = self.skip_whitespace(index);
                    } else if index < self.spans.len()
                        && self.spans[index].kind == SpanKind::Whitespace
                    {
                        // the following whitespace already separates the tokens
                    } else if next == index && self.would_fuse(&line, next) {
                        line.push(' ');
                    }
                }
            }
        }
        out.push_str(&line);
    }

    /// Whether gluing `line` directly to the span at `next` would merge two
    /// tokens into one, as in `a/**/b` or `x-/**/-y`.
    fn would_fuse(&self, line: &str, next: usize) -> bool {
        let (Some(before), Some(after)) = (line.chars().last(), self.spans[next].text.chars().next())
        else {
            return false;
        };
        let word = |c: char| c.is_alphanumeric() || c == '_' || c == '$';
        let operator = |c: char| "+-*/%=<>!&|^~?:.".contains(c);
        (word(before) && word(after))
            || (operator(before) && operator(after))
            || (self.spans[next].kind == SpanKind::StringLiteral && word(before))
    }

    fn skip_whitespace(&self, mut index: usize) -> usize {
        while index < self.spans.len() && self.spans[index].kind == SpanKind::Whitespace {
            index += 1;
        }
        index
    }
}

fn trim_inline_end(line: &mut String) {
    let trimmed = line.trim_end_matches(is_inline_whitespace).len();
    line.truncate(trimmed);
}
