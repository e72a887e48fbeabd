//! Entry points that run the whole pipeline on one source text.

use serde::Serialize;

use crate::classifier::{classify, ClassificationDecision, Reason, Verdict};
use crate::config::Options;
use crate::docstring::mark_docstrings;
use crate::error::Result;
use crate::profile::{self, LanguageProfile};
use crate::rewriter::{rewrite, RewriteResult};
use crate::tokenizer::{tokenize, Span, SpanKind};

/// Removes disposable commentary from `source` using the default [`Options`].
///
/// ```
/// let result = decomment::process("x = 1  # counter\n", "python").unwrap();
/// assert_eq!(result.text, "x = 1\n");
/// assert_eq!(result.removed_count, 1);
/// ```
pub fn process(source: &str, language_id: &str) -> Result<RewriteResult> {
    process_with(source, language_id, &Options::default())
}

pub fn process_with(source: &str, language_id: &str, options: &Options) -> Result<RewriteResult> {
    Ok(analyze(source, language_id, options)?.rewrite())
}

/// Runs every stage except the rewriter, so decisions can be inspected or
/// overridden before any text is produced.
#[tracing::instrument(level = "debug", skip(source, options), fields(bytes = source.len()))]
pub fn analyze(source: &str, language_id: &str, options: &Options) -> Result<Analysis> {
    let profile = profile::lookup(language_id).map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;
    Analysis::new(source, profile, options)
}

/// One comment or floating literal together with what the classifier decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentInfo {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub kind: SpanKind,
    pub text: String,
    pub verdict: Verdict,
    pub reason: Reason,
}

/// Classified spans of one source text.
#[derive(Debug, Clone)]
pub struct Analysis {
    spans: Vec<Span>,
    decisions: Vec<ClassificationDecision>,
}

impl Analysis {
    pub fn new(source: &str, profile: &'static LanguageProfile, options: &Options) -> Result<Self> {
        let spans = tokenize(source, profile)?;
        let docstrings = mark_docstrings(&spans, profile);
        let decisions = classify(&spans, &docstrings, profile, options);
        Ok(Self {
            spans,
            decisions,
        })
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn decisions(&self) -> &[ClassificationDecision] {
        &self.decisions
    }

    pub fn comments(&self) -> Vec<CommentInfo> {
        self.decisions
            .iter()
            .map(|decision| {
                let span = &self.spans[decision.span];
                CommentInfo {
                    offset: span.start,
                    line: span.line,
                    column: span.column,
                    kind: span.kind,
                    text: span.text.clone(),
                    verdict: decision.verdict,
                    reason: decision.reason,
                }
            })
            .collect()
    }

    /// Keeps the classified span that starts at byte `offset`, whatever the
    /// classifier decided. Returns `false` when no classified span starts there.
    pub fn retain(&mut self, offset: usize) -> bool {
        let spans = &self.spans;
        match self
            .decisions
            .iter_mut()
            .find(|decision| spans[decision.span].start == offset)
        {
            Some(decision) => {
                if decision.is_removal() {
                    decision.verdict = Verdict::Keep;
                    decision.reason = Reason::UserRetained;
                }
                true
            }
            None => {
                tracing::warn!(offset, "no classified span starts at offset");
                false
            }
        }
    }

    pub fn rewrite(&self) -> RewriteResult {
        rewrite(&self.spans, &self.decisions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, FailureKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_process() {
        let source = "def f():\n    \"\"\"Docs.\"\"\"\n    return 1  # one\n";
        let result = process(source, "python").unwrap();
        assert_eq!(result.text, "def f():\n    \"\"\"Docs.\"\"\"\n    return 1\n");
        assert_eq!(result.removed_count, 1);
    }

    #[test]
    fn test_empty_input() {
        let result = process("", "py").unwrap();
        assert_eq!(result, RewriteResult::empty());
    }

    #[test]
    fn test_unsupported_language() {
        let err = process("x", "cobol").unwrap_err();
        assert!(matches!(&err, Error::UnsupportedLanguage { id } if id == "cobol"));
        assert_eq!(err.failure().kind, FailureKind::UnsupportedLanguage);
    }

    #[test]
    fn test_unterminated_literal_produces_no_output() {
        let err = process("x = 1  # c\ns = 'open\n", "python").unwrap_err();
        let failure = err.failure();
        assert_eq!(failure.kind, FailureKind::UnterminatedLiteral);
        assert_eq!(failure.offset, Some(15));
    }

    #[test]
    fn test_comments_report() {
        let analysis = analyze("#!/bin/sh\nx = 1  # one\n", "python", &Options::default()).unwrap();
        let comments = analysis.comments();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].reason, Reason::InterpreterDirective);
        assert_eq!(comments[1].line, 2);
        assert_eq!(comments[1].column, 8);
        assert_eq!(comments[1].offset, 17);
        assert_eq!(comments[1].verdict, Verdict::Remove);
    }

    #[test]
    fn test_retain() {
        let source = "a = 1  # keep me\nb = 2  # drop me\n";
        let mut analysis = analyze(source, "python", &Options::default()).unwrap();
        assert!(analysis.retain(7));
        assert!(!analysis.retain(0));

        let retained = &analysis.comments()[0];
        assert_eq!(retained.reason, Reason::UserRetained);
        let result = analysis.rewrite();
        assert_eq!(result.text, "a = 1  # keep me\nb = 2\n");
        assert_eq!(result.removed_count, 1);
    }

    #[test]
    fn test_retain_does_not_relabel_kept_spans() {
        let mut analysis = analyze("#!/bin/sh\n", "python", &Options::default()).unwrap();
        assert!(analysis.retain(0));
        assert_eq!(analysis.comments()[0].reason, Reason::InterpreterDirective);
    }

    #[test]
    fn test_comment_info_serializes() {
        let analysis = analyze("// note\n", "js", &Options::default()).unwrap();
        let json = serde_json::to_value(analysis.comments()).unwrap();
        assert_eq!(json[0]["kind"], "line_comment");
        assert_eq!(json[0]["verdict"], "remove");
        assert_eq!(json[0]["reason"], "commentary");
    }
}
