//! # Docstring Detection
//!
//! Marks the string literals that document a module, class or function.
//!
//! A literal is a docstring when all of the following hold:
//!
//! * the profile has a [`DocstringRule::BlockStart`] rule,
//! * the literal is a statement on its own line(s),
//! * walking backward over whitespace, newlines and comments, the nearest
//!   significant span either does not exist (module docstring) or ends a header
//!   such as `def name(...):` or `class Name:`.
//!
//! A literal that appears anywhere else is not documentation, however much it
//! looks like it. It is left for the classifier to decide.

use std::collections::BTreeSet;

use crate::layout::{is_statement_literal, logical_line, previous_significant};
use crate::profile::{DocstringRule, LanguageProfile};
use crate::tokenizer::{Span, SpanKind};

/// Returns the indices of the spans that are docstrings.
#[tracing::instrument(level = "debug", skip_all, fields(language = profile.name))]
pub fn mark_docstrings(spans: &[Span], profile: &LanguageProfile) -> BTreeSet<usize> {
    let DocstringRule::BlockStart {
        header_keywords,
        header_terminator,
    } = profile.docstring_rule
    else {
        return BTreeSet::new();
    };

    let docstrings: BTreeSet<usize> = (0..spans.len())
        .filter(|&index| is_statement_literal(spans, index))
        .filter(|&index| match previous_significant(spans, index) {
            None => true,
            Some(previous) => {
                opens_documented_block(spans, previous, header_keywords, header_terminator)
            }
        })
        .collect();

    tracing::debug!(count = docstrings.len(), "docstrings marked");
    docstrings
}

/// Whether the span at `index` terminates a header that introduces a block whose
/// first statement may be documentation.
pub fn opens_documented_block(
    spans: &[Span],
    index: usize,
    header_keywords: &[&str],
    header_terminator: char,
) -> bool {
    if !ends_header(&spans[index], header_terminator) {
        return false;
    }
    let line = logical_line(spans, index);
    let header = line.trim_start();
    header_keywords
        .iter()
        .any(|keyword| starts_with_keyword(header, keyword))
}

/// Whether `span` is code ending with the block terminator, such as the `:` of
/// any Python compound statement header.
pub fn ends_header(span: &Span, header_terminator: char) -> bool {
    span.kind == SpanKind::Code && span.text.ends_with(header_terminator)
}

fn starts_with_keyword(header: &str, keyword: &str) -> bool {
    header
        .strip_prefix(keyword)
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{JAVASCRIPT, PYTHON};
    use crate::tokenizer::tokenize;

    fn docstring_texts(source: &str) -> Vec<String> {
        let spans = tokenize(source, &PYTHON).unwrap();
        mark_docstrings(&spans, &PYTHON)
            .into_iter()
            .map(|index| spans[index].text.clone())
            .collect()
    }

    #[test]
    fn test_module_docstring() {
        let source = "\"\"\"Module docs.\"\"\"\nimport os\n";
        assert_eq!(docstring_texts(source), vec!["\"\"\"Module docs.\"\"\""]);
    }

    #[test]
    fn test_module_docstring_after_header_comments() {
        let source = "#!/usr/bin/env python3\n# -*- coding: utf-8 -*-\n\"\"\"\nDocs.\n\"\"\"\n";
        assert_eq!(docstring_texts(source), vec!["\"\"\"\nDocs.\n\"\"\""]);
    }

    #[test]
    fn test_function_and_class_docstrings() {
        let source = r#"class Greeter:
    """Greets people."""

    def greet(self, name: str) -> str:
        """Return a greeting."""
        return f"hi {name}"
"#;
        assert_eq!(
            docstring_texts(source),
            vec!["\"\"\"Greets people.\"\"\"", "\"\"\"Return a greeting.\"\"\""]
        );
    }

    #[test]
    fn test_async_and_multiline_header() {
        let source = "async def fetch(\n    url,\n    retries=3,\n):\n    '''Fetch a URL.'''\n";
        assert_eq!(docstring_texts(source), vec!["'''Fetch a URL.'''"]);
    }

    #[test]
    fn test_comment_between_header_and_docstring() {
        let source = "def f():\n    # explains f\n    \"\"\"Docs.\"\"\"\n    return 1\n";
        assert_eq!(docstring_texts(source), vec!["\"\"\"Docs.\"\"\""]);
    }

    #[test]
    fn test_floating_literal_is_not_docstring() {
        let source = "def f():\n    x = 1\n    \"\"\"Not docs.\"\"\"\n    return x\n\n\"\"\"Trailing block.\"\"\"\n";
        assert!(docstring_texts(source).is_empty());
    }

    #[test]
    fn test_other_compound_headers_are_not_documented() {
        let source = "x = 0\nif x:\n    \"\"\"Not docs.\"\"\"\n    pass\n";
        assert!(docstring_texts(source).is_empty());
    }

    #[test]
    fn test_expression_literal_is_not_docstring() {
        let source = "def f():\n    return \"\"\"text\"\"\"\n";
        assert!(docstring_texts(source).is_empty());
    }

    #[test]
    fn test_keyword_prefix_of_identifier() {
        let source = "x = 1\ndefault = {\n  'a': 1}\nclassic:\n    'text'\n";
        assert!(docstring_texts(source).is_empty());
    }

    #[test]
    fn test_profile_without_docstrings() {
        let spans = tokenize("'use strict';\nfunction f() {}\n", &JAVASCRIPT).unwrap();
        assert!(mark_docstrings(&spans, &JAVASCRIPT).is_empty());
    }
}
