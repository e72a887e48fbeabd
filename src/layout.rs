//! Positional queries over a span sequence.
//!
//! The docstring detector and the classifier both reason about where a span
//! sits: what precedes it, whether it is alone on its line, how deeply its line
//! is indented. These helpers answer those questions on the raw span slice.

use crate::tokenizer::{Span, SpanKind};

/// Nearest span before `index` that is not whitespace, a newline or a comment.
pub fn previous_significant(spans: &[Span], index: usize) -> Option<usize> {
    (0..index).rev().find(|&i| !spans[i].kind.is_trivia())
}

/// Nearest span after `index` that is not whitespace, a newline or a comment.
pub fn next_significant(spans: &[Span], index: usize) -> Option<usize> {
    (index + 1..spans.len()).find(|&i| !spans[i].kind.is_trivia())
}

/// Index of the first span on the line that `index` starts on.
pub fn line_start(spans: &[Span], index: usize) -> usize {
    (0..index)
        .rev()
        .find(|&i| spans[i].kind == SpanKind::Newline)
        .map_or(0, |newline| newline + 1)
}

/// Whether only whitespace precedes `index` on its line.
pub fn starts_line(spans: &[Span], index: usize) -> bool {
    spans[line_start(spans, index)..index]
        .iter()
        .all(|span| span.kind == SpanKind::Whitespace)
}

/// Whether only whitespace and comments follow `index` up to the end of its line.
pub fn ends_line(spans: &[Span], index: usize) -> bool {
    spans[index + 1..]
        .iter()
        .take_while(|span| span.kind != SpanKind::Newline)
        .all(|span| span.kind == SpanKind::Whitespace || span.kind.is_comment())
}

/// Whether the line holding `index` continues an earlier line: a bracket is
/// still open, or the previous line ends with a backslash.
pub fn continues_line(spans: &[Span], index: usize) -> bool {
    let start = line_start(spans, index);
    let previous = start.checked_sub(2).map(|i| &spans[i]);
    if previous.is_some_and(|span| span.kind == SpanKind::Code && span.text.ends_with('\\')) {
        return true;
    }
    let mut depth: usize = 0;
    for span in spans[..start].iter().rev() {
        if span.kind != SpanKind::Code {
            continue;
        }
        for c in span.text.chars().rev() {
            match c {
                ')' | ']' | '}' => depth += 1,
                '(' | '[' | '{' if depth == 0 => return true,
                '(' | '[' | '{' => depth -= 1,
                _ => {}
            }
        }
    }
    false
}

/// A string literal that forms a statement on its own: alone on its line(s) and
/// not part of a bracketed or backslash-continued expression.
pub fn is_statement_literal(spans: &[Span], index: usize) -> bool {
    spans[index].kind == SpanKind::StringLiteral
        && starts_line(spans, index)
        && ends_line(spans, index)
        && !continues_line(spans, index)
}

/// Width, in characters, of the indentation of the line that `index` starts on.
pub fn indentation(spans: &[Span], index: usize) -> usize {
    let first = &spans[line_start(spans, index)];
    if first.kind == SpanKind::Whitespace {
        first.text.chars().count()
    } else {
        0
    }
}

/// Text of the logical line that ends with span `index`, comments excluded.
///
/// Walking backward, a newline only ends the logical line when every bracket
/// closed so far has been opened again and the line before it does not end with
/// a backslash continuation.
pub fn logical_line(spans: &[Span], index: usize) -> String {
    let mut depth: usize = 0;
    let mut first = 0;
    for i in (0..=index).rev() {
        let span = &spans[i];
        match span.kind {
            SpanKind::Code => {
                for c in span.text.chars().rev() {
                    match c {
                        ')' | ']' | '}' => depth += 1,
                        '(' | '[' | '{' => depth = depth.saturating_sub(1),
                        _ => {}
                    }
                }
            }
            SpanKind::Newline => {
                let continued = i > 0 && spans[i - 1].text.ends_with('\\');
                if depth == 0 && !continued {
                    first = i + 1;
                    break;
                }
            }
            _ => {}
        }
    }
    spans[first..=index]
        .iter()
        .filter(|span| !span.kind.is_comment())
        .map(|span| span.text.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::PYTHON;
    use crate::tokenizer::tokenize;

    fn find(spans: &[Span], text: &str) -> usize {
        spans.iter().position(|s| s.text == text).unwrap()
    }

    #[test]
    fn test_previous_and_next_significant_skip_comments() {
        let spans = tokenize("a\n# note\n  b", &PYTHON).unwrap();
        let b = find(&spans, "b");
        let a = find(&spans, "a");
        assert_eq!(previous_significant(&spans, b), Some(a));
        assert_eq!(next_significant(&spans, a), Some(b));
        assert_eq!(previous_significant(&spans, a), None);
        assert_eq!(next_significant(&spans, b), None);
    }

    #[test]
    fn test_statement_literal() {
        let spans = tokenize("x = 'a'\n    'b'  # trailing\n", &PYTHON).unwrap();
        assert!(!is_statement_literal(&spans, find(&spans, "'a'")));
        assert!(is_statement_literal(&spans, find(&spans, "'b'")));
    }

    #[test]
    fn test_literal_inside_brackets_is_not_a_statement() {
        for source in [
            "print(\n    \"hello\"\n)\n",
            "names = [\n    \"a\",\n    \"b\"\n]\n",
            "msg = (\n    \"part one \"\n    \"part two\"\n)\n",
            "d = {\n    'k':\n        'v'\n}\n",
        ] {
            let spans = tokenize(source, &PYTHON).unwrap();
            let literals: Vec<usize> = (0..spans.len())
                .filter(|&i| spans[i].kind == SpanKind::StringLiteral)
                .collect();
            assert!(!literals.is_empty());
            for index in literals {
                assert!(continues_line(&spans, index), "{source:?}");
                assert!(!is_statement_literal(&spans, index), "{source:?}");
            }
        }
    }

    #[test]
    fn test_backslash_continuation_is_not_a_statement() {
        let spans = tokenize("x = \\\n    'tail'\n", &PYTHON).unwrap();
        let tail = find(&spans, "'tail'");
        assert!(continues_line(&spans, tail));
        assert!(!is_statement_literal(&spans, tail));
    }

    #[test]
    fn test_closed_brackets_before_statement_literal() {
        let spans = tokenize("f(a, [1, {2: 3}])\n'floating'\n", &PYTHON).unwrap();
        let floating = find(&spans, "'floating'");
        assert!(!continues_line(&spans, floating));
        assert!(is_statement_literal(&spans, floating));
    }

    #[test]
    fn test_indentation() {
        let spans = tokenize("def f():\n    return 1\n", &PYTHON).unwrap();
        assert_eq!(indentation(&spans, find(&spans, "return")), 4);
        assert_eq!(indentation(&spans, find(&spans, "def")), 0);
    }

    #[test]
    fn test_logical_line_joins_bracketed_continuation() {
        let source = "def f(\n    a,  # first\n    b,\n):\n";
        let spans = tokenize(source, &PYTHON).unwrap();
        let colon = find(&spans, "):");
        assert_eq!(logical_line(&spans, colon), "def f(\n    a,  \n    b,\n):");
    }

    #[test]
    fn test_logical_line_backslash_continuation() {
        let spans = tokenize("x = 1\nclass A \\\n        (Base):\n", &PYTHON).unwrap();
        let colon = find(&spans, "(Base):");
        assert_eq!(logical_line(&spans, colon), "class A \\\n        (Base):");
    }
}
