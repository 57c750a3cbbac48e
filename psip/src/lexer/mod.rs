//! Whitespace tokenizer using logos
//!
//! The interpreter core only ever sees single tokens. This module is the
//! caller-side splitter: it breaks a line on whitespace and re-joins a
//! `{ ... }` group that spans several whitespace-separated words into one
//! token, so `{ 1 2 add }` reaches the classifier as a single block literal.
//! A brace only groups at the start (`{`) or end (`}`) of a word; `(a}b)` is
//! one plain word.

mod token;

pub use token::{brace_runs, Piece};

use crate::error::{PsError, Result};
use crate::span::{Span, Spanned};
use logos::Logos;

/// A raw token and where it came from
pub type Token = Spanned<String>;

/// Tokenize source text.
///
/// An unmatched `}` is a lexer error; a `{` that is still open at the end of
/// the input yields [`PsError::UnclosedBlock`] so a line editor can keep
/// reading.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    scan(source, false)
}

/// Split the interior of a block literal into its tokens.
///
/// One level only: nested groups stay opaque sub-tokens. Never fails;
/// unbalanced braces are kept as ordinary text.
pub fn split_block(body: &str) -> Vec<String> {
    scan(body, true)
        .unwrap_or_default()
        .into_iter()
        .map(|token| token.node)
        .collect()
}

fn scan(source: &str, lenient: bool) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut lexer = Piece::lexer(source);
    let mut depth = 0usize;
    let mut group_start = 0usize;

    while let Some(result) = lexer.next() {
        let span = Span::from(lexer.span());
        let word = lexer.slice();
        result.map_err(|_| PsError::lexer(format!("unexpected input: {word:?}"), span))?;
        let (opens, closes) = brace_runs(word);

        if depth == 0 && opens == 0 {
            if closes > 0 && !lenient {
                let at = span.end - closes;
                return Err(PsError::lexer("unmatched `}`", Span::new(at, at + 1)));
            }
            tokens.push(Spanned::new(word.to_string(), span));
            continue;
        }

        if depth == 0 {
            group_start = span.start;
        }
        depth += opens;
        if closes > depth {
            if !lenient {
                let at = span.end - closes + depth;
                return Err(PsError::lexer("unmatched `}`", Span::new(at, at + 1)));
            }
            depth = 0;
        } else {
            depth -= closes;
        }

        if depth == 0 {
            let group = Span::new(group_start, span.end);
            tokens.push(Spanned::new(source[group.start..group.end].to_string(), group));
        }
    }

    if depth > 0 {
        let rest = Span::new(group_start, source.len());
        if !lenient {
            return Err(PsError::unclosed_block(rest));
        }
        tokens.push(Spanned::new(source[rest.start..rest.end].to_string(), rest));
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<String> {
        tokenize(source).unwrap().into_iter().map(|t| t.node).collect()
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("   \t ").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_plain_words() {
        assert_eq!(texts("1 2 add"), vec!["1", "2", "add"]);
    }

    #[test]
    fn test_tokenize_spans() {
        let tokens = tokenize("3 4 mul").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 1));
        assert_eq!(tokens[1].span, Span::new(2, 3));
        assert_eq!(tokens[2].span, Span::new(4, 7));
    }

    #[test]
    fn test_tokenize_joins_spaced_block() {
        assert_eq!(texts("{ 1 2 add } 3 repeat"), vec!["{ 1 2 add }", "3", "repeat"]);
    }

    #[test]
    fn test_tokenize_block_span_covers_braces() {
        let tokens = tokenize("x {1 dup}").unwrap();
        assert_eq!(tokens[1].span, Span::new(2, 9));
    }

    #[test]
    fn test_tokenize_nested_block_is_one_token() {
        assert_eq!(
            texts("/f { { 1 } { 2 } true ifelse } def"),
            vec!["/f", "{ { 1 } { 2 } true ifelse }", "def"]
        );
    }

    #[test]
    fn test_tokenize_block_across_lines() {
        assert_eq!(texts("{ 1\n 2 }"), vec!["{ 1\n 2 }"]);
    }

    #[test]
    fn test_tokenize_unmatched_close() {
        let err = tokenize("1 }").unwrap_err();
        assert!(matches!(err, PsError::Lexer { span, .. } if span == Span::new(2, 3)));
    }

    #[test]
    fn test_tokenize_tight_braces() {
        assert_eq!(texts("{1 2 add} {}"), vec!["{1 2 add}", "{}"]);
        assert_eq!(texts("{{1} dup}"), vec!["{{1} dup}"]);
    }

    #[test]
    fn test_tokenize_braces_inside_words_are_text() {
        assert_eq!(texts("(a}b) /x{y (c{)"), vec!["(a}b)", "/x{y", "(c{)"]);
        assert_eq!(texts("{(a}b) x}"), vec!["{(a}b) x}"]);
    }

    #[test]
    fn test_tokenize_extra_close_after_group() {
        let err = tokenize("{1}}").unwrap_err();
        assert!(matches!(err, PsError::Lexer { span, .. } if span == Span::new(3, 4)));
        let err = tokenize("add}").unwrap_err();
        assert!(matches!(err, PsError::Lexer { span, .. } if span == Span::new(3, 4)));
    }

    #[test]
    fn test_tokenize_unclosed_block() {
        let err = tokenize("1 { 2").unwrap_err();
        assert!(matches!(err, PsError::UnclosedBlock { span } if span == Span::new(2, 5)));
    }

    #[test]
    fn test_split_block_shallow() {
        assert_eq!(split_block(" 1 {2 3} add "), vec!["1", "{2 3}", "add"]);
    }

    #[test]
    fn test_split_block_lenient() {
        assert_eq!(split_block("1 } 2"), vec!["1", "}", "2"]);
        assert_eq!(split_block("1 { 2"), vec!["1", "{ 2"]);
        assert_eq!(split_block("{a}} b"), vec!["{a}}", "b"]);
    }

    #[test]
    fn test_split_block_keeps_inner_braces() {
        assert_eq!(split_block("(a}b) x"), vec!["(a}b)", "x"]);
        assert_eq!(split_block("{(a}b)} /k{v"), vec!["{(a}b)}", "/k{v"]);
    }

    #[test]
    fn test_split_block_empty() {
        assert!(split_block("").is_empty());
        assert!(split_block("   ").is_empty());
    }
}
