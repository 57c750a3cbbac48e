//! Raw lexical pieces

use logos::Logos;

/// One whitespace-delimited word of source text.
///
/// Braces inside a word are ordinary characters. Only a run of `{` at the
/// start or a run of `}` at the end of a word takes part in grouping; see
/// [`brace_runs`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Piece {
    #[regex(r"[^ \t\n\r\f]+")]
    Word,
}

/// Number of leading `{` and trailing `}` in a word.
///
/// The leading run is taken first, so `{}` is one open and one close.
pub fn brace_runs(word: &str) -> (usize, usize) {
    let opens = word.len() - word.trim_start_matches('{').len();
    let rest = &word[opens..];
    let closes = rest.len() - rest.trim_end_matches('}').len();
    (opens, closes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(source: &str) -> Vec<&str> {
        let mut lexer = Piece::lexer(source);
        let mut words = Vec::new();
        while let Some(piece) = lexer.next() {
            assert_eq!(piece, Ok(Piece::Word));
            words.push(lexer.slice());
        }
        words
    }

    #[test]
    fn test_words_and_whitespace() {
        assert_eq!(words("1  2\tadd\n"), vec!["1", "2", "add"]);
    }

    #[test]
    fn test_braces_stay_in_words() {
        assert_eq!(words("{1 2 add}"), vec!["{1", "2", "add}"]);
        assert_eq!(words("(a}b) /x{y"), vec!["(a}b)", "/x{y"]);
    }

    #[test]
    fn test_brace_runs() {
        assert_eq!(brace_runs("add"), (0, 0));
        assert_eq!(brace_runs("{{1"), (2, 0));
        assert_eq!(brace_runs("dup}}"), (0, 2));
        assert_eq!(brace_runs("{}"), (1, 1));
        assert_eq!(brace_runs("{{}}"), (2, 2));
        assert_eq!(brace_runs("}"), (0, 1));
    }

    #[test]
    fn test_brace_runs_ignore_inner_braces() {
        assert_eq!(brace_runs("(a}b)"), (0, 0));
        assert_eq!(brace_runs("{(a}b)"), (1, 0));
        assert_eq!(brace_runs("/x{y"), (0, 0));
        assert_eq!(brace_runs("}x{"), (0, 0));
    }
}
