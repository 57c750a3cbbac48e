//! Error types and reporting

use crate::interp::InterpError;
use crate::lexer::Token;
use crate::span::Span;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PsError>;

/// Error surfaced to the caller of the interpreter
#[derive(Debug, Error)]
pub enum PsError {
    #[error("Lexer error at {span}: {message}")]
    Lexer { message: String, span: Span },

    /// A `{` was still open at the end of the input
    #[error("Lexer error at {span}: unclosed block")]
    UnclosedBlock { span: Span },

    /// A token failed to evaluate
    #[error("Error in `{token}` at {span}: {error}")]
    Eval {
        error: InterpError,
        token: String,
        span: Span,
    },

    #[error("Config error: {message}")]
    Config { message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl PsError {
    pub fn lexer(message: impl Into<String>, span: Span) -> Self {
        Self::Lexer {
            message: message.into(),
            span,
        }
    }

    pub fn unclosed_block(span: Span) -> Self {
        Self::UnclosedBlock { span }
    }

    pub fn eval(error: InterpError, token: &Token) -> Self {
        Self::Eval {
            error,
            token: token.node.clone(),
            span: token.span,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn io_error(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lexer { span, .. } => Some(*span),
            Self::UnclosedBlock { span } => Some(*span),
            Self::Eval { span, .. } => Some(*span),
            Self::Config { .. } | Self::Io { .. } => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Lexer { message, .. } => message.clone(),
            Self::UnclosedBlock { .. } => "unclosed block".to_string(),
            Self::Eval { error, .. } => error.to_string(),
            Self::Config { message } => message.clone(),
            Self::Io { message } => message.clone(),
        }
    }

    /// The interpreter error behind an evaluation failure
    pub fn interp_error(&self) -> Option<&InterpError> {
        match self {
            Self::Eval { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PsError {
    fn from(err: std::io::Error) -> Self {
        Self::io_error(err.to_string())
    }
}

/// Report error with ariadne
pub fn report_error(filename: &str, source: &str, error: &PsError) -> std::io::Result<()> {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let kind = match error {
        PsError::Lexer { .. } | PsError::UnclosedBlock { .. } => "Lexer",
        PsError::Eval { error, .. } => error.category().label(),
        PsError::Config { .. } => "Config",
        PsError::Io { .. } => "IO",
    };

    match error.span() {
        Some(span) => Report::build(ReportKind::Error, (filename, span.start..span.end))
            .with_message(format!("{kind} error"))
            .with_label(
                Label::new((filename, span.start..span.end))
                    .with_message(error.message())
                    .with_color(Color::Red),
            )
            .finish()
            .eprint((filename, Source::from(source))),
        None => Report::build(ReportKind::Error, (filename, 0..0))
            .with_message(format!("{kind} error: {}", error.message()))
            .finish()
            .eprint((filename, Source::from(source))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Spanned;

    #[test]
    fn test_lexer_error_span_and_message() {
        let err = PsError::lexer("unmatched `}`", Span::new(2, 3));
        assert_eq!(err.span(), Some(Span::new(2, 3)));
        assert_eq!(err.message(), "unmatched `}`");
        assert_eq!(err.to_string(), "Lexer error at 2..3: unmatched `}`");
    }

    #[test]
    fn test_eval_error_keeps_token() {
        let token = Spanned::new("frob".to_string(), Span::new(4, 8));
        let err = PsError::eval(InterpError::undefined("frob", None), &token);
        assert_eq!(err.span(), Some(Span::new(4, 8)));
        assert!(err.to_string().contains("`frob`"));
        assert!(err.interp_error().is_some());
    }

    #[test]
    fn test_config_error_has_no_span() {
        let err = PsError::config("bad value");
        assert_eq!(err.span(), None);
        assert_eq!(err.to_string(), "Config error: bad value");
        assert!(err.interp_error().is_none());
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.ps");
        let err: PsError = io.into();
        assert!(matches!(err, PsError::Io { .. }));
        assert!(err.message().contains("missing.ps"));
    }

    #[test]
    fn test_report_error_does_not_fail() {
        let err = PsError::lexer("unmatched `}`", Span::new(2, 3));
        assert!(report_error("<test>", "1 }", &err).is_ok());
        let err = PsError::config("oops");
        assert!(report_error("<test>", "", &err).is_ok());
    }
}
