//! Error types for parsing screen and crop specifications

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use chumsky::error::{Rich, RichPattern, RichReason};
use thiserror::Error;

use crate::parser::lexer::Token;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("invalid screen spec at {span:?}: {message}")]
    InvalidScreenSpec {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    #[error("invalid crop spec at {span:?}: {message}")]
    InvalidRegionSpec {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    #[error("invalid unit '{unit}'")]
    InvalidUnit { unit: String, span: Span },

    #[error("{message}")]
    InvalidValue { span: Span, message: String },
}

impl ParseError {
    pub fn invalid_value(span: Span, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            span,
            message: message.into(),
        }
    }

    pub(crate) fn screen_syntax(err: Rich<'_, Token>) -> Self {
        let (span, message, expected) = describe(&err);
        Self::InvalidScreenSpec {
            span,
            message,
            expected,
        }
    }

    pub(crate) fn region_syntax(err: Rich<'_, Token>) -> Self {
        let (span, message, expected) = describe(&err);
        Self::InvalidRegionSpec {
            span,
            message,
            expected,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            Self::InvalidScreenSpec { span, .. }
            | Self::InvalidRegionSpec { span, .. }
            | Self::InvalidUnit { span, .. }
            | Self::InvalidValue { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        self.format_with_color(source, filename, true)
    }

    /// Format the error with source context, optionally without ANSI colors
    pub fn format_with_color(&self, source: &str, filename: &str, color: bool) -> String {
        let (message, label) = match self {
            Self::InvalidScreenSpec {
                message, expected, ..
            }
            | Self::InvalidRegionSpec {
                message, expected, ..
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };
                (self.to_string(), format!("{}{}", message, expected_str))
            }
            Self::InvalidUnit { .. } => (
                self.to_string(),
                "expected one of: ppm, dpi, in, m, cm, mm".to_string(),
            ),
            Self::InvalidValue { message, .. } => (self.to_string(), message.clone()),
        };

        let span = self.span().clone();
        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_config(Config::default().with_color(color))
            .with_message(message)
            .with_label(
                Label::new((filename, span))
                    .with_message(label)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

fn describe(err: &Rich<'_, Token>) -> (Span, String, Vec<String>) {
    let message = match err.reason() {
        RichReason::ExpectedFound { found, .. } => {
            let found_str = match found {
                Some(tok) => format_token(tok),
                None => "end of input".to_string(),
            };
            format!("unexpected {}", found_str)
        }
        RichReason::Custom(msg) => msg.to_string(),
    };

    let expected = err
        .expected()
        .filter_map(|e| match e {
            RichPattern::Token(tok) => Some(format_token(tok)),
            RichPattern::Label(label) => Some(label.to_string()),
            RichPattern::EndOfInput => Some("end of input".to_string()),
            RichPattern::Identifier(s) => Some(format!("'{}'", s)),
            RichPattern::Any => Some("any token".to_string()),
            RichPattern::SomethingElse => None,
        })
        .collect();

    (err.span().into_range(), message, expected)
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    match tok {
        Token::Times => "'x'".to_string(),
        Token::Slash => "'/'".to_string(),
        Token::At => "'@'".to_string(),
        Token::Plus => "'+'".to_string(),
        Token::Minus => "'-'".to_string(),
        Token::Integer(n) => format!("integer {}", n),
        Token::Decimal(n) => format!("number {}", n),
        Token::Word(w) => format!("'{}'", w),
        Token::Error => "unrecognized character".to_string(),
    }
}
