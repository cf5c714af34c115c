//! Lexer for screen and crop specifications using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    // Separators
    #[token("x", priority = 10)]
    Times,
    #[token("/")]
    Slash,
    #[token("@")]
    At,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,

    // Literals. Integers and decimals are distinct so pixel sizes stay integral.
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u32>().ok())]
    Integer(u32),

    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Decimal(f64),

    // Unit suffixes. Digits are excluded so `2560x1440` splits at the `x`.
    #[regex(r"[a-zA-Z]+", |lex| lex.slice().to_string())]
    Word(String),

    /// Anything the lexer could not recognize
    Error,
}

/// Lex input string into tokens with spans
///
/// Unrecognized input becomes [`Token::Error`] so the grammar rejects it
/// instead of silently skipping it.
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| (tok.unwrap_or(Token::Error), span))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).map(|(t, _)| t).collect()
    }

    #[test]
    fn test_screen_spec() {
        assert_eq!(
            tokens("2560x1440/59.8cm"),
            vec![
                Token::Integer(2560),
                Token::Times,
                Token::Integer(1440),
                Token::Slash,
                Token::Decimal(59.8),
                Token::Word("cm".to_string()),
            ]
        );
    }

    #[test]
    fn test_offsets() {
        assert_eq!(
            tokens("@-2in+5mm"),
            vec![
                Token::At,
                Token::Minus,
                Token::Integer(2),
                Token::Word("in".to_string()),
                Token::Plus,
                Token::Integer(5),
                Token::Word("mm".to_string()),
            ]
        );
    }

    #[test]
    fn test_word_absorbs_x() {
        // A unit directly followed by letters is one word, not a separator
        assert_eq!(tokens("xyz"), vec![Token::Word("xyz".to_string())]);
    }

    #[test]
    fn test_single_letter_unit_after_size() {
        assert_eq!(
            tokens("1x1/2m"),
            vec![
                Token::Integer(1),
                Token::Times,
                Token::Integer(1),
                Token::Slash,
                Token::Integer(2),
                Token::Word("m".to_string()),
            ]
        );
        assert_eq!(tokens("x"), vec![Token::Times]);
    }

    #[test]
    fn test_unknown_characters() {
        assert_eq!(
            tokens("10!"),
            vec![Token::Integer(10), Token::Error]
        );
        assert_eq!(tokens("1 x"), vec![Token::Integer(1), Token::Error, Token::Times]);
    }

    #[test]
    fn test_spans() {
        let spans: Vec<_> = lex("92dpi").map(|(_, s)| s).collect();
        assert_eq!(spans, vec![0..2, 2..5]);
    }
}
