use logos::Logos;
use std::fmt;
use std::ops::Range;

use crate::error::SyntaxError;

/// Token type for limit expressions.
///
/// Identifiers are not classified here; the parser decides whether a name
/// is a function, a constant, or a variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal. Keeps the source text so it can be echoed back as typed.
    Number(f64, String),
    /// Bare name.
    Ident(String),
    /// The symbol `π`.
    Pi,
    /// The symbol `∞`.
    Infinity,
    /// `+`
    Plus,
    /// `-` or `−`
    Minus,
    /// `*`, `·` or `×`
    Star,
    /// `/` or `÷`
    Slash,
    /// `^` or `**`
    Caret,
    /// `(`
    LParen,
    /// `)`
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(_, raw) => write!(f, "{raw}"),
            Token::Ident(name) => write!(f, "{name}"),
            Token::Pi => write!(f, "π"),
            Token::Infinity => write!(f, "∞"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Caret => write!(f, "^"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

#[derive(Logos, Debug)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[token("π")]
    Pi,

    #[token("∞")]
    Infinity,

    #[token("+")]
    Plus,

    #[token("-")]
    #[token("−")]
    Minus,

    #[token("*")]
    #[token("·")]
    #[token("×")]
    Star,

    #[token("/")]
    #[token("÷")]
    Slash,

    #[token("^")]
    #[token("**")]
    Caret,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,
}

/// Lex an expression into `(Token, Span)` pairs.
///
/// Lexing continues past bad characters so every problem is reported at once.
pub fn lex(source: &str) -> (Vec<(Token, Range<usize>)>, Vec<SyntaxError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let token = match result {
            Ok(RawToken::Number) => {
                let raw = lexer.slice();
                match raw.parse::<f64>() {
                    Ok(value) => Token::Number(value, raw.to_string()),
                    Err(_) => {
                        errors.push(SyntaxError {
                            span,
                            message: format!("invalid number: {raw}"),
                        });
                        continue;
                    }
                }
            }
            Ok(RawToken::Ident) => Token::Ident(lexer.slice().to_string()),
            Ok(RawToken::Pi) => Token::Pi,
            Ok(RawToken::Infinity) => Token::Infinity,
            Ok(RawToken::Plus) => Token::Plus,
            Ok(RawToken::Minus) => Token::Minus,
            Ok(RawToken::Star) => Token::Star,
            Ok(RawToken::Slash) => Token::Slash,
            Ok(RawToken::Caret) => Token::Caret,
            Ok(RawToken::LParen) => Token::LParen,
            Ok(RawToken::RParen) => Token::RParen,
            Err(()) => {
                errors.push(SyntaxError {
                    message: format!("unexpected character: {:?}", &source[span.clone()]),
                    span,
                });
                continue;
            }
        };
        tokens.push((token, span));
    }

    (tokens, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(source: &str) -> Vec<String> {
        let (tokens, errors) = lex(source);
        assert!(errors.is_empty(), "errors: {errors:?}");
        tokens.iter().map(|(t, _)| t.to_string()).collect()
    }

    #[test]
    fn lex_rational_function() {
        assert_eq!(
            rendered("(x^2 - 1)/(x - 1)"),
            ["(", "x", "^", "2", "-", "1", ")", "/", "(", "x", "-", "1", ")"]
        );
    }

    #[test]
    fn lex_numbers_keep_source_text() {
        let (tokens, _) = lex("0.50 .5 1e-3 2.");
        let raws: Vec<_> = tokens
            .iter()
            .map(|(t, _)| match t {
                Token::Number(_, raw) => raw.as_str(),
                other => panic!("unexpected {other}"),
            })
            .collect();
        assert_eq!(raws, ["0.50", ".5", "1e-3", "2."]);
        assert!(matches!(&tokens[2].0, Token::Number(v, _) if (*v - 0.001).abs() < 1e-12));
    }

    #[test]
    fn lex_exponent_belongs_to_number() {
        assert_eq!(rendered("2e3"), ["2e3"]);
        assert_eq!(rendered("2 e"), ["2", "e"]);
    }

    #[test]
    fn lex_unicode_operators() {
        assert_eq!(rendered("2·π − ∞ ÷ 3×x"), ["2", "*", "π", "-", "∞", "/", "3", "*", "x"]);
        assert_eq!(rendered("x**2"), ["x", "^", "2"]);
    }

    #[test]
    fn lex_implicit_multiplication_stays_split() {
        assert_eq!(rendered("3x"), ["3", "x"]);
        assert_eq!(rendered("sin(x)cos(x)"), ["sin", "(", "x", ")", "cos", "(", "x", ")"]);
    }

    #[test]
    fn lex_reports_bad_characters_and_continues() {
        let (tokens, errors) = lex("x # 1 $");
        assert_eq!(tokens.len(), 2);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].span, 2..3);
        assert!(errors[0].message.contains("unexpected character"));
    }

    #[test]
    fn lex_preserves_byte_spans() {
        let (tokens, _) = lex("π + x");
        assert_eq!(tokens[0].1, 0..2);
        assert_eq!(tokens[1].1, 3..4);
        assert_eq!(tokens[2].1, 5..6);
    }
}
