use crate::common::{BinaryOperator, Int};
use logos::Logos;
use std::fmt;

/// Kinds produced by scanning a valid UTF-8 run. `DecodeError` and `Eof` are
/// never matched here; the [`Lexer`](super::Lexer) inserts them itself.
#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    #[regex(r"[\s,]+", logos::skip)]
    #[error]
    Unrecognized,
    DecodeError,
    Eof,

    #[token("=")]
    Equal,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("^")]
    Exponentiate,
    #[token("*")]
    Multiply,
    #[token("/")]
    Divide,
    #[token("+")]
    Add,
    #[token("-")]
    Subtract,

    /// `d` or `D`, possibly with the face count already fused on (`d20`).
    /// Wins over [`TokenKind::Word`] when both match the same text.
    #[regex("[dD][0-9]*", priority = 3)]
    Dice,
    #[regex("[0-9]+")]
    Integer,
    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Word,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;

        match self {
            Unrecognized => "<unrecognized>",
            DecodeError => "<decode error>",
            Eof => "<eof>",
            Equal => "'='",
            LeftParen => "'('",
            RightParen => "')'",
            Exponentiate => "'^'",
            Multiply => "'*'",
            Divide => "'/'",
            Add => "'+'",
            Subtract => "'-'",
            Dice => "<dice>",
            Integer => "<integer>",
            Word => "<word>",
        }
    }

    pub fn as_binary_op(&self) -> Option<BinaryOperator> {
        use BinaryOperator::*;
        Some(match self {
            Self::Add => Add,
            Self::Subtract => Sub,
            Self::Multiply => Mul,
            Self::Divide => Div,
            Self::Exponentiate => Pow,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lexeme. `text` is the exact source slice that produced it, and is
/// empty only for [`TokenKind::Eof`] and [`TokenKind::DecodeError`].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub line: usize,
    pub column: usize,
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(line: usize, column: usize, kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            line,
            column,
            kind,
            text: text.into(),
        }
    }

    /// Decodes the ASCII digits in the token text, skipping anything else.
    ///
    /// Never fails: malformed text yields the value of the digits found so far,
    /// and runs too long for an [`Int`] saturate.
    pub fn int(&self) -> Int {
        self.text
            .bytes()
            .filter(u8::is_ascii_digit)
            .fold(0, |value: Int, digit| {
                value
                    .saturating_mul(10)
                    .saturating_add(Int::from(digit - b'0'))
            })
    }

    /// Human readable form used in syntax errors.
    pub fn quote(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::DecodeError => "invalid text sequence".to_string(),
            _ => format!("{:?}", self.text),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.quote())
    }
}
