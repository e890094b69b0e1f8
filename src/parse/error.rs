use super::token::Token;
use crate::common::NonEmpty;
use thiserror::Error;

/// The first point at which a formula could not be parsed.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("line {line} column {column}: expected {}, got {}", .expected.join(" or "), .received.quote())]
pub struct SyntaxError {
    pub line: usize,
    pub column: usize,
    /// What would have been accepted, in the order the grammar tried it.
    pub expected: NonEmpty<String>,
    pub received: Token,
}

impl SyntaxError {
    pub(crate) fn new(expected: NonEmpty<String>, received: Token) -> Self {
        Self {
            line: received.line,
            column: received.column,
            expected,
            received,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::vec1;
    use crate::parse::token::TokenKind;

    #[test]
    fn test_display() {
        let err = SyntaxError::new(
            vec1!["integer".to_string(), "dice term".to_string(), r#""(""#.to_string()],
            Token::new(1, 3, TokenKind::Unrecognized, "!"),
        );
        assert_eq!(
            err.to_string(),
            r#"line 1 column 3: expected integer or dice term or "(", got "!""#
        );

        let err = SyntaxError::new(vec1![r#"")""#.to_string()], Token::new(2, 7, TokenKind::Eof, ""));
        assert_eq!(err.to_string(), r#"line 2 column 7: expected ")", got end of input"#);
    }
}
