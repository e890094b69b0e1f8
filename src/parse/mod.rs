pub mod ast;
mod error;
mod lexer;
mod parser;
mod token;

pub use error::SyntaxError;
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Token, TokenKind};

/// Parses a whole formula, failing on the first token that does not fit the
/// grammar.
///
/// # Examples
/// ```
/// use dicebot::parse;
///
/// let formula = parse("attack = d20 + 5, damage = 2d6").unwrap();
/// assert_eq!(formula.equations[0].name, "attack");
/// assert_eq!(formula.to_string(), "attack = (1d20 + 5), damage = 2d6");
/// ```
pub fn parse(s: &str) -> Result<ast::Formula, SyntaxError> {
    Parser::new(s).parse()
}

/// Like [`parse`], but accepts input that may not be valid UTF-8; malformed
/// sequences surface as syntax errors.
pub fn parse_bytes(s: &[u8]) -> Result<ast::Formula, SyntaxError> {
    Parser::from_bytes(s).parse()
}
