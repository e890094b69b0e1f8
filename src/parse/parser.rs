use super::{ast::*, error::SyntaxError, lexer::Lexer, token::*};
use crate::common::*;

type PResult<T = Term> = Result<T, SyntaxError>;

const INTEGER: &str = "integer";
const DICE_TERM: &str = "dice term";
const LEFT_PAREN: &str = r#""(""#;
const RIGHT_PAREN: &str = r#"")""#;
const EQUAL: &str = r#""=""#;

/// Recursive descent over the token stream with a single token of lookahead.
///
/// From loosest to tightest binding:
///
/// ```text
/// formula        := equation* EOF
/// equation       := (WORD+ "=")? exponentiation
/// exponentiation := multiplication ("^" exponentiation)?
/// multiplication := addition (("*" | "/") addition)*
/// addition       := unit (("+" | "-") unit)*
/// unit           := DICE INTEGER? | INTEGER (DICE INTEGER?)? | ("+" | "-") INTEGER
///                 | "(" exponentiation ")"
/// ```
///
/// A `DICE` token only takes a trailing `INTEGER` when its own text has no digits.
///
/// Groups and powers may nest at most [`Parser::MAX_NESTING`] levels deep and an
/// equation holds at most [`Parser::MAX_OPERATORS`] binary operators, which
/// bounds the height of every tree handed out.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    depth: usize,
    operators: usize,
}

impl<'a> Parser<'a> {
    const MULTIPLICATION_OPS: &'static [TokenKind] = &[TokenKind::Multiply, TokenKind::Divide];

    const ADDITION_OPS: &'static [TokenKind] = &[TokenKind::Add, TokenKind::Subtract];

    pub const MAX_NESTING: usize = 64;

    pub const MAX_OPERATORS: usize = 1000;

    pub fn new(s: &'a str) -> Self {
        Self::from_bytes(s.as_bytes())
    }

    pub fn from_bytes(s: &'a [u8]) -> Self {
        let mut lexer = Lexer::from_bytes(s);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            depth: 0,
            operators: 0,
        }
    }

    pub fn parse(mut self) -> PResult<Formula> {
        self.parse_formula()
    }

    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        std::mem::replace(&mut self.current, next)
    }

    fn matches(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    fn matches_any(&self, options: &[TokenKind]) -> bool {
        options.contains(&self.current.kind)
    }

    fn match_op(&self, options: &[TokenKind]) -> Option<BinaryOperator> {
        if self.matches_any(options) {
            self.current.kind.as_binary_op()
        } else {
            None
        }
    }

    fn consume(&mut self, kind: TokenKind, expected: &'static str) -> PResult<Token> {
        if self.matches(kind) {
            Ok(self.advance())
        } else {
            self.unexpected_token(vec1![expected])
        }
    }

    fn unexpected_token<T>(&self, expected: NonEmpty<&'static str>) -> PResult<T> {
        Err(SyntaxError::new(
            expected.mapped(str::to_string),
            self.current.clone(),
        ))
    }

    fn limit_exceeded<T>(&self, expected: String) -> PResult<T> {
        Err(SyntaxError::new(vec1![expected], self.current.clone()))
    }

    /// Consumes the current operator token, counting it against the equation.
    fn advance_operator(&mut self) -> PResult<Token> {
        if self.operators >= Self::MAX_OPERATORS {
            return self.limit_exceeded(format!("at most {} operators", Self::MAX_OPERATORS));
        }
        self.operators += 1;
        Ok(self.advance())
    }

    /// Runs `parse` one nesting level deeper, failing at the current token once
    /// the limit is reached.
    fn nested(&mut self, parse: impl FnOnce(&mut Self) -> PResult) -> PResult {
        if self.depth >= Self::MAX_NESTING {
            return self.limit_exceeded(format!("at most {} levels of nesting", Self::MAX_NESTING));
        }
        self.depth += 1;
        let term = parse(self);
        self.depth -= 1;
        term
    }

    fn parse_formula(&mut self) -> PResult<Formula> {
        let mut equations = Vec::new();
        while !self.matches(TokenKind::Eof) {
            equations.push(self.parse_equation()?);
        }
        Ok(Formula::new(equations))
    }

    fn parse_equation(&mut self) -> PResult<Equation> {
        self.operators = 0;
        let name = self.parse_equation_name()?;
        let term = self.parse_exponentiation()?;

        log::debug!("parsed equation {:?}: {}", name, term);
        Ok(Equation::new(name, term))
    }

    /// Words only form a name when an `=` follows them; there is no falling back
    /// to reading them as part of the term.
    fn parse_equation_name(&mut self) -> PResult<String> {
        let mut words = Vec::new();
        while self.matches(TokenKind::Word) {
            words.push(self.advance().text);
        }

        if words.is_empty() {
            return Ok(String::new());
        }

        self.consume(TokenKind::Equal, EQUAL)?;
        Ok(words.join(" "))
    }

    fn parse_exponentiation(&mut self) -> PResult {
        let lhs = self.parse_multiplication()?;

        if self.matches(TokenKind::Exponentiate) {
            let rhs = self.nested(|p| {
                p.advance_operator()?;
                p.parse_exponentiation()
            })?;
            return Ok(Term::pow(lhs, rhs));
        }

        Ok(lhs)
    }

    fn parse_multiplication(&mut self) -> PResult {
        let mut lhs = self.parse_addition()?;

        while let Some(op) = self.match_op(Self::MULTIPLICATION_OPS) {
            self.advance_operator()?;
            let rhs = self.parse_addition()?;

            lhs = Term::binary(lhs, op, rhs);
        }

        Ok(lhs)
    }

    fn parse_addition(&mut self) -> PResult {
        let mut lhs = self.parse_unit()?;

        while let Some(op) = self.match_op(Self::ADDITION_OPS) {
            self.advance_operator()?;
            let rhs = self.parse_unit()?;

            lhs = Term::binary(lhs, op, rhs);
        }

        Ok(lhs)
    }

    fn parse_unit(&mut self) -> PResult {
        match self.current.kind {
            TokenKind::Dice => {
                let dice = self.advance();
                self.parse_faces(1, &dice)
            }
            TokenKind::Integer => {
                let value = self.advance().int();
                if self.matches(TokenKind::Dice) {
                    let dice = self.advance();
                    self.parse_faces(value, &dice)
                } else {
                    Ok(Term::int(value))
                }
            }
            TokenKind::Add | TokenKind::Subtract => {
                let sign = self.advance();
                let value = self.consume(TokenKind::Integer, INTEGER)?.int();
                Ok(Term::int(if sign.is(TokenKind::Subtract) {
                    -value
                } else {
                    value
                }))
            }
            TokenKind::LeftParen => self.nested(|p| {
                p.advance();
                let term = p.parse_exponentiation()?;
                p.consume(TokenKind::RightParen, RIGHT_PAREN)?;
                Ok(term)
            }),
            _ => self.unexpected_token(vec1![INTEGER, DICE_TERM, LEFT_PAREN]),
        }
    }

    fn parse_faces(&mut self, count: Int, dice: &Token) -> PResult {
        let faces = if dice.text.len() > 1 {
            dice.int()
        } else {
            self.consume(TokenKind::Integer, INTEGER)?.int()
        };
        Ok(Term::dice(count, faces))
    }
}
