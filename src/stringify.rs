use crate::common::Int;
use crate::parse::{ast::Equation, SyntaxError};
use crate::roll::DomainError;

/// Renders the pieces of a roll response. The default methods produce plain
/// text; implementors override [`Stringify::escape`] and the `str_*` methods
/// for a particular chat surface.
pub trait Stringify {
    fn escape(&self, s: &str) -> String {
        s.to_string()
    }

    fn str_input(&mut self, input: &str) -> String {
        format!("Rolling: {}", self.escape(input))
    }

    fn str_syntax_error(&mut self, err: &SyntaxError) -> String {
        format!("Syntax Error: {}", self.escape(&err.to_string()))
    }

    fn str_result(&mut self, label: &str, result: &Result<Int, DomainError>) -> String {
        match result {
            Ok(x) => format!("{}: {}", self.escape(label), x),
            Err(e) => format!("{}: Error: {}", self.escape(label), self.escape(&e.to_string())),
        }
    }
}

#[derive(Debug, Default)]
pub struct SimpleStringifier;

impl SimpleStringifier {
    pub fn new() -> Self {
        Self
    }
}

impl Stringify for SimpleStringifier {}

/// `1st`, `2nd`, `3rd`, `4th`, ..., `11th`, `12th`, `13th`, ..., `21st`, ...
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// The equation's name, or its one-based position as an ordinal when it has none.
pub fn label(equation: &Equation, index: usize) -> String {
    if equation.name.is_empty() {
        ordinal(index + 1)
    } else {
        equation.name.clone()
    }
}
