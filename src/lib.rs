//! Parsing and rolling of dice formulas such as `d20 + 5, damage = 2d6 + 3`.

mod common;
mod error;
pub mod markdown;
pub mod parse;
pub mod roll;
pub mod stringify;

pub use common::{BinaryOperator, Int};
pub use error::Error;
pub use markdown::MarkdownStringifier;
pub use parse::{
    ast::{Equation, Formula, Term},
    parse, parse_bytes, SyntaxError,
};
pub use roll::{DomainError, RollContext, Roller, DEFAULT_MAX_ROLLS};
pub use stringify::{label, ordinal, SimpleStringifier, Stringify};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Parses `input` and renders the response for every equation, one per line
/// after the echoed input.
///
/// A syntax error replaces all results. A domain error is reported in place of
/// that equation's value and the remaining equations are still rolled.
pub fn roll<S: Stringify + ?Sized, R: Roller>(
    stringifier: &mut S,
    input: impl AsRef<[u8]>,
    ctx: &mut RollContext<'_, R>,
) -> String {
    let input = input.as_ref();
    let mut ret = stringifier.str_input(&String::from_utf8_lossy(input));

    match parse_bytes(input) {
        Ok(formula) => {
            for (i, equation) in formula.iter().enumerate() {
                let result = ctx.eval(&equation.term);
                ret.push('\n');
                ret.push_str(&stringifier.str_result(&label(equation, i), &result));
            }
        }
        Err(err) => {
            log::debug!("rejected {:?}: {}", String::from_utf8_lossy(input), err);
            ret.push('\n');
            ret.push_str(&stringifier.str_syntax_error(&err));
        }
    }

    ret
}

/// Parses and rolls `input`, stopping at the first error of either kind.
/// Results are labelled as in [`roll`].
pub fn evaluate<R: Roller>(
    input: impl AsRef<[u8]>,
    ctx: &mut RollContext<'_, R>,
) -> Result<Vec<(String, Int)>> {
    let formula = parse_bytes(input.as_ref())?;
    formula
        .iter()
        .enumerate()
        .map(|(i, equation)| {
            let label = label(equation, i);
            match ctx.eval(&equation.term) {
                Ok(x) => Ok((label, x)),
                Err(e) => Err(Error::domain(label, e)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_utils::*;

    fn check_roll(input: &[u8], expected: &str) {
        init_logger();
        let mut roller = step_roller();
        let mut ctx = RollContext::new_bounded(DEFAULT_MAX_ROLLS, &mut roller);
        assert_eq!(roll(&mut MarkdownStringifier::new(), input, &mut ctx), expected);
    }

    #[test]
    fn test_roll_markdown() {
        check_roll(
            b"50, 2d6\nto hit = d20 + 5",
            "**Rolling**: 50\\, 2d6to hit \\= d20 \\+ 5\n**1st**: 50\n**2nd**: 3\n**to hit**: 8",
        );
    }

    #[test]
    fn test_roll_syntax_error() {
        check_roll(
            b"(5d8",
            r#"**Rolling**: \(5d8
**Syntax Error**: line 1 column 4\: expected \"\)\"\, got end of input"#,
        );
    }

    #[test]
    fn test_roll_continues_after_domain_error() {
        check_roll(
            b"1 / 0, 7",
            "**Rolling**: 1 \\/ 0\\, 7\n**1st**: **Error**: cannot divide by zero\n**2nd**: 7",
        );
    }

    #[test]
    fn test_roll_deeply_nested_input() {
        let input = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        let mut roller = step_roller();
        let mut ctx = RollContext::new_unbounded(&mut roller);
        let out = roll(&mut SimpleStringifier::new(), input.as_bytes(), &mut ctx);
        assert!(out.ends_with(
            "\nSyntax Error: line 1 column 65: expected at most 64 levels of nesting, got \"(\""
        ));
        assert!(matches!(
            evaluate(format!("{}1", "1 * ".repeat(5000)), &mut ctx),
            Err(Error::Syntax(_))
        ));
    }

    #[test]
    fn test_roll_invalid_utf8() {
        let mut roller = step_roller();
        let mut ctx = RollContext::new_unbounded(&mut roller);
        let out = roll(&mut SimpleStringifier::new(), b"1 + \xff", &mut ctx);
        assert_eq!(
            out,
            "Rolling: 1 + \u{FFFD}\nSyntax Error: line 1 column 5: expected integer or dice term or \"(\", got invalid text sequence"
        );
    }

    #[test]
    fn test_evaluate() {
        let mut roller = step_roller();
        let mut ctx = RollContext::new_unbounded(&mut roller);
        assert_eq!(
            evaluate("3d6, max = 2 ^ 4", &mut ctx),
            Ok(vec![("1st".to_string(), 6), ("max".to_string(), 16)])
        );
        assert_eq!(
            evaluate("1, x = 0d0, 2", &mut ctx),
            Err(Error::domain("x", DomainError::InvalidFaces(0)))
        );
        assert!(matches!(evaluate("a 1", &mut ctx), Err(Error::Syntax(_))));
        assert_eq!(evaluate("", &mut ctx), Ok(vec![]));
    }
}
