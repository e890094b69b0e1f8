mod ctx;
mod error;
mod roller;

use crate::common::Int;
use crate::parse::ast::Term;

type RResult<T> = Result<T, DomainError>;

pub use ctx::{RollContext, DEFAULT_MAX_ROLLS};
pub use error::DomainError;
pub use roller::Roller;

#[cfg(test)]
pub(crate) use roller::StepRoller;

impl Term {
    /// Evaluates the term, drawing every die from `roller`.
    ///
    /// # Errors
    /// Returns a [`DomainError`] for division by zero, negative exponents,
    /// dice without faces or negative counts, and results outside of [`Int`].
    ///
    /// # Examples
    /// ```
    /// use dicebot::parse;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let formula = parse("(3 - 1) ^ 2d1").unwrap();
    /// let mut rng = StdRng::seed_from_u64(1);
    /// assert_eq!(formula.equations[0].term.solve(&mut rng), Ok(4));
    /// ```
    pub fn solve<R: Roller>(&self, roller: &mut R) -> RResult<Int> {
        RollContext::new_unbounded(roller).eval(self)
    }
}
