use super::{error::DomainError, roller::Roller, RResult};
use crate::common::*;
use crate::parse::ast::Term;
use std::num::NonZeroU64;

pub const DEFAULT_MAX_ROLLS: u64 = 10_000;

/// Evaluates terms against a borrowed [`Roller`], optionally capping how many
/// dice may be rolled over the lifetime of the context.
pub struct RollContext<'r, R> {
    max_rolls: Option<u64>,
    rolls: u64,
    roller: &'r mut R,
}

impl<'r, R: Roller> RollContext<'r, R> {
    pub fn new(max_rolls: Option<u64>, roller: &'r mut R) -> Self {
        Self {
            max_rolls,
            rolls: 0,
            roller,
        }
    }

    pub fn new_bounded(max_rolls: u64, roller: &'r mut R) -> Self {
        Self::new(Some(max_rolls), roller)
    }

    pub fn new_unbounded(roller: &'r mut R) -> Self {
        Self::new(None, roller)
    }

    /// Dice rolled so far.
    pub fn rolls(&self) -> u64 {
        self.rolls
    }

    pub fn reset(&mut self) {
        self.rolls = 0;
    }

    fn count_rolls(&mut self, n: u64) -> RResult<()> {
        self.rolls = self.rolls.saturating_add(n);
        if self.max_rolls.map_or(false, |max| self.rolls > max) {
            Err(DomainError::TooManyRolls)
        } else {
            Ok(())
        }
    }

    /// Reduces `term` to an integer, left operand first so the roller is
    /// consumed in source order.
    pub fn eval(&mut self, term: &Term) -> RResult<Int> {
        match term {
            Term::Int(x) => Ok(*x),
            Term::Dice { count, faces } => self.roll(*count, *faces),
            Term::Binary(l, op, r) => {
                let l = self.eval(l)?;
                let r = self.eval(r)?;
                apply(l, *op, r)
            }
        }
    }

    /// Sum of `count` rolls of a `faces`-sided die.
    pub fn roll(&mut self, count: Int, faces: Int) -> RResult<Int> {
        let sides = u64::try_from(faces)
            .ok()
            .and_then(NonZeroU64::new)
            .ok_or(DomainError::InvalidFaces(faces))?;
        let num = u64::try_from(count).map_err(|_| DomainError::NegativeCount(count))?;
        self.count_rolls(num)?;

        let total = self
            .roller
            .roll_sum(num, sides)
            .ok_or(DomainError::Overflow)?;

        log::debug!("rolled {}d{}: {}", count, faces, total);
        Ok(total)
    }
}

fn apply(l: Int, op: BinaryOperator, r: Int) -> RResult<Int> {
    use BinaryOperator::*;

    match op {
        Add => l.checked_add(r).ok_or(DomainError::Overflow),
        Sub => l.checked_sub(r).ok_or(DomainError::Overflow),
        Mul => l.checked_mul(r).ok_or(DomainError::Overflow),
        Div if r == 0 => Err(DomainError::DivisionByZero),
        // Truncates toward zero.
        Div => l.checked_div(r).ok_or(DomainError::Overflow),
        Pow => pow(l, r),
    }
}

/// Integer power with `0 ^ 0 == 1`.
fn pow(base: Int, exp: Int) -> RResult<Int> {
    if exp < 0 {
        return Err(DomainError::NegativeExponent(exp));
    }

    match u32::try_from(exp) {
        Ok(exp) => base.checked_pow(exp).ok_or(DomainError::Overflow),
        Err(_) => match base {
            0 | 1 => Ok(base),
            -1 if exp % 2 == 0 => Ok(1),
            -1 => Ok(-1),
            _ => Err(DomainError::Overflow),
        },
    }
}
