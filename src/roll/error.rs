use crate::common::Int;
use thiserror::Error;

/// Why a well-formed term could not be reduced to an integer.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum DomainError {
    #[error("cannot divide by zero")]
    DivisionByZero,
    #[error("dice must have at least one face, not {0}")]
    InvalidFaces(Int),
    #[error("cannot roll a negative number of dice ({0})")]
    NegativeCount(Int),
    #[error("cannot raise to a negative power ({0})")]
    NegativeExponent(Int),
    #[error("result is too large")]
    Overflow,
    #[error("too many dice rolled")]
    TooManyRolls,
}
