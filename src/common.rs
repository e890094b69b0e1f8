use std::fmt;
pub use vec1::vec1;

/// The integer type every term evaluates to.
pub type Int = i64;

pub type NonEmpty<T> = vec1::Vec1<T>;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    pub use super::*;
    pub(crate) use crate::parse::ast::{Equation, Formula, Term};
    pub(crate) use crate::roll::StepRoller;
    use std::num::NonZeroU64;

    pub fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// A roller that yields 1, 2, 3, ... wrapped to the number of faces.
    pub fn step_roller() -> StepRoller {
        StepRoller::new(NonZeroU64::new(1).unwrap(), 1)
    }

    pub fn eq(name: &str, term: Term) -> Equation {
        Equation::new(name, term)
    }

    pub fn unnamed(term: Term) -> Equation {
        Equation::new("", term)
    }

    pub fn formula(equations: Vec<Equation>) -> Formula {
        Formula::new(equations)
    }
}
