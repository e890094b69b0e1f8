use crate::common::*;
use std::fmt;

/// Every equation of one input, in source order.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Formula {
    pub equations: Vec<Equation>,
}

impl Formula {
    pub fn new(equations: Vec<Equation>) -> Self {
        Self { equations }
    }

    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Equation> {
        self.equations.iter()
    }
}

impl IntoIterator for Formula {
    type Item = Equation;
    type IntoIter = std::vec::IntoIter<Equation>;

    fn into_iter(self) -> Self::IntoIter {
        self.equations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Formula {
    type Item = &'a Equation;
    type IntoIter = std::slice::Iter<'a, Equation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, equation) in self.equations.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", equation)?;
        }
        Ok(())
    }
}

/// A single, optionally labelled, expression. An empty `name` means the
/// equation was not labelled in the source.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Equation {
    pub name: String,
    pub term: Term,
}

impl Equation {
    pub fn new(name: impl Into<String>, term: Term) -> Self {
        Self {
            name: name.into(),
            term,
        }
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.name.is_empty() {
            write!(f, "{} = ", self.name)?;
        }
        write!(f, "{}", self.term)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Term {
    Int(Int),
    Dice { count: Int, faces: Int },
    Binary(Box<Term>, BinaryOperator, Box<Term>),
}

impl Term {
    pub fn int(x: Int) -> Self {
        Self::Int(x)
    }

    pub fn dice(count: Int, faces: Int) -> Self {
        Self::Dice { count, faces }
    }

    pub fn binary(l: Self, op: BinaryOperator, r: Self) -> Self {
        Self::Binary(Box::new(l), op, Box::new(r))
    }

    pub fn add(l: Self, r: Self) -> Self {
        Self::binary(l, BinaryOperator::Add, r)
    }

    pub fn sub(l: Self, r: Self) -> Self {
        Self::binary(l, BinaryOperator::Sub, r)
    }

    pub fn mul(l: Self, r: Self) -> Self {
        Self::binary(l, BinaryOperator::Mul, r)
    }

    pub fn div(l: Self, r: Self) -> Self {
        Self::binary(l, BinaryOperator::Div, r)
    }

    pub fn pow(l: Self, r: Self) -> Self {
        Self::binary(l, BinaryOperator::Pow, r)
    }

    /// Whether evaluating this term consumes randomness.
    pub fn has_dice(&self) -> bool {
        match self {
            Self::Int(_) => false,
            Self::Dice { .. } => true,
            Self::Binary(l, _, r) => l.has_dice() || r.has_dice(),
        }
    }
}

// Binary nodes are always parenthesized so the printed form parses back to
// the same tree regardless of operator binding.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(x) if *x < 0 => write!(f, "({})", x),
            Self::Int(x) => write!(f, "{}", x),
            Self::Dice { count, faces } => write!(f, "{}d{}", count, faces),
            Self::Binary(l, op, r) => write!(f, "({} {} {})", l, op, r),
        }
    }
}
