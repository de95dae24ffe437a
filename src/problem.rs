// We need to refer to this type in the documentation
#[allow(unused_imports)]
use crate::Generator;

use std::fmt;
use thiserror::Error;

/// Problems when parsing, evaluating or generating exercises
///
/// These are contract violations surfaced to the immediate caller. Conditions
/// which still leave useful data behind are reported as a [`Shortfall`] instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Problem {
    /// Tried to divide by zero, also arises if a fraction literal has a zero
    /// denominator
    #[error("attempted division by zero")]
    DivideByZero,
    /// Text was not an integer, a fraction `n/d` or a mixed number `w'n/d`
    #[error("malformed number")]
    MalformedNumber,
    /// The token stream does not form an arithmetic expression
    #[error("malformed expression")]
    MalformedExpression,
    /// The [`Generator`] range leaves no operand to choose from
    #[error("no operands exist below the requested range")]
    EmptyRange,
    /// Gave up after every allowed attempt was rejected
    #[error("every attempt was rejected")]
    Exhausted,
}

/// Reasons a batch operation returned less than was asked of it
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shortfall {
    /// The retry budget ran out before enough distinct exercises were found
    BudgetExhausted { requested: usize, produced: usize },
    /// Exercises and answers were paired only over their common prefix
    LengthMismatch { exercises: usize, answers: usize },
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shortfall::BudgetExhausted {
                requested,
                produced,
            } => write!(
                f,
                "retry budget exhausted: produced {produced} of {requested} exercises"
            ),
            Shortfall::LengthMismatch { exercises, answers } => write!(
                f,
                "{exercises} exercises but {answers} answers, graded the first {}",
                exercises.min(answers)
            ),
        }
    }
}

/// Data from a batch operation, along with why it may be incomplete
#[derive(Clone, Debug, PartialEq)]
pub struct Partial<T> {
    pub value: T,
    pub shortfall: Option<Shortfall>,
}

impl<T> Partial<T> {
    pub fn complete(value: T) -> Self {
        Self {
            value,
            shortfall: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.shortfall.is_none()
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}
