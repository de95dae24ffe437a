//! Arithmetic practice sheets over naturals and fractions, with exact answers
//!
//! A [`Generator`] produces exercises such as `3/4 × (2 - 1/3)` together with
//! their [`Rational`] answers, [`evaluate`] recomputes the answer of any such
//! text, and [`grade`] checks a learner's answers against those
//! recomputations. Values are written as `7`, `3/5` or the mixed number
//! `1'1/48` everywhere.

mod problem;
pub use crate::problem::{Partial, Problem, Shortfall};

mod rational;
pub use crate::rational::notation::MIXED_SEPARATOR;
pub use crate::rational::Rational;

pub mod expression;
pub use crate::expression::{evaluate, Expression, Operator, Tier};

mod generator;
pub use crate::generator::{Exercise, Generator, Shape};

mod grader;
pub use crate::grader::{check, grade, GradeResult, Verdict};

mod synth;
pub use crate::synth::{Synthesized, Synthesizer};

pub mod sheet;
