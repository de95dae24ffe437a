//! Random exercises over naturals and true fractions
//!
//! A draft samples its operands and operators, picks a shape, then repairs the
//! draft so that no subtraction goes negative and no division has a zero
//! divisor. Repairs rearrange what is shown rather than throwing the draft
//! away, so a subtraction stays a subtraction. Only a divisor group that comes
//! to zero is fixed by resampling one of its operands.

use crate::expression::{Expression, Operator, Tier};
use crate::{Partial, Problem, Rational, Shortfall};
use num::{BigInt, BigUint};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;
use std::mem::swap;
use tracing::{debug, warn};

/// Attempts allowed per requested exercise before a batch gives up
const ATTEMPTS_PER_EXERCISE: usize = 10;
/// Fresh divisor operands tried before a draft counts as unrepairable
const RESAMPLE_LIMIT: usize = 10;

/// A generated expression and its exact answer
#[derive(Clone, Debug, PartialEq)]
pub struct Exercise {
    pub expression: Expression,
    pub answer: Rational,
}

impl Exercise {
    /// The expression as written on an exercise sheet
    pub fn text(&self) -> String {
        self.expression.to_string()
    }
}

/// Where a three operand draft puts its parentheses
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    Flat,
    ParensLeft,
    ParensRight,
}

/// Produces exercises from a private random stream
///
/// Operands are naturals in `1..max_range` or true fractions whose
/// denominator is below `max_range`. Each generator also keeps the texts it
/// has already handed out from [`Generator::generate_many`] so that a run
/// never repeats itself.
///
/// # Example
///
/// ```
/// use fraction_drill::Generator;
/// let mut generator = Generator::seeded(10, 7);
/// let batch = generator.generate_many(20).unwrap();
/// assert_eq!(batch.value.len(), 20);
/// for exercise in &batch.value {
///     assert!(!exercise.answer.is_negative());
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Generator {
    max_range: u64,
    rng: ChaCha20Rng,
    ledger: HashSet<String>,
}

fn lit(value: Rational) -> Expression {
    Expression::literal(value)
}

impl Generator {
    /// A generator seeded from the operating system
    pub fn new(max_range: u64) -> Self {
        Self::with_rng(max_range, ChaCha20Rng::from_entropy())
    }

    /// A generator whose output is fixed by `seed`
    pub fn seeded(max_range: u64, seed: u64) -> Self {
        Self::with_rng(max_range, ChaCha20Rng::seed_from_u64(seed))
    }

    fn with_rng(max_range: u64, rng: ChaCha20Rng) -> Self {
        Self {
            max_range,
            rng,
            ledger: HashSet::new(),
        }
    }

    /// Draw one operand, a natural or a true fraction with equal odds
    ///
    /// With a range of two only the natural `1` exists, below that nothing does.
    pub fn operand(&mut self) -> Result<Rational, Problem> {
        let top = self.max_range.saturating_sub(1);
        if top < 1 {
            return Err(Problem::EmptyRange);
        }
        if top >= 2 && self.rng.gen_bool(0.5) {
            let denominator = self.rng.gen_range(2..=top);
            let numerator = self.rng.gen_range(1..denominator);
            Rational::from_bigint_fraction(BigInt::from(numerator), BigUint::from(denominator))
        } else {
            Ok(Rational::from(self.rng.gen_range(1..=top)))
        }
    }

    fn operator(&mut self) -> Operator {
        Operator::ALL[self.rng.gen_range(0..Operator::ALL.len())]
    }

    fn shape(&mut self) -> Shape {
        if self.rng.gen_bool(0.5) {
            Shape::Flat
        } else if self.rng.gen_bool(0.5) {
            Shape::ParensLeft
        } else {
            Shape::ParensRight
        }
    }

    /// One repaired draft, `None` when the draft could not be repaired
    fn draft(&mut self) -> Result<Option<Expression>, Problem> {
        if self.rng.gen_ratio(1, 3) {
            let a = self.operand()?;
            let b = self.operand()?;
            let op = self.operator();
            return Ok(Some(arrange_pair(a, op, b)));
        }

        let a = self.operand()?;
        let b = self.operand()?;
        let c = self.operand()?;
        let op1 = self.operator();
        let op2 = self.operator();
        match self.shape() {
            Shape::Flat => arrange_flat(a, op1, b, op2, c).map(Some),
            Shape::ParensLeft => arrange_parens_left(a, op1, b, op2, c).map(Some),
            Shape::ParensRight => self.arrange_parens_right(a, op1, b, op2, c),
        }
    }

    /// `a op (b op2 c)`, resampling `c` while a divisor group comes to zero
    fn arrange_parens_right(
        &mut self,
        a: Rational,
        op: Operator,
        mut b: Rational,
        op2: Operator,
        mut c: Rational,
    ) -> Result<Option<Expression>, Problem> {
        for _ in 0..=RESAMPLE_LIMIT {
            if op2 == Operator::Subtract && b < c {
                swap(&mut b, &mut c);
            }
            let group = op2.apply(b.clone(), c.clone())?;
            if op == Operator::Divide && group.is_zero() {
                debug!("resampling an operand of a zero divisor");
                c = self.operand()?;
                continue;
            }

            let inner = Expression::group(Expression::binary(op2, lit(b), lit(c)));
            if op == Operator::Subtract && a < group {
                debug!("moved a subtracted group to the front");
                return Ok(Some(Expression::binary(Operator::Subtract, inner, lit(a))));
            }
            return Ok(Some(Expression::binary(op, lit(a), inner)));
        }
        Ok(None)
    }

    /// A single exercise, without consulting the ledger
    ///
    /// Fails with [`Problem::Exhausted`] if no draft could be repaired within
    /// the per-exercise attempt budget.
    pub fn generate_one(&mut self) -> Result<Exercise, Problem> {
        let expression = first_repaired(ATTEMPTS_PER_EXERCISE, || self.draft())?;
        let answer = expression.evaluate()?;
        debug_assert!(!answer.is_negative(), "{expression} is negative");
        Ok(Exercise { expression, answer })
    }

    /// Up to `count` exercises, none repeating a text this generator produced
    ///
    /// Each requested exercise allows ten attempts. When they run out the
    /// exercises found so far are returned with a
    /// [`Shortfall::BudgetExhausted`].
    pub fn generate_many(&mut self, count: usize) -> Result<Partial<Vec<Exercise>>, Problem> {
        let budget = count.saturating_mul(ATTEMPTS_PER_EXERCISE);
        let mut exercises = Vec::new();
        let mut attempts = 0;

        while exercises.len() < count && attempts < budget {
            attempts += 1;
            let expression = match self.draft() {
                Ok(Some(expression)) => expression,
                Ok(None) => {
                    debug!(attempts, "draft could not be repaired");
                    continue;
                }
                Err(Problem::EmptyRange) => {
                    debug!(attempts, max_range = self.max_range, "no operands in range");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let text = expression.to_string();
            if self.ledger.contains(&text) {
                debug!(attempts, %text, "duplicate draft");
                continue;
            }
            let answer = expression.evaluate()?;
            self.ledger.insert(text);
            exercises.push(Exercise { expression, answer });
        }

        if exercises.len() < count {
            let shortfall = Shortfall::BudgetExhausted {
                requested: count,
                produced: exercises.len(),
            };
            warn!(%shortfall, attempts, "stopped generating early");
            return Ok(Partial {
                value: exercises,
                shortfall: Some(shortfall),
            });
        }
        Ok(Partial::complete(exercises))
    }
}

/// The first draft that could be repaired, within `attempts` tries
fn first_repaired<F>(attempts: usize, mut draft: F) -> Result<Expression, Problem>
where
    F: FnMut() -> Result<Option<Expression>, Problem>,
{
    for attempt in 1..=attempts {
        if let Some(expression) = draft()? {
            return Ok(expression);
        }
        debug!(attempt, "draft could not be repaired");
    }
    Err(Problem::Exhausted)
}

/// `a op b`, swapping the operands of a subtraction that would go negative
fn arrange_pair(mut a: Rational, op: Operator, mut b: Rational) -> Expression {
    if op == Operator::Subtract && a < b {
        swap(&mut a, &mut b);
    }
    Expression::binary(op, lit(a), lit(b))
}

/// `a op1 b op2 c` without parentheses
fn arrange_flat(
    mut a: Rational,
    op1: Operator,
    mut b: Rational,
    op2: Operator,
    c: Rational,
) -> Result<Expression, Problem> {
    use Operator::*;

    match (op1.tier(), op2.tier()) {
        (Tier::Multiplicative, Tier::Additive) => {
            let product = op1.apply(a.clone(), b.clone())?;
            if op2 == Subtract && product < c {
                debug!("moved a subtracted product behind its minuend");
                return Ok(Expression::flat(lit(c), Subtract, lit(a), op1, lit(b)));
            }
        }
        (Tier::Additive, Tier::Multiplicative) => {
            let product = op2.apply(b.clone(), c.clone())?;
            if op1 == Subtract && a < product {
                debug!("moved a subtracted operand behind a product");
                return Ok(Expression::flat(lit(b), op2, lit(c), Subtract, lit(a)));
            }
        }
        (Tier::Additive, Tier::Additive) => {
            if op1 == Subtract && a < b {
                swap(&mut a, &mut b);
            }
            let partial = op1.apply(a.clone(), b.clone())?;
            if op2 == Subtract && partial < c {
                debug!("reordered a same tier run that went negative");
                return Ok(match op1 {
                    // c - a - b, and c - a already exceeds b
                    Add => Expression::flat(lit(c), Subtract, lit(a), Subtract, lit(b)),
                    // c + b - a
                    _ => Expression::flat(lit(c), Add, lit(b), Subtract, lit(a)),
                });
            }
        }
        (Tier::Multiplicative, Tier::Multiplicative) => {}
    }
    Ok(Expression::flat(lit(a), op1, lit(b), op2, lit(c)))
}

/// `(a op b) op2 c`
fn arrange_parens_left(
    mut a: Rational,
    op: Operator,
    mut b: Rational,
    op2: Operator,
    c: Rational,
) -> Result<Expression, Problem> {
    if op == Operator::Subtract && a < b {
        swap(&mut a, &mut b);
    }
    let group = op.apply(a.clone(), b.clone())?;
    let inner = Expression::group(Expression::binary(op, lit(a), lit(b)));
    if op2 == Operator::Subtract && group < c {
        debug!("moved a subtracted group behind its minuend");
        return Ok(Expression::binary(Operator::Subtract, lit(c), inner));
    }
    Ok(Expression::binary(op2, inner, lit(c)))
}
