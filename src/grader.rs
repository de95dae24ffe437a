use crate::sheet::{exercise_text, strip_index};
use crate::{evaluate, Partial, Rational, Shortfall};
use std::fmt;
use tracing::{debug, warn};

/// Positions, counted from one, of correctly and wrongly answered exercises
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GradeResult {
    pub correct: Vec<usize>,
    pub wrong: Vec<usize>,
}

impl GradeResult {
    pub fn total(&self) -> usize {
        self.correct.len() + self.wrong.len()
    }
}

fn list(indices: &[usize]) -> String {
    indices
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The two lines of a grade sheet
impl fmt::Display for GradeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Correct: {} ({})", self.correct.len(), list(&self.correct))?;
        write!(f, "Wrong: {} ({})", self.wrong.len(), list(&self.wrong))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong,
}

/// Judge one submitted answer against the exercise it belongs to
///
/// The expected answer is recomputed from the exercise text and the two are
/// compared as written, so `2/4` is not accepted for `1/2`. Anything that
/// goes wrong along the way makes the answer wrong rather than failing.
pub fn check(exercise: &str, answer: &str) -> Verdict {
    let expected = match evaluate(exercise_text(exercise)) {
        Ok(value) => value.to_string(),
        Err(problem) => {
            warn!(%problem, exercise, "exercise does not evaluate, marking it wrong");
            return Verdict::Wrong;
        }
    };

    let submitted = strip_index(answer);
    if submitted == expected {
        return Verdict::Correct;
    }
    if let Err(problem) = submitted.parse::<Rational>() {
        debug!(%problem, submitted, "unreadable answer");
    }
    Verdict::Wrong
}

/// Grade answers against exercises, pairing them by position
///
/// Lines may carry their `N. ` numbering and exercises their closing `=`.
/// When the two lists differ in length only their common prefix is graded and
/// the result carries a [`Shortfall::LengthMismatch`].
///
/// # Example
///
/// ```
/// use fraction_drill::grade;
/// let graded = grade(&["1. 1 + 2 =", "2. 3 × 2 ="], &["1. 3", "2. 7"]);
/// assert_eq!(graded.value.correct, vec![1]);
/// assert_eq!(graded.value.wrong, vec![2]);
/// ```
pub fn grade<E, A>(exercises: &[E], answers: &[A]) -> Partial<GradeResult>
where
    E: AsRef<str>,
    A: AsRef<str>,
{
    let mut result = GradeResult::default();
    for (i, (exercise, answer)) in exercises.iter().zip(answers).enumerate() {
        match check(exercise.as_ref(), answer.as_ref()) {
            Verdict::Correct => result.correct.push(i + 1),
            Verdict::Wrong => result.wrong.push(i + 1),
        }
    }

    if exercises.len() != answers.len() {
        let shortfall = Shortfall::LengthMismatch {
            exercises: exercises.len(),
            answers: answers.len(),
        };
        warn!(%shortfall, "sheets differ in length");
        return Partial {
            value: result,
            shortfall: Some(shortfall),
        };
    }
    Partial::complete(result)
}
