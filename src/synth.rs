//! Answer sheets with a known share of correct answers, for exercising the grader

use crate::sheet::{answer_line, exercise_text};
use crate::{evaluate, Rational};
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;
use tracing::debug;

/// Draws allowed to find a wrong answer before falling back to one more than
/// the correct value
const WRONG_DRAWS: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Synthesized {
    /// Numbered answer lines, one per exercise
    pub answers: Vec<String>,
    /// Positions, counted from one, that received the correct answer
    pub correct: Vec<usize>,
}

#[derive(Clone, Debug)]
pub struct Synthesizer {
    rng: ChaCha20Rng,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Synthesizer {
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Answer every exercise line, correctly for `floor(len × ratio)` of them
    ///
    /// The correctly answered positions are chosen at random. The rest receive
    /// an answer that differs from the correct one as written. An exercise
    /// which cannot be evaluated is answered `0`.
    pub fn synthesize<S: AsRef<str>>(&mut self, exercises: &[S], correct_ratio: f64) -> Synthesized {
        let total = exercises.len();
        let ratio = correct_ratio.clamp(0.0, 1.0);
        let wanted = ((total as f64 * ratio).floor() as usize).min(total);
        let chosen: HashSet<usize> = index::sample(&mut self.rng, total, wanted).into_iter().collect();

        let mut answers = Vec::with_capacity(total);
        let mut correct = Vec::with_capacity(wanted);
        for (i, line) in exercises.iter().enumerate() {
            let answer = match evaluate(exercise_text(line.as_ref())) {
                Ok(value) if chosen.contains(&i) => {
                    correct.push(i + 1);
                    value.to_string()
                }
                Ok(value) => self.wrong_answer(&value),
                Err(problem) => {
                    debug!(%problem, line = line.as_ref(), "answering an unreadable exercise with 0");
                    "0".to_string()
                }
            };
            answers.push(answer_line(i + 1, answer));
        }

        Synthesized { answers, correct }
    }

    fn wrong_answer(&mut self, value: &Rational) -> String {
        let expected = value.to_string();
        for _ in 0..WRONG_DRAWS {
            let candidate = match self.rng.gen_range(0..3) {
                0 => self.rng.gen_range(0..=20u32).to_string(),
                1 => {
                    let numerator = self.rng.gen_range(1..=10u32);
                    let denominator = self.rng.gen_range(2..=10u32);
                    format!("{numerator}/{denominator}")
                }
                _ => "0".to_string(),
            };
            if candidate != expected {
                return candidate;
            }
        }
        (value.clone() + Rational::one()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade;

    fn sheet() -> Vec<String> {
        (1..=10)
            .map(|i| format!("{i}. {i} + 1/2 ="))
            .collect()
    }

    #[test]
    fn ratio_is_honoured() {
        let exercises = sheet();
        let synthesized = Synthesizer::seeded(6).synthesize(&exercises, 0.6);
        assert_eq!(synthesized.answers.len(), 10);
        assert_eq!(synthesized.correct.len(), 6);
        assert!(synthesized.answers[0].starts_with("1. "));

        let graded = grade(&exercises, &synthesized.answers);
        assert_eq!(graded.value.correct, synthesized.correct);
        assert_eq!(graded.value.wrong.len(), 4);
    }

    #[test]
    fn extremes() {
        let exercises = sheet();
        let all = Synthesizer::seeded(1).synthesize(&exercises, 1.0);
        assert_eq!(all.correct, (1..=10).collect::<Vec<_>>());
        let none = Synthesizer::seeded(1).synthesize(&exercises, 0.0);
        assert!(none.correct.is_empty());
        assert!(grade(&exercises, &none.answers).value.correct.is_empty());
    }

    #[test]
    fn floor_of_share() {
        let exercises = sheet();
        let synthesized = Synthesizer::seeded(2).synthesize(&exercises, 0.35);
        assert_eq!(synthesized.correct.len(), 3);
    }

    #[test]
    fn zero_answers_still_differ() {
        // Every random draw could collide with "0", the fallback cannot
        let exercises = ["1. 1 - 1 ="; 30];
        let synthesized = Synthesizer::seeded(3).synthesize(&exercises, 0.0);
        for answer in &synthesized.answers {
            assert_ne!(strip(answer), "0");
        }
    }

    #[test]
    fn unreadable_exercise() {
        let synthesized = Synthesizer::seeded(4).synthesize(&["1. 1 ÷ 0 ="], 1.0);
        assert_eq!(synthesized.answers, vec!["1. 0"]);
        assert!(synthesized.correct.is_empty());
    }

    fn strip(line: &str) -> &str {
        crate::sheet::strip_index(line)
    }
}
