//! Exercise, answer and grade sheets
//!
//! Sheets are UTF-8 text with one numbered entry per line, `1. 3 × 1/2 =` for
//! an exercise and `1. 1'1/2` for an answer. Numbering starts at one.

use crate::{Exercise, GradeResult};
use std::fmt;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub fn exercise_line(index: usize, exercise: &Exercise) -> String {
    format!("{index}. {} =", exercise.expression)
}

pub fn answer_line(index: usize, answer: impl fmt::Display) -> String {
    format!("{index}. {answer}")
}

/// The entry with any leading `N. ` numbering removed
pub fn strip_index(line: &str) -> &str {
    let line = line.trim();
    match line.split_once(". ") {
        Some((index, rest)) if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) => {
            rest.trim()
        }
        _ => line,
    }
}

/// The expression of an exercise line, without numbering or the closing `=`
pub fn exercise_text(line: &str) -> &str {
    let text = strip_index(line);
    text.strip_suffix('=').unwrap_or(text).trim_end()
}

/// Lines of a sheet, keeping their positions
///
/// A blank line inside the sheet stays an entry of its own so that answers
/// remain paired with their exercises. Blank lines at the end are dropped.
pub fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let mut lines: Vec<String> = content.lines().map(str::to_owned).collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    Ok(lines)
}

pub fn write_lines<I>(path: &Path, lines: I) -> io::Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out = BufWriter::new(fs::File::create(path)?);
    for line in lines {
        writeln!(out, "{}", line.as_ref())?;
    }
    out.flush()
}

pub fn write_exercises(path: &Path, exercises: &[Exercise]) -> io::Result<()> {
    write_lines(
        path,
        exercises
            .iter()
            .enumerate()
            .map(|(i, exercise)| exercise_line(i + 1, exercise)),
    )
}

pub fn write_answers(path: &Path, exercises: &[Exercise]) -> io::Result<()> {
    write_lines(
        path,
        exercises
            .iter()
            .enumerate()
            .map(|(i, exercise)| answer_line(i + 1, &exercise.answer)),
    )
}

pub fn write_grade(path: &Path, result: &GradeResult) -> io::Result<()> {
    fs::write(path, format!("{result}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Generator;
    use tempfile::TempDir;

    #[test]
    fn numbering() {
        assert_eq!(strip_index("12. 3/4"), "3/4");
        assert_eq!(strip_index("  3.   7 "), "7");
        assert_eq!(strip_index("3/4"), "3/4");
        assert_eq!(strip_index("a. 3"), "a. 3");
    }

    #[test]
    fn exercise_texts() {
        assert_eq!(exercise_text("1. 1 + 2 ="), "1 + 2");
        assert_eq!(exercise_text("2. (1/2 - 1/3) × 3 =  "), "(1/2 - 1/3) × 3");
        assert_eq!(exercise_text("4 ÷ 2"), "4 ÷ 2");
    }

    #[test]
    fn sheets_on_disk() {
        let dir = TempDir::new().unwrap();
        let exercises = Generator::seeded(10, 4).generate_many(5).unwrap().into_inner();
        let exercise_path = dir.path().join("Exercises.txt");
        let answer_path = dir.path().join("Answers.txt");
        write_exercises(&exercise_path, &exercises).unwrap();
        write_answers(&answer_path, &exercises).unwrap();

        let lines = read_lines(&exercise_path).unwrap();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], format!("1. {} =", exercises[0].text()));
        assert_eq!(exercise_text(&lines[4]), exercises[4].text());

        let answers = read_lines(&answer_path).unwrap();
        assert_eq!(answers[2], format!("3. {}", exercises[2].answer));
    }

    #[test]
    fn blank_lines_keep_their_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Answers.txt");
        fs::write(&path, "1. 3\n\n3. 7\n\n  \n").unwrap();
        assert_eq!(read_lines(&path).unwrap(), vec!["1. 3", "", "3. 7"]);
    }

    #[test]
    fn blank_answer_is_graded_in_place() {
        let dir = TempDir::new().unwrap();
        let exercises = dir.path().join("Exercises.txt");
        let answers = dir.path().join("Answers.txt");
        fs::write(&exercises, "1. 1 + 2 =\n2. 3 × 2 =\n3. 4 - 1 =\n").unwrap();
        fs::write(&answers, "1. 3\n\n3. 3\n").unwrap();

        let graded = crate::grade(&read_lines(&exercises).unwrap(), &read_lines(&answers).unwrap());
        assert!(graded.is_complete());
        assert_eq!(graded.value.correct, vec![1, 3]);
        assert_eq!(graded.value.wrong, vec![2]);
    }
}
