//! # Quiz Result Model
//!
//! Validated, immutable outcome of one quiz attempt.
//!
//! ## Invariants
//!
//! - `correct_answers_count <= total_questions`
//! - every count is non-negative (enforced at construction, stored unsigned)
//! - an empty quiz (`total_questions == 0`) is legal and scores `0.0`
//!
//! Raw inputs are accepted as `i64` so that negative values coming from a host
//! are rejected with a typed error instead of wrapping.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{QuizError, QuizOutcome};

/// The outcome of a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuizResult {
    correct_answers_count: u32,
    total_questions: u32,
    duration_in_seconds: u64,
    subject_name: String,
}

/// Field overrides for [`QuizResult::copy_with`].
///
/// `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizResultChanges {
    /// New correct answer count.
    pub correct_answers_count: Option<i64>,
    /// New question count.
    pub total_questions: Option<i64>,
    /// New duration in seconds.
    pub duration_in_seconds: Option<i64>,
    /// New subject label.
    pub subject_name: Option<String>,
}

impl QuizResult {
    /// Validates the raw fields and builds a result.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::InvalidArgument`] when a count or the duration is
    /// negative, or when more answers are correct than there were questions.
    /// Counts are stored as `u32`, so a `total_questions` above `u32::MAX` is
    /// rejected the same way, with reason `"exceeds u32 range"`.
    pub fn new(
        correct_answers_count: i64,
        total_questions: i64,
        duration_in_seconds: i64,
        subject_name: impl Into<String>,
    ) -> QuizOutcome<Self> {
        if total_questions < 0 {
            return Err(QuizError::invalid(
                "totalQuestions",
                total_questions,
                "must not be negative",
            ));
        }
        if correct_answers_count < 0 {
            return Err(QuizError::invalid(
                "correctAnswersCount",
                correct_answers_count,
                "must not be negative",
            ));
        }
        if correct_answers_count > total_questions {
            return Err(QuizError::invalid(
                "correctAnswersCount",
                correct_answers_count,
                "must not exceed totalQuestions",
            ));
        }
        if duration_in_seconds < 0 {
            return Err(QuizError::invalid(
                "durationInSeconds",
                duration_in_seconds,
                "must not be negative",
            ));
        }

        let total = u32::try_from(total_questions).map_err(|_| {
            QuizError::invalid("totalQuestions", total_questions, "exceeds u32 range")
        })?;
        // Bounded by total above.
        let correct = u32::try_from(correct_answers_count).map_err(|_| {
            QuizError::invalid("correctAnswersCount", correct_answers_count, "exceeds u32 range")
        })?;
        let duration = u64::try_from(duration_in_seconds).map_err(|_| {
            QuizError::invalid("durationInSeconds", duration_in_seconds, "must not be negative")
        })?;

        Ok(Self {
            correct_answers_count: correct,
            total_questions: total,
            duration_in_seconds: duration,
            subject_name: subject_name.into(),
        })
    }

    /// A result where every question was answered correctly.
    ///
    /// # Errors
    ///
    /// Same as [`QuizResult::new`].
    pub fn perfect(
        total_questions: i64,
        duration_in_seconds: i64,
        subject_name: impl Into<String>,
    ) -> QuizOutcome<Self> {
        Self::new(total_questions, total_questions, duration_in_seconds, subject_name)
    }

    /// Returns a new validated result with the given fields replaced.
    ///
    /// # Errors
    ///
    /// Same as [`QuizResult::new`]; `self` is never modified.
    pub fn copy_with(&self, changes: QuizResultChanges) -> QuizOutcome<Self> {
        Self::new(
            changes
                .correct_answers_count
                .unwrap_or_else(|| i64::from(self.correct_answers_count)),
            changes
                .total_questions
                .unwrap_or_else(|| i64::from(self.total_questions)),
            match changes.duration_in_seconds {
                Some(duration) => duration,
                None => i64::try_from(self.duration_in_seconds).unwrap_or(i64::MAX),
            },
            changes
                .subject_name
                .unwrap_or_else(|| self.subject_name.clone()),
        )
    }

    /// Number of correct answers.
    #[must_use]
    pub const fn correct_answers_count(&self) -> u32 {
        self.correct_answers_count
    }

    /// Number of questions in the quiz.
    #[must_use]
    pub const fn total_questions(&self) -> u32 {
        self.total_questions
    }

    /// Number of questions not answered correctly.
    #[must_use]
    pub const fn incorrect_answers_count(&self) -> u32 {
        self.total_questions - self.correct_answers_count
    }

    /// Time spent on the quiz.
    #[must_use]
    pub const fn duration_in_seconds(&self) -> u64 {
        self.duration_in_seconds
    }

    /// Subject label.
    #[must_use]
    pub fn subject_name(&self) -> &str {
        &self.subject_name
    }

    /// Share of correct answers in `[0, 1]`; `0.0` for an empty quiz.
    #[must_use]
    pub fn percentage_correct(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            f64::from(self.correct_answers_count) / f64::from(self.total_questions)
        }
    }

    /// Complement of [`percentage_correct`](Self::percentage_correct).
    #[must_use]
    pub fn percentage_wrong(&self) -> f64 {
        1.0 - self.percentage_correct()
    }

    /// True when every question was answered correctly and there was at least one.
    #[must_use]
    pub const fn is_perfect(&self) -> bool {
        self.total_questions > 0 && self.correct_answers_count == self.total_questions
    }

    /// True for a quiz without questions.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_questions == 0
    }

    /// Duration as zero-padded `MM:SS`. Minutes are not wrapped at 60.
    #[must_use]
    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration_in_seconds)
    }

    /// Flattens raw and derived fields into a key/value mapping.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("subjectName".into(), Value::from(self.subject_name.as_str()));
        map.insert("correctAnswersCount".into(), Value::from(self.correct_answers_count));
        map.insert("totalQuestions".into(), Value::from(self.total_questions));
        map.insert(
            "incorrectAnswersCount".into(),
            Value::from(self.incorrect_answers_count()),
        );
        map.insert("durationInSeconds".into(), Value::from(self.duration_in_seconds));
        map.insert("formattedDuration".into(), Value::from(self.formatted_duration()));
        map.insert("percentageCorrect".into(), Value::from(self.percentage_correct()));
        map.insert("percentageWrong".into(), Value::from(self.percentage_wrong()));
        map
    }

    /// The [`to_map`](Self::to_map) fields as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::Encoding`] if the mapping cannot be written out.
    pub fn to_json_pretty(&self) -> QuizOutcome<String> {
        serde_json::to_string_pretty(self).map_err(|e| QuizError::Encoding(e.to_string()))
    }
}

/// Formats seconds as `MM:SS`.
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

impl Serialize for QuizResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl fmt::Display for QuizResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}/{} ({:.0}%) in {}",
            self.subject_name,
            self.correct_answers_count,
            self.total_questions,
            (self.percentage_correct() * 100.0).round(),
            self.formatted_duration(),
        )
    }
}
