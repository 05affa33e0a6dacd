//! # Quizring Error Types
//!
//! All errors that can occur while building results or driving a chart.

use thiserror::Error;

/// Errors that can occur in the quizring crates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// A constructor argument violated a non-negativity or ordering invariant.
    #[error("invalid argument `{field}` = {value}: {reason}")]
    InvalidArgument {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: i64,
        /// Which invariant was violated.
        reason: &'static str,
    },

    /// An assertion-style precondition failed (strict geometry input,
    /// animation lifecycle misuse).
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// Invalid configuration document.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A result could not be written out in an export format.
    #[error("cannot encode result: {0}")]
    Encoding(String),
}

impl QuizError {
    /// Shorthand for an [`QuizError::InvalidArgument`].
    #[must_use]
    pub const fn invalid(field: &'static str, value: i64, reason: &'static str) -> Self {
        Self::InvalidArgument { field, value, reason }
    }
}

/// Result type for quizring operations.
pub type QuizOutcome<T> = Result<T, QuizError>;
