//! # Quizring Core
//!
//! The validated quiz outcome that every chart and results view is built from.
//!
//! ## Design Principles
//!
//! 1. **Validate once** - a `QuizResult` either satisfies every invariant or is
//!    never constructed
//! 2. **Derived, not stored** - percentages and the incorrect count are
//!    computed on demand
//! 3. **Immutable** - "changes" produce a new validated instance
//!
//! ## Example
//!
//! ```rust
//! use quizring_core::QuizResult;
//!
//! let result = QuizResult::new(8, 10, 125, "Math")?;
//! assert_eq!(result.percentage_correct(), 0.8);
//! assert_eq!(result.formatted_duration(), "02:05");
//! # Ok::<(), quizring_core::QuizError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod result;

pub use error::{QuizError, QuizOutcome};
pub use result::{format_duration, QuizResult, QuizResultChanges};
