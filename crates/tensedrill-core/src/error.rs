//! Drill error types.
//!
//! The sentence bank surfaces its three failure kinds synchronously and never
//! returns a partial sample. Text processing never fails; the only judgment-time
//! error is a missing reference translation.

use thiserror::Error;

/// Errors that can occur while preparing or judging a drill round.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DrillError {
    /// The corpus is not a JSON object or lacks a `categories` object.
    #[error("invalid corpus: {0}")]
    InvalidCorpus(String),

    /// The requested category is absent, empty, or not a list.
    #[error("category '{0}' has no sentences")]
    UnknownCategory(String),

    /// The category exists but none of its entries has usable English text.
    #[error("no valid sentences found in '{0}'")]
    NoValidSentences(String),

    /// The translation collaborator could not produce a reference.
    #[error("translation service is unavailable")]
    ReferenceUnavailable,

    /// The learner submitted a blank answer.
    #[error("please enter a translation")]
    EmptyAnswer,
}

impl DrillError {
    /// Returns `true` if the error ends only the current round, leaving the
    /// session usable.
    pub fn is_round_local(&self) -> bool {
        matches!(self, DrillError::ReferenceUnavailable | DrillError::EmptyAnswer)
    }
}
