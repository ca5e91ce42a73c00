// src/quiz/mod.rs

//! Quiz-construction engine.
//!
//! Everything in here is store-agnostic: records come in through
//! [`store::RecordStore`], per-client state through [`session::SessionStore`],
//! and randomness through a caller-supplied RNG.

pub mod assembler;
pub mod curated;
pub mod distractors;
pub mod history;
pub mod service;
pub mod session;
pub mod similarity;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;

pub use service::QuizEngine;

/// Failures that end a quiz build. Internal recoveries (degenerate similarity
/// corpus, exhausted history) never surface as one of these.
#[derive(Debug)]
pub enum QuizError {
    /// Fewer records than choices.
    InsufficientPoolSize { available: i64 },

    /// The image question was attempted without enough image-bearing records.
    InsufficientImageData { available: usize },

    /// Review mode was requested but nothing has been answered incorrectly.
    NoReviewItems,

    /// The record or session store failed. Not retried.
    Store(String),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::InsufficientPoolSize { available } => write!(
                f,
                "A multiple-choice quiz needs at least {} records (found {})",
                crate::config::MIN_POOL_SIZE,
                available
            ),
            QuizError::InsufficientImageData { available } => write!(
                f,
                "An image quiz needs at least {} records with images (found {} besides the answer)",
                crate::config::MIN_IMAGE_RECORDS,
                available
            ),
            QuizError::NoReviewItems => write!(f, "No incorrectly answered records to review"),
            QuizError::Store(msg) => write!(f, "Store error: {}", msg),
        }
    }
}

impl std::error::Error for QuizError {}

impl From<sqlx::Error> for QuizError {
    fn from(err: sqlx::Error) -> Self {
        QuizError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::Store(err.to_string())
    }
}

/// Dedup key for choice values: surrounding whitespace is ignored, case is kept.
pub fn normalize(value: &str) -> &str {
    value.trim()
}
