// src/models/quiz_result.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::quiz::QuizField;

/// DTO for recording the outcome of an answered quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitResultRequest {
    pub question_field: QuizField,
    #[validate(length(min = 1, max = 1000))]
    pub correct_answer: String,
    #[validate(length(max = 1000))]
    pub user_answer: String,
    pub artwork_id: Option<i64>,
}

impl SubmitResultRequest {
    /// Answers are compared the same way choices are deduplicated: surrounding
    /// whitespace is ignored, case is not.
    pub fn is_correct(&self) -> bool {
        self.user_answer.trim() == self.correct_answer.trim()
    }
}

/// Per-field aggregate row.
#[derive(Debug, Serialize, FromRow)]
pub struct FieldStat {
    pub field: String,
    pub total: i64,
    pub correct: i64,
    #[sqlx(skip)]
    pub accuracy: f64,
}

/// Row shown in the "recent results" list.
#[derive(Debug, Serialize, FromRow)]
pub struct RecentResult {
    pub field: String,
    pub correct_answer: String,
    pub user_answer: String,
    pub is_correct: bool,
    pub date: Option<chrono::NaiveDateTime>,
}

/// Aggregated statistics for one genre.
#[derive(Debug, Serialize)]
pub struct QuizStats {
    pub total_attempts: i64,
    pub correct_attempts: i64,
    pub overall_accuracy: f64,
    pub field_stats: Vec<FieldStat>,
    pub recent_results: Vec<RecentResult>,
}

/// Percentage rounded to one decimal place; zero when nothing was attempted.
pub fn accuracy(correct: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let pct = correct as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}
