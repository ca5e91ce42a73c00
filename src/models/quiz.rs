// src/models/quiz.rs

use serde::{Deserialize, Serialize};

use crate::models::artwork::Artwork;

/// The attribute a quiz question asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizField {
    Author,
    Title,
    Style,
    Image,
}

impl QuizField {
    /// Free-text attributes, always eligible. Order matters: it is also the
    /// concatenation order of similarity documents.
    pub const TEXT_FIELDS: [QuizField; 3] = [QuizField::Author, QuizField::Title, QuizField::Style];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuizField::Author => "author",
            QuizField::Title => "title",
            QuizField::Style => "style",
            QuizField::Image => "image",
        }
    }

    /// Human-readable name used in question text.
    pub fn display_name(&self) -> &'static str {
        match self {
            QuizField::Author => "作者",
            QuizField::Title => "作品名",
            QuizField::Style => "美術様式",
            QuizField::Image => "画像",
        }
    }
}

/// A generated multiple-choice question. Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Quiz {
    /// The anchor record with the tested attribute hidden.
    pub artwork: Artwork,

    /// The anchor record as stored, for revealing the answer.
    pub full_artwork_data: Artwork,

    pub question: String,

    pub question_field: QuizField,

    /// Exactly four choices in presentation order.
    pub choices: Vec<String>,

    pub correct_answer: String,
}
