// src/models/artwork.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use crate::models::quiz::QuizField;

/// Represents the 'artworks' table in the database.
///
/// Text attributes are nullable in storage; a missing value reads as the
/// empty string wherever a quiz needs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Artwork {
    pub id: i64,

    /// Catalog genre the record belongs to (e.g., "western", "japanese").
    pub genre: String,

    pub author: Option<String>,

    pub title: Option<String>,

    /// Art movement or school (e.g., "印象派", "浮世絵").
    pub style: Option<String>,

    /// External image URL, kept for records imported with a remote image.
    pub image_url: Option<String>,

    /// Stored file name of the uploaded image. Its presence defines the
    /// record's image identity.
    pub image_filename: Option<String>,

    pub image_size: Option<i64>,

    pub image_type: Option<String>,

    pub notes: Option<String>,
}

impl Artwork {
    /// Raw value of a quizzable attribute, `""` when absent.
    pub fn field_value(&self, field: QuizField) -> &str {
        let value = match field {
            QuizField::Author => &self.author,
            QuizField::Title => &self.title,
            QuizField::Style => &self.style,
            QuizField::Image => &self.image_filename,
        };
        value.as_deref().unwrap_or("")
    }

    pub fn has_image(&self) -> bool {
        self.image_filename
            .as_deref()
            .is_some_and(|name| !name.is_empty())
    }
}
