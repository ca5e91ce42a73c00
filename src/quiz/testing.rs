// src/quiz/testing.rs

//! In-memory collaborators for unit tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    models::artwork::Artwork,
    quiz::{
        QuizError,
        session::SessionStore,
        store::{RecordFilter, RecordStore},
    },
};

pub fn artwork(id: i64, author: &str, title: &str, style: &str) -> Artwork {
    Artwork {
        id,
        genre: "western".to_string(),
        author: Some(author.to_string()),
        title: Some(title.to_string()),
        style: Some(style.to_string()),
        image_url: None,
        image_filename: None,
        image_size: None,
        image_type: None,
        notes: None,
    }
}

pub fn with_image(mut record: Artwork, filename: &str) -> Artwork {
    record.image_filename = Some(filename.to_string());
    record.image_type = Some("image/png".to_string());
    record
}

/// Record store over a fixed vector, ordered by id.
pub struct MemoryRecordStore {
    records: Vec<Artwork>,
}

impl MemoryRecordStore {
    pub fn new(mut records: Vec<Artwork>) -> Self {
        records.sort_by_key(|r| r.id);
        Self { records }
    }

    fn matching<'a>(&'a self, filter: &'a RecordFilter) -> impl Iterator<Item = &'a Artwork> {
        self.records.iter().filter(move |r| filter.matches(r))
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn count_matching(&self, filter: &RecordFilter) -> Result<i64, QuizError> {
        Ok(self.matching(filter).count() as i64)
    }

    async fn fetch_nth(
        &self,
        filter: &RecordFilter,
        offset: i64,
    ) -> Result<Option<Artwork>, QuizError> {
        Ok(self.matching(filter).nth(offset as usize).cloned())
    }

    async fn fetch_all(&self) -> Result<Vec<Artwork>, QuizError> {
        Ok(self.records.clone())
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Artwork>, QuizError> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }
}

#[derive(Default)]
pub struct MemorySession {
    values: Mutex<HashMap<String, Value>>,
}

#[async_trait]
impl SessionStore for MemorySession {
    async fn get(&self, key: &str) -> Result<Option<Value>, QuizError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), QuizError> {
        self.values.lock().await.insert(key.to_string(), value);
        Ok(())
    }
}
