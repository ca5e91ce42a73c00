// src/quiz/session.rs

use async_trait::async_trait;
use serde_json::Value;

use crate::quiz::QuizError;

/// Key-value bag scoped to one client session.
///
/// The engine only ever reads and writes a single key through this; values are
/// opaque JSON so any session backend can hold them.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, QuizError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), QuizError>;
}
