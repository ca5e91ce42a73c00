// src/db/sessions.rs

use async_trait::async_trait;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::quiz::{QuizError, session::SessionStore};

/// Session bag persisted in `session_values`, one row per (session, key).
///
/// Writes are last-write-wins; concurrent requests on one session may lose an
/// update, which only weakens repeat avoidance.
pub struct SqliteSession {
    pool: SqlitePool,
    session_id: String,
}

impl SqliteSession {
    pub fn new(pool: SqlitePool, session_id: impl Into<String>) -> Self {
        Self {
            pool,
            session_id: session_id.into(),
        }
    }
}

#[async_trait]
impl SessionStore for SqliteSession {
    async fn get(&self, key: &str) -> Result<Option<Value>, QuizError> {
        let raw: Option<String> = sqlx::query_scalar(
            "SELECT value FROM session_values WHERE session_id = ? AND key = ?",
        )
        .bind(&self.session_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), QuizError> {
        sqlx::query(
            r#"
            INSERT INTO session_values (session_id, key, value)
            VALUES (?, ?, ?)
            ON CONFLICT(session_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(&self.session_id)
        .bind(key)
        .bind(value.to_string())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use serde_json::json;

    #[tokio::test]
    async fn test_values_are_scoped_per_session() {
        let pool = db::connect("sqlite::memory:", 1).await.unwrap();
        db::migrate(&pool).await.unwrap();

        let alice = SqliteSession::new(pool.clone(), "alice");
        let bob = SqliteSession::new(pool, "bob");

        assert_eq!(alice.get("quiz_history").await.unwrap(), None);

        alice.set("quiz_history", json!([1, 2])).await.unwrap();
        alice.set("quiz_history", json!([2, 3])).await.unwrap();

        assert_eq!(alice.get("quiz_history").await.unwrap(), Some(json!([2, 3])));
        assert_eq!(bob.get("quiz_history").await.unwrap(), None);
    }
}
