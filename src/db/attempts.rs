// src/db/attempts.rs

use sqlx::SqlitePool;

use crate::{
    config::STATS_RECENT_LIMIT,
    models::quiz_result::{FieldStat, QuizStats, RecentResult, SubmitResultRequest, accuracy},
};

/// Appends one attempt and returns its id.
pub async fn insert_attempt(
    pool: &SqlitePool,
    genre: &str,
    req: &SubmitResultRequest,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO quiz_results (genre, question_field, correct_answer, user_answer, is_correct, artwork_id)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(genre)
    .bind(req.question_field.as_str())
    .bind(&req.correct_answer)
    .bind(&req.user_answer)
    .bind(req.is_correct())
    .bind(req.artwork_id)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Overall, per-field and most recent attempt figures for a genre.
pub async fn stats(pool: &SqlitePool, genre: &str) -> Result<QuizStats, sqlx::Error> {
    let total_attempts: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM quiz_results WHERE genre = ?")
            .bind(genre)
            .fetch_one(pool)
            .await?;

    let correct_attempts: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM quiz_results WHERE genre = ? AND is_correct = 1")
            .bind(genre)
            .fetch_one(pool)
            .await?;

    let mut field_stats = sqlx::query_as::<_, FieldStat>(
        r#"
        SELECT
            question_field AS field,
            COUNT(*) AS total,
            COALESCE(SUM(CASE WHEN is_correct = 1 THEN 1 ELSE 0 END), 0) AS correct
        FROM quiz_results
        WHERE genre = ?
        GROUP BY question_field
        ORDER BY question_field
        "#,
    )
    .bind(genre)
    .fetch_all(pool)
    .await?;

    for stat in &mut field_stats {
        stat.accuracy = accuracy(stat.correct, stat.total);
    }

    let recent_results = sqlx::query_as::<_, RecentResult>(
        r#"
        SELECT
            question_field AS field,
            correct_answer,
            user_answer,
            is_correct,
            created_at AS date
        FROM quiz_results
        WHERE genre = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(genre)
    .bind(STATS_RECENT_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(QuizStats {
        total_attempts,
        correct_attempts,
        overall_accuracy: accuracy(correct_attempts, total_attempts),
        field_stats,
        recent_results,
    })
}

/// Deletes every attempt of a genre. Returns the number removed.
pub async fn reset(pool: &SqlitePool, genre: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM quiz_results WHERE genre = ?")
        .bind(genre)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Records with at least one incorrect attempt in the genre.
pub async fn missed_artwork_ids(pool: &SqlitePool, genre: &str) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT DISTINCT artwork_id
        FROM quiz_results
        WHERE genre = ? AND is_correct = 0 AND artwork_id IS NOT NULL
        ORDER BY artwork_id
        "#,
    )
    .bind(genre)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db, models::quiz::QuizField};

    fn attempt(field: QuizField, correct: &str, given: &str, artwork_id: Option<i64>) -> SubmitResultRequest {
        SubmitResultRequest {
            question_field: field,
            correct_answer: correct.to_string(),
            user_answer: given.to_string(),
            artwork_id,
        }
    }

    async fn fresh_pool() -> SqlitePool {
        let pool = db::connect("sqlite::memory:", 1).await.unwrap();
        db::migrate(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_stats_aggregate_per_field() {
        let pool = fresh_pool().await;
        let attempts = [
            attempt(QuizField::Author, "モネ", "モネ", Some(1)),
            attempt(QuizField::Author, "モネ", "ゴッホ", Some(1)),
            attempt(QuizField::Author, "ピカソ", "ピカソ", Some(2)),
            attempt(QuizField::Style, "印象派", "バロック", Some(3)),
        ];
        for a in &attempts {
            insert_attempt(&pool, "western", a).await.unwrap();
        }
        insert_attempt(&pool, "japanese", &attempt(QuizField::Title, "無我", "無我", None))
            .await
            .unwrap();

        let stats = stats(&pool, "western").await.unwrap();
        assert_eq!(stats.total_attempts, 4);
        assert_eq!(stats.correct_attempts, 2);
        assert_eq!(stats.overall_accuracy, 50.0);
        assert_eq!(stats.recent_results.len(), 4);

        let author = stats.field_stats.iter().find(|s| s.field == "author").unwrap();
        assert_eq!((author.total, author.correct), (3, 2));
        assert_eq!(author.accuracy, 66.7);
        let style = stats.field_stats.iter().find(|s| s.field == "style").unwrap();
        assert_eq!(style.accuracy, 0.0);
    }

    #[tokio::test]
    async fn test_missed_ids_and_reset() {
        let pool = fresh_pool().await;
        insert_attempt(&pool, "western", &attempt(QuizField::Title, "夜警", "叫び", Some(7)))
            .await
            .unwrap();
        insert_attempt(&pool, "western", &attempt(QuizField::Title, "夜警", "叫び", Some(7)))
            .await
            .unwrap();
        insert_attempt(&pool, "western", &attempt(QuizField::Title, "睡蓮", "睡蓮", Some(2)))
            .await
            .unwrap();
        insert_attempt(&pool, "western", &attempt(QuizField::Style, "琳派", "浮世絵", None))
            .await
            .unwrap();

        assert_eq!(missed_artwork_ids(&pool, "western").await.unwrap(), vec![7]);
        assert!(missed_artwork_ids(&pool, "japanese").await.unwrap().is_empty());

        assert_eq!(reset(&pool, "western").await.unwrap(), 4);
        assert_eq!(stats(&pool, "western").await.unwrap().total_attempts, 0);
    }
}
