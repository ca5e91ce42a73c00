// src/db/artworks.rs

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::{
    models::artwork::Artwork,
    quiz::{
        QuizError,
        store::{RecordFilter, RecordStore},
    },
};

const ARTWORK_COLUMNS: &str =
    "id, genre, author, title, style, image_url, image_filename, image_size, image_type, notes";

/// Record store over the `artworks` table, scoped to one genre.
#[derive(Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
    genre: String,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool, genre: impl Into<String>) -> Self {
        Self {
            pool,
            genre: genre.into(),
        }
    }

    /// Every record of the genre, newest first.
    pub async fn list_newest_first(&self) -> Result<Vec<Artwork>, sqlx::Error> {
        sqlx::query_as::<_, Artwork>(&format!(
            "SELECT {} FROM artworks WHERE genre = ? ORDER BY id DESC",
            ARTWORK_COLUMNS
        ))
        .bind(&self.genre)
        .fetch_all(&self.pool)
        .await
    }
}

/// Appends the WHERE clause for `filter` within `genre`.
fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, genre: &str, filter: &RecordFilter) {
    builder.push(" WHERE genre = ").push_bind(genre.to_string());

    if filter.require_image {
        builder.push(" AND image_filename IS NOT NULL AND image_filename != ''");
    }

    if !filter.exclude_ids.is_empty() {
        builder.push(" AND id NOT IN (");
        let mut separated = builder.separated(",");
        for id in &filter.exclude_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");
    }

    if let Some(ids) = &filter.only_ids {
        if ids.is_empty() {
            builder.push(" AND 0");
        } else {
            builder.push(" AND id IN (");
            let mut separated = builder.separated(",");
            for id in ids {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");
        }
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn count_matching(&self, filter: &RecordFilter) -> Result<i64, QuizError> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM artworks");
        push_filter(&mut builder, &self.genre, filter);

        let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn fetch_nth(
        &self,
        filter: &RecordFilter,
        offset: i64,
    ) -> Result<Option<Artwork>, QuizError> {
        let mut builder =
            QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM artworks", ARTWORK_COLUMNS));
        push_filter(&mut builder, &self.genre, filter);
        builder.push(" ORDER BY id LIMIT 1 OFFSET ").push_bind(offset);

        let record: Option<Artwork> = builder
            .build_query_as()
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn fetch_all(&self) -> Result<Vec<Artwork>, QuizError> {
        let records = sqlx::query_as::<_, Artwork>(&format!(
            "SELECT {} FROM artworks WHERE genre = ? ORDER BY id",
            ARTWORK_COLUMNS
        ))
        .bind(&self.genre)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Artwork>, QuizError> {
        let record = sqlx::query_as::<_, Artwork>(&format!(
            "SELECT {} FROM artworks WHERE genre = ? AND id = ?",
            ARTWORK_COLUMNS
        ))
        .bind(&self.genre)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }
}
