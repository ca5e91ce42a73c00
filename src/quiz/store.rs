// src/quiz/store.rs

use async_trait::async_trait;
use rand::{Rng, RngCore};

use crate::{models::artwork::Artwork, quiz::QuizError};

/// Predicate over records, understood by every [`RecordStore`].
///
/// Combines the handful of filters the engine needs: no filter, an excluded
/// id set, image-bearing only, and restriction to an explicit id set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    /// When set, only these ids match. An empty list matches nothing.
    pub only_ids: Option<Vec<i64>>,
    pub exclude_ids: Vec<i64>,
    pub require_image: bool,
}

impl RecordFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn restrict_to(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.only_ids = Some(ids.into_iter().collect());
        self
    }

    pub fn excluding(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.exclude_ids.extend(ids);
        self
    }

    pub fn with_image(mut self) -> Self {
        self.require_image = true;
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.only_ids.is_none() && self.exclude_ids.is_empty() && !self.require_image
    }

    pub fn matches(&self, record: &Artwork) -> bool {
        if let Some(ids) = &self.only_ids {
            if !ids.contains(&record.id) {
                return false;
            }
        }
        if self.exclude_ids.contains(&record.id) {
            return false;
        }
        !self.require_image || record.has_image()
    }
}

/// Read access to one catalog pool.
///
/// Implementations acquire their resources per call; the engine holds no
/// handle between operations.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn count_matching(&self, filter: &RecordFilter) -> Result<i64, QuizError>;

    /// The `offset`-th matching record in a stable (id) order.
    async fn fetch_nth(
        &self,
        filter: &RecordFilter,
        offset: i64,
    ) -> Result<Option<Artwork>, QuizError>;

    async fn fetch_all(&self) -> Result<Vec<Artwork>, QuizError>;

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Artwork>, QuizError>;

    /// Uniformly random matching record, drawn with the caller's RNG so that
    /// seeded runs are reproducible.
    async fn fetch_one_random(
        &self,
        filter: &RecordFilter,
        rng: &mut (dyn RngCore + Send),
    ) -> Result<Option<Artwork>, QuizError> {
        let count = self.count_matching(filter).await?;
        if count <= 0 {
            return Ok(None);
        }
        let offset = rng.gen_range(0..count);
        self.fetch_nth(filter, offset).await
    }
}
