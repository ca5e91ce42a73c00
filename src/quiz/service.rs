// src/quiz/service.rs

use rand::RngCore;

use crate::{
    config::{DEFAULT_HISTORY_CAPACITY, MIN_POOL_SIZE},
    models::quiz::{Quiz, QuizField},
    quiz::{
        QuizError, assembler,
        curated::CuratedCatalog,
        history::HistoryGuard,
        session::SessionStore,
        store::{RecordFilter, RecordStore},
    },
};

/// Public entry point of the quiz core for one genre's pool.
///
/// Borrowed collaborators only: the engine is built per request and owns no
/// connection, cache or RNG.
pub struct QuizEngine<'a> {
    store: &'a dyn RecordStore,
    curated: &'a CuratedCatalog,
    genre: &'a str,
    history_capacity: usize,
}

impl<'a> QuizEngine<'a> {
    pub fn new(store: &'a dyn RecordStore, curated: &'a CuratedCatalog, genre: &'a str) -> Self {
        Self {
            store,
            curated,
            genre,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Builds a quiz from the whole pool, avoiding the session's recent draws.
    pub async fn build_multiple_choice_quiz(
        &self,
        session: &dyn SessionStore,
        rng: &mut (dyn RngCore + Send),
    ) -> Result<Quiz, QuizError> {
        self.build_from_scope(session, RecordFilter::all(), rng).await
    }

    /// Builds a quiz whose answer is one of `missed_ids`, the records the
    /// caller previously answered incorrectly. Distractors still come from the
    /// whole pool.
    pub async fn build_review_quiz(
        &self,
        session: &dyn SessionStore,
        missed_ids: &[i64],
        rng: &mut (dyn RngCore + Send),
    ) -> Result<Quiz, QuizError> {
        if missed_ids.is_empty() {
            return Err(QuizError::NoReviewItems);
        }
        let scope = RecordFilter::all().restrict_to(missed_ids.iter().copied());
        if self.store.count_matching(&scope).await? == 0 {
            return Err(QuizError::NoReviewItems);
        }
        self.build_from_scope(session, scope, rng).await
    }

    async fn build_from_scope(
        &self,
        session: &dyn SessionStore,
        scope: RecordFilter,
        rng: &mut (dyn RngCore + Send),
    ) -> Result<Quiz, QuizError> {
        let total = self.store.count_matching(&RecordFilter::all()).await?;
        if total < MIN_POOL_SIZE {
            return Err(QuizError::InsufficientPoolSize { available: total });
        }

        let image_records = self
            .store
            .count_matching(&RecordFilter::all().with_image())
            .await?;
        let mut fields = assembler::eligible_fields(image_records);
        if fields.contains(&QuizField::Image) && !scope.is_unrestricted() {
            let scoped_images = self.store.count_matching(&scope.clone().with_image()).await?;
            if scoped_images == 0 {
                fields.retain(|f| *f != QuizField::Image);
            }
        }
        let mut field = assembler::choose_field(&fields, rng);

        let mut history = HistoryGuard::load(session, self.history_capacity).await?;
        if field == QuizField::Image {
            // The window is cleared only once the whole scope is exhausted.
            let fresh_images = self
                .store
                .count_matching(&history.narrow(scope.clone().with_image()))
                .await?;
            if fresh_images == 0
                && self.store.count_matching(&history.narrow(scope.clone())).await? > 0
            {
                tracing::debug!("Every image record was drawn recently, asking a text field");
                fields.retain(|f| *f != QuizField::Image);
                field = assembler::choose_field(&fields, rng);
            }
        }

        let draw_base = match field {
            QuizField::Image => scope.with_image(),
            _ => scope,
        };
        let filter = history.eligible(self.store, draw_base).await?;
        let anchor = self
            .store
            .fetch_one_random(&filter, rng)
            .await?
            .ok_or(QuizError::InsufficientPoolSize { available: total })?;

        let pool = self.store.fetch_all().await?;
        let curated = self.curated.options(self.genre, field);
        let quiz = assembler::assemble(&anchor, field, &pool, curated, rng)?;

        history.commit(anchor.id).await?;

        tracing::info!(
            "Built {} quiz on artwork {} ({} records, {} with images)",
            field.as_str(),
            anchor.id,
            pool.len(),
            image_records
        );
        Ok(quiz)
    }
}
