// src/quiz/history.rs

use std::collections::VecDeque;

use serde_json::Value;

use crate::{
    config::HISTORY_SESSION_KEY,
    quiz::{
        QuizError,
        session::SessionStore,
        store::{RecordFilter, RecordStore},
    },
};

/// Per-session window of recently drawn record ids.
///
/// Loaded once at the start of a build and written back once, after the
/// draw. The window is FIFO-bounded and is only ever cleared as a whole.
pub struct HistoryGuard<'s> {
    session: &'s dyn SessionStore,
    recent: VecDeque<i64>,
    capacity: usize,
}

impl<'s> HistoryGuard<'s> {
    pub async fn load(session: &'s dyn SessionStore, capacity: usize) -> Result<Self, QuizError> {
        let stored = session.get(HISTORY_SESSION_KEY).await?;
        let recent = match stored {
            None | Some(Value::Null) => VecDeque::new(),
            Some(value) => match serde_json::from_value::<Vec<i64>>(value) {
                Ok(ids) => ids.into(),
                Err(e) => {
                    tracing::warn!("Discarding unreadable quiz history: {}", e);
                    VecDeque::new()
                }
            },
        };

        let mut guard = Self {
            session,
            recent,
            capacity: capacity.max(1),
        };
        guard.trim();
        Ok(guard)
    }

    pub fn recent(&self) -> impl Iterator<Item = i64> + '_ {
        self.recent.iter().copied()
    }

    /// `base` minus the ids in the window. Never clears anything.
    pub fn narrow(&self, base: RecordFilter) -> RecordFilter {
        base.excluding(self.recent.iter().copied())
    }

    /// Narrows `base` to records not drawn recently.
    ///
    /// When that leaves nothing but `base` itself still matches something, the
    /// window is cleared and `base` is returned unchanged. A `base` matching
    /// nothing at all is reported as an empty pool.
    pub async fn eligible(
        &mut self,
        store: &dyn RecordStore,
        base: RecordFilter,
    ) -> Result<RecordFilter, QuizError> {
        if !self.recent.is_empty() {
            let narrowed = self.narrow(base.clone());
            if store.count_matching(&narrowed).await? > 0 {
                return Ok(narrowed);
            }
            tracing::debug!(
                "All eligible records drawn recently, clearing history of {}",
                self.recent.len()
            );
            self.recent.clear();
        }

        let available = store.count_matching(&base).await?;
        if available == 0 {
            return Err(QuizError::InsufficientPoolSize { available });
        }
        Ok(base)
    }

    /// Appends `id`, evicting the oldest entries past capacity, and persists
    /// the window.
    pub async fn commit(mut self, id: i64) -> Result<(), QuizError> {
        self.recent.push_back(id);
        self.trim();
        let ids: Vec<i64> = self.recent.into_iter().collect();
        self.session
            .set(HISTORY_SESSION_KEY, serde_json::to_value(ids)?)
            .await
    }

    fn trim(&mut self) {
        while self.recent.len() > self.capacity {
            self.recent.pop_front();
        }
    }
}
