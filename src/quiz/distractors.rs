// src/quiz/distractors.rs

//! Turns a pool into exactly three usable wrong answers.
//!
//! Text fields walk a fixed chain: similar records, then any other distinct
//! value in the pool, then the curated catalog, then synthetic placeholders.
//! Every tier only contributes values not already present after
//! normalization, the correct answer included.

use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};

use crate::{
    config::QUIZ_CHOICE_COUNT,
    models::{artwork::Artwork, quiz::QuizField},
    quiz::{QuizError, normalize, similarity::rank_similar},
};

pub const DISTRACTOR_COUNT: usize = QUIZ_CHOICE_COUNT - 1;

/// Where a distractor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Similarity,
    RandomDistinct,
    Curated,
    Synthetic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Distractor {
    pub value: String,
    pub tier: Tier,
}

/// Collected distractors plus the normalized values already taken.
struct Collector {
    taken: HashSet<String>,
    picked: Vec<Distractor>,
}

impl Collector {
    fn new(correct_answer: &str) -> Self {
        let mut taken = HashSet::new();
        taken.insert(normalize(correct_answer).to_string());
        Self {
            taken,
            picked: Vec::with_capacity(DISTRACTOR_COUNT),
        }
    }

    fn is_full(&self) -> bool {
        self.picked.len() >= DISTRACTOR_COUNT
    }

    /// Keeps the raw value if it is non-empty and new under normalization.
    fn offer(&mut self, candidate: &str, tier: Tier) -> bool {
        if self.is_full() {
            return false;
        }
        let key = normalize(candidate);
        if key.is_empty() || self.taken.contains(key) {
            return false;
        }
        self.taken.insert(key.to_string());
        self.picked.push(Distractor {
            value: candidate.to_string(),
            tier,
        });
        true
    }

    fn offer_all<'a>(&mut self, candidates: impl IntoIterator<Item = &'a str>, tier: Tier) {
        for candidate in candidates {
            if self.is_full() {
                break;
            }
            self.offer(candidate, tier);
        }
    }
}

/// Resolves three distractors for a text field of `anchor`.
///
/// `curated` is the catalog's list for the pool's genre and this field. The
/// result always has exactly [`DISTRACTOR_COUNT`] entries.
pub fn resolve_text<R: Rng + ?Sized>(
    anchor: &Artwork,
    field: QuizField,
    pool: &[Artwork],
    curated: &[String],
    rng: &mut R,
) -> Vec<Distractor> {
    let correct_answer = anchor.field_value(field);
    let mut collector = Collector::new(correct_answer);

    let ranked = rank_similar(pool, anchor);
    collector.offer_all(
        ranked.iter().map(|(record, _)| record.field_value(field)),
        Tier::Similarity,
    );

    if !collector.is_full() {
        let mut seen = HashSet::new();
        let mut distinct: Vec<&str> = pool
            .iter()
            .map(|record| record.field_value(field))
            .filter(|value| !value.is_empty() && *value != correct_answer)
            .filter(|value| seen.insert(*value))
            .collect();
        distinct.shuffle(rng);
        collector.offer_all(distinct, Tier::RandomDistinct);
    }

    if !collector.is_full() {
        let mut fallbacks: Vec<&str> = curated.iter().map(String::as_str).collect();
        fallbacks.shuffle(rng);
        collector.offer_all(fallbacks, Tier::Curated);
    }

    let mut counter = 1;
    while !collector.is_full() {
        collector.offer(&format!("ダミー選択肢{}", counter), Tier::Synthetic);
        counter += 1;
    }

    let tiers: Vec<Tier> = collector.picked.iter().map(|d| d.tier).collect();
    tracing::debug!("Resolved {} distractors via {:?}", field.as_str(), tiers);

    collector.picked
}

/// Resolves three distractor images: other image-bearing records of the pool,
/// in random order.
///
/// Running short is fatal; an image question is never padded.
pub fn resolve_image<R: Rng + ?Sized>(
    anchor: &Artwork,
    pool: &[Artwork],
    rng: &mut R,
) -> Result<Vec<Distractor>, QuizError> {
    let mut candidates: Vec<&str> = pool
        .iter()
        .filter(|record| record.id != anchor.id && record.has_image())
        .map(|record| record.field_value(QuizField::Image))
        .collect();

    if !anchor.has_image() || candidates.len() < DISTRACTOR_COUNT {
        return Err(QuizError::InsufficientImageData {
            available: candidates.len(),
        });
    }

    candidates.shuffle(rng);
    let mut collector = Collector::new(anchor.field_value(QuizField::Image));
    collector.offer_all(candidates, Tier::RandomDistinct);

    if !collector.is_full() {
        return Err(QuizError::InsufficientImageData {
            available: collector.picked.len(),
        });
    }
    Ok(collector.picked)
}
