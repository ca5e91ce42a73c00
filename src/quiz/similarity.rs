// src/quiz/similarity.rs

//! Content-similarity ranking over the textual attributes of a pool.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{artwork::Artwork, quiz::QuizField};

/// Unicode word runs of at least two characters.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

/// Concatenates the quizzable text attributes of a record in a fixed order.
pub fn document(record: &Artwork) -> String {
    QuizField::TEXT_FIELDS
        .iter()
        .map(|field| record.field_value(*field))
        .collect::<Vec<_>>()
        .join(" ")
}

fn tokenize(document: &str) -> Vec<String> {
    let lowered = document.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// L2-normalized TF-IDF vectors for a corpus, one per document.
///
/// Vectors are keyed in term order so dot products always sum in the same
/// order for the same input.
struct TfIdf {
    vectors: Vec<BTreeMap<String, f64>>,
}

impl TfIdf {
    /// Returns `None` for a degenerate corpus: fewer than two documents
    /// carrying any token.
    fn fit(documents: &[String]) -> Option<Self> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();

        let usable = tokenized.iter().filter(|tokens| !tokens.is_empty()).count();
        if usable < 2 {
            return None;
        }

        let total_docs = documents.len() as f64;
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let unique: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let vectors = tokenized
            .iter()
            .map(|tokens| {
                let mut weights: BTreeMap<String, f64> = BTreeMap::new();
                for term in tokens {
                    *weights.entry(term.clone()).or_insert(0.0) += 1.0;
                }
                for (term, weight) in weights.iter_mut() {
                    let df = doc_freq[term.as_str()] as f64;
                    // Smoothed IDF
                    *weight *= ((1.0 + total_docs) / (1.0 + df)).ln() + 1.0;
                }
                let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for weight in weights.values_mut() {
                        *weight /= norm;
                    }
                }
                weights
            })
            .collect();

        Some(Self { vectors })
    }

    fn cosine(&self, a: usize, b: usize) -> f64 {
        let (left, right) = (&self.vectors[a], &self.vectors[b]);
        let (small, large) = if left.len() <= right.len() {
            (left, right)
        } else {
            (right, left)
        };
        small
            .iter()
            .filter_map(|(term, weight)| large.get(term).map(|other| weight * other))
            .sum()
    }
}

/// Ranks every other record of `pool` by similarity to `anchor`, most similar
/// first. Ties keep pool order.
///
/// The anchor is part of the corpus. An anchor missing from the pool, or a
/// corpus that cannot be vectorized, yields an empty ranking.
pub fn rank_similar<'a>(pool: &'a [Artwork], anchor: &Artwork) -> Vec<(&'a Artwork, f64)> {
    let Some(anchor_idx) = pool.iter().position(|r| r.id == anchor.id) else {
        tracing::debug!("Anchor {} not in pool, skipping similarity ranking", anchor.id);
        return Vec::new();
    };

    let documents: Vec<String> = pool.iter().map(document).collect();
    let Some(model) = TfIdf::fit(&documents) else {
        tracing::debug!(
            "Similarity corpus of {} records is degenerate, skipping ranking",
            pool.len()
        );
        return Vec::new();
    };

    let mut ranked: Vec<(&Artwork, f64)> = pool
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != anchor_idx)
        .map(|(idx, record)| (record, model.cosine(anchor_idx, idx)))
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}
