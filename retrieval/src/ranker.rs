//! Top-K ranking of stored records against a query embedding.

use std::sync::Arc;

use cohort_embeddings::find_top_k;
use serde::Serialize;

use crate::store::Record;

/// A record paired with its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch {
    pub record: Arc<Record>,
    pub score: f32,
}

/// Wire form of a match: the record without its embedding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub id: String,
    pub text: String,
    pub score: f32,
}

impl From<&ScoredMatch> for MatchSummary {
    fn from(m: &ScoredMatch) -> Self {
        Self {
            id: m.record.id.clone(),
            text: m.record.text.clone(),
            score: m.score,
        }
    }
}

/// Score every record by cosine similarity and keep the best `k`.
///
/// The result holds `min(k, records.len())` matches sorted by descending
/// score; ties keep insertion order.
pub fn rank_top_k(query: &[f32], records: &[Arc<Record>], k: usize) -> Vec<ScoredMatch> {
    find_top_k(query, records.iter().map(|r| r.embedding.as_slice()), k)
        .into_iter()
        .map(|hit| ScoredMatch {
            record: Arc::clone(&records[hit.index]),
            score: hit.score,
        })
        .collect()
}
