//! Similarity computation for embeddings.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Compute the cosine similarity between two embeddings.
///
/// Returns a value between -1.0 and 1.0, where:
/// - 1.0 means same direction
/// - 0.0 means orthogonal vectors
/// - -1.0 means opposite vectors
///
/// Vectors that cannot be compared (empty, different lengths, or with a zero
/// norm) score 0.0, i.e. "no similarity", instead of producing an error.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }

    let score = dot / denom;
    if score.is_finite() { score } else { 0.0 }
}

/// A similarity search result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Position of the matched candidate in the input sequence.
    pub index: usize,

    /// Similarity score.
    pub score: f32,
}

/// Find the top-k most similar embeddings.
///
/// Results are ordered by descending score. Candidates with equal scores keep
/// their input order, so the output is deterministic for a given input.
pub fn find_top_k<'a, I>(query: &[f32], candidates: I, k: usize) -> Vec<SimilarityResult>
where
    I: IntoIterator<Item = &'a [f32]>,
{
    if k == 0 {
        return Vec::new();
    }

    let mut scores: Vec<(OrderedFloat<f32>, usize)> = candidates
        .into_iter()
        .enumerate()
        .map(|(index, embedding)| (OrderedFloat(cosine_similarity(query, embedding)), index))
        .collect();

    // Stable sort keeps insertion order for ties.
    scores.sort_by(|a, b| b.0.cmp(&a.0));
    scores.truncate(k);

    scores
        .into_iter()
        .map(|(score, index)| SimilarityResult {
            index,
            score: score.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![0.3, -1.2, 4.0];
        let sim = cosine_similarity(&a, &a);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_is_symmetric() {
        let a = vec![0.2, 0.9, -0.4, 1.5];
        let b = vec![1.1, -0.3, 0.8, 0.05];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_dimension_mismatch_scores_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_empty_and_zero_vectors_score_zero() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[f32::NAN, 1.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_find_top_k() {
        let query = vec![1.0, 0.0, 0.0];
        let candidates = [
            vec![1.0, 0.0, 0.0], // similarity 1.0
            vec![0.0, 1.0, 0.0], // similarity 0.0
            vec![0.7, 0.7, 0.0], // similarity ~0.7
        ];

        let results = find_top_k(&query, candidates.iter().map(Vec::as_slice), 2);
        let indices: Vec<usize> = results.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_find_top_k_keeps_input_order_on_ties() {
        let query = vec![1.0, 0.0];
        let candidates = [vec![2.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![5.0, 0.0]];

        let results = find_top_k(&query, candidates.iter().map(Vec::as_slice), 10);
        let indices: Vec<usize> = results.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_find_top_k_zero_k_or_no_candidates() {
        let query = vec![1.0];
        let candidates = [vec![1.0]];
        assert!(find_top_k(&query, candidates.iter().map(Vec::as_slice), 0).is_empty());
        assert!(find_top_k(&query, std::iter::empty(), 3).is_empty());
    }
}
