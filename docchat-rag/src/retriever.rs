//! Cosine-similarity ranking of chunk vectors against a query vector.

use std::cmp::Ordering;

/// Compute cosine similarity between two vectors.
///
/// Returns `None` when either vector has zero magnitude — the similarity is
/// undefined there, and callers rank such vectors last instead of letting a
/// NaN propagate through the sort.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    Some(dot / (norm_a * norm_b))
}

/// Rank all chunk indices by descending similarity to `query` and return
/// the first `top_k`.
///
/// Returns at most `min(top_k, embeddings.len())` indices. Ties, and chunks
/// whose similarity is undefined (zero-norm vectors), are broken by lower
/// original index first, so retrieval is reproducible.
pub fn top_k_indices(query: &[f32], embeddings: &[Vec<f32>], top_k: usize) -> Vec<usize> {
    let mut scored: Vec<(usize, Option<f32>)> = embeddings
        .iter()
        .enumerate()
        .map(|(i, e)| (i, cosine_similarity(query, e)))
        .collect();

    scored.sort_by(|a, b| match (a.1, b.1) {
        (Some(x), Some(y)) => {
            y.partial_cmp(&x).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0))
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    });

    scored.truncate(top_k);
    scored.into_iter().map(|(i, _)| i).collect()
}
