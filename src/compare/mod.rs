//! Position-wise sequence comparison.
//!
//! Similarity is the percentage of positions where the two sequences carry
//! the same base, computed over the overlapping prefix when lengths differ.
//! Truncation was chosen over a length-mismatch error so the function stays
//! total; in practice all sequences share [`DEFAULT_SEQUENCE_LENGTH`] and
//! the prefix is the whole sequence.
//!
//! [`DEFAULT_SEQUENCE_LENGTH`]: crate::core::sequence::DEFAULT_SEQUENCE_LENGTH

use serde::Serialize;

use crate::core::sequence::DnaSequence;
use crate::core::types::SampleId;

/// Safely convert usize to f64 for percentage calculations
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Pairwise similarity between two samples' sequences
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityResult {
    pub id1: SampleId,
    pub id2: SampleId,

    /// Percentage of matching positions, in [0, 100], two decimals
    pub similarity: f64,

    /// Number of positions compared (`min` of the two lengths)
    pub compared_length: usize,

    /// Number of positions where the bases agree
    pub matches: usize,
}

/// Percentage of position-wise matching bases between `a` and `b`.
///
/// Compares over the overlapping prefix and rounds half-up to two decimal
/// places. Two empty sequences score 0.0, never a division fault.
#[must_use]
pub fn score(a: &DnaSequence, b: &DnaSequence) -> f64 {
    let compared = a.len().min(b.len());
    if compared == 0 {
        return 0.0;
    }

    let matches = matching_positions(a, b);
    round2(100.0 * count_to_f64(matches) / count_to_f64(compared))
}

/// Count positions where the two sequences carry the same base
fn matching_positions(a: &DnaSequence, b: &DnaSequence) -> usize {
    a.as_bytes()
        .iter()
        .zip(b.as_bytes())
        .filter(|(x, y)| x == y)
        .count()
}

/// Full comparison result for two identified samples
#[must_use]
pub fn score_identified(
    id1: SampleId,
    id2: SampleId,
    a: &DnaSequence,
    b: &DnaSequence,
) -> SimilarityResult {
    let compared_length = a.len().min(b.len());
    let matches = matching_positions(a, b);

    SimilarityResult {
        id1,
        id2,
        similarity: score(a, b),
        compared_length,
        matches,
    }
}

/// Round half-up to two decimal places.
/// `f64::round` is half-away-from-zero; inputs are non-negative here.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
