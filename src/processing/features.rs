//! Batch feature scaling and similarity

use crate::processing::vectorizer::SparseVector;

const EPSILON: f64 = 1e-12;

/// Min-max scale over the batch. A constant batch (max == min) maps every
/// value to 0; non-finite inputs are treated as the batch minimum. Results
/// always lie in [0, 1], even when `max - min` overflows.
pub fn min_max_scale(values: &[f64]) -> Vec<f64> {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if !min.is_finite() || !max.is_finite() {
        return vec![0.0; values.len()];
    }

    if max <= min {
        return vec![0.0; values.len()];
    }

    // Halved operands keep the range finite for values near f64::MAX
    let halve = !(max - min).is_finite();
    let (min, range) = if halve {
        (min / 2.0, max / 2.0 - min / 2.0)
    } else {
        (min, max - min)
    };

    values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                return 0.0;
            }
            let v = if halve { v / 2.0 } else { v };
            let scaled = (v - min) / range;
            if scaled.is_nan() {
                0.0
            } else {
                scaled.clamp(0.0, 1.0)
            }
        })
        .collect()
}

/// Cosine similarity clamped to [0, 1]; zero vectors give 0, never NaN
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a < EPSILON || norm_b < EPSILON {
        return 0.0;
    }

    let similarity = a.dot(b) / (norm_a * norm_b);
    if similarity.is_nan() {
        0.0
    } else {
        similarity.clamp(0.0, 1.0)
    }
}
