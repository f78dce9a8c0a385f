//! Nearest-rank percentiles
//!
//! Nearest-rank always returns an observed sample rather than interpolating
//! between two, so a reported p95 is a response time that actually happened.

/// Nearest-rank percentile over ascending sorted samples.
///
/// `rank = ceil(p/100 * n)`, index clamped to `[0, n-1]`. Returns None for
/// an empty slice. p50 of `[1, 2, 3, 4]` is `2`, not `2.5`.
pub fn nearest_rank(sorted: &[i64], p: f64) -> Option<i64> {
    if sorted.is_empty() {
        return None;
    }
    debug_assert!((0.0..=100.0).contains(&p));
    let n = sorted.len();
    let rank = (p / 100.0 * n as f64).ceil() as usize;
    let index = rank.saturating_sub(1).min(n - 1);
    Some(sorted[index])
}

/// Arithmetic mean; None for an empty slice
pub fn mean(samples: &[i64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let sum: i64 = samples.iter().sum();
    Some(sum as f64 / samples.len() as f64)
}
