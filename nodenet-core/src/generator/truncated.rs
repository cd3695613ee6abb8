//! Exact sampling from a Poisson distribution conditioned on `0..size`.

use crate::random::RandomSource;

/// Draws `k` in `0..size` with probability proportional to `mean^k / k!`.
///
/// Weights are built with the recurrence `w(k + 1) = w(k) * mean / (k + 1)`
/// in log space and rescaled by their peak, so neither tiny nor huge means
/// underflow or overflow. Returns `0` for `size <= 1` without drawing.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "inverse CDF over floating-point Poisson weights"
)]
pub(super) fn truncated_poisson<R: RandomSource>(source: &mut R, mean: f64, size: usize) -> usize {
    if size <= 1 {
        return 0;
    }
    if mean <= 0.0 {
        return 0;
    }

    let log_mean = mean.ln();
    let mut log_weights = Vec::with_capacity(size);
    let mut log_weight = 0.0_f64;
    log_weights.push(log_weight);
    for k in 1..size {
        log_weight += log_mean - (k as f64).ln();
        log_weights.push(log_weight);
    }
    let peak = log_weights
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let weights: Vec<f64> = log_weights
        .iter()
        .map(|log_weight| (log_weight - peak).exp())
        .collect();
    let total: f64 = weights.iter().sum();

    let threshold = source.unit_interval() * total;
    let mut cumulative = 0.0;
    for (k, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if threshold < cumulative {
            return k;
        }
    }
    size - 1
}
