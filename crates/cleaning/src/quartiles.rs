//! Quartile and price-bound computation.

use ordered_float::OrderedFloat;

use tickforge_core::{PriceBounds, Tick};

/// Estimate the `tau`-th percentile of a sorted slice.
///
/// Uses linear interpolation between ranks: the target rank is
/// `tau * (n - 1)` and the value is interpolated between the two flanking
/// order statistics.
pub fn percentile(sorted: &[f64], tau: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    debug_assert!((0.0..=1.0).contains(&tau));

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = tau * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let frac = rank - lo as f64;
    if frac == 0.0 || lo + 1 >= n {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[lo + 1] - sorted[lo]) * frac
    }
}

/// Derive IQR-based price bounds from a tick set.
///
/// Bounds are `Q1 - k*IQR` and `Q3 + k*IQR` over every price in the input.
/// They must be computed once per dataset, before any filtering; a per-batch
/// computation would make the result order-dependent. Returns `None` for an
/// empty input.
pub fn price_bounds(ticks: &[Tick], iqr_multiplier: f64) -> Option<PriceBounds> {
    if ticks.is_empty() {
        return None;
    }

    let mut prices: Vec<f64> = ticks.iter().map(|t| t.price).collect();
    prices.sort_unstable_by_key(|p| OrderedFloat(*p));

    let q1 = percentile(&prices, 0.25);
    let q3 = percentile(&prices, 0.75);
    let iqr = q3 - q1;

    Some(PriceBounds {
        lower: q1 - iqr_multiplier * iqr,
        upper: q3 + iqr_multiplier * iqr,
    })
}
