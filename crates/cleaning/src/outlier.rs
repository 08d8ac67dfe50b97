//! Outlier rejection against dataset-wide price bounds.

use tracing::debug;

use tickforge_core::{Error, PriceBounds, Result, Tick};

use crate::quartiles;

/// Rejects ticks whose price falls outside the dataset's IQR bounds.
///
/// The bounds are fixed at construction from the full structurally-valid
/// tick set (before duplicate removal) and then applied to every tick.
#[derive(Debug)]
pub struct OutlierFilter {
    bounds: PriceBounds,
}

impl OutlierFilter {
    /// Derive bounds from the full tick set for one dataset.
    ///
    /// Fails with `EmptyDataset` when there are no ticks to derive bounds
    /// from.
    pub fn from_ticks(ticks: &[Tick], iqr_multiplier: f64) -> Result<Self> {
        let bounds =
            quartiles::price_bounds(ticks, iqr_multiplier).ok_or(Error::EmptyDataset)?;
        debug!(lower = bounds.lower, upper = bounds.upper, "derived price bounds");
        Ok(Self { bounds })
    }

    /// Construct a filter from precomputed bounds.
    pub fn with_bounds(bounds: PriceBounds) -> Self {
        Self { bounds }
    }

    /// The bounds in effect.
    pub fn bounds(&self) -> PriceBounds {
        self.bounds
    }

    /// Apply the bounds to every tick.
    ///
    /// Returns the surviving ticks and the number dropped.
    pub fn apply(&self, ticks: Vec<Tick>) -> (Vec<Tick>, u64) {
        let before = ticks.len();
        let kept: Vec<Tick> = ticks
            .into_iter()
            .filter(|t| self.bounds.contains(t.price))
            .collect();
        let dropped = (before - kept.len()) as u64;
        (kept, dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_ticks(prices: &[f64]) -> Vec<Tick> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| Tick {
                ts_ms: i as i64,
                price,
                size: 1,
            })
            .collect()
    }

    #[test]
    fn test_drops_only_out_of_bounds_ticks() {
        let ticks = make_ticks(&[10.0, 12.0, 11.0, 13.0, 1000.0]);
        let filter = OutlierFilter::from_ticks(&ticks, 1.5).unwrap();
        let (kept, dropped) = filter.apply(ticks);

        assert_eq!(dropped, 1);
        assert_eq!(kept.len(), 4);
        assert!(kept.iter().all(|t| t.price != 1000.0));
    }

    #[test]
    fn test_survivors_lie_within_bounds() {
        let ticks = make_ticks(&[400.0, 402.5, 401.0, 40.1, 399.9, 403.2, 4010.0]);
        let filter = OutlierFilter::from_ticks(&ticks, 1.5).unwrap();
        let bounds = filter.bounds();
        let (kept, _) = filter.apply(ticks);

        assert!(!kept.is_empty());
        let min = kept.iter().map(|t| t.price).fold(f64::INFINITY, f64::min);
        let max = kept.iter().map(|t| t.price).fold(f64::NEG_INFINITY, f64::max);
        assert!(bounds.contains(min));
        assert!(bounds.contains(max));
    }

    #[test]
    fn test_empty_input_is_fatal() {
        let err = OutlierFilter::from_ticks(&[], 1.5).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset));
    }

    #[test]
    fn test_uniform_prices_keep_everything() {
        // IQR = 0 collapses the bounds onto the single price.
        let ticks = make_ticks(&[450.0, 450.0, 450.0, 450.0]);
        let filter = OutlierFilter::from_ticks(&ticks, 1.5).unwrap();
        let (kept, dropped) = filter.apply(ticks);

        assert_eq!(dropped, 0);
        assert_eq!(kept.len(), 4);
    }
}
