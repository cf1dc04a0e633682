// In crates/strategies/src/sma.rs

use ta::Next;
use ta::indicators::SimpleMovingAverage as Sma;

/// Mean of the `window` prices ending at `end_index` (inclusive).
///
/// Returns `None` when fewer than `window` prices exist up to `end_index`, when
/// `end_index` lies past the end of `prices`, or when `window` is zero.
pub fn compute_sma(prices: &[f64], window: usize, end_index: usize) -> Option<f64> {
    if end_index >= prices.len() {
        return None;
    }
    let start = (end_index + 1).checked_sub(window)?;
    // `Sma::new` rejects a zero period.
    let mut sma = Sma::new(window).ok()?;

    let mut value = None;
    for &price in &prices[start..=end_index] {
        value = Some(sma.next(price));
    }
    value
}

/// SMA over the most recent `window` prices of the whole slice.
pub fn calculate_sma(prices: &[f64], window: usize) -> Option<f64> {
    let last = prices.len().checked_sub(1)?;
    compute_sma(prices, window, last)
}
