// In crates/risk/src/position.rs

use serde::Serialize;

/// An open long position with a fixed stop-loss threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StopLossPosition {
    pub entry_index: usize,
    pub entry_price: f64,
    pub amount: f64,
    pub stop_loss_percent: f64,
    /// `entry_price * (1 - stop_loss_percent / 100)`, fixed at entry.
    pub stop_loss_price: f64,
}

impl StopLossPosition {
    pub fn new(entry_index: usize, entry_price: f64, amount: f64, stop_loss_percent: f64) -> Self {
        Self {
            entry_index,
            entry_price,
            amount,
            stop_loss_percent,
            stop_loss_price: entry_price * (1.0 - stop_loss_percent / 100.0),
        }
    }

    /// True once `price` has fallen to or below the stop-loss threshold.
    pub fn is_breached(&self, price: f64) -> bool {
        price <= self.stop_loss_price
    }

    /// Profit or loss if the position were closed at `price`.
    pub fn pnl_at(&self, price: f64) -> f64 {
        (price - self.entry_price) * self.amount
    }
}

/// Why a position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    /// Death cross (or short SMA below long SMA in regime mode).
    Signal,
    StopLoss,
}

/// The values of a position copied at close time. There is no link back to the
/// `StopLossPosition` it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClosedPosition {
    pub entry_index: usize,
    pub entry_price: f64,
    pub exit_index: usize,
    pub exit_price: f64,
    pub amount: f64,
    pub pnl: f64,
    pub reason: ExitReason,
}

impl ClosedPosition {
    /// Number of bars between entry and exit.
    pub fn holding_bars(&self) -> usize {
        self.exit_index.saturating_sub(self.entry_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn stop_loss_price_is_derived_from_entry() {
        let position = StopLossPosition::new(4, 200.0, 2.0, 5.0);
        assert_relative_eq!(position.stop_loss_price, 190.0);
        assert!(position.is_breached(190.0));
        assert!(position.is_breached(150.0));
        assert!(!position.is_breached(190.5));
    }

    #[test]
    fn pnl_scales_with_amount() {
        let position = StopLossPosition::new(0, 100.0, 2.5, 10.0);
        assert_relative_eq!(position.pnl_at(110.0), 25.0);
        assert_relative_eq!(position.pnl_at(96.0), -10.0);
    }
}
