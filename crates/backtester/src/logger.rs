// In crates/backtester/src/logger.rs

use analytics::EquityPoint;
use risk::ClosedPosition;

/// Records realized pnl and the equity curve while a backtest runs.
#[derive(Debug, Default)]
pub struct RunLogger {
    pub closed_positions: Vec<ClosedPosition>,
    pub equity_curve: Vec<EquityPoint>,
    realized: f64,
}

impl RunLogger {
    /// Creates a new, empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a position closed during this run and adds its pnl to the realized total.
    pub fn record_close(&mut self, closed: ClosedPosition) {
        self.realized += closed.pnl;
        self.closed_positions.push(closed);
    }

    /// Records the equity at `index`, marking any open position at that index's price.
    pub fn record_equity(&mut self, index: usize, unrealized: f64) {
        self.equity_curve.push(EquityPoint {
            index,
            realized: self.realized,
            unrealized,
        });
    }

    /// Sum of pnl over all positions closed so far.
    pub fn realized(&self) -> f64 {
        self.realized
    }
}
