// In crates/analytics/src/types.rs

use serde::{Deserialize, Serialize};

/// The bot's equity at one index of a backtest, relative to a zero start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub index: usize,
    /// Sum of pnl of all positions closed up to and including `index`.
    pub realized: f64,
    /// Mark-to-market pnl of the open position at `index`, zero when flat.
    pub unrealized: f64,
}

impl EquityPoint {
    pub fn total(&self) -> f64 {
        self.realized + self.unrealized
    }
}

/// Summary statistics of a backtest.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PerformanceReport {
    // Round trips
    pub total_round_trips: u32,
    pub winning_trades: u32,
    pub losing_trades: u32,
    pub stop_loss_exits: u32,
    pub win_rate: f64,

    // Money
    pub net_pnl: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub profit_factor: f64,
    pub expectancy: f64,

    // Path
    pub max_drawdown: f64,
    pub avg_holding_bars: f64,
}

impl PerformanceReport {
    /// Creates a new, empty report with all values zero.
    pub fn new() -> Self {
        Self::default()
    }
}
