use crate::types::{EquityPoint, PerformanceReport};
use risk::{ClosedPosition, ExitReason};

/// The engine responsible for calculating performance metrics from closed positions.
#[derive(Default)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates a report from the closed positions and the equity curve of one run.
    ///
    /// Positions still open at the end of the run only show up through the equity curve.
    pub fn calculate(&self, closed: &[ClosedPosition], equity_curve: &[EquityPoint]) -> PerformanceReport {
        let mut report = PerformanceReport::new();
        // Drawdown is reported even when nothing was closed; an open loser still hurts.
        report.max_drawdown = max_drawdown(equity_curve);
        if closed.is_empty() {
            return report;
        }

        // 1. Counts
        report.total_round_trips = closed.len() as u32;
        report.winning_trades = closed.iter().filter(|c| c.pnl > 0.0).count() as u32;
        report.losing_trades = closed.iter().filter(|c| c.pnl < 0.0).count() as u32;
        report.stop_loss_exits = closed
            .iter()
            .filter(|c| c.reason == ExitReason::StopLoss)
            .count() as u32;
        report.win_rate = report.winning_trades as f64 / report.total_round_trips as f64 * 100.0;

        // 2. P&L and profit factor
        report.net_pnl = closed.iter().map(|c| c.pnl).sum();
        report.gross_profit = closed.iter().filter(|c| c.pnl > 0.0).map(|c| c.pnl).sum();
        report.gross_loss = closed.iter().filter(|c| c.pnl < 0.0).map(|c| c.pnl).sum::<f64>().abs();
        report.profit_factor = if report.gross_loss > 0.0 {
            report.gross_profit / report.gross_loss
        } else {
            f64::INFINITY // Pure profit
        };

        // 3. Expectancy (average P&L per round trip)
        report.expectancy = report.net_pnl / closed.len() as f64;

        // 4. Average holding period in bars
        let total_bars: usize = closed.iter().map(ClosedPosition::holding_bars).sum();
        report.avg_holding_bars = total_bars as f64 / closed.len() as f64;

        report
    }
}

/// Largest peak-to-trough fall of total equity. The curve starts at zero equity.
fn max_drawdown(equity_curve: &[EquityPoint]) -> f64 {
    let mut peak = 0.0_f64;
    let mut max_drawdown = 0.0_f64;
    for point in equity_curve {
        let equity = point.total();
        peak = peak.max(equity);
        max_drawdown = max_drawdown.max(peak - equity);
    }
    max_drawdown
}
