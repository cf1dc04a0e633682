pub mod logger;

use analytics::{AnalyticsEngine, EquityPoint, PerformanceReport};
use core_types::{Decision, PriceSeries, Trade};
use engine::SmaBot;
use risk::{ClosedPosition, StopLossPosition};
use serde::Serialize;

use crate::logger::RunLogger;

/// Everything a backtest produces.
#[derive(Debug, Clone, Serialize)]
pub struct BacktestOutcome {
    /// The bot's full, ordered trade log after the run.
    pub trades: Vec<Trade>,
    /// Sum of pnl over positions closed during this run. A position still open at the
    /// end is not force-closed and does not count.
    pub profit_loss: f64,
    pub closed_positions: Vec<ClosedPosition>,
    pub equity_curve: Vec<EquityPoint>,
    pub open_position: Option<StopLossPosition>,
}

impl BacktestOutcome {
    pub fn report(&self) -> PerformanceReport {
        AnalyticsEngine::new().calculate(&self.closed_positions, &self.equity_curve)
    }
}

/// Replays a bot over a full historical price series, one index at a time.
#[derive(Debug, Default)]
pub struct Backtester {
    logger: RunLogger,
}

impl Backtester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `bot` over a labelled series.
    pub fn run_series(self, bot: &mut SmaBot, series: &PriceSeries) -> BacktestOutcome {
        tracing::info!(
            bot = %bot.name(),
            timeframe = %series.timeframe,
            bars = series.len(),
            "Starting backtest."
        );
        self.run(bot, series.as_slice())
    }

    /// Runs `bot` over `prices`.
    ///
    /// The bot is reset first, so the outcome only ever describes this run. Indices are
    /// visited strictly in increasing order, each exactly once, and the bot only ever
    /// sees prices up to the index being decided. Never fails: a series shorter than
    /// the long window simply produces no trades.
    pub fn run(mut self, bot: &mut SmaBot, prices: &[f64]) -> BacktestOutcome {
        if !bot.trades().is_empty() {
            tracing::debug!(bot = %bot.name(), trades = bot.trades().len(), "Resetting bot state left by a previous run.");
        }
        bot.reset();

        for (index, &price) in prices.iter().enumerate() {
            let decision = bot.decide_and_trade(&prices[..=index], index);

            if decision == Decision::Sell {
                if let Some(closed) = bot.closed_positions().last() {
                    self.logger.record_close(*closed);
                }
            }

            let unrealized = bot.open_position().map_or(0.0, |p| p.pnl_at(price));
            self.logger.record_equity(index, unrealized);
        }

        let outcome = BacktestOutcome {
            trades: bot.trades().to_vec(),
            profit_loss: self.logger.realized(),
            closed_positions: self.logger.closed_positions,
            equity_curve: self.logger.equity_curve,
            open_position: bot.open_position().copied(),
        };

        tracing::info!(
            bot = %bot.name(),
            trades = outcome.trades.len(),
            profit_loss = outcome.profit_loss,
            position_left_open = outcome.open_position.is_some(),
            "Backtest finished."
        );

        outcome
    }
}

/// Backtesting as a method on the bot itself.
pub trait RunBacktest {
    fn run_backtest(&mut self, prices: &[f64]) -> BacktestOutcome;
}

impl RunBacktest for SmaBot {
    fn run_backtest(&mut self, prices: &[f64]) -> BacktestOutcome {
        Backtester::new().run(self, prices)
    }
}
