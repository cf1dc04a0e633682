// In crates/engine/src/bot.rs

use crate::SmaBotConfig;
use core_types::{Decision, Signal, Trade};
use risk::{ClosedPosition, ExitReason, PositionManager, StopLossPosition};
use strategies::types::SignalMode;
use strategies::{Relation, SmaCrossover, Strategy};

/// Whether the bot currently holds a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotState {
    Flat,
    InPosition,
}

/// A single-position SMA crossover trading bot.
///
/// The bot owns its configuration, its position slot and two append-only ledgers: the
/// BUY/SELL trade log and the list of closed positions. It never reads prices past the
/// index it is asked about.
#[derive(Debug, Clone)]
pub struct SmaBot {
    /// A human readable identifier, used in logs only.
    name: String,
    config: SmaBotConfig,
    detector: SmaCrossover,
    positions: PositionManager,
    trades: Vec<Trade>,
    closed: Vec<ClosedPosition>,
}

impl SmaBot {
    /// Creates a flat bot from an already validated configuration.
    pub fn new(name: impl Into<String>, config: SmaBotConfig) -> Self {
        let name = name.into();
        tracing::debug!(
            bot = %name,
            short_window = config.short_window(),
            long_window = config.long_window(),
            stop_loss_percent = config.stop_loss_percent(),
            amount = config.amount(),
            signal_mode = ?config.signal_mode(),
            "Creating SMA bot."
        );

        Self {
            detector: SmaCrossover::new(config.short_window(), config.long_window()),
            name,
            config,
            positions: PositionManager::new(),
            trades: Vec::new(),
            closed: Vec::new(),
        }
    }

    /// SMA over the most recent `window` prices.
    pub fn calculate_sma(&self, prices: &[f64], window: usize) -> Option<f64> {
        strategies::calculate_sma(prices, window)
    }

    /// Decides what to do at `index` given the prices up to and including it, and
    /// applies the decision to the position slot and the trade log.
    ///
    /// Only BUY and SELL change state or append to the trade log; HOLD never does.
    pub fn decide_and_trade(&mut self, prices: &[f64], index: usize) -> Decision {
        // Not enough history for the long SMA.
        if index < self.detector.warmup().saturating_sub(1) {
            return Decision::Hold;
        }
        let Some(&price) = prices.get(index) else {
            tracing::warn!(bot = %self.name, index, len = prices.len(), "Index is beyond the supplied price history.");
            return Decision::Hold;
        };

        if self.config.enforce_stop_loss() {
            if let Some(position) = self.positions.position() {
                if position.is_breached(price) {
                    tracing::info!(
                        bot = %self.name,
                        index,
                        price,
                        stop_loss_price = position.stop_loss_price,
                        "Stop-loss breached."
                    );
                    return self.exit(index, price, ExitReason::StopLoss);
                }
            }
        }

        let signal = self.signal_at(prices, index);
        match (self.state(), signal) {
            (BotState::Flat, Signal::Buy) => self.enter(index, price),
            (BotState::InPosition, Signal::Sell) => self.exit(index, price, ExitReason::Signal),
            (_, Signal::Hold) => Decision::Hold,
            (state, ignored) => {
                tracing::debug!(bot = %self.name, index, ?state, signal = ?ignored, "Signal has no effect in the current state.");
                Decision::Hold
            }
        }
    }

    /// Returns the bot to `Flat` and empties both ledgers. The configuration is kept.
    pub fn reset(&mut self) {
        self.positions.clear();
        self.trades.clear();
        self.closed.clear();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &SmaBotConfig {
        &self.config
    }

    pub fn state(&self) -> BotState {
        if self.positions.is_open() {
            BotState::InPosition
        } else {
            BotState::Flat
        }
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn closed_positions(&self) -> &[ClosedPosition] {
        &self.closed
    }

    pub fn open_position(&self) -> Option<&StopLossPosition> {
        self.positions.position()
    }

    pub fn open_positions_count(&self) -> usize {
        self.positions.open_count()
    }

    fn signal_at(&self, prices: &[f64], index: usize) -> Signal {
        match self.config.signal_mode() {
            SignalMode::Crossover => self.detector.evaluate(prices, index),
            SignalMode::Regime => {
                let Some(current) = self.detector.relation_at(prices, index) else {
                    return Signal::Hold;
                };
                // The position stands in for the previous reading: a flat bot has not
                // seen short above long yet, an invested bot has.
                let previous = match self.state() {
                    BotState::Flat => Relation::Below,
                    BotState::InPosition => Relation::Above,
                };
                SmaCrossover::classify(previous, current)
            }
        }
    }

    fn enter(&mut self, index: usize, price: f64) -> Decision {
        let opened = self.positions.open(
            index,
            price,
            self.config.amount(),
            self.config.stop_loss_percent(),
        );
        match opened {
            Ok(position) => {
                tracing::info!(
                    bot = %self.name,
                    index,
                    price,
                    stop_loss_price = position.stop_loss_price,
                    "Opened position."
                );
                self.trades.push(Trade::buy(index, price));
                Decision::Buy
            }
            Err(e) => {
                tracing::warn!(bot = %self.name, index, error = %e, "Could not open position.");
                Decision::Hold
            }
        }
    }

    fn exit(&mut self, index: usize, price: f64, reason: ExitReason) -> Decision {
        match self.positions.close(index, price, reason) {
            Ok(closed) => {
                tracing::info!(
                    bot = %self.name,
                    index,
                    price,
                    pnl = closed.pnl,
                    ?reason,
                    "Closed position."
                );
                self.trades.push(Trade::sell(index, price));
                self.closed.push(closed);
                Decision::Sell
            }
            Err(e) => {
                tracing::warn!(bot = %self.name, index, error = %e, "Could not close position.");
                Decision::Hold
            }
        }
    }
}

impl Default for SmaBot {
    fn default() -> Self {
        Self::new("SmaBot", SmaBotConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core_types::TradeKind;

    fn bot(short: usize, long: usize) -> SmaBot {
        SmaBot::new("TestBot", SmaBotConfig::new(short, long, 10.0, 1.0).unwrap())
    }

    #[test]
    fn holds_while_long_sma_is_unavailable() {
        let mut bot = bot(3, 5);
        let prices = [100.0, 101.0, 102.0];
        assert_eq!(bot.decide_and_trade(&prices, 2), Decision::Hold);
        assert_eq!(bot.state(), BotState::Flat);
        assert!(bot.trades().is_empty());
    }

    #[test]
    fn uptrend_opens_a_stop_loss_position() {
        let mut bot = bot(3, 5);
        let prices = [100.0, 102.0, 104.0, 106.0, 108.0, 110.0, 112.0];

        assert_eq!(bot.decide_and_trade(&prices, 6), Decision::Buy);
        assert_eq!(bot.open_positions_count(), 1);

        let position = bot.open_position().unwrap();
        assert_eq!(position.entry_index, 6);
        assert_relative_eq!(position.entry_price, 112.0);
        assert_relative_eq!(position.stop_loss_price, 100.8, epsilon = 1e-9);
        assert_eq!(bot.trades(), &[Trade::buy(6, 112.0)]);
    }

    #[test]
    fn index_past_the_history_holds() {
        let mut bot = bot(2, 3);
        assert_eq!(bot.decide_and_trade(&[1.0, 2.0, 3.0], 10), Decision::Hold);
    }

    #[test]
    fn largest_index_holds_without_overflow() {
        let mut bot = bot(2, 3);
        assert_eq!(bot.decide_and_trade(&[1.0, 2.0, 3.0], usize::MAX), Decision::Hold);
        assert_eq!(bot.state(), BotState::Flat);
        assert!(bot.trades().is_empty());
    }

    #[test]
    fn sell_while_flat_has_no_effect() {
        let mut bot = bot(2, 3).with_mode(SignalMode::Crossover);
        let prices = [10.0, 8.0, 9.0, 9.0, 5.0];
        assert_eq!(bot.detector.evaluate(&prices, 4), Signal::Sell);
        assert_eq!(bot.decide_and_trade(&prices, 4), Decision::Hold);
        assert_eq!(bot.open_positions_count(), 0);
        assert!(bot.trades().is_empty());
    }

    #[test]
    fn crossover_mode_waits_for_the_transition() {
        let mut bot = bot(3, 5).with_mode(SignalMode::Crossover);
        let prices = [100.0, 102.0, 104.0, 106.0, 108.0, 110.0, 112.0];
        // Short has been above long since the long SMA became available.
        for index in 0..prices.len() {
            assert_eq!(bot.decide_and_trade(&prices, index), Decision::Hold);
        }

        let prices = [10.0, 12.0, 11.0, 11.0, 15.0];
        let mut bot = self::bot(2, 3).with_mode(SignalMode::Crossover);
        assert_eq!(bot.decide_and_trade(&prices, 4), Decision::Buy);
    }

    #[test]
    fn stop_loss_exit_only_when_enforced() {
        let config = SmaBotConfig::new(2, 3, 10.0, 2.0).unwrap();
        let prices = [100.0, 100.0, 100.0, 110.0, 98.0];

        let mut passive = SmaBot::new("Passive", config);
        assert_eq!(passive.decide_and_trade(&prices, 3), Decision::Buy);
        // s(4)=104 > l(4)=102.67, so no death cross either.
        assert_eq!(passive.decide_and_trade(&prices, 4), Decision::Hold);
        assert_eq!(passive.open_positions_count(), 1);

        let mut guarded = SmaBot::new("Guarded", config.with_stop_loss_enforcement(true));
        assert_eq!(guarded.decide_and_trade(&prices, 3), Decision::Buy);
        assert_eq!(guarded.decide_and_trade(&prices, 4), Decision::Sell);
        assert_eq!(guarded.open_positions_count(), 0);

        let closed = guarded.closed_positions()[0];
        assert_eq!(closed.reason, ExitReason::StopLoss);
        assert_relative_eq!(closed.pnl, -24.0);
        assert_eq!(guarded.trades()[1].kind, TradeKind::Sell);
    }

    #[test]
    fn reset_keeps_config_and_clears_state() {
        let mut bot = bot(3, 5);
        let prices = [100.0, 102.0, 104.0, 106.0, 108.0, 110.0, 112.0];
        bot.decide_and_trade(&prices, 6);

        bot.reset();
        assert_eq!(bot.state(), BotState::Flat);
        assert!(bot.trades().is_empty());
        assert!(bot.closed_positions().is_empty());
        assert_eq!(bot.config().short_window(), 3);
        assert_eq!(bot.config().long_window(), 5);
    }

    #[test]
    fn calculate_sma_delegates() {
        let bot = SmaBot::default();
        assert_eq!(bot.calculate_sma(&[100.0, 102.0], 3), None);
        assert_relative_eq!(bot.calculate_sma(&[100.0, 102.0, 101.0], 3).unwrap(), 101.0);
    }

    impl SmaBot {
        fn with_mode(self, mode: SignalMode) -> Self {
            let config = self.config.with_signal_mode(mode);
            SmaBot::new(self.name, config)
        }
    }
}
