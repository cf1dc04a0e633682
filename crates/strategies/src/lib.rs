// In crates/strategies/src/lib.rs

use core_types::Signal;
pub mod crossover;
pub mod sma;
pub mod types;

pub use crossover::{Relation, SmaCrossover};
pub use sma::{calculate_sma, compute_sma};

/// The universal interface for a signal generator.
///
/// A strategy inspects the price history up to and including `index` and classifies
/// that index. It must never read prices past `index`; the trading bot relies on this
/// to keep backtests free of look-ahead.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    /// The number of prices that must exist up to `index` before `assess` can return
    /// anything other than `Signal::Hold`.
    fn warmup(&self) -> usize;

    fn assess(&self, prices: &[f64], index: usize) -> Signal;
}
