// In crates/strategies/src/crossover.rs

use crate::sma::compute_sma;
use crate::{Signal, Strategy};
use std::cmp::Ordering;

/// Where the short SMA sits relative to the long SMA at one index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Below,
    Equal,
    Above,
}

impl Relation {
    /// Short has not (yet) crossed above long.
    fn at_or_below(self) -> bool {
        matches!(self, Relation::Below | Relation::Equal)
    }

    /// Short has not (yet) crossed below long.
    fn at_or_above(self) -> bool {
        matches!(self, Relation::Above | Relation::Equal)
    }
}

/// Golden/death cross detector over a short and a long simple moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmaCrossover {
    short_window: usize,
    long_window: usize,
}

impl SmaCrossover {
    /// Window sizes are validated by the bot configuration, not here.
    pub fn new(short_window: usize, long_window: usize) -> Self {
        Self { short_window, long_window }
    }

    pub fn short_window(&self) -> usize {
        self.short_window
    }

    pub fn long_window(&self) -> usize {
        self.long_window
    }

    /// Compares both SMAs at `index`. `None` while either SMA is unavailable.
    pub fn relation_at(&self, prices: &[f64], index: usize) -> Option<Relation> {
        let short = compute_sma(prices, self.short_window, index)?;
        let long = compute_sma(prices, self.long_window, index)?;
        match short.partial_cmp(&long)? {
            Ordering::Less => Some(Relation::Below),
            Ordering::Equal => Some(Relation::Equal),
            Ordering::Greater => Some(Relation::Above),
        }
    }

    /// The crossover rule between two consecutive readings.
    ///
    /// Equality counts as "not yet crossed" on both sides, so a cross fires exactly
    /// once at the transition and is not repeated on later equal readings.
    pub fn classify(previous: Relation, current: Relation) -> Signal {
        if previous.at_or_below() && current == Relation::Above {
            Signal::Buy
        } else if previous.at_or_above() && current == Relation::Below {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }

    /// Classifies `index` from the SMA pairs at `index - 1` and `index`.
    pub fn evaluate(&self, prices: &[f64], index: usize) -> Signal {
        let Some(previous_index) = index.checked_sub(1) else {
            return Signal::Hold;
        };
        match (
            self.relation_at(prices, previous_index),
            self.relation_at(prices, index),
        ) {
            (Some(previous), Some(current)) => Self::classify(previous, current),
            _ => Signal::Hold,
        }
    }
}

impl Strategy for SmaCrossover {
    fn name(&self) -> &'static str {
        "SmaCrossover"
    }

    fn warmup(&self) -> usize {
        self.long_window
    }

    fn assess(&self, prices: &[f64], index: usize) -> Signal {
        self.evaluate(prices, index)
    }
}
