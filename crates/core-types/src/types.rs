// In crates/core-types/src/types.rs

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The bar size of a price series.
///
/// Supplied by the data feed together with the prices. The engine treats it as
/// opaque metadata: it is logged and carried around, never used in arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeFrame {
    #[default]
    #[serde(rename = "1D", alias = "ONEDAY")]
    OneDay,
    #[serde(rename = "1M", alias = "ONEMONTH")]
    OneMonth,
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFrame::OneDay => write!(f, "1D"),
            TimeFrame::OneMonth => write!(f, "1M"),
        }
    }
}

/// An ordered, index-addressed sequence of closing prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    #[serde(default)]
    pub timeframe: TimeFrame,
    pub closes: Vec<f64>,
}

impl PriceSeries {
    /// Builds a series, rejecting empty input and any price that is not strictly positive.
    pub fn new(timeframe: TimeFrame, closes: Vec<f64>) -> Result<Self> {
        let series = Self { timeframe, closes };
        series.validate()?;
        Ok(series)
    }

    /// Checks the positivity invariant. Useful after deserializing.
    pub fn validate(&self) -> Result<()> {
        if self.closes.is_empty() {
            return Err(Error::EmptySeries);
        }
        // `!(p > 0.0)` so that NaN is rejected as well.
        if let Some((index, &price)) = self.closes.iter().enumerate().find(|(_, p)| !(**p > 0.0)) {
            return Err(Error::NonPositivePrice { index, price });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.closes
    }
}

impl AsRef<[f64]> for PriceSeries {
    fn as_ref(&self) -> &[f64] {
        &self.closes
    }
}

/// The raw output of the crossover detector for a single index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Signal {
    /// Golden cross: short SMA moved above long SMA.
    Buy,
    /// Death cross: short SMA moved below long SMA.
    Sell,
    #[default]
    Hold,
}

/// What the bot actually did at an index, after applying its state machine to a `Signal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Buy => write!(f, "BUY"),
            Decision::Sell => write!(f, "SELL"),
            Decision::Hold => write!(f, "HOLD"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeKind {
    Buy,
    Sell,
}

/// One entry of a bot's append-only trade log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub kind: TradeKind,
    pub index: usize,
    pub price: f64,
}

impl Trade {
    pub fn buy(index: usize, price: f64) -> Self {
        Self { kind: TradeKind::Buy, index, price }
    }

    pub fn sell(index: usize, price: f64) -> Self {
        Self { kind: TradeKind::Sell, index, price }
    }
}
