// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

/// Which reading the current SMA relation is compared against.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SignalMode {
    /// Compare against the relation implied by the bot's own state: a flat bot buys as
    /// soon as short SMA is above long SMA, an invested bot sells as soon as it is below.
    #[default]
    Regime,
    /// Compare against the SMAs one index earlier (strict golden/death cross).
    Crossover,
}

/// Raw, unvalidated parameters of the SMA crossover bot as they appear in config files.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SmaCrossoverSettings {
    #[serde(default = "default_short_window")]
    pub short_window: usize,
    #[serde(default = "default_long_window")]
    pub long_window: usize,
    #[serde(default = "default_stop_loss_percent")]
    pub stop_loss_percent: f64,
    #[serde(default = "default_amount")]
    pub amount: f64,
    #[serde(default)]
    pub signal_mode: SignalMode,
    // Close on a stop-loss breach even without a death cross.
    #[serde(default)]
    pub enforce_stop_loss: bool,
}

impl Default for SmaCrossoverSettings {
    fn default() -> Self {
        Self {
            short_window: default_short_window(),
            long_window: default_long_window(),
            stop_loss_percent: default_stop_loss_percent(),
            amount: default_amount(),
            signal_mode: SignalMode::default(),
            enforce_stop_loss: false,
        }
    }
}

fn default_short_window() -> usize { 40 }
fn default_long_window() -> usize { 100 }
fn default_stop_loss_percent() -> f64 { 5.0 }
fn default_amount() -> f64 { 1.0 }
