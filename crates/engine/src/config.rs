// In crates/engine/src/config.rs

use crate::{ConfigError, Result};
use strategies::types::{SignalMode, SmaCrossoverSettings};

/// Validated, immutable parameters of an `SmaBot`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmaBotConfig {
    short_window: usize,
    long_window: usize,
    stop_loss_percent: f64,
    amount: f64,
    signal_mode: SignalMode,
    enforce_stop_loss: bool,
}

impl SmaBotConfig {
    /// Validates the four core parameters.
    ///
    /// Checks run in a fixed order and the first failure wins: window ordering,
    /// window positivity, stop-loss, amount.
    pub fn new(
        short_window: usize,
        long_window: usize,
        stop_loss_percent: f64,
        amount: f64,
    ) -> Result<Self> {
        if short_window >= long_window {
            return Err(ConfigError::WindowOrder);
        }
        if short_window == 0 || long_window == 0 {
            return Err(ConfigError::NonPositiveWindow);
        }
        // Written as `!(x > 0)` so NaN is rejected too.
        if !(stop_loss_percent > 0.0) {
            return Err(ConfigError::NonPositiveStopLoss);
        }
        if !(amount > 0.0) {
            return Err(ConfigError::NonPositiveAmount);
        }

        Ok(Self {
            short_window,
            long_window,
            stop_loss_percent,
            amount,
            signal_mode: SignalMode::default(),
            enforce_stop_loss: false,
        })
    }

    pub fn with_signal_mode(mut self, signal_mode: SignalMode) -> Self {
        self.signal_mode = signal_mode;
        self
    }

    pub fn with_stop_loss_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_stop_loss = enforce;
        self
    }

    pub fn short_window(&self) -> usize {
        self.short_window
    }

    pub fn long_window(&self) -> usize {
        self.long_window
    }

    pub fn stop_loss_percent(&self) -> f64 {
        self.stop_loss_percent
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn signal_mode(&self) -> SignalMode {
        self.signal_mode
    }

    pub fn enforce_stop_loss(&self) -> bool {
        self.enforce_stop_loss
    }
}

impl Default for SmaBotConfig {
    /// 40 / 100 windows, 5% stop-loss, amount 1.0.
    fn default() -> Self {
        Self {
            short_window: 40,
            long_window: 100,
            stop_loss_percent: 5.0,
            amount: 1.0,
            signal_mode: SignalMode::default(),
            enforce_stop_loss: false,
        }
    }
}

impl TryFrom<&SmaCrossoverSettings> for SmaBotConfig {
    type Error = ConfigError;

    fn try_from(settings: &SmaCrossoverSettings) -> Result<Self> {
        Ok(Self::new(
            settings.short_window,
            settings.long_window,
            settings.stop_loss_percent,
            settings.amount,
        )?
        .with_signal_mode(settings.signal_mode)
        .with_stop_loss_enforcement(settings.enforce_stop_loss))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = SmaBotConfig::default();
        assert_eq!(config.short_window(), 40);
        assert_eq!(config.long_window(), 100);
        assert_eq!(config.stop_loss_percent(), 5.0);
        assert_eq!(config.amount(), 1.0);
        assert_eq!(config.signal_mode(), SignalMode::Regime);
        assert!(!config.enforce_stop_loss());
        assert_eq!(SmaBotConfig::new(40, 100, 5.0, 1.0), Ok(config));
    }

    #[test]
    fn rejects_invalid_parameters_with_exact_messages() {
        let message = |r: Result<SmaBotConfig>| r.unwrap_err().to_string();

        assert_eq!(message(SmaBotConfig::new(5, 5, 5.0, 1.0)), "short_window must be less than long_window");
        assert_eq!(message(SmaBotConfig::new(10, 3, 5.0, 1.0)), "short_window must be less than long_window");
        assert_eq!(message(SmaBotConfig::new(0, 3, 5.0, 1.0)), "window sizes must be positive");
        assert_eq!(message(SmaBotConfig::new(2, 3, 0.0, 1.0)), "stop_loss_percent must be positive");
        assert_eq!(message(SmaBotConfig::new(2, 3, -1.0, 1.0)), "stop_loss_percent must be positive");
        assert_eq!(message(SmaBotConfig::new(2, 3, f64::NAN, 1.0)), "stop_loss_percent must be positive");
        assert_eq!(message(SmaBotConfig::new(2, 3, 5.0, 0.0)), "amount must be positive");
        assert_eq!(message(SmaBotConfig::new(2, 3, 5.0, -2.5)), "amount must be positive");
    }

    #[test]
    fn window_order_is_checked_before_positivity() {
        assert_eq!(SmaBotConfig::new(0, 0, 5.0, 1.0), Err(ConfigError::WindowOrder));
        assert_eq!(SmaBotConfig::new(2, 3, 0.0, 0.0), Err(ConfigError::NonPositiveStopLoss));
    }

    #[test]
    fn settings_convert_with_extensions() {
        let settings = SmaCrossoverSettings {
            short_window: 20,
            long_window: 50,
            stop_loss_percent: 7.5,
            amount: 2.5,
            signal_mode: SignalMode::Crossover,
            enforce_stop_loss: true,
        };
        let config = SmaBotConfig::try_from(&settings).unwrap();
        assert_eq!(config.short_window(), 20);
        assert_eq!(config.amount(), 2.5);
        assert_eq!(config.signal_mode(), SignalMode::Crossover);
        assert!(config.enforce_stop_loss());

        let invalid = SmaCrossoverSettings { amount: 0.0, ..settings };
        assert_eq!(SmaBotConfig::try_from(&invalid), Err(ConfigError::NonPositiveAmount));
    }
}
