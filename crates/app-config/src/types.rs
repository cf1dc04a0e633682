// In crates/app-config/src/types.rs

use serde::Deserialize;
use strategies::types::SmaCrossoverSettings;

use crate::error::{Error, Result};

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    /// Parameters of the SMA crossover bot. Missing fields take the bot's defaults.
    #[serde(default)]
    pub bot: SmaCrossoverSettings,
    /// Parameter grid for the `optimize` command.
    pub optimizer: Option<OptimizerSettings>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    // 0 lets rayon pick.
    #[serde(default)]
    pub optimizer_cores: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
            optimizer_cores: 0,
        }
    }
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// An inclusive `start..=end` range walked in `step` increments.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRange {
    pub start: usize,
    pub end: usize,
    #[serde(default = "default_step")]
    pub step: usize,
}

fn default_step() -> usize {
    1
}

impl WindowRange {
    pub fn values(&self) -> Vec<usize> {
        (self.start..=self.end).step_by(self.step.max(1)).collect()
    }

    fn validate(&self, field: &'static str) -> Result<()> {
        if self.start > self.end || self.step == 0 {
            return Err(Error::InvalidRange {
                field,
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct OptimizerSettings {
    pub short_window: WindowRange,
    pub long_window: WindowRange,
    /// How many ranked results to print.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    5
}

impl OptimizerSettings {
    pub fn validate(&self) -> Result<()> {
        self.short_window.validate("short_window")?;
        self.long_window.validate("long_window")
    }

    /// Every (short, long) pair of the grid with `short < long`.
    pub fn parameter_grid(&self) -> Vec<(usize, usize)> {
        let longs = self.long_window.values();
        self.short_window
            .values()
            .into_iter()
            .flat_map(|short| {
                longs
                    .iter()
                    .filter(move |&&long| short < long)
                    .map(move |&long| (short, long))
            })
            .collect()
    }
}
