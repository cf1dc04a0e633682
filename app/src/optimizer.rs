// In app/src/optimizer.rs

use anyhow::{Context, Result};
use app_config::types::AppSettings;
use backtester::RunBacktest;
use engine::{SmaBot, SmaBotConfig};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use strategies::types::SmaCrossoverSettings;

use crate::analyzer::RankedReport;

/// Backtests one (short, long) pair with a fresh bot.
fn run_single_backtest(
    base: &SmaCrossoverSettings,
    short_window: usize,
    long_window: usize,
    prices: &[f64],
) -> Result<RankedReport> {
    let settings = SmaCrossoverSettings {
        short_window,
        long_window,
        ..base.clone()
    };
    let config = SmaBotConfig::try_from(&settings)?;
    let mut bot = SmaBot::new(format!("sma-{short_window}-{long_window}"), config);
    let outcome = bot.run_backtest(prices);

    Ok(RankedReport {
        short_window,
        long_window,
        report: outcome.report(),
    })
}

/// The main parallel engine for running an optimization job.
///
/// Every pair gets its own bot, so no state is shared between runs.
pub fn run_optimization(
    app_settings: &AppSettings,
    base: &SmaCrossoverSettings,
    param_sets: &[(usize, usize)],
    prices: &[f64],
) -> Result<Vec<RankedReport>> {
    if app_settings.optimizer_cores > 0 {
        tracing::info!(cores = app_settings.optimizer_cores, "Configuring Rayon thread pool.");
        ThreadPoolBuilder::new()
            .num_threads(app_settings.optimizer_cores)
            .build_global()
            .context("Failed to build Rayon thread pool")?;
    }

    let results = param_sets
        .par_iter()
        .filter_map(|&(short, long)| match run_single_backtest(base, short, long, prices) {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::error!(short, long, error = %e, "A single backtest run failed.");
                None
            }
        })
        .collect();

    Ok(results)
}
