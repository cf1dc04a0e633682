// In app/src/main.rs

use anyhow::{Context, Result};
use app_config::Settings;
use backtester::{BacktestOutcome, Backtester};
use clap::{Parser, Subcommand};
use core_types::PriceSeries;
use engine::{SignalMode, SmaBot, SmaBotConfig};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::prelude::*;

mod analyzer;
mod optimizer;

use crate::analyzer::RankedReport;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "An SMA crossover trading bot backtester.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a historical backtest of the SMA crossover bot.
    Backtest {
        /// JSON price file: `{"timeframe": "1D", "closes": [...]}`.
        #[arg(short, long)]
        prices: PathBuf,

        /// Short SMA window. Overrides `bot.short_window`.
        #[arg(long)]
        short: Option<usize>,

        /// Long SMA window. Overrides `bot.long_window`.
        #[arg(long)]
        long: Option<usize>,

        /// Stop-loss distance below the entry price, in percent.
        #[arg(long)]
        stop_loss: Option<f64>,

        /// Quantity bought on every entry.
        #[arg(long)]
        amount: Option<f64>,

        /// Bot name shown in the logs.
        #[arg(long, default_value = "SmaBot")]
        name: String,

        /// Trade strict crossovers instead of the SMA regime.
        #[arg(long)]
        crossover: bool,

        /// Close positions whose price falls to the stop-loss level.
        #[arg(long)]
        enforce_stop_loss: bool,
    },

    /// Runs a parameter sweep over the configured SMA windows.
    Optimize {
        /// JSON price file: `{"timeframe": "1D", "closes": [...]}`.
        #[arg(short, long)]
        prices: PathBuf,
    },
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments first so `--help` works without a config directory.
    let cli = Cli::parse();

    let settings = app_config::load_settings().context("Failed to load settings from config/")?;

    // --- Tracing Setup ---
    let level = settings
        .app
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();

    tracing::info!(environment = %settings.app.environment, "Starting smabot");

    match cli.command {
        Commands::Backtest {
            prices,
            short,
            long,
            stop_loss,
            amount,
            name,
            crossover,
            enforce_stop_loss,
        } => {
            let mut bot_settings = settings.bot.clone();
            if let Some(short) = short {
                bot_settings.short_window = short;
            }
            if let Some(long) = long {
                bot_settings.long_window = long;
            }
            if let Some(stop_loss) = stop_loss {
                bot_settings.stop_loss_percent = stop_loss;
            }
            if let Some(amount) = amount {
                bot_settings.amount = amount;
            }
            if crossover {
                bot_settings.signal_mode = SignalMode::Crossover;
            }
            bot_settings.enforce_stop_loss |= enforce_stop_loss;

            let config = SmaBotConfig::try_from(&bot_settings)
                .context("Invalid bot configuration")?;
            handle_backtest(&prices, name, config)?;
        }
        Commands::Optimize { prices } => {
            handle_optimize(&prices, &settings)?;
        }
    }

    tracing::info!("smabot has finished successfully.");

    Ok(())
}

/// Reads and validates a JSON price series.
fn load_prices(path: &Path) -> Result<PriceSeries> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let series: PriceSeries = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    series
        .validate()
        .with_context(|| format!("Invalid price series in {}", path.display()))?;
    tracing::info!(bars = series.len(), timeframe = %series.timeframe, "Loaded price series.");
    Ok(series)
}

/// Handles the logic for the `backtest` subcommand.
fn handle_backtest(prices: &Path, name: String, config: SmaBotConfig) -> Result<()> {
    let series = load_prices(prices)?;
    let mut bot = SmaBot::new(name, config);
    let outcome = Backtester::new().run_series(&mut bot, &series);
    print_backtest_report(&bot, &outcome);
    Ok(())
}

/// Handles the logic for the `optimize` subcommand.
fn handle_optimize(prices: &Path, settings: &Settings) -> Result<()> {
    let start_time = Instant::now();
    let optimizer_settings = settings
        .optimizer
        .as_ref()
        .context("Cannot optimize: the [optimizer] section is missing from the settings.")?;

    let series = load_prices(prices)?;
    let param_sets = optimizer_settings.parameter_grid();
    if param_sets.is_empty() {
        anyhow::bail!("No valid parameter sets were generated.");
    }
    tracing::info!("Starting optimization with {} parameter sets", param_sets.len());

    let results = optimizer::run_optimization(&settings.app, &settings.bot, &param_sets, series.as_slice())?;
    let ranked = analyzer::rank_results(results);
    print_optimization_report(&ranked, optimizer_settings.top_n);

    tracing::info!(duration = ?start_time.elapsed(), "Optimization job and analysis finished.");
    Ok(())
}

fn print_backtest_report(bot: &SmaBot, outcome: &BacktestOutcome) {
    let config = bot.config();
    println!("\n--- Backtest Complete: {} ---", bot.name());
    println!(
        "  - SMA {}/{} | Stop-loss: {:.2}% | Amount: {} | Mode: {:?}",
        config.short_window(),
        config.long_window(),
        config.stop_loss_percent(),
        config.amount(),
        config.signal_mode()
    );
    println!("---------------------------------");

    for trade in &outcome.trades {
        println!("  {:?} @ index {} price {:.4}", trade.kind, trade.index, trade.price);
    }
    if outcome.trades.is_empty() {
        println!("  No trades.");
    }

    let report = outcome.report();
    println!("---------------------------------");
    println!("  - Profit/Loss: {:.4}", outcome.profit_loss);
    println!(
        "  - Round trips: {} | Wins: {} | Losses: {} | Win rate: {:.2}% | Stop-loss exits: {}",
        report.total_round_trips,
        report.winning_trades,
        report.losing_trades,
        report.win_rate,
        report.stop_loss_exits
    );
    println!(
        "  - Profit factor: {:.2} | Expectancy: {:.4} | Max drawdown: {:.4} | Avg holding: {:.1} bars",
        report.profit_factor, report.expectancy, report.max_drawdown, report.avg_holding_bars
    );
    if let Some(open) = &outcome.open_position {
        println!(
            "  - Position still open since index {} @ {:.4} (stop-loss {:.4}), not counted.",
            open.entry_index, open.entry_price, open.stop_loss_price
        );
    }
}

/// Helper function to print the final optimization summary.
fn print_optimization_report(results: &[RankedReport], top_n: usize) {
    println!("\n--- Optimization Job Complete ---");
    println!("---------------------------------");
    println!("Top {top_n} Parameter Sets by Net P&L:");
    println!("---------------------------------");

    for (i, ranked) in results.iter().take(top_n).enumerate() {
        let report = &ranked.report;
        println!("\n[Rank {} | SMA {}/{}]", i + 1, ranked.short_window, ranked.long_window);
        println!(
            "  - P&L: {:.4} | Max Drawdown: {:.4} | Win rate: {:.2}% | Trades: {}",
            report.net_pnl, report.max_drawdown, report.win_rate, report.total_round_trips
        );
    }
    println!("\n---------------------------------");

    if let Some(best) = results.first() {
        println!(
            "Recommendation: short_window = {}, long_window = {}",
            best.short_window, best.long_window
        );
    } else {
        println!("Recommendation: No parameter sets were evaluated.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn help_needs_no_settings() {
        let err = Cli::try_parse_from(["smabot", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn backtest_flags_parse_into_overrides() {
        let cli = Cli::try_parse_from([
            "smabot", "backtest", "--prices", "prices.json", "--short", "3", "--long", "5",
            "--crossover",
        ])
        .unwrap();
        match cli.command {
            Commands::Backtest { prices, short, long, crossover, enforce_stop_loss, name, .. } => {
                assert_eq!(prices, PathBuf::from("prices.json"));
                assert_eq!(short, Some(3));
                assert_eq!(long, Some(5));
                assert!(crossover);
                assert!(!enforce_stop_loss);
                assert_eq!(name, "SmaBot");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
