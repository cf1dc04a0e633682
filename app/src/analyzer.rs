// In app/src/analyzer.rs

use analytics::PerformanceReport;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Serialize)]
pub struct RankedReport {
    pub short_window: usize,
    pub long_window: usize,
    pub report: PerformanceReport,
}

/// Ranks optimization results: higher net P&L first, then lower max drawdown.
pub fn rank_results(mut results: Vec<RankedReport>) -> Vec<RankedReport> {
    let total_reports = results.len();
    results.sort_by(|a, b| {
        b.report
            .net_pnl
            .partial_cmp(&a.report.net_pnl)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                a.report
                    .max_drawdown
                    .partial_cmp(&b.report.max_drawdown)
                    .unwrap_or(Ordering::Equal)
            })
            // Keep the output stable across thread counts.
            .then_with(|| (a.short_window, a.long_window).cmp(&(b.short_window, b.long_window)))
    });
    tracing::info!(total_reports, "Finished ranking reports.");
    results
}
