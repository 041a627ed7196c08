use colored::*;
use prettytable::{color, Attr, Cell, Row, Table};
use std::time::Duration;

use crate::output::{format_elapsed, BenchmarksJson, MetricsProvider, Reporter};

/// Banner printed as the first line of the text report.
pub const BANNER: &str = "Rust Fibonacci Results:";

/// The three-line summary:
///
/// ```text
/// Rust Fibonacci Results:
/// Recursive F(35) = 9227465 in 42ms
/// Iterative F(1000) = 817770325994397771 in 1.209μs
/// ```
///
/// With more than one run the reported duration is the mean.
pub struct TextReporter;

impl Reporter for TextReporter {
    fn report(
        &self,
        metrics_provider: &dyn MetricsProvider,
    ) -> Result<(), Box<dyn std::error::Error>> {
        for line in render_text(metrics_provider) {
            println!("{line}");
        }
        Ok(())
    }
}

pub fn render_text(metrics_provider: &dyn MetricsProvider) -> Vec<String> {
    let mut lines = Vec::with_capacity(metrics_provider.results().len() + 1);
    lines.push(BANNER.to_string());

    for r in metrics_provider.results() {
        lines.push(format!(
            "{} = {} in {}",
            r.benchmark.label(),
            r.stats.value,
            format_elapsed(r.benchmark.kind, r.stats.avg_duration())
        ));
    }

    lines
}

/// Table with averages, percentiles and extremes. Honors `NO_COLOR`.
pub struct TableReporter;

impl Reporter for TableReporter {
    fn report(
        &self,
        metrics_provider: &dyn MetricsProvider,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let use_colors = std::env::var("NO_COLOR").is_err();

        println!(
            "{} recursive vs iterative Fibonacci timings",
            "[fibbench]".blue().bold()
        );
        println!(
            "{}: {:.2?}",
            metrics_provider.caller_name().yellow().bold(),
            Duration::from_nanos(metrics_provider.total_elapsed()),
        );

        build_table(metrics_provider, use_colors).printstd();

        if metrics_provider.results().iter().any(|r| r.stats.overflowed) {
            println!();
            println!(
                "* {} values exceed {} and are shown with 64-bit wraparound.",
                "(wrapped)".yellow().bold(),
                "i64::MAX".cyan().bold()
            );
        }

        Ok(())
    }
}

pub(crate) fn build_table(metrics_provider: &dyn MetricsProvider, use_colors: bool) -> Table {
    let mut table = Table::new();

    let header_cells: Vec<Cell> = metrics_provider
        .headers()
        .into_iter()
        .map(|header| {
            if use_colors {
                Cell::new(&header)
                    .with_style(Attr::Bold)
                    .with_style(Attr::ForegroundColor(color::CYAN))
            } else {
                Cell::new(&header).with_style(Attr::Bold)
            }
        })
        .collect();

    table.add_row(Row::new(header_cells));

    for (label, metrics) in metrics_provider.metric_data() {
        let mut row_cells = vec![Cell::new(&label)];
        for metric in &metrics {
            row_cells.push(Cell::new(&metric.to_string()));
        }
        table.add_row(Row::new(row_cells));
    }

    table
}

/// Serialises the run as [`BenchmarksJson`].
pub struct JsonReporter {
    pub pretty: bool,
}

impl Reporter for JsonReporter {
    fn report(
        &self,
        metrics_provider: &dyn MetricsProvider,
    ) -> Result<(), Box<dyn std::error::Error>> {
        println!("{}", render_json(metrics_provider, self.pretty)?);
        Ok(())
    }
}

pub fn render_json(
    metrics_provider: &dyn MetricsProvider,
    pretty: bool,
) -> Result<String, serde_json::Error> {
    let json = BenchmarksJson::from(metrics_provider);
    if pretty {
        serde_json::to_string_pretty(&json)
    } else {
        serde_json::to_string(&json)
    }
}
