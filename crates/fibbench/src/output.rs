use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::fib::BenchmarkKind;
use crate::harness::BenchmarkResult;

/// A single cell of a benchmark report, stored raw and formatted on display.
///
/// # Examples
///
/// ```rust
/// use fibbench::MetricType;
///
/// let avg = MetricType::DurationNs(1_500_000);
/// let value = MetricType::Value(817_770_325_994_397_771, true);
///
/// assert_eq!(avg.to_string(), "1.50 ms");
/// assert_eq!(value.to_string(), "817770325994397771 (wrapped)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum MetricType {
    Index(i32),        // Fibonacci index n
    Value(i64, bool),  // Computed value, wrapped flag
    RunsCount(u64),    // Number of timed invocations
    DurationNs(u64),   // Duration in nanoseconds
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricType::Index(n) => write!(f, "{}", n),
            MetricType::Value(value, false) => write!(f, "{}", value),
            MetricType::Value(value, true) => write!(f, "{} (wrapped)", value),
            MetricType::RunsCount(count) => write!(f, "{}", count),
            MetricType::DurationNs(ns) => write!(f, "{}", format_duration(*ns)),
        }
    }
}

/// Formats a duration in nanoseconds into a human-readable string with appropriate units.
pub fn format_duration(ns: u64) -> String {
    if ns < 1_000 {
        format!("{} ns", ns)
    } else if ns < 1_000_000 {
        format!("{:.2} µs", ns as f64 / 1_000.0)
    } else if ns < 1_000_000_000 {
        format!("{:.2} ms", ns as f64 / 1_000_000.0)
    } else {
        format!("{:.2} s", ns as f64 / 1_000_000_000.0)
    }
}

/// Whole milliseconds, truncated: `1999µs` is `1ms`.
pub fn format_millis(d: Duration) -> String {
    format!("{}ms", d.as_millis())
}

/// Microseconds with three decimals, i.e. nanosecond resolution.
pub fn format_micros(d: Duration) -> String {
    format!("{:.3}μs", d.as_nanos() as f64 / 1_000.0)
}

/// Duration formatting used by the plain text report for each algorithm.
pub fn format_elapsed(kind: BenchmarkKind, d: Duration) -> String {
    match kind {
        BenchmarkKind::Recursive => format_millis(d),
        BenchmarkKind::Iterative => format_micros(d),
    }
}

/// Output format for benchmark reports.
///
/// * `Text` - The three-line summary (default)
/// * `Table` - Human-readable table with percentiles
/// * `Json` - Compact JSON format (single line)
/// * `JsonPretty` - Pretty-printed JSON format with indentation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Table,
    Json,
    JsonPretty,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Format::Text),
            "table" => Ok(Format::Table),
            "json" => Ok(Format::Json),
            "json-pretty" => Ok(Format::JsonPretty),
            other => Err(format!(
                "unknown format '{other}', expected one of: text, table, json, json-pretty"
            )),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Text => write!(f, "text"),
            Format::Table => write!(f, "table"),
            Format::Json => write!(f, "json"),
            Format::JsonPretty => write!(f, "json-pretty"),
        }
    }
}

/// Trait for implementing custom report output.
///
/// # Examples
///
/// ```rust
/// use fibbench::{HarnessBuilder, MetricsProvider, Reporter};
/// use std::error::Error;
///
/// struct Summary;
///
/// impl Reporter for Summary {
///     fn report(&self, metrics: &dyn MetricsProvider) -> Result<(), Box<dyn Error>> {
///         println!("{}: {} benchmarks", metrics.caller_name(), metrics.results().len());
///         Ok(())
///     }
/// }
///
/// let harness = HarnessBuilder::new("doc")
///     .recursive_n(10)
///     .iterative_n(10)
///     .reporter(Box::new(Summary))
///     .build();
/// harness.run_and_report().unwrap();
/// ```
pub trait Reporter {
    fn report(&self, metrics_provider: &dyn MetricsProvider) -> Result<(), Box<dyn std::error::Error>>;
}

/// Read access to the results of a harness run, independent of how they are rendered.
pub trait MetricsProvider {
    fn caller_name(&self) -> &str;

    /// Wall time of the whole run in nanoseconds.
    fn total_elapsed(&self) -> u64;

    fn percentiles(&self) -> Vec<u8>;

    fn results(&self) -> &[BenchmarkResult];

    fn headers(&self) -> Vec<String> {
        let mut headers = vec![
            "Benchmark".to_string(),
            "Result".to_string(),
            "Runs".to_string(),
            "Avg".to_string(),
        ];

        for &p in &self.percentiles() {
            headers.push(format!("P{}", p));
        }

        headers.push("Min".to_string());
        headers.push("Max".to_string());
        headers.push("Total".to_string());

        headers
    }

    /// One row per benchmark in run order, matching [`headers`](Self::headers) minus the label.
    fn metric_data(&self) -> Vec<(String, Vec<MetricType>)> {
        let percentiles = self.percentiles();

        self.results()
            .iter()
            .map(|r| {
                let mut row = vec![
                    MetricType::Value(r.stats.value, r.stats.overflowed),
                    MetricType::RunsCount(r.stats.count),
                    MetricType::DurationNs(r.stats.avg_duration_ns()),
                ];
                for &p in &percentiles {
                    let ns = r.stats.percentile(p as f64).as_nanos() as u64;
                    row.push(MetricType::DurationNs(ns));
                }
                row.push(MetricType::DurationNs(r.stats.min_duration_ns));
                row.push(MetricType::DurationNs(r.stats.max_duration_ns));
                row.push(MetricType::DurationNs(r.stats.total_duration_ns));

                (r.benchmark.label(), row)
            })
            .collect()
    }
}

/// JSON entry for one benchmark. Durations are nanoseconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BenchmarkJson {
    pub label: String,
    pub kind: BenchmarkKind,
    pub n: i32,
    pub result: i64,
    pub overflowed: bool,
    pub runs: u64,
    pub avg: u64,
    pub min: u64,
    pub max: u64,
    pub total: u64,
    /// Keyed `p<percentile>`, e.g. `p95`.
    #[serde(flatten)]
    pub percentiles: BTreeMap<String, u64>,
}

/// JSON representation of a whole harness run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BenchmarksJson {
    pub caller_name: String,
    pub total_elapsed: u64,
    pub percentiles: Vec<u8>,
    pub output: Vec<BenchmarkJson>,
}

impl From<&dyn MetricsProvider> for BenchmarksJson {
    fn from(metrics: &dyn MetricsProvider) -> Self {
        let percentiles = metrics.percentiles();

        let output = metrics
            .results()
            .iter()
            .map(|r| BenchmarkJson {
                label: r.benchmark.label(),
                kind: r.benchmark.kind,
                n: r.benchmark.n,
                result: r.stats.value,
                overflowed: r.stats.overflowed,
                runs: r.stats.count,
                avg: r.stats.avg_duration_ns(),
                min: r.stats.min_duration_ns,
                max: r.stats.max_duration_ns,
                total: r.stats.total_duration_ns,
                percentiles: percentiles
                    .iter()
                    .map(|&p| {
                        (
                            format!("p{}", p),
                            r.stats.percentile(p as f64).as_nanos() as u64,
                        )
                    })
                    .collect(),
            })
            .collect();

        BenchmarksJson {
            caller_name: metrics.caller_name().to_string(),
            total_elapsed: metrics.total_elapsed(),
            percentiles,
            output,
        }
    }
}
