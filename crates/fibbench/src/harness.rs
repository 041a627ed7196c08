use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::fib::{self, BenchmarkKind};
use crate::output::{Format, MetricsProvider, Reporter};
use crate::report::{JsonReporter, TableReporter, TextReporter};
use crate::timing::{BenchStats, MeasurementGuard};

pub const DEFAULT_RECURSIVE_N: i32 = 35;
pub const DEFAULT_ITERATIVE_N: i32 = 1000;

/// One algorithm evaluated at one index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Benchmark {
    pub kind: BenchmarkKind,
    pub n: i32,
}

impl Benchmark {
    pub fn new(kind: BenchmarkKind, n: i32) -> Self {
        Self { kind, n }
    }

    /// e.g. `Recursive F(35)`
    pub fn label(&self) -> String {
        format!("{} F({})", self.kind, self.n)
    }

    /// Whether the value this benchmark returns is a wrapped one.
    fn overflows(&self) -> bool {
        match self.kind {
            BenchmarkKind::Iterative => fib::fib_iterative_checked(self.n).is_none(),
            // same arithmetic, no need to repeat the exponential walk
            BenchmarkKind::Recursive => fib::overflows_i64(self.n),
        }
    }
}

#[derive(Debug)]
pub struct BenchmarkResult {
    pub benchmark: Benchmark,
    pub stats: BenchStats,
}

/// Everything measured in one harness run.
#[derive(Debug)]
pub struct Report {
    caller_name: &'static str,
    total_elapsed: Duration,
    percentiles: Vec<u8>,
    results: Vec<BenchmarkResult>,
}

impl Report {
    pub fn get(&self, kind: BenchmarkKind) -> Option<&BenchmarkResult> {
        self.results.iter().find(|r| r.benchmark.kind == kind)
    }
}

impl MetricsProvider for Report {
    fn caller_name(&self) -> &str {
        self.caller_name
    }

    fn total_elapsed(&self) -> u64 {
        self.total_elapsed.as_nanos() as u64
    }

    fn percentiles(&self) -> Vec<u8> {
        self.percentiles.clone()
    }

    fn results(&self) -> &[BenchmarkResult] {
        &self.results
    }
}

enum ReporterConfig {
    Format(Format),
    Custom(Box<dyn Reporter>),
    None, // Will default to Format::Text
}

/// Builder for a [`Harness`].
///
/// Defaults reproduce the classic run: `F(35)` recursively, `F(1000)`
/// iteratively, one run each, P95, text output.
///
/// # Examples
///
/// ```rust
/// use fibbench::{Format, HarnessBuilder, MetricsProvider};
///
/// let harness = HarnessBuilder::new("example")
///     .recursive_n(20)
///     .iterative_n(90)
///     .runs(5)
///     .percentiles(&[50, 99])
///     .format(Format::Table)
///     .build();
///
/// let report = harness.run();
/// assert_eq!(report.results().len(), 2);
/// ```
pub struct HarnessBuilder {
    caller_name: &'static str,
    recursive_n: i32,
    iterative_n: i32,
    runs: u32,
    percentiles: Vec<u8>,
    reporter: ReporterConfig,
}

impl HarnessBuilder {
    pub fn new(caller_name: &'static str) -> Self {
        Self {
            caller_name,
            recursive_n: DEFAULT_RECURSIVE_N,
            iterative_n: DEFAULT_ITERATIVE_N,
            runs: 1,
            percentiles: vec![95],
            reporter: ReporterConfig::None,
        }
    }

    pub fn recursive_n(mut self, n: i32) -> Self {
        self.recursive_n = n;
        self
    }

    pub fn iterative_n(mut self, n: i32) -> Self {
        self.iterative_n = n;
        self
    }

    /// Timed invocations per benchmark. Values below 1 are raised to 1.
    pub fn runs(mut self, runs: u32) -> Self {
        self.runs = runs.max(1);
        self
    }

    /// Percentiles (0-100) shown by the table and JSON reports.
    ///
    /// Default: `[95]`
    pub fn percentiles(mut self, percentiles: &[u8]) -> Self {
        self.percentiles = percentiles.iter().map(|p| (*p).min(100)).collect();
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.reporter = ReporterConfig::Format(format);
        self
    }

    /// Overrides any format setting.
    pub fn reporter(mut self, reporter: Box<dyn Reporter>) -> Self {
        self.reporter = ReporterConfig::Custom(reporter);
        self
    }

    pub fn build(self) -> Harness {
        let reporter: Box<dyn Reporter> = match self.reporter {
            ReporterConfig::Custom(reporter) => reporter,
            ReporterConfig::Format(format) => reporter_for(format),
            ReporterConfig::None => reporter_for(Format::default()),
        };

        Harness {
            caller_name: self.caller_name,
            benchmarks: [
                Benchmark::new(BenchmarkKind::Recursive, self.recursive_n),
                Benchmark::new(BenchmarkKind::Iterative, self.iterative_n),
            ],
            runs: self.runs,
            percentiles: self.percentiles,
            reporter,
        }
    }
}

fn reporter_for(format: Format) -> Box<dyn Reporter> {
    match format {
        Format::Text => Box::new(TextReporter),
        Format::Table => Box::new(TableReporter),
        Format::Json => Box::new(JsonReporter { pretty: false }),
        Format::JsonPretty => Box::new(JsonReporter { pretty: true }),
    }
}

/// Runs the recursive benchmark, then the iterative one, strictly in that order.
pub struct Harness {
    caller_name: &'static str,
    benchmarks: [Benchmark; 2],
    runs: u32,
    percentiles: Vec<u8>,
    reporter: Box<dyn Reporter>,
}

impl Harness {
    pub fn benchmarks(&self) -> &[Benchmark] {
        &self.benchmarks
    }

    pub fn run(&self) -> Report {
        let start = Instant::now();

        let results = self
            .benchmarks
            .iter()
            .map(|&benchmark| BenchmarkResult {
                benchmark,
                stats: self.run_benchmark(benchmark),
            })
            .collect();

        Report {
            caller_name: self.caller_name,
            total_elapsed: start.elapsed(),
            percentiles: self.percentiles.clone(),
            results,
        }
    }

    pub fn run_and_report(&self) -> Result<Report, Box<dyn std::error::Error>> {
        let report = self.run();
        self.reporter.report(&report)?;
        Ok(report)
    }

    fn run_benchmark(&self, benchmark: Benchmark) -> BenchStats {
        let overflowed = benchmark.overflows();
        if overflowed {
            tracing::warn!(
                benchmark = %benchmark.label(),
                "F({}) exceeds i64::MAX, reported value is the 64-bit wrapped result",
                benchmark.n
            );
        }

        let mut stats = BenchStats::new(measure_once(benchmark), overflowed);
        for _ in 1..self.runs {
            stats.update(measure_once(benchmark));
        }

        tracing::debug!(
            benchmark = %benchmark.label(),
            runs = stats.count,
            avg_ns = stats.avg_duration_ns(),
            "benchmark finished"
        );

        stats
    }
}

#[inline]
fn measure_once(benchmark: Benchmark) -> crate::timing::Sample {
    let n = black_box(benchmark.n);
    let guard = MeasurementGuard::new(benchmark.kind, benchmark.n);
    let value = black_box(fib::fib(benchmark.kind, n));
    guard.finish_with_result(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_defaults() {
        let harness = HarnessBuilder::new("test").build();
        assert_eq!(
            harness.benchmarks(),
            &[
                Benchmark::new(BenchmarkKind::Recursive, 35),
                Benchmark::new(BenchmarkKind::Iterative, 1000),
            ]
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            Benchmark::new(BenchmarkKind::Recursive, 35).label(),
            "Recursive F(35)"
        );
        assert_eq!(
            Benchmark::new(BenchmarkKind::Iterative, 1000).label(),
            "Iterative F(1000)"
        );
    }

    #[test]
    fn test_run_order_and_values() {
        let report = HarnessBuilder::new("test")
            .recursive_n(20)
            .iterative_n(1000)
            .build()
            .run();

        let results = report.results();
        assert_eq!(results[0].benchmark.kind, BenchmarkKind::Recursive);
        assert_eq!(results[1].benchmark.kind, BenchmarkKind::Iterative);
        assert_eq!(results[0].stats.value, 6765);
        assert!(!results[0].stats.overflowed);
        assert_eq!(results[1].stats.value, 817_770_325_994_397_771);
        assert!(results[1].stats.overflowed);
    }

    #[test]
    fn test_runs_are_counted() {
        let report = HarnessBuilder::new("test")
            .recursive_n(15)
            .iterative_n(50)
            .runs(7)
            .build()
            .run();

        for r in report.results() {
            assert_eq!(r.stats.count, 7);
            assert!(r.stats.min_duration_ns <= r.stats.max_duration_ns);
        }
    }

    #[test]
    fn test_zero_runs_is_one() {
        let report = HarnessBuilder::new("test")
            .recursive_n(5)
            .iterative_n(5)
            .runs(0)
            .build()
            .run();

        assert_eq!(report.get(BenchmarkKind::Iterative).map(|r| r.stats.count), Some(1));
    }

    #[test]
    fn test_percentiles_are_capped() {
        let report = HarnessBuilder::new("test")
            .recursive_n(1)
            .iterative_n(1)
            .percentiles(&[50, 250])
            .build()
            .run();

        assert_eq!(report.percentiles(), vec![50, 100]);
    }

    struct CapturingReporter(Rc<RefCell<Vec<String>>>);

    impl Reporter for CapturingReporter {
        fn report(
            &self,
            metrics_provider: &dyn MetricsProvider,
        ) -> Result<(), Box<dyn std::error::Error>> {
            let mut seen = self.0.borrow_mut();
            for (label, _) in metrics_provider.metric_data() {
                seen.push(label);
            }
            Ok(())
        }
    }

    #[test]
    fn test_custom_reporter_receives_report() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        HarnessBuilder::new("test")
            .recursive_n(10)
            .iterative_n(10)
            .format(Format::Json)
            .reporter(Box::new(CapturingReporter(Rc::clone(&seen))))
            .build()
            .run_and_report()
            .expect("reporter should succeed");

        assert_eq!(
            *seen.borrow(),
            vec!["Recursive F(10)".to_string(), "Iterative F(10)".to_string()]
        );
    }

    struct FailingReporter;

    impl Reporter for FailingReporter {
        fn report(&self, _: &dyn MetricsProvider) -> Result<(), Box<dyn std::error::Error>> {
            Err("sink closed".into())
        }
    }

    #[test]
    fn test_reporter_error_propagates() {
        let err = HarnessBuilder::new("test")
            .recursive_n(1)
            .iterative_n(1)
            .reporter(Box::new(FailingReporter))
            .build()
            .run_and_report()
            .unwrap_err();

        assert_eq!(err.to_string(), "sink closed");
    }
}
