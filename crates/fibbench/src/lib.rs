//! Times a naive recursive and a linear iterative Fibonacci computation and
//! reports the elapsed durations.
//!
//! ```rust
//! use fibbench::{fib_iterative, fib_recursive};
//!
//! assert_eq!(fib_recursive(20), 6765);
//! assert_eq!(fib_iterative(20), 6765);
//! ```
//!
//! The [`HarnessBuilder`] runs both under a monotonic clock and hands the
//! [`Report`] to a [`Reporter`]: the three-line text summary by default, or a
//! table / JSON rendering.

pub mod fib;
pub mod harness;
pub(crate) mod output;
pub mod report;
pub mod timing;

pub use fib::{
    fib_iterative, fib_iterative_checked, fib_recursive, overflows_i64, BenchmarkKind,
    MAX_EXACT_I64_INDEX,
};
pub use harness::{
    Benchmark, BenchmarkResult, Harness, HarnessBuilder, Report, DEFAULT_ITERATIVE_N,
    DEFAULT_RECURSIVE_N,
};
pub use output::{
    format_duration, format_elapsed, format_micros, format_millis, BenchmarkJson,
    BenchmarksJson, Format, MetricType, MetricsProvider, Reporter,
};
pub use report::{JsonReporter, TableReporter, TextReporter};
pub use timing::{BenchStats, MeasurementGuard, Sample};
