//! Monotonic measurement of single benchmark invocations and their aggregation.

pub mod guard;
pub mod state;

pub use guard::{MeasurementGuard, Sample};
pub use state::BenchStats;
