use hdrhistogram::Histogram;
use std::time::Duration;

use super::guard::Sample;

/// Aggregated samples for one benchmark within one harness run.
#[derive(Debug)]
pub struct BenchStats {
    pub total_duration_ns: u64,
    pub min_duration_ns: u64,
    pub max_duration_ns: u64,
    pub count: u64,
    hist: Histogram<u64>,
    /// Value returned by the most recent sample.
    pub value: i64,
    /// Set when `value` is a wrapped result rather than the true F(n).
    pub overflowed: bool,
}

impl BenchStats {
    const LOW_NS: u64 = 1;
    const HIGH_NS: u64 = 1_000_000_000_000; // 1000s
    const SIGFIGS: u8 = 3;

    pub fn new(first: Sample, overflowed: bool) -> Self {
        let hist = Histogram::<u64>::new_with_bounds(Self::LOW_NS, Self::HIGH_NS, Self::SIGFIGS)
            .expect("hdrhistogram bounds are valid");

        let first_ns = duration_ns(first.duration);
        let mut s = Self {
            total_duration_ns: first_ns,
            min_duration_ns: first_ns,
            max_duration_ns: first_ns,
            count: 1,
            hist,
            value: first.value,
            overflowed,
        };
        s.record_time(first_ns);
        s
    }

    #[inline]
    fn record_time(&mut self, ns: u64) {
        let clamped = ns.clamp(Self::LOW_NS, Self::HIGH_NS);
        // clamped into the histogram's bounds, so recording cannot fail
        let _ = self.hist.record(clamped);
    }

    pub fn update(&mut self, sample: Sample) {
        let ns = duration_ns(sample.duration);
        self.total_duration_ns = self.total_duration_ns.saturating_add(ns);
        self.min_duration_ns = self.min_duration_ns.min(ns);
        self.max_duration_ns = self.max_duration_ns.max(ns);
        self.count += 1;
        self.value = sample.value;
        self.record_time(ns);
    }

    pub fn avg_duration_ns(&self) -> u64 {
        if self.count == 0 {
            0
        } else {
            self.total_duration_ns / self.count
        }
    }

    pub fn avg_duration(&self) -> Duration {
        Duration::from_nanos(self.avg_duration_ns())
    }

    #[inline]
    pub fn percentile(&self, p: f64) -> Duration {
        if self.count == 0 {
            return Duration::ZERO;
        }
        let p = p.clamp(0.0, 100.0);
        Duration::from_nanos(self.hist.value_at_percentile(p))
    }
}

#[inline]
fn duration_ns(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}
