#[cfg(target_os = "linux")]
use quanta::Instant;

#[cfg(not(target_os = "linux"))]
use std::time::Instant;

use std::time::Duration;

use crate::fib::BenchmarkKind;

/// One timed invocation: how long it took and what it returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub duration: Duration,
    pub value: i64,
}

/// Starts the clock on construction; [`finish_with_result`](Self::finish_with_result)
/// stops it and yields a [`Sample`].
///
/// Both clocks used here are monotonic, so the measured duration is never
/// affected by wall-clock adjustments.
pub struct MeasurementGuard {
    kind: BenchmarkKind,
    n: i32,
    start: Instant,
    finished: bool,
}

impl MeasurementGuard {
    #[inline]
    pub fn new(kind: BenchmarkKind, n: i32) -> Self {
        Self {
            kind,
            n,
            start: Instant::now(),
            finished: false,
        }
    }

    #[inline]
    pub fn finish_with_result(mut self, value: i64) -> Sample {
        let duration = self.start.elapsed();
        self.finished = true;
        tracing::debug!(
            kind = %self.kind,
            n = self.n,
            value,
            elapsed_ns = duration.as_nanos() as u64,
            "sample recorded"
        );
        Sample { duration, value }
    }
}

impl Drop for MeasurementGuard {
    #[inline]
    fn drop(&mut self) {
        if !self.finished {
            tracing::debug!(
                kind = %self.kind,
                n = self.n,
                elapsed_ns = self.start.elapsed().as_nanos() as u64,
                "measurement dropped without a result"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_captures_value() {
        let guard = MeasurementGuard::new(BenchmarkKind::Iterative, 10);
        let sample = guard.finish_with_result(55);
        assert_eq!(sample.value, 55);
    }

    #[test]
    fn test_duration_covers_work() {
        let guard = MeasurementGuard::new(BenchmarkKind::Recursive, 0);
        std::thread::sleep(Duration::from_millis(2));
        let sample = guard.finish_with_result(0);
        assert!(sample.duration >= Duration::from_millis(2));
    }
}
