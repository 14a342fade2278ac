//! Stateful CPU utilization from successive cumulative jiffie snapshots.

use crate::collector::procfs::parser::{CpuSample, ParseError, parse_cpu_line};

/// Previously observed sample plus its cached counter sum.
#[derive(Debug, Clone, Copy)]
struct Baseline {
    sample: CpuSample,
    total: u64,
}

/// Computes CPU busy-percentage from the first difference of the
/// cumulative counters in the aggregate cpu line.
///
/// The tracker is the only stateful part of the sampling engine: it keeps
/// the last successfully parsed sample as the baseline for the next call.
#[derive(Debug, Default)]
pub struct CpuTracker {
    baseline: Option<Baseline>,
}

impl CpuTracker {
    /// Creates a tracker with no baseline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one cpu line and returns the utilization percentage since
    /// the previous call.
    ///
    /// The very first call establishes the baseline and returns `0.0` —
    /// no meaningful delta exists yet. A zero total delta (no counter
    /// movement between calls) also yields `0.0` rather than dividing by
    /// zero. Deltas saturate at zero on counter regression.
    ///
    /// On a parse error the baseline is left unchanged, so the next good
    /// sample deltas against the last good one.
    pub fn sample(&mut self, line: &str) -> Result<f64, ParseError> {
        let current = parse_cpu_line(line)?;
        let total = current.total();

        let util = match self.baseline {
            None => 0.0,
            Some(prev) => {
                let total_delta = total.saturating_sub(prev.total);
                if total_delta == 0 {
                    0.0
                } else {
                    let idle_delta = current.idle().saturating_sub(prev.sample.idle());
                    (1.0 - idle_delta as f64 / total_delta as f64) * 100.0
                }
            }
        };

        // New baseline on every successful parse, zero-delta branch included.
        self.baseline = Some(Baseline { sample: current, total });

        Ok(util)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_returns_zero_regardless_of_values() {
        let mut tracker = CpuTracker::new();
        assert_eq!(tracker.sample("cpu  90000 123 456 789 1 2 3").unwrap(), 0.0);

        let mut tracker = CpuTracker::new();
        assert_eq!(tracker.sample("cpu  0 0 0 0 0 0 0").unwrap(), 0.0);
    }

    #[test]
    fn identical_samples_yield_zero_not_error() {
        let mut tracker = CpuTracker::new();
        tracker.sample("cpu  100 0 100 600 0 0 0").unwrap();
        assert_eq!(tracker.sample("cpu  100 0 100 600 0 0 0").unwrap(), 0.0);
    }

    #[test]
    fn all_idle_delta_yields_zero() {
        let mut tracker = CpuTracker::new();
        tracker.sample("cpu  100 0 100 600 0 0 0").unwrap();
        // Only idle moved: idle delta == total delta.
        assert_eq!(tracker.sample("cpu  100 0 100 700 0 0 0").unwrap(), 0.0);
    }

    #[test]
    fn no_idle_delta_yields_hundred() {
        let mut tracker = CpuTracker::new();
        tracker.sample("cpu  100 0 100 600 0 0 0").unwrap();
        assert_eq!(tracker.sample("cpu  200 0 150 600 0 0 0").unwrap(), 100.0);
    }

    #[test]
    fn mixed_delta_scenario() {
        let mut tracker = CpuTracker::new();
        assert_eq!(tracker.sample("cpu  100 0 100 600 0 0 0").unwrap(), 0.0);
        // Deltas: user 50, system 50, idle 50 => total 150, idle 50.
        let util = tracker.sample("cpu  150 0 150 650 0 0 0").unwrap();
        let expected = (1.0 - 50.0 / 150.0) * 100.0;
        assert!((util - expected).abs() < 1e-9, "got {}", util);
    }

    #[test]
    fn parse_failure_leaves_baseline_unchanged() {
        let mut tracker = CpuTracker::new();
        tracker.sample("cpu  100 0 100 600 0 0 0").unwrap();
        assert!(tracker.sample("cpu garbage").is_err());
        // Deltas against the sample before the failure.
        assert_eq!(tracker.sample("cpu  200 0 150 600 0 0 0").unwrap(), 100.0);
    }

    #[test]
    fn first_call_failure_keeps_tracker_unbaselined() {
        let mut tracker = CpuTracker::new();
        assert!(tracker.sample("not a cpu line").is_err());
        // Still the baseline-establishing call.
        assert_eq!(tracker.sample("cpu  5 5 5 5 5 5 5").unwrap(), 0.0);
    }
}
