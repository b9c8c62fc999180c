use std::time::Duration;

use crate::error::{CopyError, SampleError};

/// The output of a completed batch.
///
/// `attempted` always equals the requested count, and
/// `attempted == succeeded + failed`.
#[derive(Debug, Default)]
pub struct CopyReport {
    /// Copy tasks launched, one per draw.
    pub attempted: usize,

    /// Tasks that wrote their destination in full.
    pub succeeded: usize,

    /// Tasks that gave up. Each has an entry in `failures`.
    pub failed: usize,

    /// Bytes written across all successful tasks, repeats counted.
    pub bytes_copied: u64,

    /// Seed the sampler ran with. Replay with `.seed()` on the builder.
    pub seed: u64,

    /// Number of files eligible for sampling.
    pub index_len: usize,

    /// Why each failed task failed, in no particular order.
    pub failures: Vec<CopyError>,

    /// Non-fatal errors hit while building the index.
    pub walk_errors: Vec<SampleError>,

    /// Batch timing.
    pub stats: CopyStats,
}

impl CopyReport {
    /// Fold per-task outcomes into a report. `seed`, `index_len` and
    /// `walk_errors` are left for the caller.
    pub(crate) fn tally(outcomes: Vec<Result<u64, CopyError>>, duration: Duration) -> Self {
        let attempted = outcomes.len();
        let mut bytes_copied = 0;
        let mut failures = Vec::new();

        for outcome in outcomes {
            match outcome {
                Ok(n)    => bytes_copied += n,
                Err(err) => failures.push(err),
            }
        }

        Self {
            attempted,
            succeeded: attempted - failures.len(),
            failed: failures.len(),
            bytes_copied,
            failures,
            stats: CopyStats::compute(attempted, duration),
            ..Default::default()
        }
    }

    /// `true` when every task succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Timing for a completed batch.
#[derive(Debug, Default)]
pub struct CopyStats {
    /// Wall-clock time from first launch to the join.
    pub duration: Duration,

    /// Tasks finished per second, clamped to 0 on zero-duration runs.
    pub files_per_sec: usize,
}

impl CopyStats {
    pub(crate) fn compute(tasks: usize, duration: Duration) -> Self {
        let fps = if duration.as_secs_f64() > 0.0 {
            (tasks as f64 / duration.as_secs_f64()) as usize
        } else {
            0
        };
        Self {
            duration,
            files_per_sec: fps,
        }
    }
}
