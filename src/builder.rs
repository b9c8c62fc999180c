use std::path::PathBuf;

use tracing::warn;

use crate::config::check_shape;
use crate::engine::{sample_and_copy, DirSource, WalkConfig};
use crate::error::SampleError;
use crate::index::FileIndex;
use crate::results::CopyReport;
use crate::sampler::Sampler;
use crate::traits::{AllMatcher, ExtensionMatcher, Matcher, Source};

// ---------------------------------------------------------------------------
// SampleBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a sampling batch.
///
/// Created via [`sampcopy::sample()`](crate::sample). Configure with chained
/// builder methods, then call [`run()`](SampleBuilder::run) to execute.
///
/// # Example
///
/// ```rust,ignore
/// let report = sampcopy::sample()
///     .source_dir("ILSVRC2012/train")
///     .dest_dir("subset/ImageNet")
///     .count(250_000)
///     .workers(64)
///     .seed(7)
///     .run()?;
/// ```
pub struct SampleBuilder {
    source_dir:   Option<PathBuf>,
    source:       Option<Box<dyn Source>>,
    dest_dir:     Option<PathBuf>,
    matcher:      Option<Box<dyn Matcher>>,
    count:        usize,
    workers:      usize,
    seed:         Option<u64>,
    max_depth:    Option<usize>,
    follow_links: bool,
}

impl Default for SampleBuilder {
    fn default() -> Self {
        Self {
            source_dir:   None,
            source:       None,
            dest_dir:     None,
            matcher:      None,
            count:        0,
            workers:      num_cpus(),
            seed:         None,
            max_depth:    None,
            follow_links: false,
        }
    }
}

impl SampleBuilder {
    // ── Source ────────────────────────────────────────────────────────────

    /// Root directory to enumerate. Walked recursively.
    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }

    /// Sample from a custom [`Source`] instead of walking `source_dir`.
    /// Takes precedence over `.source_dir()` when both are set.
    pub fn source(mut self, s: impl Source + 'static) -> Self {
        self.source = Some(Box::new(s));
        self
    }

    // ── Matcher ───────────────────────────────────────────────────────────

    /// Only files accepted by `m` are eligible for sampling.
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Some(Box::new(m));
        self
    }

    /// Shorthand for an extension filter, e.g. `.extensions(["jpg", "png"])`.
    /// Case-insensitive; a leading dot is ignored. An empty list leaves the
    /// current matcher in place.
    pub fn extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let matcher = ExtensionMatcher::new(exts);
        if !matcher.is_empty() {
            self.matcher = Some(Box::new(matcher));
        }
        self
    }

    // ── Destination ───────────────────────────────────────────────────────

    /// Directory copies are written into. It must already exist; a missing
    /// directory shows up as one failure per task, not as an `Err`.
    pub fn dest_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dest_dir = Some(dir.into());
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Number of draws, and so of copy tasks. Defaults to 0.
    pub fn count(mut self, n: usize) -> Self {
        self.count = n;
        self
    }

    /// Maximum number of copy tasks in flight at once.
    ///
    /// Defaults to the number of logical CPU cores.
    pub fn workers(mut self, n: usize) -> Self {
        self.workers = n;
        self
    }

    /// Fix the sampler seed for a reproducible selection. Without a seed the
    /// sampler is seeded from the clock; the seed used is in
    /// [`CopyReport::seed`].
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Maximum traversal depth. `1` means files directly under the root.
    /// Unlimited by default.
    pub fn max_depth(mut self, d: usize) -> Self {
        self.max_depth = Some(d);
        self
    }

    /// Descend into symlinked directories while walking. Off by default.
    /// Symlinks to regular files are sampled either way; the copy reads the
    /// target's bytes.
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Enumerate, sample, copy, and report.
    ///
    /// Blocks until every copy task has finished.
    ///
    /// # Errors
    ///
    /// Returns `Err` for fatal conditions only: no source or destination
    /// configured, zero workers, thread pool failure, or an empty file index
    /// ([`SampleError::EmptyIndex`], in which case nothing is copied).
    /// Per-file copy failures are collected into [`CopyReport::failures`].
    pub fn run(self) -> Result<CopyReport, SampleError> {
        let dest_dir = self.dest_dir.unwrap_or_default();

        let source: Box<dyn Source> = match (self.source, self.source_dir) {
            (Some(s), _) => {
                check_shape(None, &dest_dir, self.workers)?;
                s
            }
            (None, dir) => {
                let dir = dir.unwrap_or_default();
                check_shape(Some(&dir), &dest_dir, self.workers)?;
                Box::new(DirSource(dir))
            }
        };

        // Default matcher: match everything
        let matcher: Box<dyn Matcher> = self.matcher.unwrap_or_else(|| Box::new(AllMatcher));

        let config = WalkConfig {
            max_depth:    self.max_depth,
            follow_links: self.follow_links,
        };

        let (index, walk_errors) = FileIndex::build(source.as_ref(), matcher.as_ref(), &config);

        if index.is_empty() {
            for err in &walk_errors {
                warn!(path = ?err.path(), error = %err, "nothing indexed");
            }
        }

        let mut sampler = match self.seed {
            Some(seed) => Sampler::from_seed(seed),
            None       => Sampler::from_time(),
        };

        let mut report = sample_and_copy(&index, &dest_dir, self.count, &mut sampler, self.workers)?;
        report.walk_errors = walk_errors;

        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Get the logical CPU count, with a safe fallback.
pub(crate) fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
