//! # sampcopy
//!
//! Draw a random sample of files, with replacement, from a directory tree and
//! copy them into a destination directory in parallel.
//!
//! A run has two stages. The tree under the source directory is enumerated
//! once into an immutable [`FileIndex`]. Then `count` indices are drawn
//! uniformly from it and one copy task per draw runs on a bounded worker
//! pool. The same file may be drawn many times; every draw of it writes the
//! same destination path. A failed copy never aborts the batch. Failures are
//! counted and kept in the [`CopyReport`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! let report = sampcopy::sample()
//!     .source_dir("ILSVRC2012/train")
//!     .dest_dir("subset/ImageNet")
//!     .count(250_000)
//!     .extensions(["JPEG"])
//!     .run()
//!     .unwrap();
//!
//! println!(
//!     "{} of {} copies succeeded (seed {})",
//!     report.succeeded, report.attempted, report.seed
//! );
//! ```
//!
//! # Custom Sources
//!
//! Implement [`Source`] to sample from something other than a directory
//! walk:
//!
//! ```rust
//! use std::path::PathBuf;
//! use sampcopy::{Source, SampleError};
//! use sampcopy::engine::WalkConfig;
//!
//! struct Manifest(Vec<PathBuf>);
//!
//! impl Source for Manifest {
//!     fn walk(&self, _config: &WalkConfig) -> Box<dyn Iterator<Item = Result<PathBuf, SampleError>>> {
//!         Box::new(self.0.clone().into_iter().map(Ok::<_, SampleError>))
//!     }
//! }
//! ```

#![forbid(unsafe_code)]

pub mod engine;

mod builder;
mod config;
mod copy;
mod error;
mod index;
mod results;
mod sampler;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::SampleBuilder;
pub use config::SampleConfig;
pub use copy::{copy_file, destination_for};
pub use engine::{sample_and_copy, DirSource};
pub use error::{CopyError, SampleError};
pub use index::FileIndex;
pub use results::{CopyReport, CopyStats};
pub use sampler::Sampler;
pub use traits::{Matcher, Source};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`SampleBuilder`] to configure and run a batch.
///
/// # Example
///
/// ```rust
/// use std::path::PathBuf;
/// use sampcopy::{Source, SampleError};
/// use sampcopy::engine::WalkConfig;
///
/// struct Nothing;
///
/// impl Source for Nothing {
///     fn walk(&self, _config: &WalkConfig) -> Box<dyn Iterator<Item = Result<PathBuf, SampleError>>> {
///         Box::new(std::iter::empty())
///     }
/// }
///
/// let err = sampcopy::sample()
///     .source(Nothing)
///     .dest_dir(std::env::temp_dir())
///     .count(3)
///     .run()
///     .unwrap_err();
///
/// assert!(matches!(err, SampleError::EmptyIndex));
/// ```
pub fn sample() -> SampleBuilder {
    SampleBuilder::default()
}
