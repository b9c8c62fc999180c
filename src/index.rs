use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::engine::WalkConfig;
use crate::error::SampleError;
use crate::traits::{Matcher, Source};

/// The ordered, immutable list of files a batch samples from.
///
/// Built once before sampling and never mutated afterwards, so it is shared
/// by every copy task without locking. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct FileIndex {
    paths: Arc<[PathBuf]>,
}

impl FileIndex {
    /// Walk `source`, keeping the files `matcher` accepts, in walk order.
    ///
    /// Enumeration is best-effort: traversal errors are returned alongside
    /// the index rather than stopping the walk. A missing root gives an
    /// empty index plus a `NotFound` error.
    pub fn build(
        source: &dyn Source,
        matcher: &dyn Matcher,
        config: &WalkConfig,
    ) -> (Self, Vec<SampleError>) {
        let mut paths = Vec::new();
        let mut errors = Vec::new();

        for item in source.walk(config) {
            match item {
                Ok(path) if matcher.is_match(&path) => paths.push(path),
                Ok(_) => {}
                Err(err) => {
                    debug!(path = ?err.path(), error = %err, "skipped during walk");
                    errors.push(err);
                }
            }
        }

        info!(files = paths.len(), walk_errors = errors.len(), "file index built");

        (Self::from_paths(paths), errors)
    }

    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self { paths: paths.into() }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Path> {
        self.paths.get(i).map(PathBuf::as_path)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}
