use std::path::{Path, PathBuf};

use crate::builder::{num_cpus, SampleBuilder};
use crate::error::SampleError;

/// Batch parameters as a plain value, for callers that gather settings
/// up front (the CLI, a config file) rather than chaining builder calls.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub source_dir:   PathBuf,
    pub dest_dir:     PathBuf,
    pub count:        usize,
    pub workers:      usize,
    pub seed:         Option<u64>,
    pub max_depth:    Option<usize>,
    pub follow_links: bool,
    pub extensions:   Vec<String>,
}

impl SampleConfig {
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>, count: usize) -> Self {
        Self {
            source_dir:   source_dir.into(),
            dest_dir:     dest_dir.into(),
            count,
            workers:      num_cpus(),
            seed:         None,
            max_depth:    None,
            follow_links: false,
            extensions:   Vec::new(),
        }
    }

    /// Reject settings that can never produce a batch.
    ///
    /// Only the shape of the config is checked. A source or destination
    /// that does not exist is reported by the run itself.
    pub fn validate(&self) -> Result<(), SampleError> {
        check_shape(Some(&self.source_dir), &self.dest_dir, self.workers)
    }

    /// Validate, then hand the settings to a [`SampleBuilder`].
    pub fn into_builder(self) -> Result<SampleBuilder, SampleError> {
        self.validate()?;

        let mut builder = SampleBuilder::default()
            .source_dir(self.source_dir)
            .dest_dir(self.dest_dir)
            .count(self.count)
            .workers(self.workers)
            .follow_links(self.follow_links)
            .extensions(self.extensions);

        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        if let Some(depth) = self.max_depth {
            builder = builder.max_depth(depth);
        }

        Ok(builder)
    }
}

/// Shape checks shared by [`SampleConfig::validate`] and
/// [`SampleBuilder::run`]. `source_dir` is `None` when a custom
/// [`Source`](crate::Source) replaces the directory walk.
pub(crate) fn check_shape(
    source_dir: Option<&Path>,
    dest_dir: &Path,
    workers: usize,
) -> Result<(), SampleError> {
    if source_dir.is_some_and(|dir| dir.as_os_str().is_empty()) {
        return Err(SampleError::InvalidConfig("source directory is empty".into()));
    }
    if dest_dir.as_os_str().is_empty() {
        return Err(SampleError::InvalidConfig("destination directory is empty".into()));
    }
    if workers == 0 {
        return Err(SampleError::InvalidWorkerCount(workers));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_config_passes() {
        assert!(SampleConfig::new("src", "dest", 10).validate().is_ok());
    }

    #[test]
    fn zero_count_is_allowed() {
        assert!(SampleConfig::new("src", "dest", 0).validate().is_ok());
    }

    #[test]
    fn empty_paths_are_rejected() {
        let err = SampleConfig::new("", "dest", 1).validate().unwrap_err();
        assert!(matches!(err, SampleError::InvalidConfig(_)));

        let err = SampleConfig::new("src", "", 1).validate().unwrap_err();
        assert!(matches!(err, SampleError::InvalidConfig(_)));
    }

    #[test]
    fn custom_source_skips_source_dir_check() {
        assert!(check_shape(None, Path::new("dest"), 1).is_ok());
        assert!(matches!(
            check_shape(Some(Path::new("")), Path::new("dest"), 1),
            Err(SampleError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_workers_is_rejected() {
        let mut config = SampleConfig::new("src", "dest", 1);
        config.workers = 0;
        assert!(matches!(
            config.into_builder(),
            Err(SampleError::InvalidWorkerCount(0))
        ));
    }
}
