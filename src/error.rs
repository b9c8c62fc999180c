use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SampleError {
    // Sampling
    #[error("file index is empty, nothing to sample")]
    EmptyIndex,

    // Traversal
    #[error("permission denied")]
    PermissionDenied(PathBuf),

    #[error("path not found")]
    NotFound(PathBuf),

    #[error("not a directory")]
    NotADirectory(PathBuf),

    #[error("symlink loop")]
    SymlinkLoop(PathBuf),

    #[error("IO error")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Config
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid worker count")]
    InvalidWorkerCount(usize),

    // Runtime
    #[error("thread pool failure")]
    ThreadPool(String),

    // Third-party extensibility
    #[error("source error")]
    Source(String),
}

impl SampleError {
    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::PermissionDenied(p)
            | Self::NotFound(p)
            | Self::NotADirectory(p)
            | Self::SymlinkLoop(p)
            | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether enumeration can continue after this error.
    ///
    /// Traversal errors are collected and the walk keeps going. Everything
    /// else (empty index, bad config, pool failure) halts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied(_)
                | Self::NotFound(_)
                | Self::SymlinkLoop(_)
                | Self::Io { .. }
                | Self::Source(_)
        )
    }
}

/// Why a single copy task gave up.
///
/// Copy failures never abort the batch. They are collected into
/// [`CopyReport::failures`](crate::CopyReport::failures).
#[derive(Error, Debug)]
pub enum CopyError {
    #[error("cannot open source {}", path.display())]
    OpenSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot create destination {}", path.display())]
    CreateDest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("transfer into {} failed", path.display())]
    Transfer {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("source path has no file name")]
    NoFileName(PathBuf),
}

impl CopyError {
    /// The path the failing operation was acting on.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::OpenSource { path, .. }
            | Self::CreateDest { path, .. }
            | Self::Transfer { path, .. }
            | Self::NoFileName(path) => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_errors_are_recoverable() {
        assert!(SampleError::PermissionDenied("/x".into()).is_recoverable());
        assert!(SampleError::SymlinkLoop("/x".into()).is_recoverable());
        assert!(!SampleError::NotADirectory("/x".into()).is_recoverable());
        assert!(!SampleError::EmptyIndex.is_recoverable());
        assert!(!SampleError::InvalidWorkerCount(0).is_recoverable());
    }

    #[test]
    fn copy_error_exposes_path() {
        let err = CopyError::CreateDest {
            path: "/nowhere/a.jpg".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.path(), &PathBuf::from("/nowhere/a.jpg"));
        assert!(err.to_string().contains("/nowhere/a.jpg"));
    }
}
