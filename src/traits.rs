use std::path::{Path, PathBuf};

use crate::error::SampleError;

/// A source of candidate files for the [`FileIndex`](crate::FileIndex).
///
/// The built-in [`DirSource`](crate::DirSource) walks a directory tree.
/// Implement this to sample from anything else that can name files: a
/// manifest, a database listing, a fixed list in a test.
///
/// # Ordering
///
/// The index keeps paths in the order `walk()` yields them. Seeded runs
/// are only reproducible when that order is stable, so sources should
/// yield deterministically.
///
/// # Error Handling
///
/// Recoverable errors (permission denied, unreadable directories) should be
/// yielded as `Err(SampleError)` rather than panicking. They are collected
/// into [`CopyReport::walk_errors`](crate::CopyReport::walk_errors) and the
/// walk carries on.
///
/// # Example
///
/// ```rust
/// use std::path::PathBuf;
/// use sampcopy::{Source, SampleError};
/// use sampcopy::engine::WalkConfig;
///
/// struct ListSource(Vec<PathBuf>);
///
/// impl Source for ListSource {
///     fn walk(&self, _config: &WalkConfig) -> Box<dyn Iterator<Item = Result<PathBuf, SampleError>>> {
///         Box::new(self.0.clone().into_iter().map(Ok::<_, SampleError>))
///     }
/// }
/// ```
pub trait Source: Send + Sync {
    /// Yield every regular file this source knows about.
    fn walk(
        &self,
        config: &crate::engine::WalkConfig,
    ) -> Box<dyn Iterator<Item = Result<PathBuf, SampleError>>>;
}

/// Decides whether a discovered file belongs in the index.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use sampcopy::Matcher;
///
/// struct LargeNames;
///
/// impl Matcher for LargeNames {
///     fn is_match(&self, path: &Path) -> bool {
///         path.to_string_lossy().contains("_large")
///     }
/// }
/// ```
pub trait Matcher: Send + Sync {
    /// Returns `true` if this file should be eligible for sampling.
    fn is_match(&self, path: &Path) -> bool;
}

// ---------------------------------------------------------------------------
// Built-in matchers
// ---------------------------------------------------------------------------

/// Matches every file. Used when no matcher is specified.
pub(crate) struct AllMatcher;

impl Matcher for AllMatcher {
    fn is_match(&self, _path: &Path) -> bool {
        true
    }
}

/// Matches files whose extension is one of `exts` (case-insensitive,
/// without the leading dot).
pub(crate) struct ExtensionMatcher {
    exts: Vec<String>,
}

impl ExtensionMatcher {
    pub(crate) fn new<I, S>(exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exts: exts
                .into_iter()
                .map(|e| {
                    let e: String = e.into();
                    e.trim_start_matches('.').to_lowercase()
                })
                .collect(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.exts.is_empty()
    }
}

impl Matcher for ExtensionMatcher {
    fn is_match(&self, path: &Path) -> bool {
        path.extension()
            .map(|e| {
                let e = e.to_string_lossy().to_lowercase();
                self.exts.iter().any(|x| *x == e)
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_matcher_ignores_case_and_dot() {
        let m = ExtensionMatcher::new([".JPG", "png"]);
        assert!(m.is_match(Path::new("a/b/cat.jpg")));
        assert!(m.is_match(Path::new("dog.PNG")));
        assert!(!m.is_match(Path::new("notes.txt")));
        assert!(!m.is_match(Path::new("README")));
    }
}
