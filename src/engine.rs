use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ignore::WalkBuilder;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::copy::{copy_file, destination_for};
use crate::error::{CopyError, SampleError};
use crate::index::FileIndex;
use crate::results::CopyReport;
use crate::sampler::Sampler;
use crate::traits::Source;

// ---------------------------------------------------------------------------
// WalkConfig
// ---------------------------------------------------------------------------

/// Traversal parameters passed from the builder to a [`Source`].
///
/// Callers configure these via the builder methods (`.max_depth()`,
/// `.follow_links()`).
#[derive(Debug, Clone, Default)]
pub struct WalkConfig {
    pub max_depth:    Option<usize>,
    pub follow_links: bool,
}

// ---------------------------------------------------------------------------
// DirSource
// ---------------------------------------------------------------------------

/// Recursive directory walk over a root path. The default [`Source`].
///
/// Every regular file is collected, hidden and git-ignored ones included.
/// A symlink whose target is a regular file is collected as well, whether or
/// not `follow_links` is set; that flag only controls descending into
/// symlinked directories. Entries are sorted by file name within each
/// directory so the index order is stable between runs over an unchanged
/// tree.
///
/// The root must be a directory. A missing root yields a single `NotFound`
/// and a root that is a file yields a single `NotADirectory`, so either way
/// the index ends up empty.
pub struct DirSource(pub PathBuf);

impl Source for DirSource {
    fn walk(&self, config: &WalkConfig) -> Box<dyn Iterator<Item = Result<PathBuf, SampleError>>> {
        let root = &self.0;
        if !root.exists() {
            return Box::new(std::iter::once(Err(SampleError::NotFound(root.clone()))));
        }
        if !root.is_dir() {
            return Box::new(std::iter::once(Err(SampleError::NotADirectory(root.clone()))));
        }

        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .ignore(false)
            .parents(false)
            .hidden(false)
            .follow_links(config.follow_links)
            .same_file_system(false)
            .max_depth(config.max_depth)
            .sort_by_file_name(|a, b| a.cmp(b));

        let walk = builder.build().filter_map(|res| match res {
            Ok(entry) => {
                let is_file = match entry.file_type() {
                    Some(ft) if ft.is_file()    => true,
                    // Unfollowed link: keep it when it resolves to a file
                    Some(ft) if ft.is_symlink() => fs::metadata(entry.path())
                        .map(|m| m.is_file())
                        .unwrap_or(false),
                    _ => false,
                };
                is_file.then(|| Ok(entry.into_path()))
            }
            Err(e) => Some(Err(map_ignore_error(e))),
        });

        Box::new(walk)
    }
}

// ---------------------------------------------------------------------------
// sample_and_copy()
// ---------------------------------------------------------------------------

/// Draw `count` files from `index` with replacement and copy each one into
/// `dest_dir`, using at most `workers` threads.
///
/// All draws are taken from `sampler` up front on the calling thread, so a
/// seeded sampler reproduces the same selection however tasks get scheduled.
/// An empty index fails with [`SampleError::EmptyIndex`] before any task is
/// launched. Individual copy failures are reported, not returned as `Err`.
pub fn sample_and_copy(
    index: &FileIndex,
    dest_dir: &Path,
    count: usize,
    sampler: &mut Sampler,
    workers: usize,
) -> Result<CopyReport, SampleError> {
    let draws = sampler.draws(index.len(), count)?;
    let mut report = dispatch(index, dest_dir, &draws, workers)?;
    report.seed = sampler.seed();
    report.index_len = index.len();
    Ok(report)
}

// ---------------------------------------------------------------------------
// dispatch()
// ---------------------------------------------------------------------------

/// Copy `index[d]` into `dest_dir` once for every `d` in `draws`.
///
/// Tasks run unordered on a dedicated pool of `workers` threads. A failing
/// task is logged and tallied, never retried, and never stops the others.
/// Returns once every task has finished.
///
/// Draws that collide on the same source file write the same destination
/// path; the last writer wins.
pub(crate) fn dispatch(
    index: &FileIndex,
    dest_dir: &Path,
    draws: &[usize],
    workers: usize,
) -> Result<CopyReport, SampleError> {
    if workers == 0 {
        return Err(SampleError::InvalidWorkerCount(workers));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("sampcopy-{i}"))
        .build()
        .map_err(|e| SampleError::ThreadPool(e.to_string()))?;

    let paths = index.paths();
    let start = Instant::now();

    let outcomes: Vec<Result<u64, CopyError>> = pool.install(|| {
        draws
            .par_iter()
            .map(|&d| {
                let src = &paths[d];
                let outcome = destination_for(src, dest_dir).and_then(|dest| copy_file(src, &dest));
                if let Err(err) = &outcome {
                    debug!(path = %err.path().display(), error = %err, "copy task failed");
                }
                outcome
            })
            .collect()
    });

    let report = CopyReport::tally(outcomes, start.elapsed());

    info!(
        attempted = report.attempted,
        succeeded = report.succeeded,
        failed    = report.failed,
        bytes     = report.bytes_copied,
        "batch complete"
    );

    Ok(report)
}

// ---------------------------------------------------------------------------
// Map ignore::Error to SampleError
// ---------------------------------------------------------------------------

fn map_ignore_error(e: ignore::Error) -> SampleError {
    match e {
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => match io_err.kind() {
                std::io::ErrorKind::PermissionDenied => SampleError::PermissionDenied(path),
                std::io::ErrorKind::NotFound         => SampleError::NotFound(path),
                _ => SampleError::Io { path, source: io_err },
            },
            other => map_ignore_error(other),
        },
        ignore::Error::WithDepth { err, .. } => map_ignore_error(*err),
        ignore::Error::Loop { child, .. } => SampleError::SymlinkLoop(child),
        ignore::Error::Io(io_err)         => SampleError::Io {
            path: PathBuf::new(),
            source: io_err,
        },
        other => SampleError::Source(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(root: &Path, config: &WalkConfig) -> Vec<PathBuf> {
        DirSource(root.to_path_buf())
            .walk(config)
            .filter_map(Result::ok)
            .collect()
    }

    #[test]
    fn walk_skips_directories_and_keeps_hidden_files() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("b.jpg"), "b").unwrap();
        fs::write(root.join(".hidden"), "h").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub").join("a.jpg"), "a").unwrap();

        let found = collect(root, &WalkConfig::default());

        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|p| p.is_file()));
        assert!(found.contains(&root.join(".hidden")));
        assert!(found.contains(&root.join("sub").join("a.jpg")));
    }

    #[test]
    fn walk_order_is_stable() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["z.txt", "m.txt", "a.txt"] {
            fs::write(tmp.path().join(name), name).unwrap();
        }

        let first = collect(tmp.path(), &WalkConfig::default());
        let second = collect(tmp.path(), &WalkConfig::default());

        assert_eq!(first, second);
        assert_eq!(first[0], tmp.path().join("a.txt"));
    }

    #[test]
    fn walk_honours_max_depth() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("top.txt"), "t").unwrap();
        fs::create_dir(tmp.path().join("deep")).unwrap();
        fs::write(tmp.path().join("deep").join("low.txt"), "l").unwrap();

        let config = WalkConfig { max_depth: Some(1), ..Default::default() };
        let found = collect(tmp.path(), &config);

        assert_eq!(found, vec![tmp.path().join("top.txt")]);
    }

    #[test]
    fn missing_root_yields_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");

        let items: Vec<_> = DirSource(missing.clone()).walk(&WalkConfig::default()).collect();

        assert_eq!(items.len(), 1);
        assert!(matches!(&items[0], Err(SampleError::NotFound(p)) if *p == missing));
    }

    #[test]
    fn file_root_is_not_a_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("single.jpg");
        fs::write(&file, "x").unwrap();

        let items: Vec<_> = DirSource(file.clone()).walk(&WalkConfig::default()).collect();

        assert_eq!(items.len(), 1);
        assert!(matches!(&items[0], Err(SampleError::NotADirectory(p)) if *p == file));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_indexed_with_or_without_follow() {
        use std::os::unix::fs::symlink;

        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("src");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.jpg"), "a").unwrap();
        fs::write(tmp.path().join("real.jpg"), "real").unwrap();
        symlink(tmp.path().join("real.jpg"), root.join("link.jpg")).unwrap();
        symlink(tmp.path().join("gone.jpg"), root.join("dangling.jpg")).unwrap();

        let outside = tmp.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("deep.jpg"), "d").unwrap();
        symlink(&outside, root.join("linked_dir")).unwrap();

        let plain = collect(&root, &WalkConfig::default());
        assert_eq!(plain, vec![root.join("a.jpg"), root.join("link.jpg")]);

        let followed = collect(&root, &WalkConfig { follow_links: true, ..Default::default() });
        assert_eq!(
            followed,
            vec![
                root.join("a.jpg"),
                root.join("link.jpg"),
                root.join("linked_dir").join("deep.jpg"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlink_loop_is_reported_and_walk_finishes() {
        use crate::traits::AllMatcher;
        use std::os::unix::fs::symlink;

        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("src");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("a.jpg"), "a").unwrap();
        fs::write(root.join("sub").join("b.jpg"), "b").unwrap();
        symlink(&root, root.join("sub").join("back")).unwrap();

        let config = WalkConfig { follow_links: true, ..Default::default() };
        let (index, errors) = FileIndex::build(&DirSource(root.clone()), &AllMatcher, &config);

        assert_eq!(index.paths(), &[root.join("a.jpg"), root.join("sub").join("b.jpg")]);
        assert!(errors.iter().any(|e| matches!(e, SampleError::SymlinkLoop(_))));
    }

    #[test]
    fn empty_index_launches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let index = FileIndex::from_paths(Vec::new());

        let err = sample_and_copy(&index, tmp.path(), 10, &mut Sampler::from_seed(1), 4).unwrap_err();

        assert!(matches!(err, SampleError::EmptyIndex));
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn seeded_batch_copies_the_drawn_files() {
        let tmp = tempfile::tempdir().unwrap();
        let src_dir = tmp.path().join("src");
        let dest = tmp.path().join("dest");
        fs::create_dir(&src_dir).unwrap();
        fs::create_dir(&dest).unwrap();

        let names = ["a.txt", "b.txt", "c.txt", "d.txt", "e.txt"];
        for name in names {
            fs::write(src_dir.join(name), name).unwrap();
        }
        let index = FileIndex::from_paths(names.iter().map(|n| src_dir.join(n)).collect());

        let expected = Sampler::from_seed(99).draws(index.len(), 3).unwrap();
        let report = sample_and_copy(&index, &dest, 3, &mut Sampler::from_seed(99), 2).unwrap();

        assert_eq!(report.seed, 99);
        assert_eq!(report.index_len, 5);
        assert_eq!(report.succeeded, 3);
        for d in expected {
            assert_eq!(fs::read_to_string(dest.join(names[d])).unwrap(), names[d]);
        }
    }

    #[test]
    fn dispatch_rejects_zero_workers() {
        let index = FileIndex::from_paths(vec![PathBuf::from("a")]);
        let err = dispatch(&index, Path::new("."), &[0], 0).unwrap_err();
        assert!(matches!(err, SampleError::InvalidWorkerCount(0)));
    }

    #[test]
    fn dispatch_with_no_draws_copies_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("a.jpg");
        fs::write(&src, "aaaa").unwrap();
        let dest = tmp.path().join("out");
        fs::create_dir(&dest).unwrap();

        let index = FileIndex::from_paths(vec![src]);
        let report = dispatch(&index, &dest, &[], 2).unwrap();

        assert_eq!(report.attempted, 0);
        assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
    }
}
