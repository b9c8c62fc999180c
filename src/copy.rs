use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::CopyError;

/// Where a sampled file lands: `dest_dir` joined with the source's base name.
///
/// Sources sharing a base name from different subdirectories map to the same
/// destination.
pub fn destination_for(src: &Path, dest_dir: &Path) -> Result<PathBuf, CopyError> {
    src.file_name()
        .map(|name| dest_dir.join(name))
        .ok_or_else(|| CopyError::NoFileName(src.to_path_buf()))
}

/// Stream `src` into `dest` through buffered reader and writer, returning the
/// number of bytes written. `dest` is created or truncated.
///
/// Memory use is bounded by the buffer sizes, not the file size. Both handles
/// are closed on every exit path.
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64, CopyError> {
    let input = File::open(src).map_err(|source| CopyError::OpenSource {
        path: src.to_path_buf(),
        source,
    })?;

    let output = File::create(dest).map_err(|source| CopyError::CreateDest {
        path: dest.to_path_buf(),
        source,
    })?;

    let transfer = |source| CopyError::Transfer {
        path: dest.to_path_buf(),
        source,
    };

    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);
    let bytes = io::copy(&mut reader, &mut writer).map_err(transfer)?;
    writer.flush().map_err(transfer)?;

    Ok(bytes)
}
