//! Writes an LCS witness to disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

#[derive(thiserror::Error, Debug)]
pub enum EmitError {
    #[error("cannot write {}: {source}", .path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write `witness` followed by a newline to `path`, replacing any existing file.
///
/// The witness is staged in a temporary file beside `path` and renamed into
/// place, so a failed write leaves any previous file untouched.
pub fn write_witness<P: AsRef<Path>>(path: P, witness: &[u8]) -> Result<(), EmitError> {
    let path = path.as_ref();
    let unwritable = |source| EmitError::OutputUnwritable {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(unwritable)?;
    staged.write_all(witness).map_err(unwritable)?;
    staged.write_all(b"\n").map_err(unwritable)?;
    staged.flush().map_err(unwritable)?;

    if path.exists() {
        log::info!("overwriting {}", path.display());
    }
    staged
        .persist(path)
        .map(|_| ())
        .map_err(|error| unwritable(error.error))
}
