use std::fs;
use std::io;
use std::path::Path;

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("destination folder does not exist: {0}")]
    Missing(String),
    #[error("destination is not a folder: {0}")]
    NotADirectory(String),
    #[error("destination folder is not writable: {0}")]
    NotWritable(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Checks that `dir` is an existing, writable directory. Never creates it.
pub fn check_destination(dir: &Path) -> Result<(), PersistError> {
    let meta = match fs::metadata(dir) {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(PersistError::Missing(dir.display().to_string()));
        }
        Err(err) => return Err(PersistError::Io(err)),
    };
    if !meta.is_dir() {
        return Err(PersistError::NotADirectory(dir.display().to_string()));
    }
    // Writability probe: the temp file is removed on drop.
    NamedTempFile::new_in(dir)
        .map_err(|e| PersistError::NotWritable(format!("{}: {e}", dir.display())))?;
    Ok(())
}
