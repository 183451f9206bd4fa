use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing URL")]
    MissingUrl,
    #[error("missing destination folder")]
    MissingDestination,
}

/// One download-and-convert request. Built from trimmed form inputs and
/// discarded once a worker has picked it up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub url: String,
    pub destination: PathBuf,
}

impl Job {
    /// Surrounding whitespace is trimmed from the URL and, when it is valid
    /// UTF-8, from the destination. Other destinations are kept byte for byte.
    pub fn new(url: &str, destination: impl AsRef<Path>) -> Result<Self, ValidationError> {
        let url = url.trim();
        let destination = destination.as_ref();
        let destination = match destination.to_str() {
            Some(text) => PathBuf::from(text.trim()),
            None => destination.to_path_buf(),
        };
        if url.is_empty() {
            return Err(ValidationError::MissingUrl);
        }
        if destination.as_os_str().is_empty() {
            return Err(ValidationError::MissingDestination);
        }
        Ok(Self {
            url: url.to_string(),
            destination,
        })
    }
}
