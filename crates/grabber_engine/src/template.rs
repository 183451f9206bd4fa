use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_PATTERN: &str = "%(title)s.%(ext)s";

/// Output path template: a destination directory plus a filename pattern
/// using the fetch service's `%(field)s` placeholders. Field expansion and
/// title sanitizing are left to the fetch service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTemplate {
    dir: PathBuf,
    pattern: String,
}

impl OutputTemplate {
    pub fn new(dir: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            pattern: pattern.into(),
        }
    }

    /// Full template as passed to the fetch service, e.g. `/tmp/out/%(title)s.%(ext)s`.
    /// The directory bytes are kept as-is.
    pub fn as_arg(&self) -> OsString {
        self.dir.join(&self.pattern).into_os_string()
    }
}
