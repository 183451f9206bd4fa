use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

pub type JobId = u64;

/// Value of the `status` key in a progress report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ProgressStatus {
    Downloading,
    Finished,
    Error,
    Other(String),
}

impl From<String> for ProgressStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "downloading" => ProgressStatus::Downloading,
            "finished" => ProgressStatus::Finished,
            "error" => ProgressStatus::Error,
            _ => ProgressStatus::Other(raw),
        }
    }
}

/// One progress report from the fetch service, mirroring its progress
/// dictionary. The `_*_str` fields are preformatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProgressUpdate {
    pub status: ProgressStatus,
    #[serde(rename = "_percent_str", default)]
    pub percent_str: Option<String>,
    #[serde(rename = "_speed_str", default)]
    pub speed_str: Option<String>,
    #[serde(rename = "_eta_str", default)]
    pub eta_str: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub downloaded_bytes: Option<u64>,
    #[serde(default)]
    pub total_bytes: Option<u64>,
}

impl ProgressUpdate {
    pub fn downloading(percent: &str, speed: &str, eta: &str) -> Self {
        Self {
            status: ProgressStatus::Downloading,
            percent_str: Some(percent.to_string()),
            speed_str: Some(speed.to_string()),
            eta_str: Some(eta.to_string()),
            filename: None,
            downloaded_bytes: None,
            total_bytes: None,
        }
    }

    pub fn with_status(status: ProgressStatus) -> Self {
        Self {
            status,
            percent_str: None,
            speed_str: None,
            eta_str: None,
            filename: None,
            downloaded_bytes: None,
            total_bytes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchOutput {
    /// Final files reported by the fetch service, in the order it reported them.
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

// Only the message reaches the console; the kind is for diagnostics.
impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Destination,
    Launch,
    Io,
    ExitStatus(Option<i32>),
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Destination => write!(f, "destination unusable"),
            FailureKind::Launch => write!(f, "launch failed"),
            FailureKind::Io => write!(f, "io error"),
            FailureKind::ExitStatus(Some(code)) => write!(f, "exit status {code}"),
            FailureKind::ExitStatus(None) => write!(f, "terminated by signal"),
        }
    }
}
