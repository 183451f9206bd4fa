use std::fmt;

const WARN_PREFIX: &str = "[WARN] ";
const ERROR_PREFIX: &str = "[ERROR] ";
const FINISHED_MARKER: &str = "✔";
const FAILED_MARKER: &str = "✖";
const STARTED_MARKER: &str = "▶";

/// Severity of a console line, derived from its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Started,
    Finished,
    Failed,
}

/// An immutable console line. The level is never stored; it is read back
/// from the text prefix so a message is exactly what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogMessage(String);

impl LogMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn warning(text: impl fmt::Display) -> Self {
        Self(format!("{WARN_PREFIX}{text}"))
    }

    pub fn error(text: impl fmt::Display) -> Self {
        Self(format!("{ERROR_PREFIX}{text}"))
    }

    pub fn started() -> Self {
        Self(format!("{STARTED_MARKER} Downloading..."))
    }

    pub fn finished() -> Self {
        Self(format!("{FINISHED_MARKER} Finished"))
    }

    pub fn failed(description: impl fmt::Display) -> Self {
        Self(format!("{FAILED_MARKER} {description}"))
    }

    pub fn missing_input() -> Self {
        Self::failed("Missing URL or folder")
    }

    /// Formats one download progress report: `"{percent} | {speed} | ETA {eta}"`.
    pub fn progress(percent: &str, speed: &str, eta: &str) -> Self {
        Self(format!(
            "{} | {} | ETA {}",
            percent.trim(),
            speed.trim(),
            eta.trim()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn level(&self) -> LogLevel {
        let text = self.0.as_str();
        if text.starts_with(WARN_PREFIX) {
            LogLevel::Warning
        } else if text.starts_with(ERROR_PREFIX) {
            LogLevel::Error
        } else if text.starts_with(FINISHED_MARKER) {
            LogLevel::Finished
        } else if text.starts_with(FAILED_MARKER) {
            LogLevel::Failed
        } else if text.starts_with(STARTED_MARKER) {
            LogLevel::Started
        } else {
            LogLevel::Info
        }
    }

    /// True for the single success or failure line that closes a job.
    pub fn is_terminal(&self) -> bool {
        matches!(self.level(), LogLevel::Finished | LogLevel::Failed)
    }
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LogMessage {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for LogMessage {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}
