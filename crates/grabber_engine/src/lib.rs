//! Grabber engine: the fetch service seam, its yt-dlp implementation and the
//! job runner that drives it.
mod fetch;
mod persist;
mod runner;
mod template;
mod types;
mod ytdlp;

pub use fetch::{
    console_progress_hook, FetchLogger, FetchOptions, FetchService, PostProcessor, ProgressHook,
    QueueLogger,
};
pub use persist::{check_destination, PersistError};
pub use runner::{EngineError, JobRunner, RunnerSettings};
pub use template::{OutputTemplate, DEFAULT_OUTPUT_PATTERN};
pub use types::{
    FailureKind, FetchError, FetchOutput, JobId, ProgressStatus, ProgressUpdate,
};
pub use ytdlp::{YtDlpFetcher, YtDlpSettings, PROGRESS_MARKER};
