use std::fmt;
use std::sync::Arc;

use grabber_core::{LogMessage, LogSender};

use crate::template::OutputTemplate;
use crate::{FetchError, FetchOutput, ProgressStatus, ProgressUpdate};

/// Receives the fetch service's own log output.
pub trait FetchLogger: Send + Sync {
    fn debug(&self, msg: &str);
    fn info(&self, msg: &str);
    fn warning(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// Forwards fetch service output to the console queue using the
/// `[WARN] ` / `[ERROR] ` prefix convention.
#[derive(Debug, Clone)]
pub struct QueueLogger {
    tx: LogSender,
}

impl QueueLogger {
    pub fn new(tx: LogSender) -> Self {
        Self { tx }
    }
}

impl FetchLogger for QueueLogger {
    fn debug(&self, msg: &str) {
        self.tx.send(LogMessage::info(msg));
    }

    fn info(&self, msg: &str) {
        self.tx.send(LogMessage::info(msg));
    }

    fn warning(&self, msg: &str) {
        self.tx.send(LogMessage::warning(msg));
    }

    fn error(&self, msg: &str) {
        self.tx.send(LogMessage::error(msg));
    }
}

/// Called for every progress report, in the order the service emits them.
pub type ProgressHook = Arc<dyn Fn(&ProgressUpdate) + Send + Sync>;

/// Progress hook that prints `downloading` reports to the console and ignores the rest.
pub fn console_progress_hook(tx: LogSender) -> ProgressHook {
    Arc::new(move |update: &ProgressUpdate| {
        if update.status != ProgressStatus::Downloading {
            return;
        }
        tx.send(LogMessage::progress(
            update.percent_str.as_deref().unwrap_or(""),
            update.speed_str.as_deref().unwrap_or(""),
            update.eta_str.as_deref().unwrap_or(""),
        ));
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostProcessor {
    /// Keep only the audio stream, transcoded to `codec` at `quality`.
    ExtractAudio { codec: String, quality: String },
}

/// Configuration record handed to a [`FetchService`] for one download.
#[derive(Clone)]
pub struct FetchOptions {
    pub format: String,
    pub output_template: OutputTemplate,
    pub postprocessors: Vec<PostProcessor>,
    pub logger: Arc<dyn FetchLogger>,
    pub progress_hooks: Vec<ProgressHook>,
}

impl FetchOptions {
    pub fn report_progress(&self, update: &ProgressUpdate) {
        for hook in &self.progress_hooks {
            hook(update);
        }
    }
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("format", &self.format)
            .field("output_template", &self.output_template)
            .field("postprocessors", &self.postprocessors)
            .field("progress_hooks", &self.progress_hooks.len())
            .finish_non_exhaustive()
    }
}

/// The external collaborator that downloads and transcodes media.
///
/// `download` blocks the calling task until the service has finished or failed.
#[async_trait::async_trait]
pub trait FetchService: Send + Sync {
    async fn download(&self, url: &str, options: &FetchOptions)
        -> Result<FetchOutput, FetchError>;
}
