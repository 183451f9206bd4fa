use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use grabber_core::{Job, LogMessage, LogSender};
use grabber_logging::{grab_error, grab_job, grab_warn};
use thiserror::Error;

use crate::fetch::{console_progress_hook, FetchOptions, FetchService, PostProcessor, QueueLogger};
use crate::persist::check_destination;
use crate::template::{OutputTemplate, DEFAULT_OUTPUT_PATTERN};
use crate::{FailureKind, FetchError, FetchOutput, JobId};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build worker runtime: {0}")]
    Runtime(io::Error),
    #[error("failed to spawn runner thread: {0}")]
    Thread(io::Error),
}

/// What every job asks of the fetch service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerSettings {
    pub format: String,
    pub output_pattern: String,
    pub audio_codec: String,
    pub audio_quality: String,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            format: "bestaudio/best".to_string(),
            output_pattern: DEFAULT_OUTPUT_PATTERN.to_string(),
            audio_codec: "mp3".to_string(),
            audio_quality: "320".to_string(),
        }
    }
}

impl RunnerSettings {
    /// Options for one job writing into `destination` and reporting to `log`.
    pub fn fetch_options(&self, destination: &Path, log: &LogSender) -> FetchOptions {
        FetchOptions {
            format: self.format.clone(),
            output_template: OutputTemplate::new(destination, self.output_pattern.clone()),
            postprocessors: vec![PostProcessor::ExtractAudio {
                codec: self.audio_codec.clone(),
                quality: self.audio_quality.clone(),
            }],
            logger: Arc::new(QueueLogger::new(log.clone())),
            progress_hooks: vec![console_progress_hook(log.clone())],
        }
    }
}

enum RunnerCommand {
    Start { job_id: JobId, job: Job },
}

/// Starts download jobs. Stateless between calls: each accepted job becomes
/// one detached task that nobody joins or cancels, and jobs started close
/// together run concurrently with their console output interleaved.
pub struct JobRunner {
    cmd_tx: mpsc::Sender<RunnerCommand>,
    log: LogSender,
    next_id: AtomicU64,
}

impl JobRunner {
    pub fn new(
        fetcher: Arc<dyn FetchService>,
        log: LogSender,
        settings: RunnerSettings,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("grabber-worker")
            .build()
            .map_err(EngineError::Runtime)?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let settings = Arc::new(settings);
        let task_log = log.clone();

        thread::Builder::new()
            .name("grabber-runner".to_string())
            .spawn(move || {
                // Ends when the runner is dropped; the runtime goes with it and
                // takes any unfinished jobs (and their child processes) down.
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        RunnerCommand::Start { job_id, job } => {
                            let fetcher = fetcher.clone();
                            let settings = settings.clone();
                            let log = task_log.clone();
                            runtime.spawn(async move {
                                run_job(fetcher.as_ref(), job_id, job, &settings, log).await;
                            });
                        }
                    }
                }
            })
            .map_err(EngineError::Thread)?;

        Ok(Self {
            cmd_tx,
            log,
            next_id: AtomicU64::new(1),
        })
    }

    /// Validates the inputs and starts one job. Invalid input produces a
    /// single error line and no work.
    pub fn start(&self, url: &str, destination: impl AsRef<Path>) -> Option<JobId> {
        let job = match Job::new(url, destination) {
            Ok(job) => job,
            Err(err) => {
                grab_warn!("Rejected job: {}", err);
                self.log.send(LogMessage::missing_input());
                return None;
            }
        };

        let job_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        grab_job!(
            "job {} started url={} destination={}",
            job_id,
            job.url,
            job.destination.display()
        );
        self.log.send(LogMessage::started());

        if self.cmd_tx.send(RunnerCommand::Start { job_id, job }).is_err() {
            grab_error!("job {} dropped: runner thread has exited", job_id);
            self.log.send(LogMessage::failed("job runner is not available"));
            return None;
        }
        Some(job_id)
    }
}

async fn run_job(
    fetcher: &dyn FetchService,
    job_id: JobId,
    job: Job,
    settings: &RunnerSettings,
    log: LogSender,
) {
    match execute(fetcher, &job, settings, &log).await {
        Ok(output) => {
            grab_job!("job {} finished files={:?}", job_id, output.files);
            log.send(LogMessage::finished());
        }
        Err(err) => {
            grab_warn!("job {} failed ({}): {}", job_id, err.kind, err.message);
            log.send(LogMessage::failed(&err));
        }
    }
}

async fn execute(
    fetcher: &dyn FetchService,
    job: &Job,
    settings: &RunnerSettings,
    log: &LogSender,
) -> Result<FetchOutput, FetchError> {
    check_destination(&job.destination)
        .map_err(|err| FetchError::new(FailureKind::Destination, err.to_string()))?;
    let options = settings.fetch_options(&job.destination, log);
    fetcher.download(&job.url, &options).await
}
