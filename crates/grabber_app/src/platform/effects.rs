use std::sync::{mpsc, Arc};

use grabber_core::{Effect, LogSender, Msg};
use grabber_engine::{EngineError, JobRunner, YtDlpFetcher};
use grabber_logging::{grab_debug, grab_info};

use super::config::AppConfig;

/// Executes effects produced by `update`.
pub struct EffectRunner {
    runner: JobRunner,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, log: LogSender) -> Result<Self, EngineError> {
        let fetcher = Arc::new(YtDlpFetcher::new(config.ytdlp_settings()));
        let runner = JobRunner::new(fetcher, log, config.runner_settings())?;
        Ok(Self { runner })
    }

    pub fn enqueue(&self, effects: Vec<Effect>, msg_tx: &mpsc::Sender<Msg>) {
        for effect in effects {
            match effect {
                Effect::StartJob { url, destination } => {
                    grab_info!(
                        "StartJob url_len={} destination={:?}",
                        url.len(),
                        destination
                    );
                    // Result reaches the user through the log queue.
                    let _ = self.runner.start(&url, &destination);
                }
                Effect::PickFolder => {
                    let picked = rfd::FileDialog::new()
                        .set_title("Choose destination folder")
                        .pick_folder();
                    match picked {
                        Some(folder) => {
                            let _ = msg_tx.send(Msg::FolderPicked(folder));
                        }
                        None => grab_debug!("Folder picker cancelled"),
                    }
                }
            }
        }
    }
}
