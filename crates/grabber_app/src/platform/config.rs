use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use grabber_core::DEFAULT_POLL_INTERVAL;
use grabber_engine::{RunnerSettings, YtDlpSettings};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

/// Optional, read-only settings file in the working directory.
pub const CONFIG_FILENAME: &str = "grabber.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ytdlp_program: PathBuf,
    pub ytdlp_args: Vec<String>,
    pub ffmpeg_location: Option<PathBuf>,
    pub format: String,
    pub output_template: String,
    pub audio_codec: String,
    pub audio_quality: String,
    pub poll_interval_ms: u64,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let ytdlp = YtDlpSettings::default();
        let runner = RunnerSettings::default();
        Self {
            ytdlp_program: ytdlp.program,
            ytdlp_args: ytdlp.program_args,
            ffmpeg_location: ytdlp.ffmpeg_location,
            format: runner.format,
            output_template: runner.output_pattern,
            audio_codec: runner.audio_codec,
            audio_quality: runner.audio_quality,
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn ytdlp_settings(&self) -> YtDlpSettings {
        YtDlpSettings {
            program: self.ytdlp_program.clone(),
            program_args: self.ytdlp_args.clone(),
            ffmpeg_location: self.ffmpeg_location.clone(),
        }
    }

    pub fn runner_settings(&self) -> RunnerSettings {
        RunnerSettings {
            format: self.format.clone(),
            output_pattern: self.output_template.clone(),
            audio_codec: self.audio_codec.clone(),
            audio_quality: self.audio_quality.clone(),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// Loads the settings file. A missing file is not an error and yields defaults.
pub(crate) fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
