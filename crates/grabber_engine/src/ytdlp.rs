//! Fetch service backed by the `yt-dlp` command line program.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use grabber_logging::{grab_debug, grab_warn};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::fetch::{FetchOptions, FetchService, PostProcessor};
use crate::{FailureKind, FetchError, FetchOutput, ProgressUpdate};

/// Prefix of stdout lines carrying a JSON progress report.
pub const PROGRESS_MARKER: &str = "__grabber_progress__ ";

const ERROR_PREFIX: &str = "ERROR: ";
const WARNING_PREFIX: &str = "WARNING: ";
const EXTRACT_DESTINATION: &str = "[ExtractAudio] Destination: ";
const EXTRACT_SKIPPED: &str = "[ExtractAudio] Not converting audio ";
const DOWNLOAD_DESTINATION: &str = "[download] Destination: ";
const ALREADY_DOWNLOADED: &str = " has already been downloaded";

#[derive(Debug, Clone)]
pub struct YtDlpSettings {
    /// Program to run, `yt-dlp` from `PATH` by default.
    pub program: PathBuf,
    /// Arguments placed before the generated ones, e.g. `["-m", "yt_dlp"]` for a python program.
    pub program_args: Vec<String>,
    /// Directory holding `ffmpeg`/`ffprobe`, when not on `PATH`.
    pub ffmpeg_location: Option<PathBuf>,
}

impl Default for YtDlpSettings {
    fn default() -> Self {
        Self {
            program: PathBuf::from("yt-dlp"),
            program_args: Vec::new(),
            ffmpeg_location: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct YtDlpFetcher {
    settings: YtDlpSettings,
}

impl YtDlpFetcher {
    pub fn new(settings: YtDlpSettings) -> Self {
        Self { settings }
    }

    /// Arguments for one download, excluding `program_args`.
    pub fn build_args(&self, url: &str, options: &FetchOptions) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--newline".into(),
            "--progress-template".into(),
            format!("download:{PROGRESS_MARKER}%(progress)j").into(),
            "-f".into(),
            options.format.clone().into(),
            "-o".into(),
            options.output_template.as_arg(),
        ];

        for postprocessor in &options.postprocessors {
            match postprocessor {
                PostProcessor::ExtractAudio { codec, quality } => {
                    args.extend([
                        OsString::from("-x"),
                        OsString::from("--audio-format"),
                        OsString::from(codec),
                        OsString::from("--audio-quality"),
                        OsString::from(audio_quality_arg(quality)),
                    ]);
                }
            }
        }

        if let Some(location) = &self.settings.ffmpeg_location {
            args.push("--ffmpeg-location".into());
            args.push(location.clone().into_os_string());
        }

        // A URL starting with '-' must not be read as an option.
        args.push("--".into());
        args.push(url.into());
        args
    }
}

/// Bitrates (above 10) get a `K` suffix; 0..=10 are VBR levels and pass through.
fn audio_quality_arg(quality: &str) -> String {
    match quality.trim().parse::<u32>() {
        Ok(value) if value > 10 => format!("{value}K"),
        _ => quality.trim().to_string(),
    }
}

#[async_trait::async_trait]
impl FetchService for YtDlpFetcher {
    async fn download(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<FetchOutput, FetchError> {
        let args = self.build_args(url, options);
        grab_debug!(
            "Running {} {:?} {:?}",
            self.settings.program.display(),
            self.settings.program_args,
            args
        );

        let mut child = Command::new(&self.settings.program)
            .args(&self.settings.program_args)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| {
                FetchError::new(
                    FailureKind::Launch,
                    format!("failed to launch {}: {err}", self.settings.program.display()),
                )
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| FetchError::new(FailureKind::Io, "stdout was not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| FetchError::new(FailureKind::Io, "stderr was not captured"))?;

        let (line_tx, mut line_rx) = mpsc::unbounded_channel();
        let stderr_tx = line_tx.clone();
        let mut router = OutputRouter::new(options);
        let consume = async {
            while let Some(line) = line_rx.recv().await {
                router.route(line);
            }
        };
        tokio::join!(
            pump_lines(stdout, StreamLine::Stdout, line_tx),
            pump_lines(stderr, StreamLine::Stderr, stderr_tx),
            consume,
        );

        let status = child.wait().await.map_err(|err| {
            FetchError::new(FailureKind::Io, format!("failed waiting for download: {err}"))
        })?;

        if !status.success() {
            let message = router
                .last_error
                .unwrap_or_else(|| format!("{} failed ({status})", program_name(&self.settings.program)));
            return Err(FetchError::new(FailureKind::ExitStatus(status.code()), message));
        }

        Ok(FetchOutput {
            files: router.files,
        })
    }
}

fn program_name(program: &Path) -> String {
    program
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string())
}

#[derive(Debug)]
enum StreamLine {
    Stdout(String),
    Stderr(String),
}

/// Reads lines lossily so a stray non-UTF-8 title cannot stall the job.
async fn pump_lines<R>(reader: R, wrap: fn(String) -> StreamLine, tx: mpsc::UnboundedSender<StreamLine>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf)
                    .trim_end_matches(['\r', '\n'])
                    .to_string();
                if tx.send(wrap(line)).is_err() {
                    break;
                }
            }
            Err(err) => {
                grab_warn!("Failed to read download output: {}", err);
                break;
            }
        }
    }
}

enum Destination {
    Downloaded(PathBuf),
    Converted(PathBuf),
}

/// Turns raw program output into logger calls and progress hook calls.
struct OutputRouter<'a> {
    options: &'a FetchOptions,
    files: Vec<PathBuf>,
    last_error: Option<String>,
}

impl<'a> OutputRouter<'a> {
    fn new(options: &'a FetchOptions) -> Self {
        Self {
            options,
            files: Vec::new(),
            last_error: None,
        }
    }

    fn route(&mut self, line: StreamLine) {
        match line {
            StreamLine::Stdout(line) => self.route_stdout(&line),
            StreamLine::Stderr(line) => self.route_stderr(&line),
        }
    }

    fn route_stdout(&mut self, line: &str) {
        if let Some(payload) = line.strip_prefix(PROGRESS_MARKER) {
            match serde_json::from_str::<ProgressUpdate>(payload) {
                Ok(update) => self.options.report_progress(&update),
                Err(err) => {
                    grab_debug!("Unparsable progress report ({}): {}", err, payload);
                    self.options.logger.debug(line);
                }
            }
            return;
        }
        if line.trim().is_empty() {
            return;
        }
        match parse_destination(line) {
            Some(Destination::Downloaded(path)) => self.files.push(path),
            // The converted file replaces the download it came from.
            Some(Destination::Converted(path)) => {
                self.files.pop();
                self.files.push(path);
            }
            None => {}
        }
        self.options.logger.debug(line);
    }

    fn route_stderr(&mut self, line: &str) {
        if let Some(message) = line.strip_prefix(ERROR_PREFIX) {
            self.last_error = Some(message.to_string());
            self.options.logger.error(message);
        } else if let Some(message) = line.strip_prefix(WARNING_PREFIX) {
            self.options.logger.warning(message);
        } else if !line.trim().is_empty() {
            self.options.logger.debug(line);
        }
    }
}

fn parse_destination(line: &str) -> Option<Destination> {
    if let Some(path) = line.strip_prefix(EXTRACT_DESTINATION) {
        return Some(Destination::Converted(PathBuf::from(path.trim())));
    }
    if let Some(rest) = line.strip_prefix(EXTRACT_SKIPPED) {
        let path = rest.split("; file is already").next().unwrap_or(rest);
        return Some(Destination::Converted(PathBuf::from(path.trim())));
    }
    if let Some(path) = line.strip_prefix(DOWNLOAD_DESTINATION) {
        return Some(Destination::Downloaded(PathBuf::from(path.trim())));
    }
    if let Some(rest) = line.strip_prefix("[download] ") {
        if let Some(path) = rest.strip_suffix(ALREADY_DOWNLOADED) {
            return Some(Destination::Downloaded(PathBuf::from(path.trim())));
        }
    }
    None
}
