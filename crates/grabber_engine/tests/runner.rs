use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::thread;
use std::time::{Duration, Instant};

use grabber_core::{log_queue, LogLevel, LogMessage, LogRelay};
use grabber_engine::{
    FailureKind, FetchError, FetchOptions, FetchOutput, FetchService, JobRunner, PostProcessor,
    ProgressStatus, ProgressUpdate, RunnerSettings,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(grabber_logging::initialize_for_tests);
}

/// In-process stand-in for the fetch service.
struct StubFetcher {
    title: String,
    fail_with: Option<String>,
    delay: Duration,
    calls: AtomicUsize,
    created: Mutex<Vec<PathBuf>>,
    seen_options: Mutex<Vec<String>>,
}

impl StubFetcher {
    fn succeeding(title: &str) -> Self {
        Self {
            title: title.to_string(),
            fail_with: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
            seen_options: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::succeeding("unused")
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl FetchService for StubFetcher {
    async fn download(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<FetchOutput, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_options.lock().unwrap().push(format!("{options:?}"));
        options.logger.debug(&format!("[stub] {url}: Downloading webpage"));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if let Some(message) = &self.fail_with {
            options.logger.error(message);
            return Err(FetchError::new(FailureKind::ExitStatus(Some(1)), message.clone()));
        }

        for (percent, speed, eta) in [
            ("  5.0%", "1.00MiB/s", "00:19"),
            (" 50.0%", "2.00MiB/s", "00:05"),
            ("100.0%", "2.50MiB/s", "00:00"),
        ] {
            options.report_progress(&ProgressUpdate::downloading(percent, speed, eta));
        }
        options.report_progress(&ProgressUpdate::with_status(ProgressStatus::Finished));
        options.logger.warning("no subtitles");

        let codec = options
            .postprocessors
            .iter()
            .map(|PostProcessor::ExtractAudio { codec, .. }| codec.as_str())
            .next()
            .unwrap_or("m4a");
        let path = PathBuf::from(options.output_template.as_arg())
            .with_file_name(format!("{}.{codec}", self.title));
        fs::write(&path, b"ID3").map_err(|err| FetchError::new(FailureKind::Io, err.to_string()))?;
        self.created.lock().unwrap().push(path.clone());
        Ok(FetchOutput { files: vec![path] })
    }
}

/// Drains the relay like the UI timer until `terminals` terminal lines arrived.
fn drain_until_terminal(relay: &LogRelay, terminals: usize) -> Vec<LogMessage> {
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut seen = Vec::new();
    while Instant::now() < deadline {
        seen.extend(relay.drain());
        if seen.iter().filter(|m| m.is_terminal()).count() >= terminals {
            break;
        }
        thread::sleep(Duration::from_millis(10));
    }
    seen
}

fn texts(messages: &[LogMessage]) -> Vec<&str> {
    messages.iter().map(LogMessage::as_str).collect()
}

#[test]
fn blank_inputs_emit_one_error_and_start_nothing() {
    init_logging();
    let (tx, relay) = log_queue();
    let stub = Arc::new(StubFetcher::succeeding("x"));
    let runner = JobRunner::new(stub.clone(), tx, RunnerSettings::default()).unwrap();

    for (url, destination) in [("", "/tmp"), ("  ", "/tmp"), ("https://a", ""), ("https://a", "\t "), ("", "")] {
        assert_eq!(runner.start(url, destination), None);
        thread::sleep(Duration::from_millis(20));
        let drained = relay.drain();
        assert_eq!(texts(&drained), vec!["✖ Missing URL or folder"]);
    }

    thread::sleep(Duration::from_millis(100));
    assert_eq!(stub.calls(), 0);
    assert!(relay.drain().is_empty());
}

#[test]
fn successful_job_reports_progress_in_order_then_finished() {
    init_logging();
    let dest = TempDir::new().unwrap();
    let (tx, relay) = log_queue();
    let stub = Arc::new(StubFetcher::succeeding("Example Song"));
    let runner = JobRunner::new(stub.clone(), tx, RunnerSettings::default()).unwrap();

    let job_id = runner.start(
        "https://youtube.com/watch?v=abc",
        &dest.path().display().to_string(),
    );
    assert_eq!(job_id, Some(1));

    let seen = drain_until_terminal(&relay, 1);
    assert_eq!(
        texts(&seen),
        vec![
            "▶ Downloading...",
            "[stub] https://youtube.com/watch?v=abc: Downloading webpage",
            "5.0% | 1.00MiB/s | ETA 00:19",
            "50.0% | 2.00MiB/s | ETA 00:05",
            "100.0% | 2.50MiB/s | ETA 00:00",
            "[WARN] no subtitles",
            "✔ Finished",
        ]
    );

    let expected = dest.path().join("Example Song.mp3");
    assert_eq!(*stub.created.lock().unwrap(), vec![expected.clone()]);
    assert!(expected.is_file());
}

#[test]
fn jobs_request_best_audio_as_320k_mp3() {
    init_logging();
    let dest = TempDir::new().unwrap();
    let (tx, relay) = log_queue();
    let stub = Arc::new(StubFetcher::succeeding("t"));
    let runner = JobRunner::new(stub.clone(), tx, RunnerSettings::default()).unwrap();

    runner.start("https://youtube.com/watch?v=abc", &dest.path().display().to_string());
    drain_until_terminal(&relay, 1);

    let seen = stub.seen_options.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].contains("format: \"bestaudio/best\""), "{}", seen[0]);
    assert!(seen[0].contains("codec: \"mp3\""), "{}", seen[0]);
    assert!(seen[0].contains("quality: \"320\""), "{}", seen[0]);
    assert!(seen[0].contains("%(title)s.%(ext)s"), "{}", seen[0]);
}

#[test]
fn failing_job_reports_exactly_one_failure() {
    init_logging();
    let dest = TempDir::new().unwrap();
    let (tx, relay) = log_queue();
    let stub = Arc::new(StubFetcher::failing("[youtube] abc: Video unavailable"));
    let runner = JobRunner::new(stub.clone(), tx, RunnerSettings::default()).unwrap();

    runner.start("https://youtube.com/watch?v=abc", &dest.path().display().to_string());
    let mut seen = drain_until_terminal(&relay, 1);
    thread::sleep(Duration::from_millis(100));
    seen.extend(relay.drain());

    let failures: Vec<_> = seen.iter().filter(|m| m.level() == LogLevel::Failed).collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].as_str(), "✖ [youtube] abc: Video unavailable");
    assert!(!seen.iter().any(|m| m.level() == LogLevel::Finished));
    assert!(seen.contains(&LogMessage::error("[youtube] abc: Video unavailable")));
}

#[test]
fn missing_destination_is_a_job_error() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope");
    let (tx, relay) = log_queue();
    let stub = Arc::new(StubFetcher::succeeding("t"));
    let runner = JobRunner::new(stub.clone(), tx, RunnerSettings::default()).unwrap();

    assert!(runner
        .start("https://youtube.com/watch?v=abc", &missing.display().to_string())
        .is_some());
    let seen = drain_until_terminal(&relay, 1);

    assert_eq!(seen.first(), Some(&LogMessage::started()));
    let last = seen.last().unwrap();
    assert_eq!(last.level(), LogLevel::Failed);
    assert!(last.as_str().contains("does not exist"), "{last}");
    assert_eq!(stub.calls(), 0);
}

#[test]
fn overlapping_jobs_both_finish() {
    init_logging();
    let dest_a = TempDir::new().unwrap();
    let dest_b = TempDir::new().unwrap();
    let (tx, relay) = log_queue();
    let stub = Arc::new(StubFetcher::succeeding("same").with_delay(Duration::from_millis(150)));
    let runner = JobRunner::new(stub.clone(), tx, RunnerSettings::default()).unwrap();

    let first = runner.start("https://a.example/1", &dest_a.path().display().to_string());
    let second = runner.start("https://a.example/2", &dest_b.path().display().to_string());
    assert_eq!((first, second), (Some(1), Some(2)));

    let seen = drain_until_terminal(&relay, 2);
    let finished = seen.iter().filter(|m| m.level() == LogLevel::Finished).count();
    assert_eq!(finished, 2);
    assert_eq!(stub.calls(), 2);
    assert!(dest_a.path().join("same.mp3").is_file());
    assert!(dest_b.path().join("same.mp3").is_file());
}

#[test]
fn fetch_options_route_logger_and_hook_to_the_queue() {
    let (tx, relay) = log_queue();
    let options = RunnerSettings::default().fetch_options(&PathBuf::from("/music"), &tx);

    options.logger.info("plain");
    options.logger.warning("careful");
    options.logger.error("broken");
    options.report_progress(&ProgressUpdate::with_status(ProgressStatus::Error));
    options.report_progress(&ProgressUpdate::downloading(" 1.0%", "10KiB/s", "01:00"));

    assert_eq!(
        texts(&relay.drain()),
        vec![
            "plain",
            "[WARN] careful",
            "[ERROR] broken",
            "1.0% | 10KiB/s | ETA 01:00",
        ]
    );
    assert_eq!(
        options.output_template.as_arg(),
        std::ffi::OsString::from("/music/%(title)s.%(ext)s")
    );
}
