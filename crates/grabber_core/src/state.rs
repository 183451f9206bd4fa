use std::path::PathBuf;
use std::sync::Arc;

use crate::view_model::AppViewModel;
use crate::{LogLevel, LogMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub text: String,
    pub level: LogLevel,
}

/// Append-only console contents, unbounded. Clones share the lines; a push
/// copies them only while another clone is alive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Console {
    lines: Arc<Vec<ConsoleLine>>,
}

impl Console {
    pub fn push(&mut self, message: LogMessage) {
        let level = message.level();
        Arc::make_mut(&mut self.lines).push(ConsoleLine {
            text: message.into_string(),
            level,
        });
    }

    pub fn lines(&self) -> &[ConsoleLine] {
        &self.lines
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    url: String,
    destination: String,
    /// Exact folder from the picker, used while the field still shows it.
    picked_folder: Option<PathBuf>,
    console: Console,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            url: self.url.clone(),
            destination: self.destination.clone(),
            console: self.console.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    /// Destination handed to the runner. A picked folder keeps its exact
    /// bytes even when the field only shows a lossy rendering of it.
    pub(crate) fn destination_path(&self) -> PathBuf {
        self.picked_folder
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.destination))
    }

    pub(crate) fn set_url(&mut self, url: String) {
        if self.url != url {
            self.url = url;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_destination(&mut self, destination: String) {
        if self.destination != destination {
            self.destination = destination;
            self.picked_folder = None;
            self.mark_dirty();
        }
    }

    pub(crate) fn pick_folder(&mut self, folder: PathBuf) {
        let shown = folder.display().to_string();
        if self.destination != shown {
            self.destination = shown;
            self.mark_dirty();
        }
        self.picked_folder = Some(folder);
    }

    pub(crate) fn append_logs(&mut self, messages: Vec<LogMessage>) {
        if messages.is_empty() {
            return;
        }
        for message in messages {
            self.console.push(message);
        }
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
