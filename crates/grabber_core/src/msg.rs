use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL field.
    UrlEdited(String),
    /// User edited the destination folder field.
    DestinationEdited(String),
    /// User clicked the folder picker button.
    BrowseClicked,
    /// Folder picker returned a selection.
    FolderPicked(PathBuf),
    /// User clicked Download.
    DownloadClicked,
    /// Relay tick delivered messages from the log queue.
    LogsDrained(Vec<crate::LogMessage>),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
