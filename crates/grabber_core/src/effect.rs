use std::path::PathBuf;

/// Side effects requested by [`crate::update`] and executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open the native folder picker.
    PickFolder,
    /// Hand the raw form inputs to the job runner, which validates them.
    StartJob { url: String, destination: PathBuf },
}
