//! Grabber core: job validation, console messages, the log queue and the
//! pure UI state machine.
mod effect;
mod job;
mod log_queue;
mod message;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use job::{Job, ValidationError};
pub use log_queue::{log_queue, LogRelay, LogSender, DEFAULT_POLL_INTERVAL};
pub use message::{LogLevel, LogMessage};
pub use msg::Msg;
pub use state::{AppState, Console, ConsoleLine};
pub use update::update;
pub use view_model::AppViewModel;
