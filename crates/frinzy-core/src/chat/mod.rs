//! Chat domain module.
//!
//! - `message`: `Message`, `DeliveryStatus`, text validation
//! - `log`: ordered, de-duplicated local log
//! - `state`: per-chat state machine
//! - `repository`: message store and live channel traits

mod log;
mod message;
mod repository;
mod state;

pub use log::{LogEntry, MessageLog};
pub use message::{DeliveryStatus, Message, validate_text};
pub use repository::{LiveChannel, LiveEvent, MessageRepository, MessageStream};
pub use state::ChatState;
