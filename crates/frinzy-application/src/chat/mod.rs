//! Chat application services.
//!
//! - `synchronizer`: history, live feed, opening sessions
//! - `session`: per-chat state machine with optimistic sends
//! - `subscription`: cancellable live feed handle

mod session;
mod subscription;
mod synchronizer;

pub use session::ChatSession;
pub use subscription::LiveSubscription;
pub use synchronizer::ChatSynchronizer;
