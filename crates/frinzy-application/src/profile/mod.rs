//! Profile application services.

mod service;
mod updater;

pub use service::ProfileService;
pub use updater::ProfileUpdater;
