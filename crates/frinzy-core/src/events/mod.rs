//! City meetups members can RSVP to.
//!
//! - `model`: `Event` and its attendee set
//! - `repository`: store trait with atomic attendance updates

mod model;
mod repository;

pub use model::Event;
pub use repository::EventRepository;
