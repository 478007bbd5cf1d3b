//! Application layer for Frinzy.
//!
//! Use cases that coordinate the domain core with the store, the live channel
//! and the suggestion oracle. State that the UI used to keep in ambient
//! contexts (onboarding draft, discovery cursor, open chat) lives in explicit
//! session objects owned by the caller.

pub mod chat;
pub mod context;
pub mod decision_recorder;
pub mod discovery_session;
pub mod events;
pub mod onboarding;
pub mod profile;
pub mod suggestion_service;

pub use chat::{ChatSession, ChatSynchronizer, LiveSubscription};
pub use context::AppContext;
pub use decision_recorder::DecisionRecorder;
pub use discovery_session::{DiscoverySession, DiscoveryUseCase};
pub use events::EventService;
pub use onboarding::OnboardingSession;
pub use profile::{ProfileService, ProfileUpdater};
pub use suggestion_service::SuggestionService;
