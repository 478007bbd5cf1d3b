//! Service wiring.

use std::sync::Arc;

use frinzy_core::config::RootConfig;
use frinzy_core::profile::ProfileRepository;
use frinzy_infrastructure::{BroadcastLiveChannel, InMemoryRecordStore};

use crate::chat::ChatSynchronizer;
use crate::decision_recorder::DecisionRecorder;
use crate::discovery_session::DiscoveryUseCase;
use crate::events::EventService;
use crate::onboarding::OnboardingSession;
use crate::profile::ProfileService;
use crate::suggestion_service::SuggestionService;

/// Every use case over one record store and live channel.
pub struct AppContext {
    pub config: RootConfig,
    pub store: Arc<InMemoryRecordStore>,
    pub live: Arc<BroadcastLiveChannel>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub suggestions: Arc<SuggestionService>,
    pub recorder: Arc<DecisionRecorder>,
    pub discovery: DiscoveryUseCase,
    pub chat: ChatSynchronizer,
    pub profile_service: ProfileService,
    pub events: EventService,
}

impl AppContext {
    /// Everything held in memory.
    pub fn in_memory(config: RootConfig, suggestions: SuggestionService) -> Self {
        let live = Arc::new(BroadcastLiveChannel::new(config.chat.live_buffer));
        let store = Arc::new(InMemoryRecordStore::with_live_channel(live.clone()));
        Self::assemble(config, store.clone(), live, store, suggestions)
    }

    /// Profiles from `profiles`, everything else in memory.
    pub fn with_profile_store(
        config: RootConfig,
        profiles: Arc<dyn ProfileRepository>,
        suggestions: SuggestionService,
    ) -> Self {
        let live = Arc::new(BroadcastLiveChannel::new(config.chat.live_buffer));
        let store = Arc::new(InMemoryRecordStore::with_live_channel(live.clone()));
        Self::assemble(config, store, live, profiles, suggestions)
    }

    fn assemble(
        config: RootConfig,
        store: Arc<InMemoryRecordStore>,
        live: Arc<BroadcastLiveChannel>,
        profiles: Arc<dyn ProfileRepository>,
        suggestions: SuggestionService,
    ) -> Self {
        let suggestions = Arc::new(suggestions);
        let recorder = Arc::new(DecisionRecorder::new(
            profiles.clone(),
            store.clone(),
            store.clone(),
        ));
        let discovery = DiscoveryUseCase::new(profiles.clone(), recorder.clone());
        let chat = ChatSynchronizer::new(
            store.clone(),
            store.clone(),
            live.clone(),
            config.chat.clone(),
        );
        let profile_service = ProfileService::new(
            profiles.clone(),
            suggestions.clone(),
            config.onboarding.clone(),
        );
        let events = EventService::new(store.clone(), profiles.clone());

        Self {
            config,
            store,
            live,
            profiles,
            suggestions,
            recorder,
            discovery,
            chat,
            profile_service,
            events,
        }
    }

    /// Starts onboarding for `identity_id`.
    pub fn onboarding(&self, identity_id: impl Into<String>) -> OnboardingSession {
        OnboardingSession::new(
            identity_id,
            self.profiles.clone(),
            self.config.onboarding.clone(),
        )
    }
}
