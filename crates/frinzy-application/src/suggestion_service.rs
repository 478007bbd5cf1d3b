//! Fallback-safe access to the suggestion oracle.
//!
//! Neither method ever fails: an absent, slow or failing oracle yields the
//! fixed fallback values.

use std::sync::Arc;
use std::time::Duration;

use frinzy_core::config::OracleSettings;
use frinzy_core::oracle::{SuggestionOracle, fallback_avatar_url, fallback_icebreakers};
use frinzy_core::profile::{Hobby, Profile};
use frinzy_core::Result;
use frinzy_interaction::GeminiSuggestionOracle;
use tracing::{debug, warn};

pub struct SuggestionService {
    oracle: Option<Arc<dyn SuggestionOracle>>,
    timeout: Duration,
}

impl SuggestionService {
    pub fn new(oracle: Option<Arc<dyn SuggestionOracle>>, timeout: Duration) -> Self {
        Self { oracle, timeout }
    }

    /// Service that always answers with fallbacks.
    pub fn disabled() -> Self {
        Self::new(None, Duration::ZERO)
    }

    /// Wires the Gemini oracle when configured, otherwise fallbacks only.
    pub fn from_settings(settings: &OracleSettings) -> Result<Self> {
        let oracle = GeminiSuggestionOracle::from_settings(settings)?
            .map(|o| Arc::new(o) as Arc<dyn SuggestionOracle>);
        Ok(Self::new(oracle, Duration::from_millis(settings.timeout_ms)))
    }

    pub fn has_oracle(&self) -> bool {
        self.oracle.is_some()
    }

    pub async fn icebreakers(&self, viewer: &Profile, other: &Profile) -> Vec<String> {
        let Some(oracle) = &self.oracle else {
            return fallback_icebreakers();
        };
        match tokio::time::timeout(self.timeout, oracle.icebreakers(viewer, other)).await {
            Ok(Ok(lines)) if !lines.is_empty() => {
                debug!("[SuggestionService] {} icebreakers from oracle", lines.len());
                lines
            }
            Ok(Ok(_)) => {
                warn!("[SuggestionService] Oracle returned no icebreakers, using fallback");
                fallback_icebreakers()
            }
            Ok(Err(e)) => {
                warn!("[SuggestionService] Icebreakers unavailable: {}", e);
                fallback_icebreakers()
            }
            Err(_) => {
                warn!("[SuggestionService] Icebreakers timed out after {:?}", self.timeout);
                fallback_icebreakers()
            }
        }
    }

    pub async fn avatar(&self, hobbies: &[Hobby]) -> String {
        let Some(oracle) = &self.oracle else {
            return fallback_avatar_url(hobbies);
        };
        match tokio::time::timeout(self.timeout, oracle.avatar(hobbies)).await {
            Ok(Ok(url)) if !url.trim().is_empty() => url,
            Ok(Ok(_)) => fallback_avatar_url(hobbies),
            Ok(Err(e)) => {
                warn!("[SuggestionService] Avatar unavailable: {}", e);
                fallback_avatar_url(hobbies)
            }
            Err(_) => {
                warn!("[SuggestionService] Avatar timed out after {:?}", self.timeout);
                fallback_avatar_url(hobbies)
            }
        }
    }
}

impl Default for SuggestionService {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use frinzy_core::FrinzyError;

    struct FailingOracle;

    #[async_trait]
    impl SuggestionOracle for FailingOracle {
        async fn icebreakers(&self, _: &Profile, _: &Profile) -> Result<Vec<String>> {
            Err(FrinzyError::oracle_unavailable("down"))
        }

        async fn avatar(&self, _: &[Hobby]) -> Result<String> {
            Err(FrinzyError::oracle_unavailable("down"))
        }
    }

    /// Slow on icebreakers, instant on avatars.
    struct SlowOracle;

    #[async_trait]
    impl SuggestionOracle for SlowOracle {
        async fn icebreakers(&self, _: &Profile, _: &Profile) -> Result<Vec<String>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(vec!["late".to_string()])
        }

        async fn avatar(&self, _: &[Hobby]) -> Result<String> {
            Ok("https://example.com/avatar.png".to_string())
        }
    }

    #[tokio::test]
    async fn test_failing_oracle_falls_back() {
        let service = SuggestionService::new(Some(Arc::new(FailingOracle)), Duration::from_secs(1));
        let hobbies = vec![Hobby::new("1", "Gaming")];
        assert_eq!(
            service.avatar(&hobbies).await,
            "https://picsum.photos/seed/Gaming/512"
        );
    }

    #[tokio::test]
    async fn test_oracle_avatar_passes_through() {
        let service = SuggestionService::new(Some(Arc::new(SlowOracle)), Duration::from_millis(200));
        let hobbies = vec![Hobby::new("1", "Gaming")];
        assert_eq!(service.avatar(&hobbies).await, "https://example.com/avatar.png");
    }

    #[tokio::test]
    async fn test_disabled_service() {
        let service = SuggestionService::disabled();
        assert!(!service.has_oracle());
        assert_eq!(service.avatar(&[]).await, "https://picsum.photos/seed/frinzy/512");
    }
}
