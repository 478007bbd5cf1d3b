//! Gemini-backed suggestion oracle.
//!
//! Icebreakers use `generateContent` with a JSON response schema; avatars use
//! the Imagen `predict` endpoint and come back as `data:` URLs. Every failure
//! surfaces as `OracleUnavailable`.

use std::time::Duration;

use async_trait::async_trait;
use frinzy_core::config::OracleSettings;
use frinzy_core::oracle::SuggestionOracle;
use frinzy_core::profile::{Hobby, Profile};
use frinzy_core::{FrinzyError, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::prompts::{avatar_prompt, icebreaker_prompt};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MAX_ICEBREAKERS: usize = 3;

#[derive(Clone)]
pub struct GeminiSuggestionOracle {
    client: Client,
    api_key: String,
    model: String,
    image_model: String,
}

impl GeminiSuggestionOracle {
    pub fn new(api_key: impl Into<String>, settings: &OracleSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(|e| FrinzyError::oracle_unavailable(format!("http client: {}", e)))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: settings.model.clone(),
            image_model: settings.image_model.clone(),
        })
    }

    /// Builds an oracle when enabled and the key variable is set.
    ///
    /// Returns `None` otherwise; callers then use the fixed fallbacks.
    pub fn from_settings(settings: &OracleSettings) -> Result<Option<Self>> {
        if !settings.enabled {
            debug!("[GeminiOracle] Disabled by configuration");
            return Ok(None);
        }
        match std::env::var(&settings.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Self::new(key, settings).map(Some),
            _ => {
                warn!(
                    "[GeminiOracle] {} not set, suggestions fall back to defaults",
                    settings.api_key_env
                );
                Ok(None)
            }
        }
    }

    async fn post<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        model: &str,
        method: &str,
        body: &B,
    ) -> Result<R> {
        let url = format!("{}/{}:{}?key={}", BASE_URL, model, method, self.api_key);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| FrinzyError::oracle_unavailable(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| FrinzyError::oracle_unavailable(format!("malformed response: {}", e)))
    }
}

#[async_trait]
impl SuggestionOracle for GeminiSuggestionOracle {
    async fn icebreakers(&self, viewer: &Profile, other: &Profile) -> Result<Vec<String>> {
        let prompt = icebreaker_prompt(viewer, other)?;
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "icebreakers": { "type": "ARRAY", "items": { "type": "STRING" } }
                    }
                }
            }
        });

        let response: GenerateContentResponse =
            self.post(&self.model, "generateContent", &body).await?;
        let lines = parse_icebreakers(response)?;
        debug!("[GeminiOracle] Generated {} icebreakers", lines.len());
        Ok(lines)
    }

    async fn avatar(&self, hobbies: &[Hobby]) -> Result<String> {
        let body = json!({
            "instances": [{ "prompt": avatar_prompt(hobbies)? }],
            "parameters": {
                "sampleCount": 1,
                "aspectRatio": "1:1",
                "outputOptions": { "mimeType": "image/jpeg" }
            }
        });

        let response: PredictResponse = self.post(&self.image_model, "predict", &body).await?;
        response
            .predictions
            .into_iter()
            .find_map(|p| p.bytes_base64_encoded)
            .filter(|b| !b.is_empty())
            .map(|b| format!("data:image/jpeg;base64,{}", b))
            .ok_or_else(|| FrinzyError::oracle_unavailable("no image in response"))
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct IcebreakerPayload {
    icebreakers: Vec<String>,
}

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn parse_icebreakers(response: GenerateContentResponse) -> Result<Vec<String>> {
    let text = response
        .candidates
        .and_then(|mut c| c.pop())
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
        .ok_or_else(|| FrinzyError::oracle_unavailable("no text in response"))?;

    let payload: IcebreakerPayload = serde_json::from_str(&text)
        .map_err(|e| FrinzyError::oracle_unavailable(format!("unexpected icebreaker payload: {}", e)))?;

    let lines: Vec<String> = payload
        .icebreakers
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .take(MAX_ICEBREAKERS)
        .collect();
    if lines.is_empty() {
        return Err(FrinzyError::oracle_unavailable("empty icebreaker list"));
    }
    Ok(lines)
}

fn map_http_error(status: StatusCode, body: &str) -> FrinzyError {
    let detail = serde_json::from_str::<ErrorWrapper>(body)
        .map(|w| match (w.error.status, w.error.message) {
            (Some(s), Some(m)) => format!("{}: {}", s, m),
            (_, Some(m)) => m,
            (Some(s), None) => s,
            (None, None) => body.to_string(),
        })
        .unwrap_or_else(|_| body.to_string());
    FrinzyError::oracle_unavailable(format!("HTTP {}: {}", status.as_u16(), detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(text: &str) -> GenerateContentResponse {
        serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_icebreakers_caps_and_trims() {
        let parsed = parse_icebreakers(response(
            r#"{"icebreakers": [" a ", "", "b", "c", "d"]}"#,
        ))
        .unwrap();
        assert_eq!(parsed, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_icebreakers_rejects_bad_payloads() {
        assert!(matches!(
            parse_icebreakers(response("not json")),
            Err(FrinzyError::OracleUnavailable(_))
        ));
        assert!(parse_icebreakers(response(r#"{"icebreakers": []}"#)).is_err());
        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(parse_icebreakers(empty).is_err());
    }

    #[test]
    fn test_map_http_error() {
        let err = map_http_error(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error": {"code": 429, "message": "slow down", "status": "RESOURCE_EXHAUSTED"}}"#,
        );
        assert_eq!(
            err,
            FrinzyError::OracleUnavailable("HTTP 429: RESOURCE_EXHAUSTED: slow down".to_string())
        );
    }

    #[test]
    fn test_disabled_settings_yield_none() {
        let settings = OracleSettings {
            enabled: false,
            ..OracleSettings::default()
        };
        assert!(GeminiSuggestionOracle::from_settings(&settings).unwrap().is_none());
    }

    #[test]
    fn test_missing_key_yields_none() {
        let settings = OracleSettings {
            api_key_env: "FRINZY_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..OracleSettings::default()
        };
        assert!(GeminiSuggestionOracle::from_settings(&settings).unwrap().is_none());
    }
}
