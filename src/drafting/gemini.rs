use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;

use super::{parse_draft_reply, Draft, DraftError, DraftRequest, DraftingService};

/// Client for Gemini's `generateContent` REST endpoint.
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, joined across parts.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl GeminiClient {
    pub fn new(settings: &Settings) -> Result<Self, DraftError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: settings.api_key().map(str::to_string),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Send the prompt and decode the drafted summary and setlist.
    pub async fn generate(&self, request: &DraftRequest) -> Result<Draft, DraftError> {
        let api_key = self.api_key.as_deref().ok_or(DraftError::MissingCredential)?;
        let prompt = request.prompt();
        let body = GenerateContentRequest {
            contents: [Content {
                parts: [TextPart { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        log::debug!("requesting draft from model {}", self.model);
        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DraftError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GenerateContentResponse = response.json().await?;
        let text = envelope.text().ok_or(DraftError::EmptyResponse)?;
        parse_draft_reply(&text)
    }
}

impl DraftingService for GeminiClient {
    fn draft(&self, request: &DraftRequest) -> Result<Draft, DraftError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(DraftError::Runtime)?;
        runtime.block_on(self.generate(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_text_joins_parts_of_first_candidate() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"{\"summary\":"},{"text":"\"x\"}"}]}}]}"#;
        let envelope: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.text().as_deref(), Some("{\"summary\":\"x\"}"));
    }

    #[test]
    fn envelope_without_candidates_has_no_text() {
        let envelope: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(envelope.text().is_none());
    }

    #[test]
    fn request_body_uses_api_field_names() {
        let body = GenerateContentRequest {
            contents: [Content {
                parts: [TextPart { text: "oi" }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "oi");
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn missing_key_fails_without_network() {
        let client = GeminiClient::new(&Settings::default()).unwrap();
        let request = DraftRequest::default();
        assert!(matches!(
            client.draft(&request),
            Err(DraftError::MissingCredential)
        ));
    }

    #[test]
    fn url_targets_the_configured_model() {
        let settings = Settings {
            endpoint: "http://localhost:9/v1beta/".into(),
            model: "m".into(),
            ..Settings::default()
        };
        let client = GeminiClient::new(&settings).unwrap();
        assert_eq!(client.url(), "http://localhost:9/v1beta/models/m:generateContent");
    }
}
