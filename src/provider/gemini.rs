//! Gemini `generateContent` provider.
//!
//! Response structs keep the fields the API documents even when only the
//! text is read, so a future caller can inspect finish reasons without a
//! breaking change.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{
    GenerationError, GenerationPrompt, HttpClient, HttpClientConfig, TextGenerator,
};
use crate::provider::{ApiKey, constants::gemini};

/// Gemini-specific configuration for the generation client
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub http_config: HttpClientConfig,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("http_config", &self.http_config)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: gemini::API_BASE.to_string(),
            model: gemini::DEFAULT_MODEL.to_string(),
            http_config: HttpClientConfig::default(),
        }
    }

    pub fn from_api_key(api_key: ApiKey) -> Result<Self, GenerationError> {
        Ok(Self::new(api_key.resolve()?))
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// `{base}/v1beta/models/{model}:generateContent?key={api_key}`
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}/models/{}:{}?key={}",
            self.base_url.trim_end_matches('/'),
            gemini::API_VERSION,
            self.model,
            gemini::GENERATE_CONTENT_METHOD,
            self.api_key
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn text(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
}

impl GenerateContentRequest {
    pub fn new(prompt: &str, system_instruction: &str) -> Self {
        Self {
            contents: vec![Content::text(prompt)],
            system_instruction: Content::text(system_instruction),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub model_version: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`, untouched.
    pub fn into_first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

/// Client for the Gemini text-generation endpoint.
///
/// Holds no per-call state, so one instance can serve concurrent calls.
pub struct GenerationClient {
    config: GeminiConfig,
    http: HttpClient,
}

impl GenerationClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let http = HttpClient::new(config.http_config.clone(), None)?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Generate text for `prompt` under `system_instruction`.
    ///
    /// Returns `Ok(None)` when the response carries no candidate text.
    #[tracing::instrument(
        name = "generate_content",
        skip(self, prompt, system_instruction),
        fields(model = %self.config.model, prompt_len = prompt.len()),
        err
    )]
    pub async fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<Option<String>, GenerationError> {
        let request = GenerateContentRequest::new(prompt, system_instruction);
        let response: GenerateContentResponse = self
            .http
            .post_json(&self.config.endpoint_url(), &request)
            .await?;

        let text = response.into_first_text();
        if text.is_none() {
            tracing::debug!("response contained no candidate text");
        }
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GenerationClient {
    async fn generate_text(
        &self,
        prompt: &GenerationPrompt,
    ) -> Result<Option<String>, GenerationError> {
        self.generate(&prompt.prompt, &prompt.system_instruction).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let request = GenerateContentRequest::new("A sun-drenched library", "Two sentences.");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{ "parts": [{ "text": "A sun-drenched library" }] }],
                "systemInstruction": { "parts": [{ "text": "Two sentences." }] }
            })
        );
    }

    #[test]
    fn test_endpoint_url_carries_model_and_key() {
        let config = GeminiConfig::new("secret".to_string())
            .with_base_url("http://localhost:8080/".to_string())
            .with_model("test-model".to_string());

        assert_eq!(
            config.endpoint_url(),
            "http://localhost:8080/v1beta/models/test-model:generateContent?key=secret"
        );
    }

    #[test]
    fn test_debug_output_hides_key() {
        let config = GeminiConfig::new("super-secret".to_string());
        assert!(!format!("{config:?}").contains("super-secret"));
    }

    #[test]
    fn test_default_config_targets_gemini() {
        let config = GeminiConfig::new("k".to_string());
        assert!(config.endpoint_url().starts_with(
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-09-2025:generateContent"
        ));
        assert_eq!(config.http_config.retry.max_attempts, 5);
    }

    #[test]
    fn test_first_text_is_returned_verbatim() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "  Warm light pools...\n" }, { "text": "ignored" }]
                    },
                    "finishReason": "STOP"
                },
                { "content": { "parts": [{ "text": "second candidate" }] } }
            ],
            "modelVersion": "gemini-2.5-flash"
        }))
        .unwrap();

        assert_eq!(
            response.candidates[0].finish_reason.as_deref(),
            Some("STOP")
        );
        assert_eq!(
            response.into_first_text().as_deref(),
            Some("  Warm light pools...\n")
        );
    }

    #[test]
    fn test_missing_pieces_yield_none() {
        let cases = [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{ "finishReason": "SAFETY" }] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "inlineData": {} }] } }] }),
        ];

        for case in cases {
            let response: GenerateContentResponse = serde_json::from_value(case.clone()).unwrap();
            assert_eq!(response.into_first_text(), None, "case: {case}");
        }
    }
}
