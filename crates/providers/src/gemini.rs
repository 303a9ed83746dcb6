//! Google Gemini `generateContent` provider.
//!
//! Sends the request messages as `contents` and returns the concatenated text
//! parts of the first candidate.

use async_trait::async_trait;
use parkguide_core::error::ProviderError;
use parkguide_core::message::{Message, Role};
use parkguide_core::provider::{ProviderRequest, ProviderResponse, Usage};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Gemini REST endpoint for model operations.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// A Gemini completion provider.
pub struct GeminiProvider {
    base_url: String,
    api_key: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a provider against the public Gemini endpoint.
    pub fn new(api_key: impl Into<String>, timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout_secs,
            client,
        })
    }

    /// Point the provider at a different base URL (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn to_api_request(request: &ProviderRequest) -> GenerateContentRequest {
        let contents = request
            .messages
            .iter()
            .map(|message| match message.role {
                Role::User => Content::text("user", &message.content),
                Role::Assistant => Content::text("model", &message.content),
            })
            .collect();

        GenerateContentRequest {
            contents,
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout_secs)
        } else {
            ProviderError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl parkguide_core::Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let url = format!("{}/{}:generateContent", self.base_url, request.model);
        let body = Self::to_api_request(&request);

        debug!(provider = "gemini", model = %request.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after_secs = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(5);
            return Err(ProviderError::RateLimited { retry_after_secs });
        }

        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if !(200..300).contains(&status) {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Gemini returned error");
            let message = serde_json::from_str::<ErrorWrapper>(&error_body)
                .ok()
                .and_then(|w| w.error.message)
                .unwrap_or(error_body);
            return Err(ProviderError::ApiError {
                status_code: status,
                message,
            });
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(format!("Failed to parse response: {e}")))?;

        let usage = api_response.usage_metadata.as_ref().map(|u| Usage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });
        let model = api_response
            .model_version
            .clone()
            .unwrap_or_else(|| request.model.clone());

        let text = extract_text(api_response)?;

        Ok(ProviderResponse {
            message: Message::assistant(text),
            usage,
            model,
        })
    }

    async fn health_check(&self) -> Result<bool, ProviderError> {
        let response = self
            .client
            .get(&self.base_url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Ok(response.status().is_success())
    }
}

/// Join the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, ProviderError> {
    let candidate = response.candidates.unwrap_or_default().into_iter().next();

    let Some(candidate) = candidate else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!("Prompt blocked: {r}"))
            .unwrap_or_else(|| "No candidates in response".into());
        return Err(ProviderError::MalformedResponse(reason));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ProviderError::MalformedResponse(
            "Candidate contained no text".into(),
        ));
    }

    Ok(text)
}

// --- Gemini API wire types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn text(role: &str, text: &str) -> Self {
        Self {
            role: role.into(),
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}
