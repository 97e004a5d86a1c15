// ABOUTME: Google Gemini implementation of the generation provider contract
// ABOUTME: Covers unary, schema-constrained, vision, and streaming calls via the Generative Language API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! # Gemini Client
//!
//! Implementation of the [`GenerationProvider`] trait against Google's
//! Generative Language API.
//!
//! ## Configuration
//!
//! Built from [`GeminiConfig`], which reads the `GEMINI_API_KEY` environment
//! variable (key from Google AI Studio: <https://aistudio.google.com/app/apikey>)
//! plus optional base URL, model, and timeout overrides.
//!
//! ## Endpoints
//!
//! - Unary: `POST {base}/models/{model}:generateContent?key=...`
//! - Streaming: `POST {base}/models/{model}:streamGenerateContent?alt=sse&key=...`
//!
//! Requests carrying inline image parts are routed to the configured vision
//! model; everything else uses the text model. Schema-constrained calls set
//! `responseMimeType: application/json` together with the declared schema so
//! the model emits parseable JSON instead of prose.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use super::sse::create_sse_stream;
use super::{
    ContentPart, FragmentStream, GenerationCapabilities, GenerationProvider, GenerationRequest,
    StreamChunk,
};
use crate::config::environment::GeminiConfig;
use crate::errors::{AppError, ErrorCode};

/// Provider name used in logs and error messages
const PROVIDER_NAME: &str = "Gemini";

// ============================================================================
// Wire Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig>,
}

/// Content structure for the Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<WirePart>,
}

/// Part of content: text or inline base64 image bytes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum WirePart {
    /// Text content
    Text { text: String },
    /// Inline media bytes
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: WireInlineData,
    },
}

/// Inline media payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireInlineData {
    mime_type: String,
    data: String,
}

/// Generation configuration for schema-constrained output
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
struct WireResponse {
    candidates: Option<Vec<WireCandidate>>,
    error: Option<WireError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
struct WireCandidate {
    content: Option<WireContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

/// API error envelope from Gemini
#[derive(Debug, Deserialize)]
struct WireError {
    message: String,
}

/// Streaming response chunk
#[derive(Debug, Deserialize)]
struct WireStreamingResponse {
    candidates: Option<Vec<WireCandidate>>,
}

// ============================================================================
// Client Implementation
// ============================================================================

/// Google Gemini generation provider
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    text_model: String,
    vision_model: String,
    client: Client,
}

impl GeminiClient {
    /// Create a client from upstream provider configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is absent from the configuration or
    /// the HTTP client cannot be constructed.
    pub fn new(config: &GeminiConfig) -> Result<Self, AppError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::config_missing("GEMINI_API_KEY environment variable not set"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            text_model: config.model.clone(),
            vision_model: config.vision_model.clone(),
            client,
        })
    }

    /// Pick the model for a request: vision model for image input, text model otherwise
    fn model_for(&self, request: &GenerationRequest) -> &str {
        if request.has_inline_image() {
            &self.vision_model
        } else {
            &self.text_model
        }
    }

    /// Build the API URL for a model and method
    fn build_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{model}:{method}?key={}",
            self.base_url, self.api_key
        )
    }

    /// Convert a provider-neutral request into the Gemini wire format
    fn build_wire_request(request: &GenerationRequest) -> WireRequest {
        let contents = request
            .contents
            .iter()
            .map(|content| WireContent {
                role: content.role.map(|role| role.as_str().to_owned()),
                parts: content.parts.iter().map(Self::convert_part).collect(),
            })
            .collect();

        // Gemini takes the system instruction out-of-band, as a role-less content
        let system_instruction = request.system_instruction.as_ref().map(|text| WireContent {
            role: None,
            parts: vec![WirePart::Text { text: text.clone() }],
        });

        let generation_config = request.response_schema.as_ref().map(|schema| {
            WireGenerationConfig {
                response_mime_type: Some("application/json".to_owned()),
                response_schema: Some(schema.clone()),
            }
        });

        WireRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }

    /// Convert one content part to the wire representation
    fn convert_part(part: &ContentPart) -> WirePart {
        match part {
            ContentPart::Text(text) => WirePart::Text { text: text.clone() },
            ContentPart::InlineImage { mime_type, data } => WirePart::InlineData {
                inline_data: WireInlineData {
                    mime_type: mime_type.clone(),
                    data: data.clone(),
                },
            },
        }
    }

    /// Extract the reply text: first candidate, first part
    fn extract_text(response: &WireResponse) -> Result<String, AppError> {
        let part = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .ok_or_else(|| {
                AppError::external_service(PROVIDER_NAME, "No content in response")
            })?;

        match part {
            WirePart::Text { text } => Ok(text.clone()),
            WirePart::InlineData { .. } => Err(AppError::external_service(
                PROVIDER_NAME,
                "Unexpected inline data in model output",
            )),
        }
    }

    /// Map an HTTP error status to the appropriate error type
    ///
    /// Rate limit (429) errors expose the quota message from Gemini so the
    /// caller can show a useful retry hint.
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<WireResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                Self::extract_quota_message(&message),
            ),
            503 => AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("{PROVIDER_NAME} is temporarily unavailable: {message}"),
            ),
            _ => AppError::external_service(PROVIDER_NAME, format!("API error ({status}): {message}")),
        }
    }

    /// Extract a user-friendly quota message from a Gemini rate-limit error
    fn extract_quota_message(message: &str) -> String {
        // Look for "Please retry in X" and extract the time value
        // Example: "Please retry in 6.406453963s."
        if let Some(retry_pos) = message.find("Please retry in ") {
            let after_prefix = &message[retry_pos + 16..]; // Skip "Please retry in "
            if let Some(s_pos) = after_prefix.find('s') {
                let time_str = &after_prefix[..s_pos];
                if let Ok(seconds) = time_str.parse::<f64>() {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let seconds_int = seconds.ceil() as u64;
                    return format!(
                        "AI service quota exceeded. Please try again in {seconds_int} seconds."
                    );
                }
            }
        }
        "AI service quota exceeded. Please wait a moment and try again.".to_owned()
    }
}

/// Parse one streaming SSE payload into a fragment
///
/// Gemini streams partial `generateContent` responses; the final fragment
/// carries `finishReason: "STOP"`. Payloads with no candidate (metadata-only)
/// yield nothing.
fn parse_stream_payload(payload: &str) -> Option<Result<StreamChunk, AppError>> {
    match serde_json::from_str::<WireStreamingResponse>(payload) {
        Ok(response) => {
            let candidate = response.candidates.as_ref().and_then(|c| c.first())?;
            let is_final = candidate
                .finish_reason
                .as_ref()
                .is_some_and(|reason| reason == "STOP");

            let delta = candidate
                .content
                .as_ref()
                .and_then(|content| content.parts.first())
                .and_then(|part| match part {
                    WirePart::Text { text } => Some(text.clone()),
                    WirePart::InlineData { .. } => None,
                })
                .unwrap_or_default();

            Some(Ok(StreamChunk {
                delta,
                is_final,
                finish_reason: candidate.finish_reason.clone(),
            }))
        }
        Err(e) => {
            warn!(error = %e, "Failed to parse streaming chunk");
            None
        }
    }
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        "Google Gemini"
    }

    fn capabilities(&self) -> GenerationCapabilities {
        GenerationCapabilities::full_featured()
    }

    #[instrument(skip(self, request), fields(model = %self.model_for(request)))]
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AppError> {
        let model = self.model_for(request);
        let url = self.build_url(model, "generateContent");
        let wire_request = Self::build_wire_request(request);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(PROVIDER_NAME, format!("HTTP request failed: {e}"))
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            AppError::external_service(PROVIDER_NAME, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let wire_response: WireResponse = serde_json::from_str(&response_text).map_err(|e| {
            error!(error = %e, response = %response_text, "Failed to parse response");
            AppError::external_service(PROVIDER_NAME, format!("Failed to parse response: {e}"))
        })?;

        if let Some(error) = wire_response.error {
            return Err(AppError::external_service(PROVIDER_NAME, error.message));
        }

        let text = Self::extract_text(&wire_response)?;

        debug!("Successfully received Gemini response");

        Ok(text)
    }

    #[instrument(skip(self, request), fields(model = %self.model_for(request)))]
    async fn generate_stream(
        &self,
        request: &GenerationRequest,
    ) -> Result<FragmentStream, AppError> {
        let model = self.model_for(request);
        let url = self.build_url(model, "streamGenerateContent");
        let wire_request = Self::build_wire_request(request);

        debug!("Starting streaming request to Gemini API");

        let response = self
            .client
            .post(&url)
            .query(&[("alt", "sse")])
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(PROVIDER_NAME, format!("HTTP request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_owned());
            return Err(Self::map_api_error(status.as_u16(), &error_text));
        }

        Ok(create_sse_stream(
            response.bytes_stream(),
            parse_stream_payload,
            PROVIDER_NAME,
        ))
    }
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("vision_model", &self.vision_model)
            .field("api_key", &"[REDACTED]")
            // Omit `client`, HTTP clients are not useful to debug
            .finish_non_exhaustive()
    }
}
