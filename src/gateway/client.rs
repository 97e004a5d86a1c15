// ABOUTME: Typed travel gateway over the generation provider
// ABOUTME: Owns prompts, schemas, parsing, fallbacks, and post-processing for the five travel operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! # Travel Gateway
//!
//! The typed boundary between the travel domain and the generative-content
//! provider. Each operation builds its prompt and (where applicable) response
//! schema, checks the provider advertises the required capabilities, and
//! converts the raw reply into domain types.
//!
//! Three error policies coexist, one per call type:
//!
//! 1. **Propagate**: destination guides and itineraries surface upstream
//!    failure so callers can distinguish "no data" from fabricated data.
//! 2. **Fallback**: vibe matching and landmark analysis never fail; they
//!    substitute fixed safe values instead.
//! 3. **Validate first**: empty names and zero-day requests are rejected
//!    before any network call.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{instrument, warn};

use super::{prompts, schema, Content, ContentPart, FragmentStream, GenerationProvider, GenerationRequest};
use crate::constants::{limits, messages, upstream};
use crate::errors::AppError;
use crate::models::{
    ActivityKind, ChatRole, ChatTurn, DayPlan, DestinationDetails, Itinerary, ItineraryItem,
};

// ============================================================================
// Raw Wire Shapes
// ============================================================================

/// Day plan as the provider returns it, before ids and renumbering
///
/// The provider's `day` ordinal is deliberately not parsed: output ordinals
/// are always renumbered in arrival order.
#[derive(Debug, Deserialize)]
struct RawDayPlan {
    activities: Vec<RawActivity>,
}

/// Activity as the provider returns it, without an id
#[derive(Debug, Deserialize)]
struct RawActivity {
    time: String,
    activity: String,
    #[serde(rename = "type")]
    kind: ActivityKind,
}

// ============================================================================
// Gateway
// ============================================================================

/// Typed gateway wrapping a generation provider
#[derive(Clone)]
pub struct TravelGateway {
    provider: Arc<dyn GenerationProvider>,
}

impl TravelGateway {
    /// Create a gateway over the given provider
    #[must_use]
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self { provider }
    }

    /// Name of the underlying provider
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Fetch a travel guide for a destination
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name, or an upstream error when
    /// the provider fails or replies with malformed JSON.
    #[instrument(skip(self))]
    pub async fn destination_details(
        &self,
        destination: &str,
    ) -> Result<DestinationDetails, AppError> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(AppError::invalid_input("Destination name must not be empty"));
        }

        let request = GenerationRequest::from_prompt(prompts::destination_guide(destination))
            .with_response_schema(schema::destination_details());
        self.require_capabilities(&request, false)?;

        let reply = self.provider.generate(&request).await?;
        serde_json::from_str(&reply).map_err(|e| {
            AppError::external_service(
                self.provider.display_name(),
                format!("Malformed destination guide: {e}"),
            )
        })
    }

    /// Generate a day-by-day itinerary
    ///
    /// Every activity receives a fresh unique id (the provider supplies
    /// none) and day ordinals are renumbered `1..=days` in arrival order, so
    /// callers can rely on both regardless of what the model emitted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name or zero days, or an upstream
    /// error when the provider fails, replies with malformed JSON, or
    /// returns the wrong number of day plans.
    #[instrument(skip(self))]
    pub async fn plan_itinerary(
        &self,
        destination: &str,
        days: u32,
        interests: &str,
    ) -> Result<Itinerary, AppError> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(AppError::invalid_input("Destination name must not be empty"));
        }
        if days == 0 {
            return Err(AppError::invalid_input(
                "Itinerary must cover at least one day",
            ));
        }

        let request =
            GenerationRequest::from_prompt(prompts::itinerary(destination, days, interests))
                .with_response_schema(schema::itinerary());
        self.require_capabilities(&request, false)?;

        let reply = self.provider.generate(&request).await?;
        let raw: Vec<RawDayPlan> = serde_json::from_str(&reply).map_err(|e| {
            AppError::external_service(
                self.provider.display_name(),
                format!("Malformed itinerary: {e}"),
            )
        })?;

        if raw.len() != days as usize {
            return Err(AppError::external_service(
                self.provider.display_name(),
                format!("Expected {days} day plans, provider returned {}", raw.len()),
            ));
        }

        let day_plans = (1..=days)
            .zip(raw)
            .map(|(ordinal, raw_day)| {
                let mut plan = DayPlan::new(ordinal);
                plan.activities = raw_day
                    .activities
                    .into_iter()
                    .map(|raw_activity| {
                        ItineraryItem::new(
                            raw_activity.time,
                            raw_activity.activity,
                            raw_activity.kind,
                        )
                    })
                    .collect();
                plan
            })
            .collect();

        Ok(Itinerary::new(day_plans))
    }

    /// Suggest up to three destinations matching a free-text vibe
    ///
    /// Never fails: upstream failure, an unparsable reply, or an empty
    /// parsed list all yield the fixed fallback destinations.
    #[instrument(skip(self))]
    pub async fn match_vibe(&self, vibe: &str) -> Vec<String> {
        match self.try_match_vibe(vibe).await {
            Ok(matches) if !matches.is_empty() => matches,
            Ok(_) => Self::fallback_destinations(),
            Err(e) => {
                warn!(error = %e, "Vibe matching failed, using fallback destinations");
                Self::fallback_destinations()
            }
        }
    }

    async fn try_match_vibe(&self, vibe: &str) -> Result<Vec<String>, AppError> {
        let request = GenerationRequest::from_prompt(prompts::vibe_match(vibe))
            .with_response_schema(schema::vibe_destinations());
        self.require_capabilities(&request, false)?;

        let reply = self.provider.generate(&request).await?;
        let mut matches: Vec<String> = serde_json::from_str(&reply)
            .map_err(|e| AppError::serialization(format!("Malformed vibe reply: {e}")))?;
        matches.truncate(limits::VIBE_SUGGESTION_LIMIT);
        Ok(matches)
    }

    /// Identify a landmark from base64 image bytes
    ///
    /// Accepts raw base64 or a full data URL (the prefix before `,` is
    /// stripped). Never fails: an empty reply yields a fixed "could not
    /// identify" string and any failure a fixed "error analyzing" string.
    #[instrument(skip(self, image), fields(image_len = image.len()))]
    pub async fn identify_landmark(&self, image: &str, mime_type: Option<&str>) -> String {
        match self.try_identify_landmark(image, mime_type).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => messages::LANDMARK_NO_RESULT.to_owned(),
            Err(e) => {
                warn!(error = %e, "Landmark analysis failed");
                messages::LANDMARK_ANALYSIS_FAILED.to_owned()
            }
        }
    }

    async fn try_identify_landmark(
        &self,
        image: &str,
        mime_type: Option<&str>,
    ) -> Result<String, AppError> {
        let data = strip_data_url_prefix(image);
        let request = GenerationRequest::new(vec![Content::from_parts(vec![
            ContentPart::inline_image(
                mime_type.unwrap_or(upstream::DEFAULT_IMAGE_MIME),
                data,
            ),
            ContentPart::text(prompts::LANDMARK_ANALYSIS),
        ])]);
        self.require_capabilities(&request, false)?;

        self.provider.generate(&request).await
    }

    /// Stream a travel-assistant chat reply
    ///
    /// Builds role-tagged contents from the prior turns plus the new user
    /// message and attaches the assistant system instruction. Connection-time
    /// failure is returned as an error; in-stream failure surfaces as an
    /// `Err` item on the stream.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider lacks streaming support or the
    /// upstream connection cannot be established.
    #[instrument(skip(self, history, message), fields(turns = history.len()))]
    pub async fn stream_chat(
        &self,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<FragmentStream, AppError> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| match turn.role {
                ChatRole::User => Content::user_text(turn.text.as_str()),
                ChatRole::Model => Content::model_text(turn.text.as_str()),
            })
            .collect();
        contents.push(Content::user_text(message));

        let request = GenerationRequest::new(contents)
            .with_system_instruction(prompts::CHAT_SYSTEM_INSTRUCTION);
        self.require_capabilities(&request, true)?;

        self.provider.generate_stream(&request).await
    }

    /// Refuse an operation the configured provider cannot serve
    fn require_capabilities(
        &self,
        request: &GenerationRequest,
        streaming: bool,
    ) -> Result<(), AppError> {
        let required = request.required_capabilities(streaming);
        let available = self.provider.capabilities();
        if available.contains(required) {
            Ok(())
        } else {
            Err(AppError::config(format!(
                "{} does not support required capabilities: {:?}",
                self.provider.display_name(),
                required.difference(available)
            )))
        }
    }

    /// The fixed destinations used when vibe matching cannot produce a list
    fn fallback_destinations() -> Vec<String> {
        messages::VIBE_FALLBACK_DESTINATIONS
            .iter()
            .map(|name| (*name).to_owned())
            .collect()
    }
}

impl std::fmt::Debug for TravelGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TravelGateway")
            .field("provider", &self.provider.name())
            .finish()
    }
}

/// Strip the `data:<mime>;base64,` prefix from a data URL, if present
fn strip_data_url_prefix(image: &str) -> &str {
    if image.starts_with("data:") {
        image.split_once(',').map_or(image, |(_, data)| data)
    } else {
        image
    }
}
