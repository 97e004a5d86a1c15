// ABOUTME: Generative-content provider abstraction for the travel gateway
// ABOUTME: Defines the provider contract (unary + streaming) with capability advertisement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! # Generation Provider Service Provider Interface
//!
//! This module defines the contract a generative-content provider must
//! implement to back the travel gateway. The production implementation is
//! [`GeminiClient`]; tests substitute a scripted provider.
//!
//! ## Key Concepts
//!
//! - **`GenerationCapabilities`**: Bitflags describing provider features
//!   (streaming, structured output, vision, system instructions)
//! - **`GenerationProvider`**: Async trait for unary and streaming generation
//! - **`Content`**: Role-tagged content with text and inline-image parts
//! - **`GenerationRequest`**: Request configuration including the declared
//!   response schema for structured-output calls
//!
//! ## Example: Using a Provider
//!
//! ```rust,no_run
//! use marco_travel_server::gateway::{Content, GenerationProvider, GenerationRequest};
//!
//! async fn example(provider: &dyn GenerationProvider) {
//!     let request = GenerationRequest::from_prompt("Provide a travel guide for Kyoto.");
//!     let reply = provider.generate(&request).await;
//! }
//! ```

pub mod client;
pub mod gemini;
pub mod prompts;
pub mod schema;
pub mod sse;

pub use client::TravelGateway;
pub use gemini::GeminiClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use tokio_stream::Stream;

use crate::errors::AppError;

// ============================================================================
// Capability Flags
// ============================================================================

bitflags::bitflags! {
    /// Provider capability flags using bitflags for efficient storage
    ///
    /// The gateway refuses an operation whose required capability the
    /// configured provider does not advertise, so misconfiguration surfaces
    /// as a clear error instead of a malformed upstream call.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct GenerationCapabilities: u8 {
        /// Provider supports streaming responses
        const STREAMING = 0b0000_0001;
        /// Provider supports schema-constrained JSON output
        const STRUCTURED_OUTPUT = 0b0000_0010;
        /// Provider supports inline image input
        const VISION = 0b0000_0100;
        /// Provider supports a dedicated system instruction
        const SYSTEM_INSTRUCTION = 0b0000_1000;
    }
}

impl GenerationCapabilities {
    /// Capabilities of a basic text-only provider
    #[must_use]
    pub const fn text_only() -> Self {
        Self::STREAMING.union(Self::SYSTEM_INSTRUCTION)
    }

    /// Capabilities of a full-featured provider (like Gemini)
    #[must_use]
    pub const fn full_featured() -> Self {
        Self::STREAMING
            .union(Self::STRUCTURED_OUTPUT)
            .union(Self::VISION)
            .union(Self::SYSTEM_INSTRUCTION)
    }

    /// Check if streaming is supported
    #[must_use]
    pub const fn supports_streaming(&self) -> bool {
        self.contains(Self::STREAMING)
    }

    /// Check if schema-constrained output is supported
    #[must_use]
    pub const fn supports_structured_output(&self) -> bool {
        self.contains(Self::STRUCTURED_OUTPUT)
    }

    /// Check if inline image input is supported
    #[must_use]
    pub const fn supports_vision(&self) -> bool {
        self.contains(Self::VISION)
    }

    /// Check if system instructions are supported
    #[must_use]
    pub const fn supports_system_instruction(&self) -> bool {
        self.contains(Self::SYSTEM_INSTRUCTION)
    }
}

// ============================================================================
// Content Types
// ============================================================================

/// Role of a content entry in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireRole {
    /// End-user input
    User,
    /// Model output
    Model,
}

impl WireRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// One part of a content entry: text or inline base64 image bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentPart {
    /// Plain text
    Text(String),
    /// Inline image bytes, already base64-encoded
    InlineImage {
        /// Image mime type (e.g. "image/jpeg")
        mime_type: String,
        /// Base64-encoded bytes without any data-URL prefix
        data: String,
    },
}

impl ContentPart {
    /// Create a text part
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create an inline image part
    #[must_use]
    pub fn inline_image(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::InlineImage {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Check whether this part carries image bytes
    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::InlineImage { .. })
    }
}

/// A role-tagged content entry in a generation request
///
/// The role is optional: single-shot calls (prompt-only, image analysis)
/// send one unlabelled entry, matching the upstream wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Role of the entry, absent for single-shot calls
    pub role: Option<WireRole>,
    /// Ordered parts of the entry
    pub parts: Vec<ContentPart>,
}

impl Content {
    /// Create a user text entry
    #[must_use]
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some(WireRole::User),
            parts: vec![ContentPart::text(text)],
        }
    }

    /// Create a model text entry
    #[must_use]
    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: Some(WireRole::Model),
            parts: vec![ContentPart::text(text)],
        }
    }

    /// Create an unlabelled entry from raw parts
    #[must_use]
    pub fn from_parts(parts: Vec<ContentPart>) -> Self {
        Self { role: None, parts }
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// Configuration for one generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Ordered conversation contents
    pub contents: Vec<Content>,
    /// System instruction, sent out-of-band from the contents
    pub system_instruction: Option<String>,
    /// Declared response schema; when set, the provider is asked for
    /// schema-constrained JSON output
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationRequest {
    /// Create a request from ordered contents
    #[must_use]
    pub const fn new(contents: Vec<Content>) -> Self {
        Self {
            contents,
            system_instruction: None,
            response_schema: None,
        }
    }

    /// Create a single-prompt request
    #[must_use]
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self::new(vec![Content::user_text(prompt)])
    }

    /// Attach a system instruction
    #[must_use]
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Constrain the response to the declared JSON schema
    #[must_use]
    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// Check whether any content part carries inline image bytes
    #[must_use]
    pub fn has_inline_image(&self) -> bool {
        self.contents
            .iter()
            .any(|content| content.parts.iter().any(ContentPart::is_image))
    }

    /// Capabilities a provider must advertise to serve this request
    #[must_use]
    pub fn required_capabilities(&self, streaming: bool) -> GenerationCapabilities {
        let mut required = GenerationCapabilities::empty();
        if streaming {
            required |= GenerationCapabilities::STREAMING;
        }
        if self.response_schema.is_some() {
            required |= GenerationCapabilities::STRUCTURED_OUTPUT;
        }
        if self.has_inline_image() {
            required |= GenerationCapabilities::VISION;
        }
        if self.system_instruction.is_some() {
            required |= GenerationCapabilities::SYSTEM_INSTRUCTION;
        }
        required
    }
}

// ============================================================================
// Streaming Types
// ============================================================================

/// A fragment of a streaming reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Text delta for this fragment
    pub delta: String,
    /// Whether this is the final fragment
    pub is_final: bool,
    /// Finish reason if final
    pub finish_reason: Option<String>,
}

/// Stream type for streaming generation replies
///
/// Lazy, finite, and non-restartable: fragments arrive in order, the stream
/// ends when the provider signals completion, and dropping the stream simply
/// stops further processing.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, AppError>> + Send>>;

// ============================================================================
// Provider Trait
// ============================================================================

/// Generative-content provider trait
///
/// Implement this trait to back the travel gateway with a different
/// provider. The design follows the async trait pattern for compatibility
/// with the tokio-based runtime.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Unique provider identifier (e.g. "gemini")
    fn name(&self) -> &'static str;

    /// Human-readable display name for the provider
    fn display_name(&self) -> &'static str;

    /// Provider capabilities (streaming, structured output, etc.)
    fn capabilities(&self) -> GenerationCapabilities;

    /// Perform a unary generation call, returning the raw reply text
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AppError>;

    /// Perform a streaming generation call
    ///
    /// Returns a stream of fragments that can be consumed incrementally.
    /// Connection-time failure is returned as an error; in-stream failure
    /// surfaces as an `Err` item.
    async fn generate_stream(&self, request: &GenerationRequest)
        -> Result<FragmentStream, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_groups() {
        let full = GenerationCapabilities::full_featured();
        assert!(full.supports_streaming());
        assert!(full.supports_structured_output());
        assert!(full.supports_vision());
        assert!(full.supports_system_instruction());

        let text = GenerationCapabilities::text_only();
        assert!(text.supports_streaming());
        assert!(!text.supports_vision());
        assert!(!text.supports_structured_output());
    }

    #[test]
    fn test_required_capabilities_derived_from_request_shape() {
        let plain = GenerationRequest::from_prompt("hello");
        assert_eq!(
            plain.required_capabilities(false),
            GenerationCapabilities::empty()
        );

        let structured =
            GenerationRequest::from_prompt("hello").with_response_schema(serde_json::json!({
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }));
        assert_eq!(
            structured.required_capabilities(false),
            GenerationCapabilities::STRUCTURED_OUTPUT
        );

        let vision = GenerationRequest::new(vec![Content::from_parts(vec![
            ContentPart::inline_image("image/jpeg", "aGVsbG8="),
            ContentPart::text("what is this?"),
        ])]);
        assert_eq!(
            vision.required_capabilities(false),
            GenerationCapabilities::VISION
        );

        let chat = GenerationRequest::new(vec![Content::user_text("hi")])
            .with_system_instruction("be brief");
        assert_eq!(
            chat.required_capabilities(true),
            GenerationCapabilities::STREAMING | GenerationCapabilities::SYSTEM_INSTRUCTION
        );
    }

    #[test]
    fn test_content_constructors_tag_roles() {
        assert_eq!(Content::user_text("a").role, Some(WireRole::User));
        assert_eq!(Content::model_text("b").role, Some(WireRole::Model));
        assert_eq!(Content::from_parts(vec![]).role, None);
    }
}
