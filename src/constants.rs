// ABOUTME: System-wide constants and configuration defaults for the Marco Travel API
// ABOUTME: Contains service identity, upstream provider constants, limits, and fixed user-facing strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! # Constants Module
//!
//! Application constants and environment-based configuration values.
//! This module provides both hardcoded constants and environment variable
//! accessors with defaults.

/// Service identity constants
pub mod service_names {
    /// Canonical service name used in logs and the health endpoint
    pub const MARCO_TRAVEL_SERVER: &str = "marco-travel-server";

    /// Server version from Cargo.toml
    pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Default network ports
pub mod ports {
    /// Default HTTP API port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// Upstream generative-content provider constants
pub mod upstream {
    /// Gemini Generative Language API base URL
    pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Default model for text and structured-output calls
    pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

    /// Default model for image analysis calls
    pub const DEFAULT_VISION_MODEL: &str = "gemini-2.5-flash-image";

    /// Mime type assumed for uploaded landmark photos when none is provided
    pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";
}

/// Operational limits and defaults
pub mod limits {
    /// Default bound on concurrently retained chat sessions (LRU eviction above this)
    pub const DEFAULT_MAX_CHAT_SESSIONS: usize = 1000;

    /// Default upstream request timeout in seconds
    pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

    /// Request body cap; landmark scans carry base64 image payloads
    pub const MAX_REQUEST_BODY_BYTES: usize = 10 * 1024 * 1024;

    /// Maximum destination suggestions returned by vibe matching
    pub const VIBE_SUGGESTION_LIMIT: usize = 3;
}

/// Fixed user-facing strings
///
/// These are part of the application's observable behavior and are matched
/// verbatim by clients, so they must not be reworded casually.
pub mod messages {
    /// Destinations returned when vibe matching cannot reach the provider
    pub const VIBE_FALLBACK_DESTINATIONS: [&str; 3] = ["Paris", "Kyoto", "Bali"];

    /// Returned when the vision model replies with empty text
    pub const LANDMARK_NO_RESULT: &str = "Could not identify landmark.";

    /// Returned when the image analysis call fails outright
    pub const LANDMARK_ANALYSIS_FAILED: &str = "Error analyzing image.";

    /// Replaces the open model turn when a chat stream fails
    pub const CHAT_CONNECTION_APOLOGY: &str = "Sorry, I am having trouble connecting right now.";

    /// Model turn seeded into every new chat session
    pub const CHAT_GREETING: &str =
        "Hi! I am your AI travel buddy. Ask me about food, hidden gems, or safety tips!";
}

/// Environment-based configuration
pub mod env_config {
    use std::env;

    /// Get HTTP API port from environment or default
    #[must_use]
    pub fn http_port() -> u16 {
        env::var("HTTP_PORT")
            .unwrap_or_else(|_| crate::constants::ports::DEFAULT_HTTP_PORT.to_string())
            .parse()
            .unwrap_or(crate::constants::ports::DEFAULT_HTTP_PORT)
    }

    /// Get bind host from environment or default
    #[must_use]
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into())
    }

    /// Get log level from environment or default
    #[must_use]
    pub fn log_level() -> String {
        env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into())
    }

    /// Get Gemini API key from environment (no default)
    #[must_use]
    pub fn gemini_api_key() -> Option<String> {
        env::var("GEMINI_API_KEY").ok()
    }
}
