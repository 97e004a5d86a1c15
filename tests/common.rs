// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides configuration, resource, and fixture helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Shared test utilities for `marco_travel_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use marco_travel_server::{
    config::environment::{
        CorsConfig, GeminiConfig, LogLevel, ServerConfig, SessionsConfig,
    },
    constants::{limits, upstream},
    gateway::{GenerationProvider, TravelGateway},
    resources::ServerResources,
};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test configuration (no environment reads)
pub fn create_test_config() -> ServerConfig {
    ServerConfig {
        http_port: 8081,
        host: "127.0.0.1".to_owned(),
        log_level: LogLevel::default(),
        cors: CorsConfig {
            allowed_origins: "*".to_owned(),
        },
        gemini: GeminiConfig {
            api_key: Some("test-key".to_owned()),
            base_url: upstream::GEMINI_API_BASE.to_owned(),
            model: upstream::DEFAULT_TEXT_MODEL.to_owned(),
            vision_model: upstream::DEFAULT_VISION_MODEL.to_owned(),
            timeout_secs: limits::DEFAULT_UPSTREAM_TIMEOUT_SECS,
        },
        sessions: SessionsConfig {
            max_chat_sessions: 16,
        },
    }
}

/// Build server resources around the given provider
pub fn create_test_server_resources(
    provider: Arc<dyn GenerationProvider>,
) -> Arc<ServerResources> {
    init_test_logging();
    let config = Arc::new(create_test_config());
    let gateway = TravelGateway::new(provider);
    Arc::new(ServerResources::new(config, gateway))
}

/// Canned travel guide reply in the upstream wire shape
pub const GUIDE_JSON: &str = r#"{
    "description": "Old capital of temples and tea houses",
    "weather": "Humid summers, crisp winters",
    "bestTime": "April",
    "visaRequirements": "Visa-free for 90 days",
    "culturalTips": ["Bow when greeting", "Carry cash"]
}"#;

/// Build a canned itinerary reply with the given number of days
pub fn itinerary_json(days: u32) -> String {
    let day_plans: Vec<serde_json::Value> = (1..=days)
        .map(|day| {
            serde_json::json!({
                "day": day,
                "activities": [
                    {"time": "09:00", "activity": format!("Morning walk, day {day}"), "type": "sightseeing"},
                    {"time": "13:00", "activity": format!("Local lunch, day {day}"), "type": "food"}
                ]
            })
        })
        .collect();
    serde_json::to_string(&day_plans).expect("Failed to serialize itinerary fixture")
}
