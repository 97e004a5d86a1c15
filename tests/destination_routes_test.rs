// ABOUTME: Integration tests for the destination route handlers
// ABOUTME: Tests guide fetching, vibe matching, and the combined exploration flow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::{create_test_server_resources, itinerary_json, GUIDE_JSON};
use helpers::axum_test::AxumTestRequest;
use helpers::scripted_provider::ScriptedProvider;
use marco_travel_server::errors::AppError;
use marco_travel_server::gateway::ContentPart;
use marco_travel_server::routes::destinations::DestinationRoutes;

use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;

// ============================================================================
// Test Helpers
// ============================================================================

fn router_with(provider: ScriptedProvider) -> (axum::Router, Arc<ScriptedProvider>) {
    let provider = Arc::new(provider);
    let resources = create_test_server_resources(provider.clone());
    (DestinationRoutes::routes(resources), provider)
}

// ============================================================================
// Destination Details Tests
// ============================================================================

#[tokio::test]
async fn test_details_returns_camel_case_guide() {
    let (router, provider) = router_with(ScriptedProvider::new(vec![Ok(GUIDE_JSON.to_owned())]));

    let response = AxumTestRequest::post("/api/destinations/details")
        .json(&json!({"destination": "Kyoto"}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["description"], "Old capital of temples and tea houses");
    assert_eq!(body["bestTime"], "April");
    assert_eq!(body["visaRequirements"], "Visa-free for 90 days");
    assert_eq!(body["culturalTips"].as_array().unwrap().len(), 2);

    let requests = provider.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].contents[0].parts[0],
        ContentPart::text("Provide a travel guide for Kyoto. Return strictly JSON.")
    );
}

#[tokio::test]
async fn test_details_rejects_blank_destination() {
    let (router, provider) = router_with(ScriptedProvider::new(vec![]));

    let response = AxumTestRequest::post("/api/destinations/details")
        .json(&json!({"destination": "   "}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert!(provider.recorded_requests().is_empty());
}

#[tokio::test]
async fn test_details_maps_upstream_failure_to_bad_gateway() {
    let (router, _provider) = router_with(ScriptedProvider::new(vec![Err(
        AppError::external_service("Gemini", "boom"),
    )]));

    let response = AxumTestRequest::post("/api/destinations/details")
        .json(&json!({"destination": "Kyoto"}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "EXTERNAL_SERVICE_ERROR");
}

// ============================================================================
// Vibe Match Tests
// ============================================================================

#[tokio::test]
async fn test_vibe_truncates_matches_to_three() {
    let (router, _provider) = router_with(ScriptedProvider::new(vec![Ok(
        r#"["Tokyo","Seoul","Taipei","Osaka","Busan"]"#.to_owned(),
    )]));

    let response = AxumTestRequest::post("/api/destinations/vibe")
        .json(&json!({"vibe": "neon nights and street food"}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["matches"], json!(["Tokyo", "Seoul", "Taipei"]));
}

#[tokio::test]
async fn test_vibe_falls_back_on_upstream_failure() {
    let (router, _provider) = router_with(ScriptedProvider::new(vec![Err(
        AppError::external_service("Gemini", "down"),
    )]));

    let response = AxumTestRequest::post("/api/destinations/vibe")
        .json(&json!({"vibe": "quiet mountains"}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["matches"], json!(["Paris", "Kyoto", "Bali"]));
}

// ============================================================================
// Exploration Flow Tests
// ============================================================================

#[tokio::test]
async fn test_explore_direct_destination() {
    let (router, provider) = router_with(ScriptedProvider::new(vec![
        Ok(GUIDE_JSON.to_owned()),
        Ok(itinerary_json(2)),
    ]));

    let response = AxumTestRequest::post("/api/destinations/explore")
        .json(&json!({"query": "Kyoto", "days": 2, "interests": "temples, food"}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["destination"], "Kyoto");
    assert_eq!(body["details"]["bestTime"], "April");
    assert_eq!(body["itinerary"].as_array().unwrap().len(), 2);

    // Guide first, then itinerary, no vibe resolution
    assert_eq!(provider.recorded_requests().len(), 2);
}

#[tokio::test]
async fn test_explore_vibe_mode_resolves_first_match() {
    let (router, provider) = router_with(ScriptedProvider::new(vec![
        Ok(r#"["Reykjavik","Tromso","Nuuk"]"#.to_owned()),
        Ok(GUIDE_JSON.to_owned()),
        Ok(itinerary_json(3)),
    ]));

    let response = AxumTestRequest::post("/api/destinations/explore")
        .json(&json!({
            "query": "northern lights and hot springs",
            "vibe_mode": true,
            "days": 3,
            "interests": "nature"
        }))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["destination"], "Reykjavik");
    assert_eq!(body["itinerary"].as_array().unwrap().len(), 3);

    // The guide call targets the resolved destination, not the raw query
    let requests = provider.recorded_requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(
        requests[1].contents[0].parts[0],
        ContentPart::text("Provide a travel guide for Reykjavik. Return strictly JSON.")
    );
}

#[tokio::test]
async fn test_explore_rejects_empty_query() {
    let (router, provider) = router_with(ScriptedProvider::new(vec![]));

    let response = AxumTestRequest::post("/api/destinations/explore")
        .json(&json!({"query": "", "days": 2}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert!(provider.recorded_requests().is_empty());
}
