// ABOUTME: Destination route handlers for guides, vibe matching, and exploration
// ABOUTME: Provides REST endpoints wrapping the gateway destination operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! Destination routes
//!
//! This module handles destination lookups: structured travel guides, vibe
//! matching, and the combined exploration flow the search view drives.

use crate::{
    errors::AppError,
    models::{DestinationDetails, Itinerary},
    resources::ServerResources,
    services::trip_planning,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request for a destination travel guide
#[derive(Debug, Deserialize)]
pub struct DestinationDetailsRequest {
    /// Destination name (city, region, or country)
    pub destination: String,
}

/// Request for vibe-based destination suggestions
#[derive(Debug, Deserialize)]
pub struct VibeMatchRequest {
    /// Free-text mood or theme description
    pub vibe: String,
}

/// Response carrying vibe match suggestions
#[derive(Debug, Serialize, Deserialize)]
pub struct VibeMatchResponse {
    /// Up to three suggested destination names
    pub matches: Vec<String>,
}

/// Request for the combined exploration flow
#[derive(Debug, Deserialize)]
pub struct ExploreRequest {
    /// Search query: a destination name, or a vibe when `vibe_mode` is set
    pub query: String,
    /// Resolve the query through vibe matching first
    #[serde(default)]
    pub vibe_mode: bool,
    /// Trip length in days
    pub days: u32,
    /// Free-text interests for itinerary generation
    #[serde(default)]
    pub interests: String,
}

/// Response for the combined exploration flow
#[derive(Debug, Serialize, Deserialize)]
pub struct ExploreResponse {
    /// Destination the query resolved to
    pub destination: String,
    /// Travel guide for the resolved destination
    pub details: DestinationDetails,
    /// Generated day-by-day itinerary
    pub itinerary: Itinerary,
}

// ============================================================================
// Destination Routes
// ============================================================================

/// Destination routes handler
pub struct DestinationRoutes;

impl DestinationRoutes {
    /// Create all destination routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/destinations/details", post(Self::details))
            .route("/api/destinations/vibe", post(Self::vibe))
            .route("/api/destinations/explore", post(Self::explore))
            .with_state(resources)
    }

    /// Fetch a structured travel guide for one destination
    async fn details(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<DestinationDetailsRequest>,
    ) -> Result<Response, AppError> {
        let details = resources
            .gateway
            .destination_details(&request.destination)
            .await?;

        Ok((StatusCode::OK, Json(details)).into_response())
    }

    /// Suggest destinations matching a free-text vibe
    async fn vibe(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<VibeMatchRequest>,
    ) -> Result<Response, AppError> {
        let matches = resources.gateway.match_vibe(&request.vibe).await;

        Ok((StatusCode::OK, Json(VibeMatchResponse { matches })).into_response())
    }

    /// Run the combined vibe-resolution, guide, and itinerary flow
    async fn explore(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<ExploreRequest>,
    ) -> Result<Response, AppError> {
        let result = trip_planning::explore(
            &resources.gateway,
            &request.query,
            request.vibe_mode,
            request.days,
            &request.interests,
        )
        .await?;

        let response = ExploreResponse {
            destination: result.destination,
            details: result.details,
            itinerary: result.itinerary,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
