// ABOUTME: Trip route handlers for itinerary boards and cost estimates
// ABOUTME: Provides REST endpoints for creating trips, reordering activities, and estimating costs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! Trip routes
//!
//! This module handles server-side trip boards: creation (which generates an
//! itinerary through the gateway), retrieval, activity reordering, and the
//! pure cost estimator.

use crate::{
    errors::AppError,
    models::{estimate_cost, TravelStyle},
    resources::ServerResources,
    trips::Trip,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to create a trip with a generated itinerary
#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    /// Destination name
    pub destination: String,
    /// Trip length in days
    pub days: u32,
    /// Free-text interests for itinerary generation
    #[serde(default)]
    pub interests: String,
}

/// Request to move one activity between days
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    /// 0-based source day index
    pub from_day: usize,
    /// 0-based position within the source day
    pub from_position: usize,
    /// 0-based target day index
    pub to_day: usize,
}

/// Response after a reorder attempt
#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    /// Whether an activity actually moved
    pub moved: bool,
    /// Trip state after the attempt
    pub trip: Trip,
}

/// Request for a trip cost estimate
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    /// Number of travelers
    pub travelers: u32,
    /// Trip length in days
    pub days: u32,
    /// Travel style selector (Budget | Luxury)
    pub style: TravelStyle,
}

// ============================================================================
// Trip Routes
// ============================================================================

/// Trip routes handler
pub struct TripRoutes;

impl TripRoutes {
    /// Create all trip routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/trips", post(Self::create_trip))
            .route("/api/trips/estimate", post(Self::estimate))
            .route("/api/trips/:trip_id", get(Self::get_trip))
            .route("/api/trips/:trip_id/reorder", post(Self::reorder))
            .with_state(resources)
    }

    /// Create a trip: generate an itinerary and store the board
    async fn create_trip(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateTripRequest>,
    ) -> Result<Response, AppError> {
        let itinerary = resources
            .gateway
            .plan_itinerary(&request.destination, request.days, &request.interests)
            .await?;

        let trip = resources
            .trips
            .insert(Trip::new(request.destination, itinerary));

        Ok((StatusCode::CREATED, Json(trip)).into_response())
    }

    /// Fetch the current state of a trip board
    async fn get_trip(
        State(resources): State<Arc<ServerResources>>,
        Path(trip_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let trip = resources.trips.get(trip_id)?;

        Ok((StatusCode::OK, Json(trip)).into_response())
    }

    /// Move one activity to the end of another day's list
    ///
    /// Out-of-range indices leave the board unchanged; the response reports
    /// whether anything moved.
    async fn reorder(
        State(resources): State<Arc<ServerResources>>,
        Path(trip_id): Path<Uuid>,
        Json(request): Json<ReorderRequest>,
    ) -> Result<Response, AppError> {
        let (trip, moved) = resources.trips.reorder(
            trip_id,
            request.from_day,
            request.from_position,
            request.to_day,
        )?;

        Ok((StatusCode::OK, Json(ReorderResponse { moved, trip })).into_response())
    }

    /// Estimate trip cost from traveler count, duration, and style
    async fn estimate(
        Json(request): Json<EstimateRequest>,
    ) -> Result<Response, AppError> {
        let estimate = estimate_cost(request.travelers, request.days, request.style);

        Ok((StatusCode::OK, Json(estimate)).into_response())
    }
}
