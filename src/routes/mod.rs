// ABOUTME: Route module organization for Marco Travel API HTTP endpoints
// ABOUTME: Provides centralized route definitions organized by domain with router assembly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! Route module for the Marco Travel API
//!
//! This module organizes all HTTP routes by domain for better maintainability
//! and clear separation of concerns. Each domain module contains only route
//! definitions and thin handler functions that delegate to the gateway,
//! stores, and service layers. [`router`] assembles the complete API with
//! its middleware stack.

use crate::constants::limits;
use crate::middleware::setup_cors;
use crate::resources::ServerResources;
use axum::{extract::DefaultBodyLimit, Router};
use http::header::HeaderName;
use std::sync::Arc;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

/// Catalog routes for static exploration data
pub mod catalog;
/// Chat session routes for the AI travel assistant
pub mod chat;
/// Destination routes: guides, vibe matching, exploration
pub mod destinations;
/// Health check and system status routes
pub mod health;
/// Landmark photo scan route
pub mod scan;
/// Trip board and cost estimate routes
pub mod trips;

// Re-export commonly used types from each domain

/// Catalog route handlers
pub use catalog::CatalogRoutes;
/// Chat session route handlers
pub use chat::ChatRoutes;
/// Send-message request payload
pub use chat::SendMessageRequest;
/// Destination route handlers
pub use destinations::DestinationRoutes;
/// Combined exploration request payload
pub use destinations::ExploreRequest;
/// Combined exploration response
pub use destinations::ExploreResponse;
/// Vibe match response
pub use destinations::VibeMatchResponse;
/// Health check route handlers
pub use health::HealthRoutes;
/// Landmark scan route handlers
pub use scan::ScanRoutes;
/// Landmark scan response
pub use scan::ScanResponse;
/// Trip route handlers
pub use trips::TripRoutes;
/// Reorder response reporting whether a move happened
pub use trips::ReorderResponse;

/// Assemble the complete API router with its middleware stack
///
/// Merges every domain's routes and applies, outermost first: request-id
/// generation and propagation, trace spans, CORS, and the request body
/// size limit.
pub fn router(resources: Arc<ServerResources>) -> Router {
    let x_request_id = HeaderName::from_static("x-request-id");
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(CatalogRoutes::routes())
        .merge(DestinationRoutes::routes(resources.clone()))
        .merge(TripRoutes::routes(resources.clone()))
        .merge(ScanRoutes::routes(resources.clone()))
        .merge(ChatRoutes::routes(resources))
        // The framework's own limit defers to the byte-accurate tower-http layer
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(limits::MAX_REQUEST_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}
