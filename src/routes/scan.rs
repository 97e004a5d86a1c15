// ABOUTME: Scan route handler for landmark photo analysis
// ABOUTME: Accepts a base64 image and returns the gateway's landmark narrative
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! Landmark scan route
//!
//! Accepts a base64-encoded photo (raw or as a data URL) and returns a short
//! narrative identifying the landmark. The operation never fails: analysis
//! problems surface as fallback text in the response body.

use crate::resources::ServerResources;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to analyze a landmark photo
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    /// Base64 image payload, raw or with a `data:...,` prefix
    pub image: String,
    /// Image MIME type; defaults to `image/jpeg`
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Landmark analysis result
#[derive(Debug, Serialize, Deserialize)]
pub struct ScanResponse {
    /// Narrative analysis of the landmark, or a fallback message
    pub analysis: String,
}

// ============================================================================
// Scan Routes
// ============================================================================

/// Scan routes handler
pub struct ScanRoutes;

impl ScanRoutes {
    /// Create all scan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/scan", post(Self::scan))
            .with_state(resources)
    }

    /// Identify a landmark from a photo
    async fn scan(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<ScanRequest>,
    ) -> Json<ScanResponse> {
        let analysis = resources
            .gateway
            .identify_landmark(&request.image, request.mime_type.as_deref())
            .await;

        Json(ScanResponse { analysis })
    }
}
