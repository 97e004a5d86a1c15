// ABOUTME: Catalog route handlers for static exploration data
// ABOUTME: Serves trending destination cards and vibe chips to the web client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! Catalog routes for static exploration data
//!
//! The trending destinations and vibe chips are compiled into the binary;
//! this endpoint lets the web client fetch them instead of hardcoding.

use crate::catalog;

/// Catalog routes implementation
pub struct CatalogRoutes;

impl CatalogRoutes {
    /// Create all catalog routes
    pub fn routes() -> axum::Router {
        use axum::{routing::get, Json, Router};

        async fn catalog_handler() -> Json<catalog::Catalog> {
            Json(catalog::catalog())
        }

        Router::new().route("/api/catalog", get(catalog_handler))
    }
}
