// ABOUTME: Trip planning domain service for multi-step exploration flows
// ABOUTME: Extracts vibe resolution, guide fetching, and itinerary generation from routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

use crate::errors::{AppError, AppResult};
use crate::gateway::TravelGateway;
use crate::models::{DestinationDetails, Itinerary};
use tracing::info;

/// Result of a full exploration flow: the place that was resolved, its
/// guide, and a generated itinerary.
#[derive(Debug)]
pub struct ExploreResult {
    /// Destination the query resolved to (first vibe match, or the query itself)
    pub destination: String,
    /// Travel guide for the resolved destination
    pub details: DestinationDetails,
    /// Generated day-by-day itinerary
    pub itinerary: Itinerary,
}

/// Run the full exploration flow for a search query.
///
/// Business rules:
/// - In vibe mode the query is first resolved to concrete destinations and
///   the first match becomes the target; with no matches the query itself
///   is used as the destination.
/// - The guide and the itinerary are both fetched for the resolved target,
///   in that order.
///
/// # Errors
///
/// Returns `AppError::InvalidInput` for an empty query or `days == 0`.
/// Propagates upstream errors from the guide or itinerary calls; vibe
/// resolution itself never fails.
pub async fn explore(
    gateway: &TravelGateway,
    query: &str,
    vibe_mode: bool,
    days: u32,
    interests: &str,
) -> AppResult<ExploreResult> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::invalid_input("Search query must not be empty"));
    }
    if days == 0 {
        return Err(AppError::invalid_input(
            "Itinerary must cover at least one day",
        ));
    }

    let destination = if vibe_mode {
        let matches = gateway.match_vibe(query).await;
        let resolved = matches
            .into_iter()
            .next()
            .unwrap_or_else(|| query.to_owned());
        info!(query = %query, resolved = %resolved, "Resolved vibe query to destination");
        resolved
    } else {
        query.to_owned()
    };

    let details = gateway.destination_details(&destination).await?;
    let itinerary = gateway.plan_itinerary(&destination, days, interests).await?;

    Ok(ExploreResult {
        destination,
        details,
        itinerary,
    })
}
