// ABOUTME: Trip aggregate and concurrent in-memory trip store
// ABOUTME: Each trip owns an itinerary board; reorders are applied under the trip's map entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! # Trips
//!
//! A trip is a destination plus its day-by-day itinerary board. Trips are
//! held in a `DashMap` keyed by id; per-entry sharded locking means reorders
//! on different trips never contend, and a reorder on one trip is atomic
//! against concurrent reads of the same trip. Nothing is persisted; state is
//! lost on restart.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::Itinerary;

/// One planned trip with its itinerary board
#[derive(Debug, Clone, Serialize)]
pub struct Trip {
    /// Trip identifier
    pub id: Uuid,
    /// Destination name as requested
    pub destination: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Day-by-day activity board
    pub itinerary: Itinerary,
}

impl Trip {
    /// Create a trip around a generated itinerary
    #[must_use]
    pub fn new(destination: impl Into<String>, itinerary: Itinerary) -> Self {
        Self {
            id: Uuid::new_v4(),
            destination: destination.into(),
            created_at: Utc::now(),
            itinerary,
        }
    }
}

/// Concurrent in-memory trip store
///
/// `DashMap` provides lock-free reads and sharded writes, so trip lookups
/// and reorders on distinct trips do not contend.
#[derive(Debug, Default)]
pub struct TripStore {
    trips: DashMap<Uuid, Trip>,
}

impl TripStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            trips: DashMap::new(),
        }
    }

    /// Insert a trip, returning its snapshot
    pub fn insert(&self, trip: Trip) -> Trip {
        self.trips.insert(trip.id, trip.clone());
        trip
    }

    /// Fetch a trip snapshot
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown trip id.
    pub fn get(&self, id: Uuid) -> Result<Trip, AppError> {
        self.trips
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or_else(|| AppError::not_found("Trip").with_resource_id(id.to_string()))
    }

    /// Move an activity within a trip's board
    ///
    /// Removes the item at (`from_day`, `from_position`) and appends it to
    /// the end of `to_day`. Out-of-range indices leave the board unchanged.
    /// Returns the updated trip snapshot and whether a move happened.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown trip id.
    pub fn reorder(
        &self,
        id: Uuid,
        from_day: usize,
        from_position: usize,
        to_day: usize,
    ) -> Result<(Trip, bool), AppError> {
        let mut entry = self
            .trips
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Trip").with_resource_id(id.to_string()))?;
        let moved = entry.itinerary.reorder(from_day, from_position, to_day);
        Ok((entry.clone(), moved))
    }

    /// Number of stored trips
    #[must_use]
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Whether the store holds no trips
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}
