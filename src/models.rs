// ABOUTME: Core data models and types for the Marco Travel API
// ABOUTME: Defines DestinationDetails, DayPlan, ItineraryItem, ChatTurn and the cost estimator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! # Data Models
//!
//! This module contains the core data structures used throughout the Marco
//! Travel API server. These models provide a typed representation of the
//! travel-planning domain: destination guides, day-by-day itineraries, chat
//! transcripts, and trip cost estimates.
//!
//! ## Design Principles
//!
//! - **Wire Compatible**: Serialized field names match what the SPA consumes
//!   (camelCase where the upstream schema declares camelCase)
//! - **Ownership Preserving**: An `ItineraryItem` is exclusively owned by its
//!   containing `DayPlan`; the reorder operation moves it, never copies it
//! - **Serializable**: All models support JSON serialization for the REST API
//! - **Type Safe**: Closed enumerations for activity kinds, chat roles, and
//!   travel styles

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

// ============================================================================
// Destination Guide
// ============================================================================

/// Structured travel guide for a single destination
///
/// Produced atomically by one gateway call. The upstream schema marks every
/// field required, so a successfully parsed value is always fully populated;
/// a new search replaces the whole value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DestinationDetails {
    /// Free-text description of the destination
    pub description: String,
    /// Typical weather summary
    pub weather: String,
    /// Best time of year to visit
    pub best_time: String,
    /// Visa requirements summary
    pub visa_requirements: String,
    /// Ordered list of cultural tips
    pub cultural_tips: Vec<String>,
}

// ============================================================================
// Itinerary
// ============================================================================

/// Closed enumeration of itinerary activity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    /// Museums, landmarks, walking tours
    Sightseeing,
    /// Restaurants, street food, markets
    Food,
    /// Hikes, water sports, excursions
    Adventure,
    /// Spas, beaches, quiet afternoons
    Relax,
}

impl ActivityKind {
    /// String representation matching the upstream schema enum values
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sightseeing => "sightseeing",
            Self::Food => "food",
            Self::Adventure => "adventure",
            Self::Relax => "relax",
        }
    }
}

impl Display for ActivityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sightseeing" => Ok(Self::Sightseeing),
            "food" => Ok(Self::Food),
            "adventure" => Ok(Self::Adventure),
            "relax" => Ok(Self::Relax),
            other => Err(AppError::invalid_input(format!(
                "Unknown activity kind: {other}"
            ))),
        }
    }
}

/// One scheduled activity within a day plan
///
/// The `id` is assigned server-side when the itinerary is parsed (the
/// provider does not supply one). It is opaque, unique per item, and used
/// only for identity and reorder addressing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItineraryItem {
    /// Opaque unique identifier
    pub id: Uuid,
    /// Free-text time label (e.g. "09:00", "Morning")
    pub time: String,
    /// Free-text activity description
    pub activity: String,
    /// Activity kind
    #[serde(rename = "type")]
    pub kind: ActivityKind,
}

impl ItineraryItem {
    /// Create a new item with a freshly assigned identifier
    #[must_use]
    pub fn new(time: impl Into<String>, activity: impl Into<String>, kind: ActivityKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            time: time.into(),
            activity: activity.into(),
            kind,
        }
    }
}

/// Plan for a single day of a trip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayPlan {
    /// 1-based day ordinal
    pub day: u32,
    /// Ordered list of activities for this day
    pub activities: Vec<ItineraryItem>,
}

impl DayPlan {
    /// Create an empty plan for the given day ordinal
    #[must_use]
    pub const fn new(day: u32) -> Self {
        Self {
            day,
            activities: Vec::new(),
        }
    }
}

/// An ordered board of day plans with the reorder operation
///
/// Reordering moves an item from one day's list to the end of another's
/// (or the same day's). At most one instance of each item exists across the
/// board; a move removes it from exactly one list and appends it to exactly
/// one list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Itinerary {
    days: Vec<DayPlan>,
}

impl Itinerary {
    /// Wrap an ordered list of day plans
    #[must_use]
    pub fn new(days: Vec<DayPlan>) -> Self {
        Self { days }
    }

    /// The ordered day plans
    #[must_use]
    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    /// Number of days on the board
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Total number of activities across all days
    #[must_use]
    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|d| d.activities.len()).sum()
    }

    /// Move the activity at `(from_day, from_position)` to the end of
    /// `to_day`'s list
    ///
    /// Indices are 0-based positions on the board, not day ordinals. Any
    /// out-of-range index leaves the board unchanged and returns `false`;
    /// the caller can observe that nothing moved without the operation
    /// failing. Moving within the same day re-appends the item at the end.
    pub fn reorder(&mut self, from_day: usize, from_position: usize, to_day: usize) -> bool {
        if to_day >= self.days.len() {
            return false;
        }
        let Some(source) = self.days.get_mut(from_day) else {
            return false;
        };
        if from_position >= source.activities.len() {
            return false;
        }

        let item = source.activities.remove(from_position);
        self.days[to_day].activities.push(item);
        true
    }
}

// ============================================================================
// Chat Transcript
// ============================================================================

/// Role of a turn in a chat transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// End-user input turn
    User,
    /// Assistant reply turn
    Model,
}

impl ChatRole {
    /// String representation matching the upstream wire format
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// One role-tagged message in a chat transcript
///
/// The transcript is append-only; only the most recent model turn is mutated,
/// and only while its stream is in flight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    /// Who produced this turn
    pub role: ChatRole,
    /// Accumulated text of the turn
    pub text: String,
}

impl ChatTurn {
    /// Create a user turn
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    /// Create a model turn
    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

// ============================================================================
// Cost Estimator
// ============================================================================

/// Travel style selector for the cost estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelStyle {
    /// Base prices
    Budget,
    /// Everything at 2.5x
    Luxury,
}

impl TravelStyle {
    /// Price multiplier applied to every cost component
    #[must_use]
    pub const fn multiplier(&self) -> f64 {
        match self {
            Self::Budget => 1.0,
            Self::Luxury => 2.5,
        }
    }
}

/// One named row of a cost breakdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostLineItem {
    /// Row label (Flights, Stay, Daily, Transport)
    pub name: String,
    /// Estimated amount in USD
    pub amount: f64,
}

/// Complete cost breakdown for a trip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostEstimate {
    /// Named breakdown rows in fixed order
    pub rows: Vec<CostLineItem>,
    /// Sum of all rows
    pub total: f64,
}

/// Estimate trip cost from traveler count, duration, and style
///
/// Pure arithmetic, no upstream call. Component formulas:
/// flights `500 x multiplier x travelers`, stay `100 x days x multiplier`,
/// daily `50 x days x travelers x multiplier`, transport `100 x multiplier`.
#[must_use]
pub fn estimate_cost(travelers: u32, days: u32, style: TravelStyle) -> CostEstimate {
    let multiplier = style.multiplier();
    let travelers = f64::from(travelers);
    let days = f64::from(days);

    let rows = vec![
        CostLineItem {
            name: "Flights".into(),
            amount: 500.0 * multiplier * travelers,
        },
        CostLineItem {
            name: "Stay".into(),
            amount: 100.0 * days * multiplier,
        },
        CostLineItem {
            name: "Daily".into(),
            amount: 50.0 * days * travelers * multiplier,
        },
        CostLineItem {
            name: "Transport".into(),
            amount: 100.0 * multiplier,
        },
    ];
    let total = rows.iter().map(|row| row.amount).sum();

    CostEstimate { rows, total }
}
