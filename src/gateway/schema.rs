// ABOUTME: Response schema declarations for schema-constrained Gemini calls
// ABOUTME: Keeps the OBJECT/ARRAY type-tag JSON the Generative Language API expects in one place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! # Response Schemas
//!
//! Schema declarations sent with structured-output calls so the model emits
//! parseable JSON instead of prose. The Generative Language API takes an
//! OpenAPI-style subset with uppercase type tags (`OBJECT`, `ARRAY`,
//! `STRING`, `INTEGER`); these builders are the only place that wire
//! convention appears.

use serde_json::{json, Value};

/// Schema for a destination travel guide
///
/// All five fields are required so a partial guide is rejected at the
/// provider instead of surfacing as missing UI data.
#[must_use]
pub fn destination_details() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "description": { "type": "STRING" },
            "weather": { "type": "STRING" },
            "bestTime": { "type": "STRING" },
            "visaRequirements": { "type": "STRING" },
            "culturalTips": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["description", "weather", "bestTime", "visaRequirements", "culturalTips"]
    })
}

/// Schema for a day-by-day itinerary
///
/// The activity `type` enum must stay in step with the wire names of
/// [`ActivityKind`](crate::models::ActivityKind).
#[must_use]
pub fn itinerary() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "day": { "type": "INTEGER" },
                "activities": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "time": { "type": "STRING" },
                            "activity": { "type": "STRING" },
                            "type": {
                                "type": "STRING",
                                "enum": ["sightseeing", "food", "adventure", "relax"]
                            }
                        }
                    }
                }
            }
        }
    })
}

/// Schema for vibe matching: a bare array of destination names
#[must_use]
pub fn vibe_destinations() -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "STRING" }
    })
}
