// ABOUTME: Prompt templates for the travel gateway operations
// ABOUTME: Centralizes the exact wording sent upstream so behavior stays reproducible
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! # Prompt Templates
//!
//! The exact prompts sent upstream. Structured-output prompts end with an
//! explicit "Return strictly JSON" nudge in addition to the declared response
//! schema; the wording is part of observable behavior and is matched by
//! tests, so it must not be reworded casually.

/// Instruction sent with landmark photos
pub const LANDMARK_ANALYSIS: &str =
    "Identify this landmark and provide 3 interesting historical facts about it. Keep it concise.";

/// System instruction framing every chat exchange
pub const CHAT_SYSTEM_INSTRUCTION: &str =
    "You are a helpful, knowledgeable travel assistant. Keep answers concise and practical.";

/// Prompt for a destination travel guide
#[must_use]
pub fn destination_guide(destination: &str) -> String {
    format!("Provide a travel guide for {destination}. Return strictly JSON.")
}

/// Prompt for a day-by-day itinerary
#[must_use]
pub fn itinerary(destination: &str, days: u32, interests: &str) -> String {
    format!(
        "Create a {days}-day itinerary for {destination} focusing on: {interests}. Return strictly JSON."
    )
}

/// Prompt for vibe-based destination matching
#[must_use]
pub fn vibe_match(vibe: &str) -> String {
    format!(
        "Suggest 3 travel destinations that match this vibe: \"{vibe}\". Return only a JSON array of strings (names of places)."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_guide_wording() {
        assert_eq!(
            destination_guide("Kyoto"),
            "Provide a travel guide for Kyoto. Return strictly JSON."
        );
    }

    #[test]
    fn test_itinerary_wording() {
        assert_eq!(
            itinerary("Lisbon", 3, "food, architecture"),
            "Create a 3-day itinerary for Lisbon focusing on: food, architecture. Return strictly JSON."
        );
    }

    #[test]
    fn test_vibe_match_quotes_the_vibe() {
        assert_eq!(
            vibe_match("cyberpunk city lights"),
            "Suggest 3 travel destinations that match this vibe: \"cyberpunk city lights\". Return only a JSON array of strings (names of places)."
        );
    }
}
