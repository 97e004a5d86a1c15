// ABOUTME: Static exploration catalog: trending destination cards and vibe chips
// ABOUTME: Fixed marketing data the SPA renders before any search happens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! # Exploration Catalog
//!
//! The trending destination cards and vibe chips shown on the exploration
//! view. The data is fixed; it is served from the API so the SPA does not
//! hardcode it. Prices are display strings, not amounts for arithmetic.

use serde::Serialize;

/// One trending destination card
#[derive(Debug, Clone, Serialize)]
pub struct TrendingDestination {
    /// Stable card ordinal
    pub id: u32,
    /// Display name, uppercased as rendered
    pub name: &'static str,
    /// Display price string (e.g. `$1,200`)
    pub price: &'static str,
    /// Card image URL
    pub image: &'static str,
}

/// The complete catalog payload
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    /// Trending destination cards in display order
    pub trending: Vec<TrendingDestination>,
    /// Vibe chips in display order
    pub vibes: Vec<&'static str>,
}

/// Trending destination cards in display order
pub const TRENDING: [TrendingDestination; 6] = [
    TrendingDestination {
        id: 1,
        name: "TOKYO",
        price: "$1,200",
        image: "https://images.unsplash.com/photo-1503899036084-c55cdd92da26",
    },
    TrendingDestination {
        id: 2,
        name: "ICELAND",
        price: "$1,500",
        image: "https://images.unsplash.com/photo-1476610182048-b716b8518aae",
    },
    TrendingDestination {
        id: 3,
        name: "MARRAKECH",
        price: "$900",
        image: "https://images.unsplash.com/photo-1597212618440-806262de4f6b",
    },
    TrendingDestination {
        id: 4,
        name: "BALI",
        price: "$800",
        image: "https://images.unsplash.com/photo-1537996194471-e657df975ab4",
    },
    TrendingDestination {
        id: 5,
        name: "NYC",
        price: "$1,800",
        image: "https://images.unsplash.com/photo-1496442226666-8d4d0e62e6e9",
    },
    TrendingDestination {
        id: 6,
        name: "SANTORINI",
        price: "$2,000",
        image: "https://images.unsplash.com/photo-1570077188670-e3a8d69ac5ff",
    },
];

/// Vibe chips in display order
pub const VIBES: [&str; 5] = [
    "Solo Trip",
    "Hidden Gems",
    "Cyberpunk",
    "Digital Nomad",
    "Eco-Retreat",
];

/// Assemble the catalog payload
#[must_use]
pub fn catalog() -> Catalog {
    Catalog {
        trending: TRENDING.to_vec(),
        vibes: VIBES.to_vec(),
    }
}
