// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Provides protocol-agnostic trip planning flows reusable across entry points
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! Domain service layer
//!
//! This module contains protocol-agnostic business logic extracted from route handlers.
//! Services compose gateway operations into multi-step flows so route handlers stay
//! thin and the same rules apply regardless of the entry point.

/// Trip planning orchestration: vibe resolution, destination guides, itineraries
pub mod trip_planning;
