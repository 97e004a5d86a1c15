// ABOUTME: HTTP middleware for cross-origin access and request plumbing
// ABOUTME: Provides CORS configuration shared by all API routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

pub mod cors;

// CORS configuration
pub use cors::setup_cors;
