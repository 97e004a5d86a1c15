// ABOUTME: Configuration management module for centralized server settings and parameters
// ABOUTME: Handles environment-derived configuration for the HTTP server and upstream provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! Configuration module for the Marco Travel API server
//!
//! All configuration is environment-derived (twelve-factor style): the server
//! reads process environment variables at startup, applies defaults, and
//! validates the result before anything binds a socket or talks to the
//! upstream provider.

/// Environment and server configuration
pub mod environment;

pub use environment::{CorsConfig, GeminiConfig, LogLevel, ServerConfig, SessionsConfig};
