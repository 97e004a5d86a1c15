// ABOUTME: Main library entry point for the Marco Travel API platform
// ABOUTME: Provides REST + SSE endpoints for AI-powered travel planning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy. Nothing in this crate
//   needs raw pointers or FFI.
#![deny(unsafe_code)]

//! # Marco Travel API
//!
//! An AI-powered travel planning backend. The server owns the Gemini
//! gateway, itinerary boards, and chat sessions, and exposes them to the
//! web client over REST and SSE.
//!
//! ## Features
//!
//! - **Destination guides**: Structured travel guides from one schema-bound
//!   generation call
//! - **Itinerary generation**: Day-by-day plans with server-assigned
//!   activity identity and a reorderable board
//! - **Vibe matching**: Free-text mood descriptions resolved to concrete
//!   destination suggestions, with a never-fail fallback
//! - **Landmark scanning**: Base64 photo analysis through the vision model
//! - **Streaming chat**: A travel-assistant chat whose replies stream over
//!   SSE, fragment by fragment
//!
//! ## Quick Start
//!
//! 1. Set `GEMINI_API_KEY` (a `.env` file works)
//! 2. Start the server with `marco-travel-server`
//! 3. Point the web client at `http://127.0.0.1:8081`
//!
//! ## Architecture
//!
//! The server follows a modular architecture:
//! - **Gateway**: Provider abstraction and the typed travel operations
//! - **Models**: Destination guides, itineraries, transcripts, cost math
//! - **Stores**: Bounded in-memory state for trips and chat sessions
//! - **Routes**: Thin axum handlers per domain, merged into one router
//! - **Config**: Environment-only configuration with validation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use marco_travel_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     // Load configuration
//!     let config = ServerConfig::from_env()?;
//!
//!     println!("Marco Travel API configured with port: HTTP={}",
//!              config.http_port);
//!
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the binary crate (src/bin/) and integration
// tests (tests/). They must remain `pub` so external consumers can access
// them.

/// Static exploration catalog: trending destinations and vibe chips
pub mod catalog;

/// Chat sessions: transcript state machine and the bounded session store
pub mod chat;

/// Configuration management from environment variables
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Gateway to the generation provider: wire protocol, schemas, operations
pub mod gateway;

/// Logging configuration and structured output setup
pub mod logging;

/// HTTP middleware (CORS)
pub mod middleware;

/// Core data models: guides, itineraries, transcripts, cost estimator
pub mod models;

/// Shared server resources passed to route handlers
pub mod resources;

/// HTTP routes organized by domain, plus router assembly
pub mod routes;

/// Domain services composing gateway operations into flows
pub mod services;

/// In-memory trip board store
pub mod trips;
