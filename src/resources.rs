// ABOUTME: Centralized resource container for dependency injection across route handlers
// ABOUTME: Holds the shared config, gateway, and in-memory stores behind Arc
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! # Server Resources Module
//!
//! Centralized resource container for dependency injection. Route modules
//! take an `Arc<ServerResources>` as axum state instead of threading each
//! dependency separately; tests build one around a scripted provider.

use std::sync::Arc;

use crate::chat::ChatSessionStore;
use crate::config::environment::ServerConfig;
use crate::gateway::TravelGateway;
use crate::trips::TripStore;

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Typed gateway to the generation provider
    pub gateway: Arc<TravelGateway>,
    /// In-memory trip store
    pub trips: Arc<TripStore>,
    /// Bounded in-memory chat session store
    pub chat_sessions: Arc<ChatSessionStore>,
}

impl ServerResources {
    /// Create server resources with proper Arc sharing
    #[must_use]
    pub fn new(config: Arc<ServerConfig>, gateway: TravelGateway) -> Self {
        let session_capacity = config.sessions.max_chat_sessions;
        Self {
            config,
            gateway: Arc::new(gateway),
            trips: Arc::new(TripStore::new()),
            chat_sessions: Arc::new(ChatSessionStore::new(session_capacity)),
        }
    }
}
