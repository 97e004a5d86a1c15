// ABOUTME: Chat route handlers for AI travel assistant sessions
// ABOUTME: Provides REST endpoints for creating sessions and streaming replies over SSE
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! Chat routes for the AI travel assistant
//!
//! This module handles chat session management: creating sessions, fetching
//! transcripts, and streaming model replies. The message endpoint responds
//! with SSE; session-state conflicts surface as HTTP errors before any
//! stream bytes are written.

use crate::{
    chat::ChatStreamEvent,
    errors::AppError,
    resources::ServerResources,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use futures_util::stream::Stream;
use serde::Deserialize;
use std::{convert::Infallible, sync::Arc};
use tokio_stream::StreamExt;
use uuid::Uuid;

// ============================================================================
// Request Types
// ============================================================================

/// Request to send a message on a session
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    /// Message content
    pub message: String,
}

// ============================================================================
// Chat Routes
// ============================================================================

/// Chat routes handler
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create all chat routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/chat/sessions", post(Self::create_session))
            .route("/api/chat/sessions/:session_id", get(Self::get_session))
            .route(
                "/api/chat/sessions/:session_id/messages",
                post(Self::send_message),
            )
            .with_state(resources)
    }

    /// Serialize a stream event into an SSE `data:` payload
    fn event_payload(event: &ChatStreamEvent) -> Event {
        let payload = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_owned());
        Event::default().data(payload)
    }

    /// Create a new session seeded with the assistant greeting
    async fn create_session(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let session = resources.chat_sessions.create().await;

        Ok((StatusCode::CREATED, Json(session)).into_response())
    }

    /// Fetch a session transcript and state
    async fn get_session(
        State(resources): State<Arc<ServerResources>>,
        Path(session_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let session = resources
            .chat_sessions
            .get(session_id)
            .await
            .ok_or_else(|| {
                AppError::not_found("Chat session").with_resource_id(session_id.to_string())
            })?;

        Ok((StatusCode::OK, Json(session)).into_response())
    }

    /// Send a message and stream the model reply via SSE
    ///
    /// Unknown-session and in-flight conflicts are rejected with the
    /// uniform error envelope before the stream begins; failures after the
    /// first byte surface as an `error` event and the session transcript
    /// carries the apology turn.
    async fn send_message(
        State(resources): State<Arc<ServerResources>>,
        Path(session_id): Path<Uuid>,
        Json(request): Json<SendMessageRequest>,
    ) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
        let message = request.message.trim().to_owned();
        if message.is_empty() {
            return Err(AppError::invalid_input("Message must not be empty"));
        }

        // Claims the session's open turn; 404/409 happen here, pre-stream
        let history = resources
            .chat_sessions
            .begin_exchange(session_id, &message)
            .await?;

        let gateway = resources.gateway.clone();
        let sessions = resources.chat_sessions.clone();

        let stream = async_stream::stream! {
            yield Ok(Self::event_payload(&ChatStreamEvent::UserMessage {
                content: message.clone(),
            }));

            let mut fragments = match gateway.stream_chat(&history, &message).await {
                Ok(fragments) => fragments,
                Err(e) => {
                    sessions.fail(session_id).await;
                    yield Ok(Self::event_payload(&ChatStreamEvent::Error {
                        message: e.to_string(),
                    }));
                    return;
                }
            };

            let mut full_content = String::new();
            while let Some(chunk_result) = fragments.next().await {
                match chunk_result {
                    Ok(chunk) => {
                        if !chunk.delta.is_empty() {
                            full_content.push_str(&chunk.delta);
                            sessions.push_fragment(session_id, &chunk.delta).await;
                            yield Ok(Self::event_payload(&ChatStreamEvent::Chunk {
                                delta: chunk.delta,
                            }));
                        }
                    }
                    Err(e) => {
                        sessions.fail(session_id).await;
                        yield Ok(Self::event_payload(&ChatStreamEvent::Error {
                            message: e.to_string(),
                        }));
                        return;
                    }
                }
            }

            sessions.complete(session_id).await;
            yield Ok(Self::event_payload(&ChatStreamEvent::Done { full_content }));
        };

        Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
    }
}
