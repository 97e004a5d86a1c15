// ABOUTME: Chat session state machine and bounded in-memory session store
// ABOUTME: Tracks transcripts with an open model turn during streaming and evicts sessions LRU
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! # Chat Sessions
//!
//! Server-side chat state. Each session is a transcript plus a two-state
//! machine per message cycle: **Idle** (accepting input) and **Awaiting**
//! (a streaming reply is in flight). Sending appends the user turn and an
//! empty open model turn; fragments mutate the open turn in place; completion
//! or failure closes it and returns to Idle. The transcript therefore has
//! exactly one open entry during streaming and zero otherwise.
//!
//! Sessions live in a bounded LRU store; when the capacity is exceeded the
//! least-recently-used session is evicted. Losing an evicted transcript is
//! accepted, a client holding a stale id simply gets 404 and starts over.

use std::num::NonZeroUsize;

use lru::LruCache;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::constants::{limits, messages};
use crate::errors::AppError;
use crate::models::ChatTurn;

// ============================================================================
// Session State Machine
// ============================================================================

/// Per-session streaming state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Accepting a new message
    Idle,
    /// A streaming reply is in flight
    Awaiting,
}

/// One chat session: transcript plus streaming state
#[derive(Debug, Clone, Serialize)]
pub struct ChatSession {
    /// Session identifier
    pub id: Uuid,
    /// Ordered turns, including the open model turn while streaming
    pub transcript: Vec<ChatTurn>,
    /// Current streaming state
    pub state: SessionState,
}

impl ChatSession {
    /// Create a session seeded with the assistant greeting turn
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            transcript: vec![ChatTurn::model(messages::CHAT_GREETING)],
            state: SessionState::Idle,
        }
    }

    /// Whether a streaming reply is currently in flight
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self.state, SessionState::Awaiting)
    }

    /// Start a message exchange: append the user turn and an empty open
    /// model turn, and return the prior turns for the upstream call
    ///
    /// # Errors
    ///
    /// Returns a conflict error if a reply is already streaming.
    pub fn begin_exchange(&mut self, user_text: impl Into<String>) -> Result<Vec<ChatTurn>, AppError> {
        if self.is_busy() {
            return Err(AppError::locked(
                "A reply is already streaming for this session",
            ));
        }

        let history = self.transcript.clone();
        self.transcript.push(ChatTurn::user(user_text));
        self.transcript.push(ChatTurn::model(""));
        self.state = SessionState::Awaiting;
        Ok(history)
    }

    /// Append a fragment onto the open model turn
    ///
    /// Ignored unless a reply is in flight.
    pub fn push_fragment(&mut self, delta: &str) {
        if !self.is_busy() {
            return;
        }
        if let Some(turn) = self.transcript.last_mut() {
            turn.text.push_str(delta);
        }
    }

    /// Close the open model turn, keeping its accumulated text
    pub fn complete(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Close the open model turn, replacing its text with the apology
    pub fn fail(&mut self) {
        if self.is_busy() {
            if let Some(turn) = self.transcript.last_mut() {
                turn.text = messages::CHAT_CONNECTION_APOLOGY.to_owned();
            }
        }
        self.state = SessionState::Idle;
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SSE Event Shapes
// ============================================================================

/// Events emitted on the chat message SSE response
///
/// Each event is one `data:` payload: the user-message echo, then one chunk
/// per fragment, then the done event with the full reply. A failure replaces
/// the remainder of the stream with a single error event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatStreamEvent {
    /// Echo of the accepted user message
    UserMessage {
        /// The message as stored in the transcript
        content: String,
    },
    /// One streamed fragment of the model reply
    Chunk {
        /// Text delta to append
        delta: String,
    },
    /// Successful end of the reply
    Done {
        /// The complete accumulated reply text
        full_content: String,
    },
    /// Stream failure; the transcript carries the apology turn
    Error {
        /// Human-readable failure description
        message: String,
    },
}

// ============================================================================
// Session Store
// ============================================================================

/// Bounded in-memory session store with LRU eviction
///
/// `LruCache::get` updates recency and therefore needs `&mut`, so the cache
/// sits behind a `Mutex` rather than an `RwLock`.
pub struct ChatSessionStore {
    sessions: Mutex<LruCache<Uuid, ChatSession>>,
}

impl ChatSessionStore {
    /// Capacity used when the configured value cannot be represented
    /// Note: `unreachable!()` on a compile-time constant is verified at compile time
    const FALLBACK_CAPACITY: NonZeroUsize =
        match NonZeroUsize::new(limits::DEFAULT_MAX_CHAT_SESSIONS) {
            Some(n) => n,
            None => unreachable!(),
        };

    /// Create a store bounded to `capacity` sessions
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(Self::FALLBACK_CAPACITY);
        Self {
            sessions: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Create and store a new greeting-seeded session
    pub async fn create(&self) -> ChatSession {
        let session = ChatSession::new();
        let mut sessions = self.sessions.lock().await;
        if let Some((evicted_id, _)) = sessions.push(session.id, session.clone()) {
            if evicted_id != session.id {
                debug!(session_id = %evicted_id, "Evicted least-recently-used chat session");
            }
        }
        session
    }

    /// Fetch a session snapshot, refreshing its recency
    pub async fn get(&self, id: Uuid) -> Option<ChatSession> {
        self.sessions.lock().await.get(&id).cloned()
    }

    /// Start an exchange on a session, returning the prior turns
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown (or evicted) session and a
    /// conflict error while a reply is already streaming.
    pub async fn begin_exchange(
        &self,
        id: Uuid,
        user_text: &str,
    ) -> Result<Vec<ChatTurn>, AppError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Chat session").with_resource_id(id.to_string()))?;
        session.begin_exchange(user_text)
    }

    /// Append a fragment to a session's open model turn
    ///
    /// A session evicted mid-stream loses the remainder of its transcript.
    pub async fn push_fragment(&self, id: Uuid, delta: &str) {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get_mut(&id) {
            session.push_fragment(delta);
        } else {
            debug!(session_id = %id, "Dropping fragment for evicted chat session");
        }
    }

    /// Mark a session's exchange as completed
    pub async fn complete(&self, id: Uuid) {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get_mut(&id) {
            session.complete();
        }
    }

    /// Mark a session's exchange as failed, writing the apology turn
    pub async fn fail(&self, id: Uuid) {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get_mut(&id) {
            session.fail();
        }
    }
}

impl std::fmt::Debug for ChatSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSessionStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use crate::models::ChatRole;

    #[test]
    fn test_new_session_is_seeded_with_greeting() {
        let session = ChatSession::new();
        assert_eq!(session.state, SessionState::Idle);
        assert_eq!(session.transcript.len(), 1);
        assert_eq!(session.transcript[0].role, ChatRole::Model);
        assert_eq!(
            session.transcript[0].text,
            "Hi! I am your AI travel buddy. Ask me about food, hidden gems, or safety tips!"
        );
    }

    #[test]
    fn test_begin_exchange_opens_model_turn_and_returns_history() {
        let mut session = ChatSession::new();
        let history = session.begin_exchange("Best food in Kyoto?").unwrap();

        // History is the transcript as it stood before this exchange
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, ChatRole::Model);

        assert_eq!(session.state, SessionState::Awaiting);
        assert_eq!(session.transcript.len(), 3);
        assert_eq!(session.transcript[1].role, ChatRole::User);
        assert_eq!(session.transcript[1].text, "Best food in Kyoto?");
        assert_eq!(session.transcript[2].role, ChatRole::Model);
        assert_eq!(session.transcript[2].text, "");
    }

    #[test]
    fn test_begin_exchange_while_busy_is_conflict() {
        let mut session = ChatSession::new();
        session.begin_exchange("first").unwrap();

        let err = session.begin_exchange("second").unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceLocked);
        // The rejected message left no trace
        assert_eq!(session.transcript.len(), 3);
    }

    #[test]
    fn test_fragments_mutate_open_turn_in_place() {
        let mut session = ChatSession::new();
        session.begin_exchange("hi").unwrap();
        let len_during = session.transcript.len();

        session.push_fragment("Try ");
        session.push_fragment("the ");
        session.push_fragment("market");

        assert_eq!(session.transcript.len(), len_during);
        assert_eq!(session.transcript[2].text, "Try the market");

        session.complete();
        assert_eq!(session.state, SessionState::Idle);
        assert_eq!(session.transcript[2].text, "Try the market");
    }

    #[test]
    fn test_push_fragment_ignored_while_idle() {
        let mut session = ChatSession::new();
        session.push_fragment("stray");
        assert_eq!(session.transcript.len(), 1);
        assert_eq!(
            session.transcript[0].text,
            "Hi! I am your AI travel buddy. Ask me about food, hidden gems, or safety tips!"
        );
    }

    #[test]
    fn test_fail_replaces_open_turn_with_apology() {
        let mut session = ChatSession::new();
        session.begin_exchange("hi").unwrap();
        session.push_fragment("partial rep");

        session.fail();
        assert_eq!(session.state, SessionState::Idle);
        assert_eq!(
            session.transcript[2].text,
            "Sorry, I am having trouble connecting right now."
        );

        // Session accepts the next message again
        assert!(session.begin_exchange("retry").is_ok());
    }

    #[test]
    fn test_stream_event_wire_shapes() {
        let echo = serde_json::to_value(ChatStreamEvent::UserMessage {
            content: "hello".to_owned(),
        })
        .unwrap();
        assert_eq!(echo, serde_json::json!({"type": "user_message", "content": "hello"}));

        let chunk = serde_json::to_value(ChatStreamEvent::Chunk {
            delta: "Try".to_owned(),
        })
        .unwrap();
        assert_eq!(chunk, serde_json::json!({"type": "chunk", "delta": "Try"}));

        let done = serde_json::to_value(ChatStreamEvent::Done {
            full_content: "Try the market".to_owned(),
        })
        .unwrap();
        assert_eq!(
            done,
            serde_json::json!({"type": "done", "full_content": "Try the market"})
        );

        let error = serde_json::to_value(ChatStreamEvent::Error {
            message: "upstream failure".to_owned(),
        })
        .unwrap();
        assert_eq!(
            error,
            serde_json::json!({"type": "error", "message": "upstream failure"})
        );
    }

    #[tokio::test]
    async fn test_store_create_and_get() {
        let store = ChatSessionStore::new(8);
        let created = store.create().await;

        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.transcript.len(), 1);

        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_store_evicts_least_recently_used() {
        let store = ChatSessionStore::new(2);
        let first = store.create().await;
        let second = store.create().await;
        // Touch the first so the second becomes least recently used
        store.get(first.id).await.unwrap();

        let third = store.create().await;

        assert!(store.get(first.id).await.is_some());
        assert!(store.get(second.id).await.is_none());
        assert!(store.get(third.id).await.is_some());
    }

    #[tokio::test]
    async fn test_store_begin_exchange_unknown_session() {
        let store = ChatSessionStore::new(8);
        let err = store
            .begin_exchange(Uuid::new_v4(), "hello")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
    }

    #[tokio::test]
    async fn test_store_full_exchange_lifecycle() {
        let store = ChatSessionStore::new(8);
        let session = store.create().await;

        let history = store.begin_exchange(session.id, "hello").await.unwrap();
        assert_eq!(history.len(), 1);

        store.push_fragment(session.id, "Hi ").await;
        store.push_fragment(session.id, "there").await;
        store.complete(session.id).await;

        let after = store.get(session.id).await.unwrap();
        assert_eq!(after.state, SessionState::Idle);
        assert_eq!(after.transcript.len(), 3);
        assert_eq!(after.transcript[2].text, "Hi there");
    }
}
