// ABOUTME: Scripted generation provider for automated testing without upstream calls
// ABOUTME: Replays pre-configured replies and records requests for assertion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use async_trait::async_trait;
use marco_travel_server::errors::AppError;
use marco_travel_server::gateway::{
    FragmentStream, GenerationCapabilities, GenerationProvider, GenerationRequest, StreamChunk,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted streaming call: either a sequence of chunk results or a
/// connection-time failure
pub type StreamScript = Result<Vec<Result<StreamChunk, AppError>>, AppError>;

/// Scripted provider for testing routes without real upstream calls
///
/// Unary replies and stream scripts are consumed in order, one per call,
/// and every request is recorded for assertion.
///
/// # Thread Safety
///
/// All interior state is behind `Mutex`, so one instance can safely be
/// shared between a router under test and the test body.
pub struct ScriptedProvider {
    capabilities: GenerationCapabilities,
    replies: Mutex<VecDeque<Result<String, AppError>>>,
    stream_scripts: Mutex<VecDeque<StreamScript>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedProvider {
    /// Create a full-featured provider with the given unary replies
    #[must_use]
    pub fn new(replies: Vec<Result<String, AppError>>) -> Self {
        Self {
            capabilities: GenerationCapabilities::full_featured(),
            replies: Mutex::new(replies.into_iter().collect()),
            stream_scripts: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Override the advertised capabilities
    #[allow(dead_code)]
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: GenerationCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Queue one streaming call that yields the given chunk results
    #[allow(dead_code)]
    #[must_use]
    pub fn with_stream(self, chunks: Vec<Result<StreamChunk, AppError>>) -> Self {
        self.stream_scripts.lock().unwrap().push_back(Ok(chunks));
        self
    }

    /// Queue one streaming call that fails at connection time
    #[allow(dead_code)]
    #[must_use]
    pub fn with_stream_error(self, error: AppError) -> Self {
        self.stream_scripts.lock().unwrap().push_back(Err(error));
        self
    }

    /// All requests the provider has seen, in order
    #[allow(dead_code)]
    pub fn recorded_requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted"
    }

    fn capabilities(&self) -> GenerationCapabilities {
        self.capabilities
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::internal("no scripted reply")))
    }

    async fn generate_stream(
        &self,
        request: &GenerationRequest,
    ) -> Result<FragmentStream, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        let script = self
            .stream_scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::internal("no scripted stream")));
        let chunks = script?;
        Ok(Box::pin(futures_util::stream::iter(chunks)))
    }
}

/// Build a chunk script from text fragments, closed by a final stop chunk
#[allow(dead_code)]
#[must_use]
pub fn text_chunks(fragments: &[&str]) -> Vec<Result<StreamChunk, AppError>> {
    let mut chunks: Vec<Result<StreamChunk, AppError>> = fragments
        .iter()
        .map(|fragment| {
            Ok(StreamChunk {
                delta: (*fragment).to_owned(),
                is_final: false,
                finish_reason: None,
            })
        })
        .collect();
    chunks.push(Ok(StreamChunk {
        delta: String::new(),
        is_final: true,
        finish_reason: Some("stop".to_owned()),
    }));
    chunks
}
