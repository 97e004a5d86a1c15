// ABOUTME: Line-buffering SSE (Server-Sent Events) parser for streaming generation replies
// ABOUTME: Handles partial lines across TCP boundaries and multiple events per chunk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! # SSE Stream Parser
//!
//! A line-buffering parser for the Server-Sent Events framing used by the
//! streaming generation endpoint. Solves two correctness issues:
//!
//! 1. **Multiple events per TCP chunk**: When network buffers batch several
//!    SSE events into a single `bytes_stream()` chunk, all events are emitted
//!    (not just the first).
//!
//! 2. **Partial JSON across TCP boundaries**: When a JSON payload is split
//!    across two TCP chunks, the line buffer accumulates partial data until a
//!    complete line arrives.
//!
//! The SSE framing (line buffering, `data:` prefix stripping, `[DONE]`
//! detection) lives here; the provider supplies a `parse_data` closure that
//! converts the raw JSON payload of each event into a [`StreamChunk`].

use std::collections::VecDeque;
use std::mem;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::stream::unfold;
use futures_util::{future, Stream, StreamExt};

use super::{FragmentStream, StreamChunk};
use crate::errors::AppError;

/// A parsed SSE event from the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// A `data:` payload with the JSON string (prefix stripped)
    Data(String),
    /// The `[DONE]` termination marker some SSE producers emit
    Done,
}

/// Line-buffering SSE parser that handles partial lines across TCP chunk boundaries
///
/// SSE streams are newline-delimited, but TCP does not guarantee alignment
/// between network chunks and event boundaries. This parser buffers incomplete
/// lines and emits events only when a full line (terminated by `\n`) is
/// available.
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    /// Accumulated bytes not yet terminated by a newline
    buffer: String,
}

impl SseLineBuffer {
    /// Create a new empty line buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes from a TCP chunk, returning any complete SSE events
    ///
    /// Bytes are appended to the internal buffer. Complete lines are
    /// extracted and parsed; any trailing partial line remains buffered for
    /// the next `feed()` call.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buffer.push_str(&String::from_utf8_lossy(bytes));

        let mut events = Vec::new();
        while let Some(newline_pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline_pos).collect();
            if let Some(event) = Self::classify(line.trim()) {
                events.push(event);
            }
        }
        events
    }

    /// Flush any remaining buffered content as a final event
    ///
    /// Called when the byte stream ends. A partial line left in the buffer
    /// (no trailing newline) is still parsed so a final payload without a
    /// terminator is not lost.
    pub fn flush(&mut self) -> Vec<SseEvent> {
        let remaining = mem::take(&mut self.buffer);
        Self::classify(remaining.trim()).into_iter().collect()
    }

    /// Classify one trimmed line as an SSE event
    ///
    /// Empty lines (event separators) and non-data fields (`event:`, `id:`,
    /// `retry:`, comment lines starting with `:`) yield nothing.
    fn classify(line: &str) -> Option<SseEvent> {
        if line == "data: [DONE]" {
            return Some(SseEvent::Done);
        }
        let payload = line.strip_prefix("data: ")?;
        if payload.trim().is_empty() {
            None
        } else {
            Some(SseEvent::Data(payload.to_owned()))
        }
    }
}

/// Internal state for the SSE stream unfold
struct SseStreamState {
    parser: SseLineBuffer,
    pending: VecDeque<Result<StreamChunk, AppError>>,
    stream_ended: bool,
}

impl SseStreamState {
    /// Run parsed events through `parse_data` and queue the resulting chunks
    ///
    /// `Done` markers become empty final chunks; `parse_data` returning
    /// `None` skips events that produce no output (metadata-only payloads).
    fn enqueue<F>(&mut self, events: Vec<SseEvent>, parse_data: &F)
    where
        F: Fn(&str) -> Option<Result<StreamChunk, AppError>>,
    {
        for event in events {
            match event {
                SseEvent::Data(payload) => {
                    if let Some(result) = parse_data(&payload) {
                        self.pending.push_back(result);
                    }
                }
                SseEvent::Done => {
                    self.pending.push_back(Ok(StreamChunk {
                        delta: String::new(),
                        is_final: true,
                        finish_reason: Some("stop".to_owned()),
                    }));
                }
            }
        }
    }
}

/// Create a properly-buffered fragment stream from a raw byte stream
///
/// Wraps a `reqwest` byte stream with SSE line buffering. The `parse_data`
/// closure converts each event's JSON payload into a [`StreamChunk`], or
/// `None` for events that produce no output.
///
/// Empty deltas are filtered out unless they carry the final marker, so
/// consumers never see zero-length fragments mid-stream.
pub fn create_sse_stream<S, F>(
    byte_stream: S,
    parse_data: F,
    provider_name: &'static str,
) -> FragmentStream
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    F: Fn(&str) -> Option<Result<StreamChunk, AppError>> + Send + 'static,
{
    let state = SseStreamState {
        parser: SseLineBuffer::new(),
        pending: VecDeque::new(),
        stream_ended: false,
    };

    // Unfold keeps parser state across async iterations. Each iteration
    // either drains a pending event or reads the next TCP chunk.
    let stream = unfold(
        (
            Box::pin(byte_stream)
                as Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>,
            state,
            parse_data,
            provider_name,
        ),
        |(mut byte_stream, mut state, parse_data, provider_name)| async move {
            loop {
                // Drain pending events first (multiple SSE events per TCP chunk)
                if let Some(item) = state.pending.pop_front() {
                    return Some((item, (byte_stream, state, parse_data, provider_name)));
                }

                if state.stream_ended {
                    return None;
                }

                match byte_stream.next().await {
                    Some(Ok(bytes)) => {
                        let events = state.parser.feed(&bytes);
                        state.enqueue(events, &parse_data);
                        // Loop to drain pending events
                    }
                    Some(Err(e)) => {
                        state.stream_ended = true;
                        return Some((
                            Err(AppError::external_service(
                                provider_name,
                                format!("Stream read error: {e}"),
                            )),
                            (byte_stream, state, parse_data, provider_name),
                        ));
                    }
                    None => {
                        // Byte stream ended, flush the remaining buffer
                        state.stream_ended = true;
                        let events = state.parser.flush();
                        state.enqueue(events, &parse_data);
                        if let Some(item) = state.pending.pop_front() {
                            return Some((item, (byte_stream, state, parse_data, provider_name)));
                        }
                        return None;
                    }
                }
            }
        },
    );

    let filtered = stream.filter(|result| {
        future::ready(
            result
                .as_ref()
                .map_or(true, |chunk| !chunk.delta.is_empty() || chunk.is_final),
        )
    });

    Box::pin(filtered)
}
