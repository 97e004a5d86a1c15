// ABOUTME: Shared test helper modules for integration tests
// ABOUTME: Provides the axum request harness and the scripted generation provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

// Each test binary compiles this module separately and uses a subset of it
#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod axum_test;
pub mod scripted_provider;
