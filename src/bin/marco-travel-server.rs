// ABOUTME: Server binary for the Marco Travel API
// ABOUTME: Production-ready entry point wiring config, logging, gateway, and router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! # Marco Travel API Server Binary
//!
//! This binary starts the travel-planning REST + SSE API with environment
//! configuration, structured logging, and the Gemini gateway.

use anyhow::{Context, Result};
use clap::Parser;
use marco_travel_server::{
    config::environment::ServerConfig, gateway::GeminiClient, gateway::TravelGateway, logging,
    resources::ServerResources, routes,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "marco-travel-server")]
#[command(about = "Marco Travel API - AI-powered travel planning backend")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle container environments where clap may not work properly
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Argument parsing failed: {e}");
            eprintln!("Using default configuration");
            Args { http_port: None }
        }
    };

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;

    // Override port if specified
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    // Initialize production logging
    logging::init_from_env()?;

    info!("Starting Marco Travel API");
    info!("{}", config.summary());

    // Construct the Gemini gateway; fails fast without an API key
    let gemini = GeminiClient::new(&config.gemini)?;
    let gateway = TravelGateway::new(Arc::new(gemini));
    info!("Gateway initialized: provider={}", gateway.provider_name());

    // Create server resources and the router
    let resources = Arc::new(ServerResources::new(Arc::new(config.clone()), gateway));
    let router = routes::router(resources);

    let bind_addr = format!("{}:{}", config.host, config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;
    info!("Listening on http://{bind_addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received, draining connections");
        })
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}
