// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, defaults, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Marco Travel Intelligence

//! Environment-based configuration management for production deployment

use crate::constants::{env_config, limits, upstream};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{info, warn};
use url::Url;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => LogLevel::Error,
            "warn" => LogLevel::Warn,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Info, // Default fallback
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Bind host
    pub host: String,
    /// Log level
    pub log_level: LogLevel,
    /// CORS settings for the SPA
    pub cors: CorsConfig,
    /// Upstream Gemini provider configuration
    pub gemini: GeminiConfig,
    /// In-memory session store settings
    pub sessions: SessionsConfig,
}

/// Cross-origin settings for browser clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origin list, or "*" for any origin
    pub allowed_origins: String,
}

/// Upstream Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; absent means the real provider cannot be constructed
    pub api_key: Option<String>,
    /// API base URL (overridable for tests and proxies)
    pub base_url: String,
    /// Model for text and structured-output calls
    pub model: String,
    /// Model for image analysis calls
    pub vision_model: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Bounds for the in-memory chat session store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsConfig {
    /// LRU capacity; least-recently-used sessions are evicted above this
    pub max_chat_sessions: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let config = ServerConfig {
            http_port: env_config::http_port(),
            host: env_config::host(),
            log_level: LogLevel::from_str_or_default(&env_config::log_level()),

            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*")?,
            },

            gemini: GeminiConfig {
                api_key: env_config::gemini_api_key(),
                base_url: env_var_or("GEMINI_BASE_URL", upstream::GEMINI_API_BASE)?,
                model: env_var_or("GEMINI_MODEL", upstream::DEFAULT_TEXT_MODEL)?,
                vision_model: env_var_or("GEMINI_VISION_MODEL", upstream::DEFAULT_VISION_MODEL)?,
                timeout_secs: env_var_or(
                    "GEMINI_TIMEOUT_SECS",
                    &limits::DEFAULT_UPSTREAM_TIMEOUT_SECS.to_string(),
                )?
                .parse()
                .context("Invalid GEMINI_TIMEOUT_SECS value")?,
            },

            sessions: SessionsConfig {
                max_chat_sessions: env_var_or(
                    "MAX_CHAT_SESSIONS",
                    &limits::DEFAULT_MAX_CHAT_SESSIONS.to_string(),
                )?
                .parse()
                .context("Invalid MAX_CHAT_SESSIONS value")?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            return Err(anyhow::anyhow!("HTTP_PORT must be non-zero"));
        }

        Url::parse(&self.gemini.base_url).context("Invalid GEMINI_BASE_URL")?;

        if self.gemini.timeout_secs == 0 {
            return Err(anyhow::anyhow!("GEMINI_TIMEOUT_SECS must be non-zero"));
        }

        if self.sessions.max_chat_sessions == 0 {
            return Err(anyhow::anyhow!("MAX_CHAT_SESSIONS must be non-zero"));
        }

        if self.gemini.api_key.is_none() {
            warn!("GEMINI_API_KEY is not set; upstream calls will be unavailable");
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    pub fn summary(&self) -> String {
        format!(
            "Marco Travel API Configuration:\n\
             - HTTP Port: {}\n\
             - Host: {}\n\
             - Log Level: {}\n\
             - Gemini API Key: {}\n\
             - Gemini Model: {}\n\
             - Gemini Vision Model: {}\n\
             - Upstream Timeout: {}s\n\
             - CORS Origins: {}\n\
             - Max Chat Sessions: {}",
            self.http_port,
            self.host,
            self.log_level,
            if self.gemini.api_key.is_some() {
                "Configured"
            } else {
                "Missing"
            },
            self.gemini.model,
            self.gemini.vision_model,
            self.gemini.timeout_secs,
            self.cors.allowed_origins,
            self.sessions.max_chat_sessions,
        )
    }

    /// Get the Gemini API key if available
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini.api_key.as_deref()
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> Result<String> {
    Ok(env::var(key).unwrap_or_else(|_| default.to_string()))
}
