// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Kotae bot service.

use thiserror::Error;

/// The primary error type used across all Kotae crates.
#[derive(Debug, Error)]
pub enum KotaeError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Channel transport errors (webhook parsing, bind failure, platform API transport).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Answer pipeline errors (LLM call, embedding, retrieval).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The platform's reply/push endpoint returned a non-success status.
    ///
    /// Carries the HTTP status and response body verbatim so callers can
    /// log the platform's own error description.
    #[error("delivery failed with status {status}: {body}")]
    Delivery { status: u16, body: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl KotaeError {
    /// Shorthand for a channel error without an underlying source.
    pub fn channel(message: impl Into<String>) -> Self {
        KotaeError::Channel {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        KotaeError::Provider {
            message: message.into(),
            source: None,
        }
    }
}
