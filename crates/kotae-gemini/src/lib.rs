// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini provider client for the Kotae bot service.
//!
//! Implements the `generateContent` call used by the answer pipeline,
//! with bearer-style API key authentication and transient-error retry.

pub mod client;
pub mod types;

pub use client::GeminiClient;
pub use types::{Content, Part};
