// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Kotae bot service.
//!
//! This crate provides the foundational trait definitions, error types,
//! and common types used throughout the Kotae workspace. The webhook
//! channel, answer pipeline, and history store crates all implement
//! traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::KotaeError;
pub use traits::{AnswerPipeline, Embedder, HistoryStore, ReplyTransport};
pub use types::{ConversationTurn, PipelineAnswer};
