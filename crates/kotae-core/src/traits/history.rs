// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation history store trait.

use async_trait::async_trait;

use crate::error::KotaeError;
use crate::types::ConversationTurn;

/// Bounded per-user conversation memory.
///
/// Implementations keep at most a fixed number of recent turns per user
/// and evict the oldest turn first. The store is injected into the event
/// dispatcher rather than referenced as ambient global state.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Returns the user's recent turns in chronological order.
    /// An unknown user yields an empty history.
    async fn get(&self, user_id: &str) -> Result<Vec<ConversationTurn>, KotaeError>;

    /// Appends a completed turn, evicting the oldest if the bound is hit.
    async fn append(&self, user_id: &str, turn: ConversationTurn) -> Result<(), KotaeError>;
}
