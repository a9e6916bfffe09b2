// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Answer pipeline boundary trait.

use async_trait::async_trait;

use crate::error::KotaeError;
use crate::types::{ConversationTurn, PipelineAnswer};

/// Turns a user question (plus recent conversation history) into an answer.
///
/// Implementations are expected to be slow and occasionally failing: they
/// typically perform retrieval over an embedded document index followed by
/// a generative model call. Callers must treat every invocation as
/// fallible and must not assume cancellation is possible.
#[async_trait]
pub trait AnswerPipeline: Send + Sync {
    /// Produces an answer for `question`, given the user's recent turns in
    /// chronological order (oldest first).
    async fn answer(
        &self,
        question: &str,
        history: &[ConversationTurn],
    ) -> Result<PipelineAnswer, KotaeError>;
}
