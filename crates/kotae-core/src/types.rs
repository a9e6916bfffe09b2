// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Kotae workspace.

use serde::{Deserialize, Serialize};

/// One completed question/answer exchange for a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// What the user asked.
    pub question: String,
    /// What the bot answered.
    pub answer: String,
}

impl ConversationTurn {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Normalized result of an answer pipeline invocation.
///
/// Adapters must produce exactly this shape; callers never inspect
/// provider-specific response structures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineAnswer {
    /// The natural-language answer text.
    pub answer: String,
    /// Identifiers of the retrieved passages the answer was grounded on.
    /// Empty when the pipeline did no retrieval.
    pub sources: Vec<String>,
}

impl PipelineAnswer {
    /// An answer with no retrieval sources attached.
    pub fn plain(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            sources: Vec::new(),
        }
    }
}
