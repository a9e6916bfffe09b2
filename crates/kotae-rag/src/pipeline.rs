// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The retrieval-augmented answer pipeline.
//!
//! Mirrors a conversational retrieval chain: follow-up questions are first
//! condensed into a standalone question using the conversation history,
//! the standalone question is embedded and matched against the corpus
//! index, and the top passages are handed to the model as grounding
//! context for the final answer.

use std::sync::Arc;

use async_trait::async_trait;
use kotae_core::{AnswerPipeline, ConversationTurn, Embedder, KotaeError, PipelineAnswer};
use kotae_gemini::{Content, GeminiClient};
use tracing::{debug, info};

use crate::index::{ScoredChunk, VectorIndex};
use crate::splitter::TextSplitter;

/// Production [`AnswerPipeline`] backed by the vector index and Gemini.
pub struct RagPipeline {
    client: GeminiClient,
    embedder: Arc<dyn Embedder>,
    index: Arc<VectorIndex>,
    top_k: usize,
}

impl RagPipeline {
    pub fn new(
        client: GeminiClient,
        embedder: Arc<dyn Embedder>,
        index: Arc<VectorIndex>,
        top_k: usize,
    ) -> Self {
        Self {
            client,
            embedder,
            index,
            top_k,
        }
    }

    /// Rewrites a follow-up question into a standalone one.
    ///
    /// With no history the question is already standalone and no model
    /// call is made. A blank rewrite falls back to the original question.
    async fn condense(
        &self,
        question: &str,
        history: &[ConversationTurn],
    ) -> Result<String, KotaeError> {
        if history.is_empty() {
            return Ok(question.to_string());
        }

        let prompt = build_condense_prompt(question, history);
        let rewritten = self.client.generate(vec![Content::user(prompt)]).await?;
        let rewritten = rewritten.trim();

        if rewritten.is_empty() {
            Ok(question.to_string())
        } else {
            debug!(standalone = rewritten, "condensed follow-up question");
            Ok(rewritten.to_string())
        }
    }
}

#[async_trait]
impl AnswerPipeline for RagPipeline {
    async fn answer(
        &self,
        question: &str,
        history: &[ConversationTurn],
    ) -> Result<PipelineAnswer, KotaeError> {
        let standalone = self.condense(question, history).await?;

        let embeddings = self.embedder.embed(&[standalone.clone()]).await?;
        let query = embeddings
            .into_iter()
            .next()
            .ok_or_else(|| KotaeError::provider("embedder returned no vectors"))?;

        let hits = self.index.search(&query, self.top_k);
        debug!(hits = hits.len(), "retrieved reference passages");

        let prompt = build_answer_prompt(&standalone, &hits);
        let answer = self.client.generate(vec![Content::user(prompt)]).await?;

        Ok(PipelineAnswer {
            answer,
            sources: hits.iter().map(|h| h.chunk.id.clone()).collect(),
        })
    }
}

/// Prompt asking the model to rewrite a follow-up into a standalone question.
fn build_condense_prompt(question: &str, history: &[ConversationTurn]) -> String {
    let mut rendered = String::new();
    for turn in history {
        rendered.push_str("User: ");
        rendered.push_str(&turn.question);
        rendered.push_str("\nAssistant: ");
        rendered.push_str(&turn.answer);
        rendered.push('\n');
    }

    format!(
        "Given the following conversation and a follow up question, rephrase \
         the follow up question to be a standalone question, in its original \
         language. Return only the rephrased question.\n\n\
         Conversation:\n{rendered}\nFollow up question: {question}"
    )
}

/// Prompt grounding the final answer in the retrieved passages.
fn build_answer_prompt(question: &str, hits: &[ScoredChunk]) -> String {
    let context = if hits.is_empty() {
        "（該当する文書はありません）".to_string()
    } else {
        hits.iter()
            .map(|h| h.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n---\n\n")
    };

    format!(
        "あなたは文書に詳しいAIアシスタントです。以下の【参考文書】に基づいて\
         ユーザーの質問に回答してください。【参考文書】に答えがない場合は、\
         自身の知識で回答して構いませんが、補足知識である旨を明記してください。\n\n\
         【参考文書】：\n{context}\n\n質問：{question}\n回答："
    )
}

/// Splits a document, embeds every chunk, and builds the vector index.
///
/// Run once at startup before the webhook listener binds.
pub async fn build_index(
    text: &str,
    splitter: &TextSplitter,
    embedder: &dyn Embedder,
) -> Result<VectorIndex, KotaeError> {
    use crate::index::DocChunk;

    let chunks = splitter.split(text);
    let embeddings = embedder.embed(&chunks).await?;

    let mut index = VectorIndex::new(embedder.dimensions());
    for (i, (chunk_text, embedding)) in chunks.into_iter().zip(embeddings).enumerate() {
        index.insert(
            DocChunk {
                id: format!("chunk-{i}"),
                text: chunk_text,
            },
            embedding,
        )?;
    }

    info!(chunks = index.len(), "corpus index built");
    Ok(index)
}
