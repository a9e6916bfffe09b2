// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared startup wiring for the answer pipeline.

use std::path::Path;
use std::sync::Arc;

use kotae_config::KotaeConfig;
use kotae_core::{Embedder, KotaeError};
use kotae_gemini::GeminiClient;
use kotae_rag::{MiniLmEmbedder, RagPipeline, TextSplitter, VectorIndex, build_index, load_document};
use tracing::warn;

/// Builds the retrieval pipeline: Gemini client, local embedder, and the
/// corpus index.
///
/// Indexing happens here, before any listener binds, so the bot never
/// accepts a webhook it cannot answer. Without a configured document the
/// pipeline runs retrieval-free and answers from model knowledge alone.
pub async fn build_pipeline(config: &KotaeConfig) -> Result<RagPipeline, KotaeError> {
    let api_key = config
        .gemini
        .api_key
        .as_deref()
        .ok_or_else(|| KotaeError::Config("gemini.api_key is required".into()))?;
    let client = GeminiClient::new(api_key, &config.gemini.model, config.gemini.temperature)?;

    let embedder: Arc<dyn Embedder> =
        Arc::new(MiniLmEmbedder::new(Path::new(&config.rag.model_dir))?);

    let index = match config.rag.document_path.as_deref() {
        Some(path) => {
            let text = load_document(Path::new(path))?;
            let splitter = TextSplitter::new(config.rag.chunk_size, config.rag.chunk_overlap);
            build_index(&text, &splitter, embedder.as_ref()).await?
        }
        None => {
            warn!("rag.document_path not set, answering without retrieval");
            VectorIndex::new(embedder.dimensions())
        }
    };

    Ok(RagPipeline::new(
        client,
        embedder,
        Arc::new(index),
        config.rag.top_k,
    ))
}
