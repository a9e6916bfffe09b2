// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory vector index over document chunks.
//!
//! Holds every chunk embedding in a flat list and scans it on search.
//! The corpus is a single document split into at most a few hundred
//! chunks, so a linear scan beats any index structure here.

use kotae_core::KotaeError;

/// A chunk of the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocChunk {
    /// Stable identifier, e.g. `"chunk-17"`.
    pub id: String,
    /// The chunk text handed to the prompt as a reference passage.
    pub text: String,
}

/// A chunk with its similarity score for one query.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: DocChunk,
    pub score: f32,
}

/// Flat in-memory index of (chunk, embedding) pairs.
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Default)]
pub struct VectorIndex {
    dimensions: usize,
    entries: Vec<(DocChunk, Vec<f32>)>,
}

impl VectorIndex {
    /// Creates an empty index for embeddings of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            entries: Vec::new(),
        }
    }

    /// Adds a chunk with its embedding.
    pub fn insert(&mut self, chunk: DocChunk, embedding: Vec<f32>) -> Result<(), KotaeError> {
        if embedding.len() != self.dimensions {
            return Err(KotaeError::Internal(format!(
                "embedding for {} has {} dimensions, index expects {}",
                chunk.id,
                embedding.len(),
                self.dimensions
            )));
        }
        self.entries.push((chunk, embedding));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the `k` most similar chunks, best first.
    ///
    /// Embeddings are L2-normalized by the embedder, so the dot product
    /// is the cosine similarity.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<ScoredChunk> {
        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .filter(|(_, embedding)| embedding.len() == query.len())
            .map(|(chunk, embedding)| ScoredChunk {
                chunk: chunk.clone(),
                score: dot(query, embedding),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);
        scored
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
