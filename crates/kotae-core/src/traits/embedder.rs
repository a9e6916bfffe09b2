// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding adapter trait.

use async_trait::async_trait;

use crate::error::KotaeError;

/// Maps text to dense vectors for similarity search.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds each input text, preserving order.
    ///
    /// All returned vectors have [`Embedder::dimensions`] entries and are
    /// L2-normalized, so cosine similarity reduces to a dot product.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, KotaeError>;

    /// Output dimensionality of this embedder.
    fn dimensions(&self) -> usize;
}
