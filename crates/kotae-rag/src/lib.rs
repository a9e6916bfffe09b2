// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retrieval-augmented answer pipeline for the Kotae bot service.
//!
//! At startup the corpus document is loaded ([`loader`]), split into
//! overlapping chunks ([`splitter`]), embedded locally ([`embedder`]),
//! and collected into an in-memory index ([`index`]). At question time
//! [`pipeline::RagPipeline`] condenses follow-ups, retrieves the top
//! passages, and asks Gemini for a grounded answer.

pub mod embedder;
pub mod index;
pub mod loader;
pub mod pipeline;
pub mod splitter;

pub use embedder::{EMBEDDING_DIM, MiniLmEmbedder};
pub use index::{DocChunk, ScoredChunk, VectorIndex};
pub use loader::load_document;
pub use pipeline::{RagPipeline, build_index};
pub use splitter::TextSplitter;
