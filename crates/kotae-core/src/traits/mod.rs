// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits that define the seams between Kotae components.
//!
//! Each external collaborator (the answer pipeline, the conversation
//! store, the reply transport, the embedding model) is reached only
//! through a trait defined here, so the dispatcher can be exercised with
//! mocks and backends can be swapped without touching call sites.

pub mod embedder;
pub mod history;
pub mod pipeline;
pub mod transport;

pub use embedder::Embedder;
pub use history::HistoryStore;
pub use pipeline::AnswerPipeline;
pub use transport::ReplyTransport;
