// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `kotae ask` command implementation.
//!
//! One-shot query against the same answer pipeline the webhook server
//! uses, with no conversation history.

use kotae_config::KotaeConfig;
use kotae_core::{AnswerPipeline, KotaeError};
use tracing::debug;

use crate::bootstrap::build_pipeline;

/// Runs the `kotae ask` command.
pub async fn run_ask(config: KotaeConfig, question: &str) -> Result<(), KotaeError> {
    let pipeline = build_pipeline(&config).await?;

    let result = pipeline.answer(question, &[]).await?;
    debug!(sources = ?result.sources, "answer grounded on passages");

    println!("{}", result.answer);
    Ok(())
}
