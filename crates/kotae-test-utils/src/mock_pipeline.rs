// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock answer pipeline for deterministic testing.
//!
//! `MockPipeline` implements `AnswerPipeline` with pre-configured
//! responses, enabling fast, CI-runnable dispatcher tests without model
//! or embedding calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use kotae_core::{AnswerPipeline, ConversationTurn, KotaeError, PipelineAnswer};
use tokio::sync::Mutex;

/// One queued pipeline outcome.
enum Outcome {
    Answer(String),
    Failure(String),
}

/// A mock answer pipeline that pops outcomes from a FIFO queue.
///
/// When the queue is empty, a default "mock answer" is returned. Every
/// invocation is recorded so tests can assert on the question and the
/// history snapshot the dispatcher passed in.
pub struct MockPipeline {
    outcomes: Arc<Mutex<VecDeque<Outcome>>>,
    calls: Arc<Mutex<Vec<(String, Vec<ConversationTurn>)>>>,
}

impl MockPipeline {
    /// Create a new mock pipeline with an empty outcome queue.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock pipeline pre-loaded with successful answers.
    pub fn with_answers(answers: Vec<&str>) -> Self {
        let pipeline = Self::new();
        let outcomes = pipeline.outcomes.clone();
        // Constructor context: the lock is uncontended.
        let mut queue = outcomes.try_lock().expect("fresh mutex");
        for answer in answers {
            queue.push_back(Outcome::Answer(answer.to_string()));
        }
        drop(queue);
        pipeline
    }

    /// Queue a successful answer.
    pub async fn add_answer(&self, answer: &str) {
        self.outcomes
            .lock()
            .await
            .push_back(Outcome::Answer(answer.to_string()));
    }

    /// Queue a pipeline failure.
    pub async fn add_failure(&self, message: &str) {
        self.outcomes
            .lock()
            .await
            .push_back(Outcome::Failure(message.to_string()));
    }

    /// All `(question, history)` pairs this pipeline was invoked with.
    pub async fn calls(&self) -> Vec<(String, Vec<ConversationTurn>)> {
        self.calls.lock().await.clone()
    }

    /// Number of invocations so far.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

impl Default for MockPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerPipeline for MockPipeline {
    async fn answer(
        &self,
        question: &str,
        history: &[ConversationTurn],
    ) -> Result<PipelineAnswer, KotaeError> {
        self.calls
            .lock()
            .await
            .push((question.to_string(), history.to_vec()));

        match self.outcomes.lock().await.pop_front() {
            Some(Outcome::Answer(text)) => Ok(PipelineAnswer::plain(text)),
            Some(Outcome::Failure(message)) => Err(KotaeError::provider(message)),
            None => Ok(PipelineAnswer::plain("mock answer")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answers_pop_in_order_then_default() {
        let pipeline = MockPipeline::with_answers(vec!["first", "second"]);

        assert_eq!(pipeline.answer("q1", &[]).await.unwrap().answer, "first");
        assert_eq!(pipeline.answer("q2", &[]).await.unwrap().answer, "second");
        assert_eq!(
            pipeline.answer("q3", &[]).await.unwrap().answer,
            "mock answer"
        );
        assert_eq!(pipeline.call_count().await, 3);
    }

    #[tokio::test]
    async fn failures_surface_as_provider_errors() {
        let pipeline = MockPipeline::new();
        pipeline.add_failure("model quota exceeded").await;

        let err = pipeline.answer("q", &[]).await.unwrap_err();
        assert!(err.to_string().contains("model quota exceeded"));
    }

    #[tokio::test]
    async fn records_history_snapshots() {
        let pipeline = MockPipeline::new();
        let history = vec![ConversationTurn::new("a", "b")];
        pipeline.answer("next", &history).await.unwrap();

        let calls = pipeline.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "next");
        assert_eq!(calls[0].1, history);
    }
}
