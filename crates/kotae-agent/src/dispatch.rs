// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook event dispatcher.
//!
//! Routes text-message events through history, the answer pipeline, and
//! the reply transport. Every other event kind is acknowledged without
//! side effects. Failures are contained per event: one failing event
//! never aborts the remaining events in the same envelope, and the
//! dispatcher itself never returns an error to the webhook handler.

use std::sync::Arc;

use kotae_core::{AnswerPipeline, ConversationTurn, HistoryStore, ReplyTransport};
use kotae_line::events::{MessageContent, MessageEvent, WebhookEnvelope, WebhookEvent};
use tracing::{debug, error, info, warn};

/// Dispatches parsed webhook envelopes.
pub struct EventDispatcher {
    history: Arc<dyn HistoryStore>,
    pipeline: Arc<dyn AnswerPipeline>,
    transport: Arc<dyn ReplyTransport>,
    /// Sent to the user when the pipeline fails. Empty disables the
    /// fallback and drops the reply silently.
    fallback_message: String,
}

impl EventDispatcher {
    pub fn new(
        history: Arc<dyn HistoryStore>,
        pipeline: Arc<dyn AnswerPipeline>,
        transport: Arc<dyn ReplyTransport>,
        fallback_message: String,
    ) -> Self {
        Self {
            history,
            pipeline,
            transport,
            fallback_message,
        }
    }

    /// Processes every event in the envelope, in order.
    pub async fn dispatch(&self, envelope: &WebhookEnvelope) {
        for event in &envelope.events {
            match event {
                WebhookEvent::Message(ev) => self.handle_message(ev).await,
                WebhookEvent::Postback(ev) => {
                    debug!(data = ev.postback.data.as_str(), "ignoring postback event");
                }
                WebhookEvent::Follow(_) => debug!("ignoring follow event"),
                WebhookEvent::Unfollow(_) => debug!("ignoring unfollow event"),
                WebhookEvent::Unknown => debug!("ignoring unknown event type"),
            }
        }
    }

    async fn handle_message(&self, event: &MessageEvent) {
        let MessageContent::Text { text } = &event.message else {
            debug!("ignoring non-text message");
            return;
        };

        let Some(user_id) = event.source.user_id.as_deref() else {
            warn!("text message without a user id, skipping");
            return;
        };

        info!(user_id, "handling text message");

        let history = match self.history.get(user_id).await {
            Ok(history) => history,
            Err(e) => {
                error!(error = %e, user_id, "history lookup failed, continuing without context");
                Vec::new()
            }
        };

        match self.pipeline.answer(text, &history).await {
            Ok(result) => {
                let turn = ConversationTurn::new(text.clone(), result.answer.clone());
                if let Err(e) = self.history.append(user_id, turn).await {
                    error!(error = %e, user_id, "failed to record conversation turn");
                }

                // A delivery failure is logged but the recorded turn
                // stands; the platform reply token is spent either way.
                if let Err(e) = self
                    .transport
                    .send_reply(&event.reply_token, &result.answer)
                    .await
                {
                    error!(error = %e, user_id, "reply delivery failed");
                }
            }
            Err(e) => {
                warn!(error = %e, user_id, "answer pipeline failed, history unchanged");
                if !self.fallback_message.is_empty()
                    && let Err(e) = self
                        .transport
                        .send_reply(&event.reply_token, &self.fallback_message)
                        .await
                {
                    error!(error = %e, user_id, "fallback delivery failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kotae_core::PipelineAnswer;
    use kotae_line::events::parse_envelope;
    use kotae_test_utils::payload::{
        envelope, postback_event, sticker_message_event, text_message_event,
    };
    use kotae_test_utils::{MockPipeline, MockTransport};

    use crate::history::InMemoryHistory;
    use std::sync::Arc;

    struct Fixture {
        history: Arc<InMemoryHistory>,
        pipeline: Arc<MockPipeline>,
        transport: Arc<MockTransport>,
        dispatcher: EventDispatcher,
    }

    fn fixture_with(pipeline: MockPipeline, fallback: &str) -> Fixture {
        let history = Arc::new(InMemoryHistory::new(5));
        let pipeline = Arc::new(pipeline);
        let transport = Arc::new(MockTransport::new());
        let dispatcher = EventDispatcher::new(
            history.clone(),
            pipeline.clone(),
            transport.clone(),
            fallback.to_string(),
        );
        Fixture {
            history,
            pipeline,
            transport,
            dispatcher,
        }
    }

    fn parse(body: serde_json::Value) -> WebhookEnvelope {
        parse_envelope(body.to_string().as_bytes()).unwrap()
    }

    #[tokio::test]
    async fn text_event_flows_through_pipeline_history_and_reply() {
        let f = fixture_with(MockPipeline::with_answers(vec!["hi there"]), "");

        let env = parse(envelope(vec![text_message_event("U1", "T1", "hello")]));
        f.dispatcher.dispatch(&env).await;

        // Pipeline saw the question with an empty history.
        let calls = f.pipeline.calls().await;
        assert_eq!(calls, vec![("hello".to_string(), vec![])]);

        // History now holds the turn.
        let history = f.history.get("U1").await.unwrap();
        assert_eq!(history, vec![ConversationTurn::new("hello", "hi there")]);

        // Exactly one reply went out, bound to the event's token.
        assert_eq!(
            f.transport.sent().await,
            vec![("T1".to_string(), "hi there".to_string())]
        );
    }

    #[tokio::test]
    async fn empty_envelope_is_a_no_op() {
        let f = fixture_with(MockPipeline::new(), "fallback");

        let env = parse(envelope(vec![]));
        f.dispatcher.dispatch(&env).await;

        assert_eq!(f.pipeline.call_count().await, 0);
        assert_eq!(f.transport.sent_count().await, 0);
    }

    #[tokio::test]
    async fn non_text_events_produce_no_side_effects() {
        let f = fixture_with(MockPipeline::new(), "fallback");

        let env = parse(envelope(vec![
            sticker_message_event("U1", "T1"),
            postback_event("U1", "T2", r#"{"action":"get_near"}"#),
        ]));
        f.dispatcher.dispatch(&env).await;

        assert_eq!(f.pipeline.call_count().await, 0);
        assert_eq!(f.transport.sent_count().await, 0);
    }

    #[tokio::test]
    async fn mixed_envelope_processes_only_the_text_event() {
        let f = fixture_with(MockPipeline::with_answers(vec!["answer"]), "");

        let env = parse(envelope(vec![
            text_message_event("U1", "T1", "question"),
            sticker_message_event("U1", "T2"),
        ]));
        f.dispatcher.dispatch(&env).await;

        assert_eq!(f.pipeline.call_count().await, 1);
        assert_eq!(
            f.transport.sent().await,
            vec![("T1".to_string(), "answer".to_string())]
        );
    }

    #[tokio::test]
    async fn history_accumulates_across_envelopes() {
        let f = fixture_with(MockPipeline::with_answers(vec!["a1", "a2"]), "");

        for (i, q) in ["first", "second"].iter().enumerate() {
            let env = parse(envelope(vec![text_message_event(
                "U1",
                &format!("T{i}"),
                q,
            )]));
            f.dispatcher.dispatch(&env).await;
        }

        // Second call must have seen the first turn as context.
        let calls = f.pipeline.calls().await;
        assert_eq!(calls[1].0, "second");
        assert_eq!(calls[1].1, vec![ConversationTurn::new("first", "a1")]);
    }

    #[tokio::test]
    async fn pipeline_failure_sends_fallback_and_keeps_history_clean() {
        let f = fixture_with(MockPipeline::new(), "sorry, try again later");
        f.pipeline.add_failure("model unavailable").await;

        let env = parse(envelope(vec![text_message_event("U1", "T1", "hello")]));
        f.dispatcher.dispatch(&env).await;

        assert!(f.history.get("U1").await.unwrap().is_empty());
        assert_eq!(
            f.transport.sent().await,
            vec![("T1".to_string(), "sorry, try again later".to_string())]
        );
    }

    #[tokio::test]
    async fn empty_fallback_drops_the_reply_silently() {
        let f = fixture_with(MockPipeline::new(), "");
        f.pipeline.add_failure("model unavailable").await;

        let env = parse(envelope(vec![text_message_event("U1", "T1", "hello")]));
        f.dispatcher.dispatch(&env).await;

        assert_eq!(f.transport.sent_count().await, 0);
    }

    #[tokio::test]
    async fn failure_does_not_abort_subsequent_events() {
        let f = fixture_with(MockPipeline::new(), "");
        f.pipeline.add_failure("boom").await;
        f.pipeline.add_answer("recovered").await;

        let env = parse(envelope(vec![
            text_message_event("U1", "T1", "first"),
            text_message_event("U2", "T2", "second"),
        ]));
        f.dispatcher.dispatch(&env).await;

        assert_eq!(f.pipeline.call_count().await, 2);
        assert_eq!(
            f.transport.sent().await,
            vec![("T2".to_string(), "recovered".to_string())]
        );
        assert_eq!(
            f.history.get("U2").await.unwrap(),
            vec![ConversationTurn::new("second", "recovered")]
        );
    }

    #[tokio::test]
    async fn delivery_failure_does_not_roll_back_history() {
        let f = fixture_with(MockPipeline::with_answers(vec!["answer"]), "");
        f.transport.set_failing(true);

        let env = parse(envelope(vec![text_message_event("U1", "T1", "hello")]));
        f.dispatcher.dispatch(&env).await;

        // The turn was recorded even though delivery failed.
        assert_eq!(f.history.get("U1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn pipeline_answer_sources_are_not_required() {
        // Dispatcher only forwards the answer text; sources are optional
        // metadata for logging surfaces.
        let answer = PipelineAnswer::plain("text only");
        assert!(answer.sources.is_empty());
    }
}
