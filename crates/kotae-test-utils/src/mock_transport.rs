// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock reply transport for deterministic testing.
//!
//! `MockTransport` implements `ReplyTransport`, capturing every reply for
//! assertion and optionally failing deliveries on demand.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use kotae_core::{KotaeError, ReplyTransport};
use tokio::sync::Mutex;

/// A mock reply transport.
///
/// Replies passed to `send_reply()` are captured and retrievable via
/// [`MockTransport::sent`]. When failing mode is enabled, every delivery
/// returns a `Delivery` error while still being recorded as attempted.
pub struct MockTransport {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    failing: AtomicBool,
}

impl MockTransport {
    /// Create a new mock transport with an empty capture list.
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            failing: AtomicBool::new(false),
        }
    }

    /// All `(reply_token, text)` pairs delivered so far.
    pub async fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }

    /// Number of delivery attempts so far.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Make subsequent deliveries fail with a `Delivery` error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplyTransport for MockTransport {
    async fn send_reply(&self, reply_token: &str, text: &str) -> Result<(), KotaeError> {
        self.sent
            .lock()
            .await
            .push((reply_token.to_string(), text.to_string()));

        if self.failing.load(Ordering::SeqCst) {
            return Err(KotaeError::Delivery {
                status: 500,
                body: "mock delivery failure".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_replies_in_order() {
        let transport = MockTransport::new();
        transport.send_reply("T1", "one").await.unwrap();
        transport.send_reply("T2", "two").await.unwrap();

        let sent = transport.sent().await;
        assert_eq!(
            sent,
            vec![
                ("T1".to_string(), "one".to_string()),
                ("T2".to_string(), "two".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn failing_mode_returns_delivery_error() {
        let transport = MockTransport::new();
        transport.set_failing(true);

        let err = transport.send_reply("T1", "text").await.unwrap_err();
        assert!(matches!(err, KotaeError::Delivery { status: 500, .. }));
        // The attempt is still recorded.
        assert_eq!(transport.sent_count().await, 1);
    }
}
