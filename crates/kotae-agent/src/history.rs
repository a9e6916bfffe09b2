// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory bounded conversation history.
//!
//! Keeps the most recent question/answer turns per user in a concurrent
//! map. Nothing is persisted; history is lost on restart, which is the
//! intended behavior for this service.

use async_trait::async_trait;
use dashmap::DashMap;
use kotae_core::{ConversationTurn, HistoryStore, KotaeError};

/// Process-wide conversation memory keyed by user ID.
///
/// Appends for the same user are serialized by the map's per-entry lock,
/// so concurrent appends never lose turns. The wider read-answer-append
/// window in the dispatcher is not atomic; under concurrent requests for
/// one user, the later answer may be computed against a stale snapshot.
pub struct InMemoryHistory {
    turns: DashMap<String, Vec<ConversationTurn>>,
    max_turns: usize,
}

impl InMemoryHistory {
    /// Creates a store bounded at `max_turns` turns per user.
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: DashMap::new(),
            max_turns: max_turns.max(1),
        }
    }

    /// Number of users currently holding history.
    pub fn user_count(&self) -> usize {
        self.turns.len()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistory {
    async fn get(&self, user_id: &str) -> Result<Vec<ConversationTurn>, KotaeError> {
        Ok(self
            .turns
            .get(user_id)
            .map(|entry| entry.clone())
            .unwrap_or_default())
    }

    async fn append(&self, user_id: &str, turn: ConversationTurn) -> Result<(), KotaeError> {
        let mut entry = self.turns.entry(user_id.to_string()).or_default();
        entry.push(turn);
        if entry.len() > self.max_turns {
            let excess = entry.len() - self.max_turns;
            entry.drain(..excess);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn turn(i: usize) -> ConversationTurn {
        ConversationTurn::new(format!("q{i}"), format!("a{i}"))
    }

    #[tokio::test]
    async fn unknown_user_has_empty_history() {
        let store = InMemoryHistory::new(5);
        assert!(store.get("U_missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sixth_turn_evicts_the_first() {
        let store = InMemoryHistory::new(5);
        for i in 1..=6 {
            store.append("U1", turn(i)).await.unwrap();
        }

        let history = store.get("U1").await.unwrap();
        assert_eq!(history.len(), 5);
        assert_eq!(history[0].question, "q2");
        assert_eq!(history[4].question, "q6");
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let store = InMemoryHistory::new(5);
        store.append("U1", turn(1)).await.unwrap();
        store.append("U2", turn(2)).await.unwrap();

        assert_eq!(store.get("U1").await.unwrap().len(), 1);
        assert_eq!(store.get("U2").await.unwrap().len(), 1);
        assert_eq!(store.user_count(), 2);
    }

    #[tokio::test]
    async fn concurrent_appends_never_lose_turns() {
        let store = Arc::new(InMemoryHistory::new(100));
        let mut handles = Vec::new();
        for task in 0..4usize {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..10 {
                    store
                        .append("U1", turn(task * 100 + i))
                        .await
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get("U1").await.unwrap().len(), 40);
    }

    proptest! {
        /// After n appends the history holds exactly the last min(n, cap)
        /// turns in chronological order.
        #[test]
        fn history_is_a_bounded_chronological_suffix(n in 0usize..20, cap in 1usize..8) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            rt.block_on(async {
                let store = InMemoryHistory::new(cap);
                for i in 0..n {
                    store.append("U1", turn(i)).await.unwrap();
                }

                let history = store.get("U1").await.unwrap();
                assert_eq!(history.len(), n.min(cap));
                let first_kept = n.saturating_sub(cap);
                for (offset, kept) in history.iter().enumerate() {
                    assert_eq!(kept.question, format!("q{}", first_kept + offset));
                }
            });
        }
    }
}
