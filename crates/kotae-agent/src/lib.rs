// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event dispatch and conversation memory for the Kotae bot service.
//!
//! The [`EventDispatcher`] is the coordinator between the webhook
//! channel, the answer pipeline, and the reply transport:
//! - text-message events run through history -> pipeline -> reply
//! - every other event kind is acknowledged without side effects
//! - per-event failures are contained and never surface to the webhook
//!   handler
//!
//! [`InMemoryHistory`] provides the bounded per-user conversation memory
//! the pipeline uses as short-term context.

pub mod dispatch;
pub mod history;

pub use dispatch::EventDispatcher;
pub use history::InMemoryHistory;
