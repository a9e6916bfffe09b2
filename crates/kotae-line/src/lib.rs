// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LINE Messaging API channel for the Kotae bot service.
//!
//! Covers the three platform-facing concerns:
//! - verifying that an inbound webhook delivery was signed by the channel
//!   secret ([`signature`])
//! - parsing the delivery body into typed events ([`events`])
//! - sending replies and pushes back through the Messaging API
//!   ([`client`])
//!
//! The SDK is intentionally not used; the wire formats are small enough
//! to carry as plain serde types.

pub mod client;
pub mod events;
pub mod signature;

pub use client::{LineClient, UserProfile};
pub use events::{
    EventSource, MessageContent, MessageEvent, WebhookEnvelope, WebhookEvent, parse_envelope,
};
pub use signature::{SIGNATURE_HEADER, sign_body, verify_signature};
