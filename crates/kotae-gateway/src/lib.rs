// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook HTTP server for the Kotae bot service.
//!
//! Exposes the LINE webhook callback and a health endpoint. Signature
//! verification happens on the raw request bytes before any parsing, and
//! the callback always acknowledges verified deliveries with 200 so the
//! platform's retry machinery stays quiet.

pub mod handlers;
pub mod server;

pub use server::{GatewayState, HealthState, ServerConfig, router, start_server};
