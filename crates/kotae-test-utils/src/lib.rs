// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Kotae integration tests.
//!
//! Provides mock implementations of the core adapter traits and builders
//! for webhook payloads, so dispatcher and gateway tests run without any
//! network access.

pub mod mock_pipeline;
pub mod mock_transport;
pub mod payload;

pub use mock_pipeline::MockPipeline;
pub use mock_transport::MockTransport;
