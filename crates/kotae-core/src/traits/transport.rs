// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply transport trait.

use async_trait::async_trait;

use crate::error::KotaeError;

/// Delivers answers back to the originating user.
///
/// Reply tokens are single-use and time-limited by the platform; the
/// transport does not retry on its own. A non-success platform response
/// surfaces as [`KotaeError::Delivery`].
#[async_trait]
pub trait ReplyTransport: Send + Sync {
    /// Sends one text reply bound to the given reply token.
    async fn send_reply(&self, reply_token: &str, text: &str) -> Result<(), KotaeError>;
}
