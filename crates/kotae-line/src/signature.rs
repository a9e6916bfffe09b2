// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook signature verification for the LINE Messaging API.
//!
//! LINE signs every webhook delivery with HMAC-SHA256 over the raw request
//! body, keyed by the channel secret, and sends the base64-encoded digest
//! in the `X-Line-Signature` header.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Name of the request header carrying the signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Computes the base64-encoded HMAC-SHA256 signature for a request body.
///
/// This is what LINE puts in the `X-Line-Signature` header; exposed so
/// tests and tooling can produce valid deliveries.
pub fn sign_body(channel_secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(body);
    BASE64.encode(mac.finalize().into_bytes())
}

/// Verifies a webhook delivery against the channel secret.
///
/// Returns `false` on any mismatch or failure during computation; it never
/// panics or propagates an error past this boundary. Callers must reject
/// the request and process no events when this returns `false`.
///
/// The comparison is constant-time so the check does not leak how many
/// signature bytes matched.
pub fn verify_signature(channel_secret: &str, body: &[u8], provided: &str) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    let expected = BASE64.encode(mac.finalize().into_bytes());
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}
