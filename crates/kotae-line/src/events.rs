// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook envelope and event model for the LINE Messaging API.
//!
//! A webhook delivery carries zero or more events. Only a handful of
//! variants matter to the bot; everything else (stickers, joins, beacon
//! events, future additions) collapses into catch-all variants so a new
//! platform event type can never break envelope parsing.

use kotae_core::KotaeError;
use serde::Deserialize;

/// One webhook delivery: an ordered sequence of events.
#[derive(Debug, Clone, Default)]
pub struct WebhookEnvelope {
    /// Bot user ID the delivery was addressed to.
    pub destination: Option<String>,
    /// Events in the order the platform reported them.
    pub events: Vec<WebhookEvent>,
}

/// One unit of user activity reported inside an envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WebhookEvent {
    /// A user sent the bot a message.
    Message(MessageEvent),
    /// A postback action from a rich menu or button template.
    Postback(PostbackEvent),
    /// A user added the bot as a friend.
    Follow(FollowEvent),
    /// A user blocked the bot. Carries no reply token.
    Unfollow(SourceOnlyEvent),
    /// Any event type this bot does not handle.
    #[serde(other)]
    Unknown,
}

/// A message event with its single-use reply token.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageEvent {
    #[serde(rename = "replyToken")]
    pub reply_token: String,
    pub source: EventSource,
    pub message: MessageContent,
}

/// A postback event from an interactive template.
#[derive(Debug, Clone, Deserialize)]
pub struct PostbackEvent {
    #[serde(rename = "replyToken")]
    pub reply_token: String,
    pub source: EventSource,
    pub postback: PostbackContent,
}

/// A follow event; the reply token lets the bot greet the new friend.
#[derive(Debug, Clone, Deserialize)]
pub struct FollowEvent {
    #[serde(rename = "replyToken")]
    pub reply_token: Option<String>,
    pub source: EventSource,
}

/// Events that carry only a source (e.g. unfollow).
#[derive(Debug, Clone, Deserialize)]
pub struct SourceOnlyEvent {
    pub source: EventSource,
}

/// Who triggered an event. `user_id` may be absent for group sources
/// where the member has not consented to ID sharing.
#[derive(Debug, Clone, Deserialize)]
pub struct EventSource {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Payload of a message event, discriminated by message type.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    /// Plain text typed by the user.
    Text { text: String },
    /// A shared location pin.
    Location {
        title: Option<String>,
        address: Option<String>,
        latitude: f64,
        longitude: f64,
    },
    /// A sticker.
    Sticker {
        #[serde(rename = "packageId")]
        package_id: String,
        #[serde(rename = "stickerId")]
        sticker_id: String,
    },
    /// Images, video, audio, files: not handled by this bot.
    #[serde(other)]
    Unsupported,
}

/// Data attached to a postback action.
#[derive(Debug, Clone, Deserialize)]
pub struct PostbackContent {
    pub data: String,
    /// Datetime-picker results and similar structured params.
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

/// Parses a verified webhook body into an envelope.
///
/// A body that is not valid JSON is an unrecoverable parse error. A valid
/// JSON body with a missing or non-array `events` field yields an empty
/// envelope. Individual events that fail to deserialize (unexpected
/// shapes, future platform additions) become [`WebhookEvent::Unknown`]
/// rather than poisoning the rest of the delivery.
pub fn parse_envelope(body: &[u8]) -> Result<WebhookEnvelope, KotaeError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| KotaeError::Channel {
            message: format!("webhook body is not valid JSON: {e}"),
            source: Some(Box::new(e)),
        })?;

    let destination = value
        .get("destination")
        .and_then(|d| d.as_str())
        .map(String::from);

    let events = value
        .get("events")
        .and_then(|e| e.as_array())
        .map(|arr| {
            arr.iter()
                .map(|event| {
                    serde_json::from_value(event.clone()).unwrap_or(WebhookEvent::Unknown)
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(WebhookEnvelope {
        destination,
        events,
    })
}
