// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for webhook payload JSON used across tests.

use serde_json::{Value, json};

/// A text message event as LINE delivers it.
pub fn text_message_event(user_id: &str, reply_token: &str, text: &str) -> Value {
    json!({
        "type": "message",
        "replyToken": reply_token,
        "timestamp": 1735689600000u64,
        "source": {"type": "user", "userId": user_id},
        "message": {"id": "m1", "type": "text", "text": text}
    })
}

/// A sticker message event (handled as a no-op by the dispatcher).
pub fn sticker_message_event(user_id: &str, reply_token: &str) -> Value {
    json!({
        "type": "message",
        "replyToken": reply_token,
        "source": {"type": "user", "userId": user_id},
        "message": {"id": "m2", "type": "sticker", "packageId": "446", "stickerId": "1988"}
    })
}

/// A postback event (handled as a no-op by the dispatcher).
pub fn postback_event(user_id: &str, reply_token: &str, data: &str) -> Value {
    json!({
        "type": "postback",
        "replyToken": reply_token,
        "source": {"type": "user", "userId": user_id},
        "postback": {"data": data}
    })
}

/// Wraps events into a webhook envelope body.
pub fn envelope(events: Vec<Value>) -> Value {
    json!({
        "destination": "U_bot",
        "events": events
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_wraps_events() {
        let body = envelope(vec![text_message_event("U1", "T1", "hello")]);
        assert_eq!(body["events"][0]["message"]["text"], "hello");
        assert_eq!(body["events"][0]["replyToken"], "T1");
    }
}
