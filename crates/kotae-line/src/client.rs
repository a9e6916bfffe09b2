// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the LINE Messaging API.
//!
//! Provides [`LineClient`] which handles request construction and bearer
//! authentication for the reply, push, quota, and profile endpoints.
//! Delivery calls are deliberately not retried: reply tokens are
//! single-use, so a retry after an ambiguous failure could never succeed.

use std::time::Duration;

use async_trait::async_trait;
use kotae_core::{KotaeError, ReplyTransport};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Base URL for the LINE Messaging API.
const API_BASE_URL: &str = "https://api.line.me";

/// HTTP client for LINE Messaging API communication.
#[derive(Debug, Clone)]
pub struct LineClient {
    client: reqwest::Client,
    base_url: String,
}

/// Outbound message payload for the reply endpoint.
#[derive(Debug, Serialize)]
struct ReplyRequest<'a> {
    #[serde(rename = "replyToken")]
    reply_token: &'a str,
    messages: Vec<TextMessage<'a>>,
}

/// Outbound message payload for the push endpoint.
#[derive(Debug, Serialize)]
struct PushRequest<'a> {
    to: &'a str,
    messages: Vec<TextMessage<'a>>,
}

/// A single text message segment.
#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

impl<'a> TextMessage<'a> {
    fn new(text: &'a str) -> Self {
        Self { kind: "text", text }
    }
}

#[derive(Debug, Deserialize)]
struct QuotaConsumptionResponse {
    #[serde(rename = "totalUsage")]
    total_usage: u64,
}

/// A LINE user profile.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "pictureUrl")]
    pub picture_url: Option<String>,
    #[serde(rename = "statusMessage")]
    pub status_message: Option<String>,
}

impl LineClient {
    /// Creates a new Messaging API client.
    ///
    /// # Arguments
    /// * `channel_access_token` - long-lived channel access token, sent as
    ///   a bearer token on every call
    pub fn new(channel_access_token: &str) -> Result<Self, KotaeError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {channel_access_token}");
        headers.insert(
            "authorization",
            HeaderValue::from_str(&bearer).map_err(|e| {
                KotaeError::Config(format!("invalid channel access token header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| KotaeError::Channel {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Replies to an event with a single text message.
    ///
    /// The reply token is consumed by this call whether or not it
    /// succeeds; a non-2xx status surfaces as [`KotaeError::Delivery`]
    /// with the platform's response body.
    pub async fn reply(&self, reply_token: &str, text: &str) -> Result<(), KotaeError> {
        let payload = ReplyRequest {
            reply_token,
            messages: vec![TextMessage::new(text)],
        };
        self.deliver("/v2/bot/message/reply", &payload).await
    }

    /// Pushes a text message to a user outside of any reply context.
    pub async fn push(&self, to: &str, text: &str) -> Result<(), KotaeError> {
        let payload = PushRequest {
            to,
            messages: vec![TextMessage::new(text)],
        };
        self.deliver("/v2/bot/message/push", &payload).await
    }

    /// Number of messages sent this month, from the quota consumption endpoint.
    pub async fn quota_consumption(&self) -> Result<u64, KotaeError> {
        let url = format!("{}/v2/bot/message/quota/consumption", self.base_url);
        let response = self.client.get(&url).send().await.map_err(transport_err)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KotaeError::channel(format!(
                "quota consumption request returned {status}: {body}"
            )));
        }

        let parsed: QuotaConsumptionResponse =
            response.json().await.map_err(|e| KotaeError::Channel {
                message: format!("failed to parse quota response: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(parsed.total_usage)
    }

    /// Fetches the profile of a user who has friended the bot.
    pub async fn profile(&self, user_id: &str) -> Result<UserProfile, KotaeError> {
        let url = format!("{}/v2/bot/profile/{user_id}", self.base_url);
        let response = self.client.get(&url).send().await.map_err(transport_err)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KotaeError::channel(format!(
                "profile request returned {status}: {body}"
            )));
        }

        response.json().await.map_err(|e| KotaeError::Channel {
            message: format!("failed to parse profile response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// POSTs a message payload and maps non-success statuses to delivery errors.
    async fn deliver<T: Serialize>(&self, path: &str, payload: &T) -> Result<(), KotaeError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(transport_err)?;

        let status = response.status();
        debug!(status = %status, path, "delivery response received");

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(KotaeError::Delivery {
            status: status.as_u16(),
            body,
        })
    }
}

fn transport_err(e: reqwest::Error) -> KotaeError {
    KotaeError::Channel {
        message: format!("HTTP request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

#[async_trait]
impl ReplyTransport for LineClient {
    async fn send_reply(&self, reply_token: &str, text: &str) -> Result<(), KotaeError> {
        self.reply(reply_token, text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> LineClient {
        LineClient::new("test-access-token")
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    #[tokio::test]
    async fn reply_posts_expected_payload() {
        let server = MockServer::start().await;

        let expected = serde_json::json!({
            "replyToken": "T1",
            "messages": [{"type": "text", "text": "hi there"}]
        });

        Mock::given(method("POST"))
            .and(path("/v2/bot/message/reply"))
            .and(header("authorization", "Bearer test-access-token"))
            .and(header("content-type", "application/json"))
            .and(body_json(&expected))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.reply("T1", "hi there").await.unwrap();
    }

    #[tokio::test]
    async fn reply_maps_non_success_to_delivery_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/bot/message/reply"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string(r#"{"message":"Invalid reply token"}"#),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.reply("expired-token", "hello").await.unwrap_err();
        match err {
            KotaeError::Delivery { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("Invalid reply token"));
            }
            other => panic!("expected delivery error, got {other}"),
        }
    }

    #[tokio::test]
    async fn reply_does_not_retry() {
        let server = MockServer::start().await;

        // Exactly one request must arrive even on a retryable-looking status.
        Mock::given(method("POST"))
            .and(path("/v2/bot/message/reply"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.reply("T1", "hello").await.is_err());
    }

    #[tokio::test]
    async fn push_targets_push_endpoint() {
        let server = MockServer::start().await;

        let expected = serde_json::json!({
            "to": "U_owner",
            "messages": [{"type": "text", "text": "heads up"}]
        });

        Mock::given(method("POST"))
            .and(path("/v2/bot/message/push"))
            .and(body_json(&expected))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.push("U_owner", "heads up").await.unwrap();
    }

    #[tokio::test]
    async fn quota_consumption_parses_total_usage() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/bot/message/quota/consumption"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"totalUsage": 42})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert_eq!(client.quota_consumption().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn profile_parses_optional_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/bot/profile/U1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "userId": "U1",
                "displayName": "Joe"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let profile = client.profile("U1").await.unwrap();
        assert_eq!(profile.user_id, "U1");
        assert_eq!(profile.display_name, "Joe");
        assert!(profile.picture_url.is_none());
        assert!(profile.status_message.is_none());
    }

    #[tokio::test]
    async fn profile_non_success_is_channel_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/bot/profile/U_missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.profile("U_missing").await.unwrap_err();
        assert!(matches!(err, KotaeError::Channel { .. }));
    }
}
