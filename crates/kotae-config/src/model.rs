// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Kotae bot service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Kotae configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; the LINE and Gemini credentials must be supplied before
/// `kotae serve` will start.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KotaeConfig {
    /// Bot identity and behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// LINE Messaging API channel settings.
    #[serde(default)]
    pub line: LineConfig,

    /// Google Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Retrieval corpus and embedding settings.
    #[serde(default)]
    pub rag: RagConfig,

    /// Per-user conversation memory settings.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Webhook HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Bot identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the bot.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Text sent to the user when the answer pipeline fails.
    /// An empty string drops the reply silently instead.
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            fallback_message: default_fallback_message(),
        }
    }
}

fn default_agent_name() -> String {
    "kotae".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fallback_message() -> String {
    "申し訳ありません、現在回答できません。しばらくしてからもう一度お試しください。".to_string()
}

/// LINE Messaging API channel configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LineConfig {
    /// Channel access token, sent as a bearer token on every Messaging
    /// API call. `None` disables the LINE channel.
    #[serde(default)]
    pub channel_access_token: Option<String>,

    /// Channel secret used to verify the `X-Line-Signature` header on
    /// inbound webhooks.
    #[serde(default)]
    pub channel_secret: Option<String>,
}

impl std::fmt::Display for LineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Secrets never reach log output.
        write!(
            f,
            "LineConfig {{ channel_access_token: {}, channel_secret: {} }}",
            self.channel_access_token.as_ref().map_or("unset", |_| "[redacted]"),
            self.channel_secret.as_ref().map_or("unset", |_| "[redacted]"),
        )
    }
}

/// Google Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Gemini API key. `None` requires the environment variable override.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for answer generation.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature for generation.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f64 {
    0.0
}

/// Retrieval corpus configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RagConfig {
    /// Path to the source document (PDF or plain text) indexed at startup.
    #[serde(default)]
    pub document_path: Option<String>,

    /// Maximum characters per chunk.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters of overlap carried between consecutive chunks.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Number of passages retrieved per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Directory holding `model.onnx` and `tokenizer.json` for the
    /// local embedding model.
    #[serde(default = "default_model_dir")]
    pub model_dir: String,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            document_path: None,
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            top_k: default_top_k(),
            model_dir: default_model_dir(),
        }
    }
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

fn default_top_k() -> usize {
    2
}

fn default_model_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("kotae").join("models").join("all-MiniLM-L6-v2"))
        .unwrap_or_else(|| std::path::PathBuf::from("models/all-MiniLM-L6-v2"))
        .to_string_lossy()
        .into_owned()
}

/// Per-user conversation memory configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Maximum question/answer turns retained per user; the oldest turn
    /// is evicted first once the bound is reached.
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
        }
    }
}

fn default_max_turns() -> usize {
    5
}

/// Webhook HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind the webhook listener to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5001
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behavior() {
        let config = KotaeConfig::default();
        assert_eq!(config.agent.name, "kotae");
        assert_eq!(config.rag.chunk_size, 1000);
        assert_eq!(config.rag.chunk_overlap, 200);
        assert_eq!(config.rag.top_k, 2);
        assert_eq!(config.history.max_turns, 5);
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
    }

    #[test]
    fn line_config_display_redacts_secrets() {
        let config = LineConfig {
            channel_access_token: Some("token-value".into()),
            channel_secret: Some("secret-value".into()),
        };
        let rendered = config.to_string();
        assert!(!rendered.contains("token-value"));
        assert!(!rendered.contains("secret-value"));
        assert!(rendered.contains("[redacted]"));
    }
}
