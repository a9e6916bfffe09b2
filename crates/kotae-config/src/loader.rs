// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./kotae.toml` > `~/.config/kotae/kotae.toml` >
//! `/etc/kotae/kotae.toml` with environment variable overrides via the
//! `KOTAE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::KotaeConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/kotae/kotae.toml` (system-wide)
/// 3. `~/.config/kotae/kotae.toml` (user XDG config)
/// 4. `./kotae.toml` (local directory)
/// 5. `KOTAE_*` environment variables
pub fn load_config() -> Result<KotaeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KotaeConfig::default()))
        .merge(Toml::file("/etc/kotae/kotae.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("kotae/kotae.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("kotae.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config file specification.
pub fn load_config_from_str(toml_content: &str) -> Result<KotaeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KotaeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<KotaeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KotaeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `KOTAE_LINE_CHANNEL_SECRET` must map to
/// `line.channel_secret`, not `line.channel.secret`.
fn env_provider() -> Env {
    Env::prefixed("KOTAE_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped,
        // e.g. KOTAE_LINE_CHANNEL_SECRET -> "line_channel_secret".
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("line_", "line.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("rag_", "rag.", 1)
            .replacen("history_", "history.", 1)
            .replacen("server_", "server.", 1);
        mapped.into()
    })
}
