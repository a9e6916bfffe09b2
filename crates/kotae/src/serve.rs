// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `kotae serve` command implementation.
//!
//! Builds the answer pipeline, wires the dispatcher to the LINE reply
//! client, and runs the webhook server until interrupted.

use std::sync::Arc;
use std::time::Instant;

use kotae_agent::{EventDispatcher, InMemoryHistory};
use kotae_config::KotaeConfig;
use kotae_core::KotaeError;
use kotae_gateway::{GatewayState, HealthState, ServerConfig, start_server};
use kotae_line::LineClient;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::bootstrap::build_pipeline;

/// Runs the `kotae serve` command.
pub async fn run_serve(config: KotaeConfig) -> Result<(), KotaeError> {
    info!(agent_name = config.agent.name.as_str(), "starting kotae serve");

    let channel_secret = config
        .line
        .channel_secret
        .clone()
        .ok_or_else(|| KotaeError::Config("line.channel_secret is required for serve".into()))?;
    let access_token = config
        .line
        .channel_access_token
        .as_deref()
        .ok_or_else(|| {
            KotaeError::Config("line.channel_access_token is required for serve".into())
        })?;

    let line_client = Arc::new(LineClient::new(access_token)?);

    // Index the corpus before binding so the first webhook finds a ready
    // pipeline.
    let pipeline = Arc::new(build_pipeline(&config).await?);

    let history = Arc::new(InMemoryHistory::new(config.history.max_turns));
    let dispatcher = Arc::new(EventDispatcher::new(
        history,
        pipeline,
        line_client,
        config.agent.fallback_message.clone(),
    ));

    let state = GatewayState {
        channel_secret,
        dispatcher,
        health: HealthState {
            start_time: Instant::now(),
        },
    };

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            signal_token.cancel();
        }
    });

    start_server(&server_config, state, shutdown).await
}
