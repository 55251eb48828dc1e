//! voiceops-gateway - voice-command operations gateway
//!
//! Receives intent requests from a voice-assistant skill, runs the
//! operator's deploy script for the named project and answers with a
//! localized speech response.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod middleware;
pub mod services;
pub mod state;

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::EnvConfig;
use crate::state::app_state::{get_shutdown_token, trigger_shutdown};
use crate::state::AppState;

/// Overrides given on the command line
#[derive(Clone, Debug, Default)]
pub struct RuntimeConfig {
    pub listen_address: Option<String>,
    pub config_path: Option<String>,
}

impl RuntimeConfig {
    /// Apply the overrides on top of the environment configuration
    pub fn apply(&self, mut env: EnvConfig) -> EnvConfig {
        if let Some(ref address) = self.listen_address {
            env.listen_address = address.clone();
        }
        if let Some(ref path) = self.config_path {
            env.config_path = path.clone();
        }
        env
    }
}

/// Install the tracing subscriber (RUST_LOG, default info)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("voiceops_gateway=info,tower_http=info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Load configuration, build the handler registry and serve until Ctrl-C
pub async fn init_and_run_with_config(runtime: RuntimeConfig) -> anyhow::Result<()> {
    let env = runtime.apply(EnvConfig::from_env());

    let app_config = config::load_from_file(&env.config_path)
        .with_context(|| format!("Failed to read the config file {:?}", env.config_path))?;

    let listen_address = env.listen_address.clone();
    let state = Arc::new(AppState::new(env, app_config));
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&listen_address)
        .await
        .with_context(|| format!("Failed to listen on {}", listen_address))?;

    tracing::info!(address = %listen_address, "Listening for skill requests");

    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            trigger_shutdown();
        }
    });

    let shutdown = get_shutdown_token();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("The server returned an error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Write a sample config file
pub fn dump_sample_config(path: Option<&str>) -> anyhow::Result<String> {
    let path = path
        .map(str::to_string)
        .unwrap_or_else(|| EnvConfig::from_env().config_path);

    config::save_to_file(&path, &config::AppConfig::sample())
        .with_context(|| format!("Failed to write the sample config to {:?}", path))?;

    Ok(path)
}
