// SPDX-License-Identifier: MIT

//! Study-Hub demo runner.
//!
//! Loads configuration, wires the local JSON store to either Firestore or
//! the in-memory hub store, and tails the schedule and live-session feeds
//! for one identity until interrupted.

use study_hub::{
    config::Config,
    db::{FirestoreHubStore, HubStore, JsonFileStore, MemoryHubStore},
    models::UserContext,
    services::{HubService, SubscriptionManager},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(data_dir = %config.data_dir.display(), "Starting Study-Hub");

    let local = Arc::new(JsonFileStore::open(config.data_dir.join("study_hub.json"))?);

    match &config.gcp_project_id {
        Some(project_id) => {
            let remote = FirestoreHubStore::connect(project_id, config.poll_interval).await?;
            tracing::info!(project = %project_id, "Connected to Firestore");
            run(remote, local, true).await
        }
        None => {
            tracing::info!("No GCP project configured; running on local storage only");
            run(MemoryHubStore::new(), local, false).await
        }
    }
}

async fn run<R: HubStore>(
    remote: R,
    local: Arc<JsonFileStore>,
    connected: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = match std::env::var("STUDY_IDENTITY") {
        Ok(identity) if !identity.trim().is_empty() => UserContext::for_identity(identity),
        _ => UserContext::guest(),
    };

    let hubs = HubService::new(remote.clone(), local.clone());
    let ctx = hubs.resolve(&ctx);
    tracing::info!(
        namespace = ctx.namespace(),
        hub = ctx.hub_id().unwrap_or("-"),
        "Context resolved"
    );

    let subscriptions = SubscriptionManager::new(remote, local, connected);
    subscriptions.start_schedule(
        &ctx,
        |sessions| tracing::info!(count = sessions.len(), "Schedule snapshot"),
        |msg| tracing::warn!(error = %msg, "Schedule feed stopped"),
    );
    subscriptions.start_live(
        &ctx,
        |live| tracing::info!(count = live.len(), "Live sessions snapshot"),
        |msg| tracing::warn!(error = %msg, "Live feed stopped"),
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    subscriptions.stop_all();
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("study_hub=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
