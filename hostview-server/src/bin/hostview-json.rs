use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use hostview_server::{
    api::json::{self, JsonState},
    config::JsonConfig,
    logging,
    metrics::{SnapshotProvider, SysinfoSource},
    server,
};

#[tokio::main]
async fn main() {
    logging::init_tracing("hostview-json");

    if let Err(err) = run(JsonConfig::parse()).await {
        error!("{err:#}");
        std::process::exit(1);
    }
}

async fn run(cfg: JsonConfig) -> Result<()> {
    let snapshots =
        SnapshotProvider::new(cfg.snapshot_policy, Arc::new(SysinfoSource), cfg.metric_errors)
            .await
            .context("failed to take startup snapshot")?;

    let listener = server::bind(&cfg.host, cfg.port).await?;
    server::serve(listener, json::router(JsonState { snapshots })).await
}
