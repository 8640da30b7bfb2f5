use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use hostview_server::{
    api::page::{self, PageState},
    config::PageConfig,
    debug, logging,
    metrics::{SnapshotProvider, SysinfoSource},
    server,
};

#[tokio::main]
async fn main() {
    logging::init_tracing("hostview-page");

    if let Err(err) = debug::apply_env_exit_hook() {
        error!("{err:#}");
        std::process::exit(1);
    }

    if let Err(err) = run(PageConfig::parse()).await {
        error!("{err:#}");
        std::process::exit(1);
    }
}

async fn run(cfg: PageConfig) -> Result<()> {
    // --debug-exit on the command line; the env var was handled above
    debug::apply_exit_hook(cfg.debug_exit.as_deref())?;

    let snapshots =
        SnapshotProvider::new(cfg.snapshot_policy, Arc::new(SysinfoSource), cfg.metric_errors)
            .await
            .context("failed to take startup snapshot")?;
    let state = PageState {
        response_text: cfg.response_text.into(),
        snapshots,
    };

    let listener = server::bind("0.0.0.0", cfg.port).await?;
    server::serve(listener, page::router(state)).await
}
