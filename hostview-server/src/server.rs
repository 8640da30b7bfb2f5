use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

/// Binds `host:port`; `host` may be a name or an ip.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;
    Ok(listener)
}

/// Serves `app` until Ctrl-C. Handlers see the peer address through `ConnectInfo`.
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    let local = listener.local_addr().context("listener has no local address")?;
    info!("starting HTTP server on {local}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("HTTP server failed")?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        // no signal handler, so run until killed
        Err(_) => std::future::pending::<()>().await,
    }
}
