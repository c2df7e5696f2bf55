//! Backend entry-point: loads settings, serves the cellar REST API and drains
//! on SIGINT/SIGTERM.

mod server;

use std::io;

use actix_web::dev::ServerHandle;
use actix_web::web;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use celleret::inbound::http::health::HealthState;
use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_args(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let environment = settings.environment();
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), ServerConfig::new(bind_addr))?;
    info!(%bind_addr, %environment, "Celleret Backend BFF listening");

    actix_web::rt::spawn(drain_on_signal(health_state, server.handle()));
    server.await
}

/// Wait for SIGINT or SIGTERM, flip liveness to failing, then stop gracefully.
async fn drain_on_signal(health_state: web::Data<HealthState>, handle: ServerHandle) {
    match shutdown_signal().await {
        Ok(signal) => info!(signal, "shutdown signal received, draining HTTP server"),
        Err(e) => {
            error!(error = %e, "failed to listen for shutdown signals");
            return;
        }
    }
    health_state.mark_unhealthy();
    handle.stop(true).await;
    info!("HTTP server closed");
}

#[cfg(unix)]
async fn shutdown_signal() -> io::Result<&'static str> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|()| "SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> io::Result<&'static str> {
    tokio::signal::ctrl_c().await.map(|()| "SIGINT")
}
