use futures::future::select_all;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use callboard_backend::presentation::{connection_indicator, StatusBadge};
use callboard_backend::stream::{shared_stream, StreamStatus};
use callboard_backend::surfaces::{self, follows_stream, ActiveSurface, SurfaceContext};
use callboard_backend::{Config, DashboardClient, DashboardError};

enum Wake {
    Shutdown,
    Connection(Option<StreamStatus>),
    Surface { index: usize, alive: bool },
}

#[tokio::main]
async fn main() -> Result<(), DashboardError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load().await;
    let client = DashboardClient::new(&config)?;
    let ctx = SurfaceContext::new(client, &config);
    let enabled = config.surfaces.enabled.clone();
    if enabled.is_empty() {
        warn!("No surfaces enabled, nothing to do");
        return Ok(());
    }

    let mut surfaces: Vec<Box<dyn ActiveSurface>> = enabled
        .iter()
        .map(|kind| {
            let stream = follows_stream(*kind).then(|| shared_stream(&config));
            surfaces::spawn(*kind, &ctx, stream)
        })
        .collect();

    let connection = enabled
        .iter()
        .any(|kind| follows_stream(*kind))
        .then(|| shared_stream(&config));
    let mut connection_rx = connection.as_ref().map(|subscription| subscription.status());
    let mut indicator: Option<StatusBadge> = None;

    info!(
        api = %config.api_url,
        ws = %config.ws_url,
        surfaces = surfaces.len(),
        "Dashboard backend running, press Ctrl-C to stop"
    );

    while !surfaces.is_empty() {
        let wake = {
            let changed = select_all(surfaces.iter_mut().map(|surface| surface.changed()));
            tokio::select! {
                _ = signal::ctrl_c() => Wake::Shutdown,
                status = next_status(&mut connection_rx) => Wake::Connection(status),
                (alive, index, _) = changed => Wake::Surface { index, alive },
            }
        };

        match wake {
            Wake::Shutdown => break,
            Wake::Connection(Some(status)) => {
                let badge = connection_indicator(&status);
                if indicator.as_ref() != Some(&badge) {
                    info!(connection = %badge.label, attempts = status.attempts, "Event stream");
                    indicator = Some(badge);
                }
            }
            Wake::Connection(None) => {
                warn!("Event stream closed, surfaces continue on their poll");
                connection_rx = None;
            }
            Wake::Surface { index, alive: false } => {
                let surface = surfaces.remove(index);
                warn!(surface = surface.kind().as_str(), "Surface stopped");
            }
            Wake::Surface { index, alive: true } => render(surfaces[index].as_ref()),
        }
    }

    info!("Shutting down");
    for surface in &surfaces {
        surface.deactivate();
    }
    drop(surfaces);
    drop(connection);
    Ok(())
}

/// Next connection status, or `None` once the stream is gone. Never resolves
/// without a stream.
async fn next_status(rx: &mut Option<watch::Receiver<StreamStatus>>) -> Option<StreamStatus> {
    let Some(rx) = rx.as_mut() else {
        return std::future::pending().await;
    };
    match rx.changed().await {
        Ok(()) => Some(rx.borrow_and_update().clone()),
        Err(_) => None,
    }
}

fn render(surface: &dyn ActiveSurface) {
    let kind = surface.kind().as_str();
    match surface.snapshot().and_then(|value| Ok(serde_json::to_string(&value)?)) {
        Ok(json) => info!(surface = kind, snapshot = %json, "Surface updated"),
        Err(err) => error!(surface = kind, error = ?err, "Failed to render surface"),
    }
}
