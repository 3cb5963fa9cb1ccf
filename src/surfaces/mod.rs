//! Canonical dashboard surfaces, each a configured `PollingSynchronizer`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;

use crate::config::{Config, SurfaceKind, SurfaceSettings};
use crate::dashboard_client::DashboardClient;
use crate::stream::StreamSubscription;
use crate::sync::{PollingSynchronizer, SyncConfig, SyncHandle};
use crate::types::DashboardError;

pub mod agents;
pub mod calls;
pub mod comparison;
pub mod display;
pub mod leaderboard;
pub mod overview;
pub mod statistics;


pub use agents::AgentsState;
pub use calls::CallsState;
pub use comparison::ComparisonState;
pub use display::DisplayState;
pub use leaderboard::LeaderboardState;
pub use overview::OverviewState;
pub use statistics::{StatisticsState, StatisticsTotals};

/// What every surface builder needs.
#[derive(Clone)]
pub struct SurfaceContext {
    pub client: DashboardClient,
    pub settings: SurfaceSettings,
    pub request_timeout: Duration,
}

impl SurfaceContext {
    pub fn new(client: DashboardClient, config: &Config) -> Self {
        Self {
            client,
            settings: config.surfaces.clone(),
            request_timeout: config.request_timeout(),
        }
    }

    pub(crate) fn sync_config(&self, kind: SurfaceKind) -> SyncConfig {
        SyncConfig::every(self.settings.interval(kind)).request_timeout(self.request_timeout)
    }

    /// Bind a client call to a fresh clone of the client per request.
    pub(crate) fn fetch<F, Fut>(&self, call: F) -> impl Fn() -> Fut + Send + Sync + 'static
    where
        F: Fn(DashboardClient) -> Fut + Send + Sync + 'static,
        Fut: Send + 'static,
    {
        let client = self.client.clone();
        move || call(client.clone())
    }
}

/// Whether a surface layers event-triggered refreshes on its poll.
pub fn follows_stream(kind: SurfaceKind) -> bool {
    matches!(
        kind,
        SurfaceKind::Overview | SurfaceKind::Display | SurfaceKind::Agents | SurfaceKind::Calls
    )
}

/// A mounted surface, erased over its state type.
#[async_trait]
pub trait ActiveSurface: Send {
    fn kind(&self) -> SurfaceKind;

    /// Current state rendered as JSON.
    fn snapshot(&self) -> Result<Value, DashboardError>;

    /// Wait for the next state change. Returns false once the surface is gone.
    async fn changed(&mut self) -> bool;

    fn refresh_now(&self);

    fn deactivate(&self);
}

pub struct RunningSurface<S> {
    kind: SurfaceKind,
    handle: SyncHandle<S>,
    state: watch::Receiver<S>,
    // Held so the shared stream stays up while this surface is mounted.
    _stream: Option<StreamSubscription>,
}

impl<S> RunningSurface<S>
where
    S: Default + Send + Sync + 'static,
{
    pub fn launch(
        kind: SurfaceKind,
        synchronizer: PollingSynchronizer<S>,
        stream: Option<StreamSubscription>,
    ) -> Self {
        let stream = stream.filter(|_| follows_stream(kind));
        let handle = synchronizer.activate(stream.as_ref().map(StreamSubscription::status));
        let state = handle.state();
        Self {
            kind,
            handle,
            state,
            _stream: stream,
        }
    }

    pub fn handle(&self) -> &SyncHandle<S> {
        &self.handle
    }

    pub fn state(&self) -> watch::Receiver<S> {
        self.state.clone()
    }
}

#[async_trait]
impl<S> ActiveSurface for RunningSurface<S>
where
    S: Serialize + Send + Sync + 'static,
{
    fn kind(&self) -> SurfaceKind {
        self.kind
    }

    fn snapshot(&self) -> Result<Value, DashboardError> {
        Ok(serde_json::to_value(&*self.state.borrow())?)
    }

    async fn changed(&mut self) -> bool {
        self.state.changed().await.is_ok() && self.handle.is_active()
    }

    fn refresh_now(&self) {
        self.handle.refresh_now();
    }

    fn deactivate(&self) {
        self.handle.deactivate();
    }
}

/// Build and activate one surface.
pub fn spawn(
    kind: SurfaceKind,
    ctx: &SurfaceContext,
    stream: Option<StreamSubscription>,
) -> Box<dyn ActiveSurface> {
    match kind {
        SurfaceKind::Overview => boxed(kind, overview::synchronizer(ctx), stream),
        SurfaceKind::Display => boxed(kind, display::synchronizer(ctx), stream),
        SurfaceKind::Agents => boxed(kind, agents::synchronizer(ctx), stream),
        SurfaceKind::Calls => boxed(kind, calls::synchronizer(ctx), stream),
        SurfaceKind::Leaderboard => boxed(kind, leaderboard::synchronizer(ctx), stream),
        SurfaceKind::Statistics => boxed(kind, statistics::synchronizer(ctx), stream),
        SurfaceKind::Comparison => boxed(kind, comparison::synchronizer(ctx), stream),
    }
}

fn boxed<S>(
    kind: SurfaceKind,
    synchronizer: PollingSynchronizer<S>,
    stream: Option<StreamSubscription>,
) -> Box<dyn ActiveSurface>
where
    S: Default + Serialize + Send + Sync + 'static,
{
    Box::new(RunningSurface::launch(kind, synchronizer, stream))
}
