use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::stream::{EventCounts, EventFilter, EventKind, StreamStatus};
use crate::task::CancelToken;

use super::endpoint::Endpoint;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Shortest poll interval; anything below is raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub interval: Duration,
    pub refresh_on: EventFilter,
    pub request_timeout: Duration,
}

impl SyncConfig {
    pub fn every(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_POLL_INTERVAL),
            refresh_on: EventFilter::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn refresh_on(mut self, filter: EventFilter) -> Self {
        self.refresh_on = filter;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundTrigger {
    Schedule,
    Event(EventKind),
    Manual,
}

/// State shared between a synchronizer's loop, its in-flight rounds and its handle.
pub struct SyncShared<S> {
    name: &'static str,
    active: AtomicBool,
    state: watch::Sender<S>,
}

impl<S> SyncShared<S> {
    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    /// Mutate the state unless the surface has been torn down.
    ///
    /// The active flag is read under the state lock, so nothing lands after
    /// `deactivate` has returned.
    pub(crate) fn apply(&self, update: impl FnOnce(&mut S)) -> bool {
        self.state.send_if_modified(|state| {
            if !self.active.load(Ordering::Acquire) {
                return false;
            }
            update(state);
            true
        })
    }

    fn deactivate(&self) -> bool {
        let mut was_active = false;
        self.state.send_if_modified(|_| {
            was_active = self.active.swap(false, Ordering::AcqRel);
            false
        });
        was_active
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Keeps one surface's view state fresh from scheduled polls and stream events.
pub struct PollingSynchronizer<S> {
    name: &'static str,
    config: SyncConfig,
    endpoints: Vec<Endpoint<S>>,
}

impl<S> PollingSynchronizer<S>
where
    S: Default + Send + Sync + 'static,
{
    pub fn new(name: &'static str, config: SyncConfig) -> Self {
        Self {
            name,
            config,
            endpoints: Vec::new(),
        }
    }

    pub fn endpoint(mut self, endpoint: Endpoint<S>) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Start polling. The first round runs immediately; `events`, when given,
    /// adds a round for every new event matching the configured filter.
    pub fn activate(self, events: Option<watch::Receiver<StreamStatus>>) -> SyncHandle<S> {
        let shared = Arc::new(SyncShared {
            name: self.name,
            active: AtomicBool::new(true),
            state: watch::channel(S::default()).0,
        });
        let cancel = CancelToken::new();
        let manual = Arc::new(Notify::new());
        info!(
            surface = self.name,
            endpoints = self.endpoints.len(),
            interval_ms = self.config.interval.as_millis() as u64,
            "Surface activated"
        );

        let task = tokio::spawn(drive(
            shared.clone(),
            self.endpoints.into(),
            self.config,
            events,
            cancel.clone(),
            manual.clone(),
        ));

        SyncHandle {
            shared,
            cancel,
            manual,
            task,
        }
    }
}

async fn drive<S>(
    shared: Arc<SyncShared<S>>,
    endpoints: Arc<[Endpoint<S>]>,
    config: SyncConfig,
    mut events: Option<watch::Receiver<StreamStatus>>,
    cancel: CancelToken,
    manual: Arc<Notify>,
) where
    S: Send + Sync + 'static,
{
    // Events that arrived before activation are history, not triggers.
    let mut seen = events
        .as_ref()
        .map(|rx| rx.borrow().received)
        .unwrap_or_default();

    let mut ticker = time::interval(config.interval.max(MIN_POLL_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let trigger = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => RoundTrigger::Schedule,
            _ = manual.notified() => RoundTrigger::Manual,
            kind = next_event(shared.name(), &mut events, &mut seen, &config.refresh_on) => {
                RoundTrigger::Event(kind)
            }
        };

        // Rounds are detached: a slow endpoint must not hold back the next trigger.
        tokio::spawn(run_round(
            shared.clone(),
            endpoints.clone(),
            trigger,
            config.request_timeout,
        ));
    }

    debug!(surface = shared.name(), "Surface loop stopped");
}

/// Wait until an event matching `filter` has arrived since `seen`.
///
/// Several events landing between two wake-ups collapse into one round. Never
/// resolves without a stream.
async fn next_event(
    surface: &'static str,
    events: &mut Option<watch::Receiver<StreamStatus>>,
    seen: &mut EventCounts,
    filter: &EventFilter,
) -> EventKind {
    loop {
        let Some(rx) = events.as_mut() else {
            return std::future::pending().await;
        };
        if rx.changed().await.is_err() {
            // Stream client is gone; keep polling on the timer alone.
            *events = None;
            continue;
        }
        let received = rx.borrow_and_update().received;
        let arrived: Vec<EventKind> = received.advanced_since(seen).collect();
        *seen = received;

        if let Some(kind) = arrived.iter().copied().find(|kind| filter.matches(*kind)) {
            return kind;
        }
        if !arrived.is_empty() {
            debug!(surface, ?arrived, "Ignoring events");
        }
    }
}

async fn run_round<S>(
    shared: Arc<SyncShared<S>>,
    endpoints: Arc<[Endpoint<S>]>,
    trigger: RoundTrigger,
    timeout: Duration,
) where
    S: Send + Sync + 'static,
{
    if !shared.is_active() {
        return;
    }
    let selected = endpoints
        .iter()
        .filter(|endpoint| {
            !matches!(trigger, RoundTrigger::Event(_)) || endpoint.refreshes_on_events()
        });
    // Each endpoint applies its own result as soon as it settles.
    let requests: Vec<_> = selected
        .map(|endpoint| endpoint.refresh(shared.clone(), timeout))
        .collect();
    let count = requests.len();
    join_all(requests).await;
    debug!(surface = shared.name(), ?trigger, endpoints = count, "Round settled");
}

/// Running surface. Dropping the handle deactivates it.
pub struct SyncHandle<S> {
    shared: Arc<SyncShared<S>>,
    cancel: CancelToken,
    manual: Arc<Notify>,
    task: JoinHandle<()>,
}

impl<S> SyncHandle<S> {
    pub fn name(&self) -> &'static str {
        self.shared.name
    }

    /// Receiver that observes every applied update.
    pub fn state(&self) -> watch::Receiver<S> {
        self.shared.state.subscribe()
    }

    /// Queue one extra round outside the regular cadence.
    pub fn refresh_now(&self) {
        self.manual.notify_one();
    }

    pub fn is_active(&self) -> bool {
        self.shared.is_active()
    }

    /// Stop the timer and discard any result still in flight.
    pub fn deactivate(&self) {
        self.cancel.cancel();
        if self.shared.deactivate() {
            info!(surface = self.shared.name, "Surface deactivated");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl<S> Drop for SyncHandle<S> {
    fn drop(&mut self) {
        self.deactivate();
    }
}
