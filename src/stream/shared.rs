use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use tokio::sync::watch;
use tracing::info;

use crate::config::Config;

use super::client::{EventStreamClient, StreamOptions, StreamStatus};
use super::connector::{StreamConnector, WebSocketConnector};
use super::event::StreamEvent;

static SHARED_HUB: OnceLock<StreamHub> = OnceLock::new();

/// Subscribe to the process-wide event stream.
///
/// The hub is built from the first caller's config; later configs are ignored.
pub fn shared_stream(config: &Config) -> StreamSubscription {
    SHARED_HUB
        .get_or_init(|| {
            let connector =
                WebSocketConnector::new(config.ws_url.clone(), config.connect_timeout());
            StreamHub::new(
                Arc::new(connector),
                StreamOptions {
                    reconnect_delay: config.reconnect_delay(),
                },
            )
        })
        .subscribe()
}

/// Reference-counted owner of one `EventStreamClient`.
///
/// The client is spawned lazily by the first subscription and shut down when
/// the last subscription is dropped; a later subscription starts a fresh one.
#[derive(Clone)]
pub struct StreamHub {
    connector: Arc<dyn StreamConnector>,
    options: StreamOptions,
    state: Arc<Mutex<HubState>>,
}

#[derive(Default)]
struct HubState {
    client: Option<EventStreamClient>,
    subscribers: usize,
}

impl StreamHub {
    pub fn new(connector: Arc<dyn StreamConnector>, options: StreamOptions) -> Self {
        Self {
            connector,
            options,
            state: Arc::new(Mutex::new(HubState::default())),
        }
    }

    /// Must be called from within a Tokio runtime.
    pub fn subscribe(&self) -> StreamSubscription {
        let mut state = self.lock();
        let client = state.client.get_or_insert_with(|| {
            info!("Starting shared event stream");
            EventStreamClient::spawn(self.connector.clone(), self.options.clone())
        });
        let status = client.subscribe();
        state.subscribers += 1;
        StreamSubscription {
            hub: self.clone(),
            status,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers
    }

    pub fn is_running(&self) -> bool {
        self.lock().client.is_some()
    }

    fn release(&self) {
        let mut state = self.lock();
        state.subscribers = state.subscribers.saturating_sub(1);
        if state.subscribers == 0 {
            if let Some(client) = state.client.take() {
                info!("Last subscriber left, stopping shared event stream");
                client.shutdown();
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, HubState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// A consumer's handle on the shared stream. Dropping it releases the hub.
pub struct StreamSubscription {
    hub: StreamHub,
    status: watch::Receiver<StreamStatus>,
}

impl StreamSubscription {
    pub fn status(&self) -> watch::Receiver<StreamStatus> {
        self.status.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.status.borrow().connected()
    }

    pub fn last_event(&self) -> Option<StreamEvent> {
        self.status.borrow().last_event.clone()
    }
}

impl Drop for StreamSubscription {
    fn drop(&mut self) {
        self.hub.release();
    }
}
