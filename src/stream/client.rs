use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info, warn};

use crate::task::CancelToken;

use super::connector::StreamConnector;
use super::event::{EventCounts, StreamEvent};

pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionPhase {
    Connecting,
    Connected,
    #[default]
    Disconnected,
}

/// Snapshot published to consumers after every change.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StreamStatus {
    pub phase: ConnectionPhase,
    /// Most recent decoded event; survives reconnects.
    pub last_event: Option<StreamEvent>,
    /// Bumped for every decoded event, so identical consecutive events are distinguishable.
    pub event_seq: u64,
    /// Per-kind totals; `last_event` alone hides events overwritten before a reader woke up.
    pub received: EventCounts,
    /// Connection attempts made so far, including the first.
    pub attempts: u64,
}

impl StreamStatus {
    pub fn connected(&self) -> bool {
        self.phase == ConnectionPhase::Connected
    }

    pub(crate) fn record(&mut self, event: StreamEvent) {
        self.received.bump(event.kind);
        self.event_seq += 1;
        self.last_event = Some(event);
    }
}

#[derive(Debug, Clone)]
pub struct StreamOptions {
    pub reconnect_delay: Duration,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }
}

/// Owns the single push-channel connection and keeps it alive until shut down.
///
/// Connection failures never surface as errors: they flip the phase to
/// `Disconnected` and schedule exactly one retry after `reconnect_delay`.
pub struct EventStreamClient {
    status: watch::Receiver<StreamStatus>,
    cancel: CancelToken,
    task: JoinHandle<()>,
}

impl EventStreamClient {
    /// Start connecting immediately. Must be called from within a Tokio runtime.
    pub fn spawn(connector: Arc<dyn StreamConnector>, options: StreamOptions) -> Self {
        let (tx, status) = watch::channel(StreamStatus::default());
        let cancel = CancelToken::new();
        let task = tokio::spawn(run(connector, options, tx, cancel.clone()));
        Self {
            status,
            cancel,
            task,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<StreamStatus> {
        self.status.clone()
    }

    pub fn status(&self) -> StreamStatus {
        self.status.borrow().clone()
    }

    pub fn is_connected(&self) -> bool {
        self.status.borrow().connected()
    }

    pub fn last_event(&self) -> Option<StreamEvent> {
        self.status.borrow().last_event.clone()
    }

    /// Cancel any pending reconnect and close the socket.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for EventStreamClient {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run(
    connector: Arc<dyn StreamConnector>,
    options: StreamOptions,
    tx: watch::Sender<StreamStatus>,
    cancel: CancelToken,
) {
    loop {
        if cancel.is_cancelled() {
            break;
        }

        tx.send_modify(|status| {
            status.phase = ConnectionPhase::Connecting;
            status.attempts += 1;
        });
        let attempt = tx.borrow().attempts;
        debug!(attempt, "Connecting to event stream");

        let connected = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            result = connector.connect() => result,
        };

        match connected {
            Ok(mut messages) => {
                tx.send_modify(|status| status.phase = ConnectionPhase::Connected);
                info!(attempt, "Event stream connected");

                loop {
                    let next = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            tx.send_modify(|status| status.phase = ConnectionPhase::Disconnected);
                            return;
                        }
                        next = messages.next() => next,
                    };
                    match next {
                        Some(Ok(text)) => publish(&tx, &text),
                        Some(Err(err)) => {
                            warn!(error = ?err, "Event stream read failed");
                            break;
                        }
                        None => break,
                    }
                }
                info!("Event stream disconnected");
            }
            Err(err) => {
                warn!(attempt, error = ?err, "Event stream connection failed");
            }
        }

        tx.send_modify(|status| status.phase = ConnectionPhase::Disconnected);

        debug!(
            delay_ms = options.reconnect_delay.as_millis() as u64,
            "Scheduling event stream reconnect"
        );
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = time::sleep(options.reconnect_delay) => {}
        }
    }

    tx.send_modify(|status| status.phase = ConnectionPhase::Disconnected);
    debug!("Event stream client stopped");
}

/// Decode one frame and publish it as the latest event; undecodable frames are dropped.
fn publish(tx: &watch::Sender<StreamStatus>, text: &str) {
    match StreamEvent::decode(text) {
        Ok(event) => {
            debug!(kind = event.kind.as_str(), "Event received");
            tx.send_modify(|status| status.record(event));
        }
        Err(err) => {
            warn!(error = ?err, "Discarding undecodable event stream message");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::*;
    use crate::stream::event::EventKind;
    use crate::stream::testing::ScriptedConnector;

    fn options() -> StreamOptions {
        StreamOptions::default()
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_latest_decoded_event() {
        let connector = ScriptedConnector::new();
        let session = connector.open_session();
        let client = EventStreamClient::spawn(connector.clone(), options());
        let mut status = client.subscribe();

        status.wait_for(StreamStatus::connected).await.unwrap();

        session.send_text(r#"{"type":"welcome"}"#);
        session.send_text(r#"{"type":"call_ringing","data":{"id":"a"}}"#);
        session.send_text("garbage");
        session.send_text(r#"{"type":"call_answered","data":{"id":"b"}}"#);
        session.send_text(r#"{"type":"bogus"}"#);

        let latest = status.wait_for(|s| s.event_seq == 3).await.unwrap().clone();
        assert!(latest.connected());
        let event = latest.last_event.as_ref().expect("event published");
        assert_eq!(event.kind, EventKind::CallAnswered);
        assert_eq!(event.data["id"], "b");
        assert_eq!(latest.received.get(EventKind::Welcome), 1);
        assert_eq!(latest.received.get(EventKind::CallRinging), 1);
        assert_eq!(client.last_event().map(|e| e.kind), Some(EventKind::CallAnswered));
    }

    #[tokio::test(start_paused = true)]
    async fn decode_failures_do_not_touch_connection_state() {
        let connector = ScriptedConnector::new();
        let session = connector.open_session();
        let client = EventStreamClient::spawn(connector.clone(), options());
        let mut status = client.subscribe();
        status.wait_for(StreamStatus::connected).await.unwrap();

        session.send_text("{ not json");
        time::sleep(Duration::from_millis(50)).await;

        assert!(client.is_connected());
        assert!(client.last_event().is_none());
        assert_eq!(client.status().event_seq, 0);
        assert_eq!(connector.attempt_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_reconnecting_after_repeated_drops() {
        const DROPS: usize = 5;
        let connector = ScriptedConnector::new();
        for _ in 0..DROPS {
            connector.closed_session();
        }
        connector.refuse_next();
        let _live = connector.open_session();

        let client = EventStreamClient::spawn(connector.clone(), options());
        let mut status = client.subscribe();

        let settled = status
            .wait_for(|s| s.connected() && s.attempts == DROPS as u64 + 2)
            .await
            .unwrap()
            .clone();
        assert!(settled.connected());

        let attempts = connector.attempt_times();
        assert_eq!(attempts.len(), DROPS + 2);
        for pair in attempts.windows(2) {
            assert_eq!(pair[1] - pair[0], DEFAULT_RECONNECT_DELAY);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn reconnect_happens_three_seconds_after_close() {
        let connector = ScriptedConnector::new();
        let first = connector.open_session();
        let _second = connector.open_session();
        let client = EventStreamClient::spawn(connector.clone(), options());
        let mut status = client.subscribe();
        status.wait_for(StreamStatus::connected).await.unwrap();

        let closed_at = Instant::now();
        first.close();
        status.wait_for(|s| !s.connected()).await.unwrap();

        time::sleep(Duration::from_millis(2_900)).await;
        assert_eq!(connector.attempt_count(), 1, "must not reconnect early");

        status
            .wait_for(|s| s.connected() && s.attempts == 2)
            .await
            .unwrap();
        let reconnect_at = connector.attempt_times()[1];
        assert_eq!(reconnect_at - closed_at, Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_pending_reconnect() {
        let connector = ScriptedConnector::new();
        connector.refuse_next();
        let client = EventStreamClient::spawn(connector.clone(), options());
        let mut status = client.subscribe();
        status
            .wait_for(|s| s.attempts == 1 && s.phase == ConnectionPhase::Disconnected)
            .await
            .unwrap();

        client.shutdown();
        time::sleep(Duration::from_secs(60)).await;

        assert_eq!(connector.attempt_count(), 1);
        assert!(client.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_client_closes_the_socket() {
        let connector = ScriptedConnector::new();
        let session = connector.open_session();
        let client = EventStreamClient::spawn(connector.clone(), options());
        client
            .subscribe()
            .wait_for(StreamStatus::connected)
            .await
            .unwrap();

        drop(client);
        session.wait_closed().await;
        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(connector.attempt_count(), 1);
    }
}
