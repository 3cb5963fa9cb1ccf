//! Scripted in-memory connector for exercising the stream client on a paused clock.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::types::DashboardError;

use super::connector::{MessageStream, StreamConnector};

enum Script {
    Refuse,
    Accept(mpsc::UnboundedReceiver<Result<String, DashboardError>>),
}

/// Hands out connections in the order they were scripted; refuses once the
/// script runs out.
#[derive(Default)]
pub(crate) struct ScriptedConnector {
    script: Mutex<VecDeque<Script>>,
    attempts: Mutex<Vec<Instant>>,
}

/// Server side of one scripted connection.
pub(crate) struct ServerSession {
    tx: mpsc::UnboundedSender<Result<String, DashboardError>>,
}

impl ServerSession {
    pub(crate) fn send_text(&self, text: &str) {
        let _ = self.tx.send(Ok(text.to_string()));
    }

    pub(crate) fn close(self) {
        drop(self);
    }

    /// Resolves once the client has dropped its end of the connection.
    pub(crate) async fn wait_closed(&self) {
        self.tx.closed().await;
    }
}

impl ScriptedConnector {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn open_session(&self) -> ServerSession {
        let (tx, rx) = mpsc::unbounded_channel();
        self.push(Script::Accept(rx));
        ServerSession { tx }
    }

    /// A connection that is accepted and immediately closed by the server.
    pub(crate) fn closed_session(&self) {
        self.open_session().close();
    }

    pub(crate) fn refuse_next(&self) {
        self.push(Script::Refuse);
    }

    pub(crate) fn attempt_count(&self) -> usize {
        self.lock_attempts().len()
    }

    pub(crate) fn attempt_times(&self) -> Vec<Instant> {
        self.lock_attempts().clone()
    }

    fn push(&self, script: Script) {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(script);
    }

    fn lock_attempts(&self) -> std::sync::MutexGuard<'_, Vec<Instant>> {
        self.attempts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl StreamConnector for ScriptedConnector {
    async fn connect(&self) -> Result<MessageStream, DashboardError> {
        self.lock_attempts().push(Instant::now());
        let next = self
            .script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();
        match next {
            Some(Script::Accept(rx)) => Ok(Box::pin(stream::unfold(rx, |mut rx| async move {
                rx.recv().await.map(|item| (item, rx))
            }))),
            Some(Script::Refuse) | None => Err(DashboardError::WebSocket(
                "connection refused".to_string(),
            )),
        }
    }
}
