use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures::{future, Stream, StreamExt};
use tokio::time;
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

use crate::types::DashboardError;

/// Inbound text frames of one connection; the stream ends when the socket closes.
pub type MessageStream = Pin<Box<dyn Stream<Item = Result<String, DashboardError>> + Send>>;

/// Opens push-channel connections. One call per connection attempt.
#[async_trait]
pub trait StreamConnector: Send + Sync + 'static {
    async fn connect(&self) -> Result<MessageStream, DashboardError>;
}

/// WebSocket transport for the backend's event endpoint.
#[derive(Debug, Clone)]
pub struct WebSocketConnector {
    url: String,
    connect_timeout: Duration,
}

impl WebSocketConnector {
    pub fn new(url: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            url: url.into(),
            connect_timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StreamConnector for WebSocketConnector {
    async fn connect(&self) -> Result<MessageStream, DashboardError> {
        debug!(url = %self.url, "Opening event socket");
        let (socket, _) = time::timeout(
            self.connect_timeout,
            tokio_tungstenite::connect_async(self.url.as_str()),
        )
        .await
        .map_err(|_| {
            DashboardError::Timeout(format!(
                "connecting to {} took longer than {}s",
                self.url,
                self.connect_timeout.as_secs()
            ))
        })??;

        // Control frames are answered by tungstenite itself; only text reaches consumers.
        let frames = socket.filter_map(|frame| {
            future::ready(match frame {
                Ok(Message::Text(text)) => Some(Ok(text.as_str().to_owned())),
                Ok(Message::Binary(bytes)) => match String::from_utf8(bytes.to_vec()) {
                    Ok(text) => Some(Ok(text)),
                    Err(err) => Some(Err(DashboardError::WebSocket(format!(
                        "non utf-8 binary frame: {err}"
                    )))),
                },
                Ok(_) => None,
                Err(err) => Some(Err(DashboardError::from(err))),
            })
        });
        Ok(Box::pin(frames))
    }
}
