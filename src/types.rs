use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{path} returned {status}")]
    Status { path: String, status: u16 },
    #[error("backend rejected request ({code}): {message}")]
    Api { code: String, message: String },
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("websocket error: {0}")]
    WebSocket(String),
    #[error("timed out: {0}")]
    Timeout(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tokio_tungstenite::tungstenite::Error> for DashboardError {
    fn from(value: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::WebSocket(value.to_string())
    }
}
