mod client;
mod connector;
mod event;
mod shared;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{
    ConnectionPhase, EventStreamClient, StreamOptions, StreamStatus, DEFAULT_RECONNECT_DELAY,
};
pub use connector::{MessageStream, StreamConnector, WebSocketConnector};
pub use event::{EventCounts, EventFilter, EventKind, StreamEvent};
pub use shared::{shared_stream, StreamHub, StreamSubscription};
