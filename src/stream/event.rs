use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::DashboardError;

/// Kinds of push notifications the backend emits on `/ws/events`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Welcome,
    CallStarted,
    CallAnswered,
    CallEnded,
    CallRinging,
    Ping,
}

impl EventKind {
    pub const CALL_EVENTS: [EventKind; 4] = [
        EventKind::CallStarted,
        EventKind::CallAnswered,
        EventKind::CallEnded,
        EventKind::CallRinging,
    ];

    pub const ALL: [EventKind; 6] = [
        EventKind::Welcome,
        EventKind::CallStarted,
        EventKind::CallAnswered,
        EventKind::CallEnded,
        EventKind::CallRinging,
        EventKind::Ping,
    ];

    fn index(self) -> usize {
        match self {
            EventKind::Welcome => 0,
            EventKind::CallStarted => 1,
            EventKind::CallAnswered => 2,
            EventKind::CallEnded => 3,
            EventKind::CallRinging => 4,
            EventKind::Ping => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Welcome => "welcome",
            EventKind::CallStarted => "call_started",
            EventKind::CallAnswered => "call_answered",
            EventKind::CallEnded => "call_ended",
            EventKind::CallRinging => "call_ringing",
            EventKind::Ping => "ping",
        }
    }

    pub fn is_call_event(&self) -> bool {
        Self::CALL_EVENTS.contains(self)
    }
}

/// One decoded push message. `data` is opaque to the sync layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub data: Value,
}

impl StreamEvent {
    pub fn new(kind: EventKind, data: Value) -> Self {
        Self { kind, data }
    }

    pub fn decode(text: &str) -> Result<Self, DashboardError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Running count of decoded events per kind.
///
/// Consumers that compare two snapshots learn every kind that arrived in
/// between, even when `last_event` has already been overwritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventCounts([u64; 6]);

impl EventCounts {
    pub fn get(&self, kind: EventKind) -> u64 {
        self.0[kind.index()]
    }

    pub(crate) fn bump(&mut self, kind: EventKind) {
        self.0[kind.index()] += 1;
    }

    /// Kinds whose count grew since `earlier`.
    pub fn advanced_since(
        &self,
        earlier: &EventCounts,
    ) -> impl Iterator<Item = EventKind> + '_ {
        let earlier = *earlier;
        EventKind::ALL
            .into_iter()
            .filter(move |kind| self.get(*kind) > earlier.get(*kind))
    }
}

/// Event kinds that should trigger an out-of-cadence refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    kinds: HashSet<EventKind>,
}

impl Default for EventFilter {
    /// Everything except `welcome` and `ping`.
    fn default() -> Self {
        Self::only(EventKind::CALL_EVENTS)
    }
}

impl EventFilter {
    pub fn none() -> Self {
        Self {
            kinds: HashSet::new(),
        }
    }

    pub fn only(kinds: impl IntoIterator<Item = EventKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    pub fn matches(&self, kind: EventKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
