use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Call {
    pub id: String,
    #[serde(default)]
    pub agent_ext: String,
    #[serde(default)]
    pub caller_number: String,
    #[serde(default)]
    pub queue_number: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ActiveCallCount {
    pub count: u64,
}
