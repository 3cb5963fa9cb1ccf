use serde::{Deserialize, Serialize};

use crate::dashboard_client::models::{AgentCallStatistics, Call, Period, QueueStatistics};

/// Envelope shared by every REST response.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// List resources carry a bare array; the keyed form (`{"calls": [...]}`) some
/// backend builds send is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Bare(Vec<T>),
    Keyed(KeyedList<T>),
}

#[derive(Debug, Deserialize)]
pub struct KeyedList<T> {
    #[serde(alias = "agents", alias = "calls", alias = "leaderboard")]
    items: Vec<T>,
}

impl<T> ListPayload<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListPayload::Bare(items) => items,
            ListPayload::Keyed(keyed) => keyed.items,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct QueuePeriodStats {
    pub period: Period,
    #[serde(default)]
    pub period_name: String,
    pub statistics: QueueStatistics,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AgentPeriodStats {
    pub period: Period,
    #[serde(default)]
    pub period_name: String,
    pub extension: String,
    pub statistics: AgentCallStatistics,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AgentsPeriodStats {
    pub period: Period,
    #[serde(default)]
    pub period_name: String,
    #[serde(default)]
    pub agents: Vec<AgentCallStatistics>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CallHistory {
    pub period: Period,
    #[serde(default)]
    pub period_name: String,
    #[serde(default)]
    pub calls: Vec<Call>,
    #[serde(default)]
    pub total: u64,
}
