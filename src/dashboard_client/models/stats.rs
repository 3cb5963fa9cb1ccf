use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::DashboardError;

/// Aggregation window understood by every `period=` query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Today,
    Week,
    Month,
    Last7Days,
    Last30Days,
    Year,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
            Period::Last7Days => "last7days",
            Period::Last30Days => "last30days",
            Period::Year => "year",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "last7days" => Ok(Period::Last7Days),
            "last30days" => Ok(Period::Last30Days),
            "year" => Ok(Period::Year),
            other => Err(DashboardError::Config(format!("unknown period `{other}`"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QueueStatistics {
    #[serde(default)]
    pub queue_number: String,
    #[serde(default)]
    pub total_calls: u64,
    #[serde(default)]
    pub answered_calls: u64,
    #[serde(default)]
    pub missed_calls: u64,
    #[serde(default)]
    pub average_duration: f64,
    #[serde(default)]
    pub unique_callers: u64,
    #[serde(default)]
    pub active_agents: u64,
    #[serde(default)]
    pub period_start: String,
    #[serde(default)]
    pub period_end: String,
}

impl QueueStatistics {
    pub fn answer_rate(&self) -> f64 {
        answer_rate(self.answered_calls, self.total_calls)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AgentCallStatistics {
    pub agent_ext: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub total_calls: u64,
    #[serde(default)]
    pub answered_calls: u64,
    #[serde(default)]
    pub missed_calls: u64,
    #[serde(default)]
    pub average_duration: f64,
    #[serde(default)]
    pub total_duration: u64,
}

/// Percentage of answered calls; an empty period counts as 0%.
pub fn answer_rate(answered: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (answered as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }
}
