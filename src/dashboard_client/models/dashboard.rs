use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QueueSnapshot {
    #[serde(default)]
    pub calls_in_queue: u64,
    #[serde(default)]
    pub longest_wait_seconds: u64,
    #[serde(default)]
    pub active_calls: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AgentCounts {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub available: u64,
    #[serde(default)]
    pub on_call: u64,
    #[serde(default)]
    pub unavailable: u64,
    #[serde(default)]
    pub away: u64,
    #[serde(default)]
    pub busy: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveCallSummary {
    pub call_id: String,
    #[serde(default)]
    pub agent_ext: String,
    #[serde(default)]
    pub agent_name: String,
    #[serde(default)]
    pub caller_number: String,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub start_time: String,
}

/// Live queue and agent occupancy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RealTimeStatus {
    #[serde(default)]
    pub queue: QueueSnapshot,
    #[serde(default)]
    pub agents: AgentCounts,
    #[serde(default)]
    pub active_calls: Vec<ActiveCallSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HourlyStat {
    pub hour: u32,
    #[serde(default)]
    pub call_count: u64,
}

/// Calls per hour of day. Older backends send parallel arrays, newer ones
/// `hourly_stats` rows; both are kept as received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HourlyDistribution {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hours: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub calls: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answered: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missed: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hourly_stats: Vec<HourlyStat>,
}

impl HourlyDistribution {
    /// `(hour, calls)` pairs regardless of which shape the backend used.
    pub fn series(&self) -> Vec<(u32, u64)> {
        if !self.hourly_stats.is_empty() {
            return self
                .hourly_stats
                .iter()
                .map(|stat| (stat.hour, stat.call_count))
                .collect();
        }
        self.hours
            .iter()
            .copied()
            .zip(self.calls.iter().copied())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub agent_ext: String,
    #[serde(default)]
    pub agent_name: String,
    #[serde(default)]
    pub total_calls: u64,
    #[serde(default)]
    pub answered_calls: u64,
    #[serde(default)]
    pub answer_rate: f64,
    #[serde(default)]
    pub average_duration: f64,
    #[serde(default)]
    pub total_duration: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SlaStatus {
    Ok,
    Warning,
    Critical,
    #[serde(other)]
    Unknown,
}

/// SLA figures; every field is optional because the backend only sends what it
/// computed for the period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SlaMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_answer_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_answer_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_avg_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_avg_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calls_within_sla: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_calls: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sla_compliance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SlaStatus>,
}

impl SlaMetrics {
    pub fn meets_answer_target(&self) -> Option<bool> {
        match (self.current_answer_rate, self.target_answer_rate) {
            (Some(current), Some(target)) => Some(current >= target),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sla_payload_survives_decode_and_encode_unchanged() {
        let payload = json!({ "sla_compliance": 87.5, "calls_within_sla": 35, "total_calls": 40 });
        let sla: SlaMetrics = serde_json::from_value(payload.clone()).unwrap();

        assert_eq!(sla.sla_compliance, Some(87.5));
        assert_eq!(sla.status, None);
        assert_eq!(serde_json::to_value(&sla).unwrap(), payload);
    }

    #[test]
    fn unknown_sla_status_does_not_break_decoding() {
        let sla: SlaMetrics = serde_json::from_value(json!({ "status": "degraded" })).unwrap();
        assert_eq!(sla.status, Some(SlaStatus::Unknown));
    }

    #[test]
    fn hourly_series_prefers_row_shape() {
        let arrays: HourlyDistribution = serde_json::from_value(json!({
            "hours": [9, 10], "calls": [4, 7], "answered": [4, 6], "missed": [0, 1]
        }))
        .unwrap();
        assert_eq!(arrays.series(), vec![(9, 4), (10, 7)]);

        let rows: HourlyDistribution = serde_json::from_value(json!({
            "hourly_stats": [{ "hour": 8, "call_count": 2 }]
        }))
        .unwrap();
        assert_eq!(rows.series(), vec![(8, 2)]);
    }

    #[test]
    fn realtime_tolerates_sparse_payloads() {
        let status: RealTimeStatus =
            serde_json::from_value(json!({ "queue": { "calls_in_queue": 3 } })).unwrap();
        assert_eq!(status.queue.calls_in_queue, 3);
        assert_eq!(status.agents, AgentCounts::default());
        assert!(status.active_calls.is_empty());
    }
}
