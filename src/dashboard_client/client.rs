use serde_json::Value;

use crate::config::Config;
use crate::types::DashboardError;

use super::api::{
    AgentPeriodStats, AgentsPeriodStats, CallHistory, HistoryQuery, LeaderboardQuery,
    ListPayload, PeriodQuery, QueuePeriodStats,
};
use super::core::HttpClient;
use super::helpers::sanitize_segment;
use super::models::{
    ActiveCallCount, Agent, Call, ComparisonData, HourlyDistribution, LeaderboardEntry, Period,
    RealTimeStatus, SlaMetrics,
};

/// Typed access to the call-center REST API.
///
/// Every method returns `Ok(None)` when the backend answered successfully but
/// without a `data` payload, so callers can keep their last good value.
#[derive(Clone)]
pub struct DashboardClient {
    http: HttpClient,
}

impl DashboardClient {
    pub fn new(config: &Config) -> Result<Self, DashboardError> {
        let http = HttpClient::new(&config.api_url, &config.language, config.request_timeout())?;
        Ok(Self { http })
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    pub async fn agents(&self) -> Result<Option<Vec<Agent>>, DashboardError> {
        let list: Option<ListPayload<Agent>> = self.http.get_data("/agents").await?;
        Ok(list.map(ListPayload::into_vec))
    }

    pub async fn agent(&self, extension: &str) -> Result<Option<Agent>, DashboardError> {
        let path = format!("/agents/{}", sanitize_segment(extension));
        self.http.get_data(&path).await
    }

    /// Free-form per-status counts; the backend has never pinned its shape.
    pub async fn agent_status_summary(&self) -> Result<Option<Value>, DashboardError> {
        self.http.get_data("/agents/status/summary").await
    }

    pub async fn active_calls(&self) -> Result<Option<Vec<Call>>, DashboardError> {
        let list: Option<ListPayload<Call>> = self.http.get_data("/calls/active").await?;
        Ok(list.map(ListPayload::into_vec))
    }

    pub async fn active_call_count(&self) -> Result<Option<ActiveCallCount>, DashboardError> {
        self.http.get_data("/calls/active/count").await
    }

    pub async fn queue_stats(
        &self,
        period: Period,
    ) -> Result<Option<QueuePeriodStats>, DashboardError> {
        self.http
            .get_data_with_query("/stats/queue", &PeriodQuery { period })
            .await
    }

    pub async fn agent_stats(
        &self,
        extension: &str,
        period: Period,
    ) -> Result<Option<AgentPeriodStats>, DashboardError> {
        let path = format!("/stats/agent/{}", sanitize_segment(extension));
        self.http
            .get_data_with_query(&path, &PeriodQuery { period })
            .await
    }

    pub async fn all_agents_stats(
        &self,
        period: Period,
    ) -> Result<Option<AgentsPeriodStats>, DashboardError> {
        self.http
            .get_data_with_query("/stats/agents", &PeriodQuery { period })
            .await
    }

    pub async fn call_history(
        &self,
        period: Period,
        limit: u32,
    ) -> Result<Option<CallHistory>, DashboardError> {
        self.http
            .get_data_with_query("/stats/history", &HistoryQuery { period, limit })
            .await
    }

    pub async fn realtime(&self) -> Result<Option<RealTimeStatus>, DashboardError> {
        self.http.get_data("/dashboard/realtime").await
    }

    pub async fn hourly(
        &self,
        period: Period,
    ) -> Result<Option<HourlyDistribution>, DashboardError> {
        self.http
            .get_data_with_query("/dashboard/hourly", &PeriodQuery { period })
            .await
    }

    pub async fn leaderboard(
        &self,
        period: Period,
        limit: u32,
    ) -> Result<Option<Vec<LeaderboardEntry>>, DashboardError> {
        let list: Option<ListPayload<LeaderboardEntry>> = self
            .http
            .get_data_with_query("/dashboard/leaderboard", &LeaderboardQuery { period, limit })
            .await?;
        Ok(list.map(ListPayload::into_vec))
    }

    pub async fn sla(&self, period: Period) -> Result<Option<SlaMetrics>, DashboardError> {
        self.http
            .get_data_with_query("/dashboard/sla", &PeriodQuery { period })
            .await
    }

    pub async fn compare_weekly(&self) -> Result<Option<ComparisonData>, DashboardError> {
        self.http.get_data("/compare/weekly").await
    }

    pub async fn compare_monthly(&self) -> Result<Option<ComparisonData>, DashboardError> {
        self.http.get_data("/compare/monthly").await
    }
}
