mod api;
mod client;
mod core;
mod helpers;
mod models;

#[cfg(test)]
mod tests;

pub use api::{
    AgentPeriodStats, AgentsPeriodStats, ApiErrorBody, CallHistory, QueuePeriodStats,
};
pub use client::DashboardClient;
pub use helpers::DEFAULT_HISTORY_LIMIT;
pub use models::{
    answer_rate, ActiveCallCount, ActiveCallSummary, Agent, AgentCallStatistics, AgentCounts,
    AgentStatus, Call, ChangeDirection, ComparisonData, ComparisonSummary, CurrentCall,
    HourlyDistribution, HourlyStat, LeaderboardEntry, Period, QueueSnapshot, QueueStatistics,
    RealTimeStatus, SlaMetrics, SlaStatus, Trend,
};
