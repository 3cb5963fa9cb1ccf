mod queries;
mod responses;

pub use queries::{HistoryQuery, LeaderboardQuery, PeriodQuery};
pub use responses::{
    AgentPeriodStats, AgentsPeriodStats, ApiEnvelope, ApiErrorBody, CallHistory, ListPayload,
    QueuePeriodStats,
};
