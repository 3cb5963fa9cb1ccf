mod agent;
mod call;
mod comparison;
mod dashboard;
mod stats;

pub use agent::{Agent, AgentStatus, CurrentCall};
pub use call::{ActiveCallCount, Call};
pub use comparison::{ChangeDirection, ComparisonData, ComparisonSummary, Trend};
pub use dashboard::{
    ActiveCallSummary, AgentCounts, HourlyDistribution, HourlyStat, LeaderboardEntry,
    QueueSnapshot, RealTimeStatus, SlaMetrics, SlaStatus,
};
pub use stats::{answer_rate, AgentCallStatistics, Period, QueueStatistics};
