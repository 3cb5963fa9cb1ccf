use serde::Serialize;

use crate::config::SurfaceKind;
use crate::dashboard_client::{answer_rate, AgentCallStatistics, Period};
use crate::sync::{Endpoint, PollingSynchronizer, ViewState};
use crate::types::DashboardError;

use super::SurfaceContext;

#[derive(Debug, Clone, Default, Serialize)]
pub struct StatisticsState {
    pub agents: ViewState<Vec<AgentCallStatistics>>,
}

/// Sums over every agent row of the selected period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatisticsTotals {
    pub total_calls: u64,
    pub answered_calls: u64,
    pub missed_calls: u64,
    pub answer_rate: f64,
}

impl StatisticsState {
    pub fn totals(&self) -> StatisticsTotals {
        let rows = self.agents.data().map(Vec::as_slice).unwrap_or_default();
        let total_calls = rows.iter().map(|row| row.total_calls).sum();
        let answered_calls = rows.iter().map(|row| row.answered_calls).sum();
        StatisticsTotals {
            total_calls,
            answered_calls,
            missed_calls: rows.iter().map(|row| row.missed_calls).sum(),
            answer_rate: answer_rate(answered_calls, total_calls),
        }
    }
}

/// A different period means a different surface: tear this one down and
/// build another with [`synchronizer_for`].
pub fn synchronizer(ctx: &SurfaceContext) -> PollingSynchronizer<StatisticsState> {
    synchronizer_for(ctx, ctx.settings.statistics_period)
}

pub fn synchronizer_for(
    ctx: &SurfaceContext,
    period: Period,
) -> PollingSynchronizer<StatisticsState> {
    PollingSynchronizer::new(
        SurfaceKind::Statistics.as_str(),
        ctx.sync_config(SurfaceKind::Statistics),
    )
    .endpoint(Endpoint::new(
        "agents_stats",
        |state: &mut StatisticsState| &mut state.agents,
        ctx.fetch(move |api| async move {
            let stats = api.all_agents_stats(period).await?;
            Ok::<_, DashboardError>(stats.map(|stats| stats.agents))
        }),
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn row(ext: &str, total: u64, answered: u64) -> AgentCallStatistics {
        AgentCallStatistics {
            agent_ext: ext.to_string(),
            total_calls: total,
            answered_calls: answered,
            missed_calls: total - answered,
            ..Default::default()
        }
    }

    #[test]
    fn totals_of_empty_period_are_zero() {
        assert_eq!(StatisticsState::default().totals(), StatisticsTotals::default());
    }

    #[test]
    fn totals_sum_agent_rows() {
        let mut state = StatisticsState::default();
        state.agents.replace(vec![row("101", 10, 8), row("102", 30, 22)]);

        assert_eq!(
            state.totals(),
            StatisticsTotals {
                total_calls: 40,
                answered_calls: 30,
                missed_calls: 10,
                answer_rate: 75.0,
            }
        );
    }
}
