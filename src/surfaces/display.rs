use serde::Serialize;

use crate::config::SurfaceKind;
use crate::dashboard_client::{
    ComparisonData, LeaderboardEntry, Period, QueueStatistics, RealTimeStatus,
};
use crate::sync::{Endpoint, PollingSynchronizer, ViewState};
use crate::types::DashboardError;

use super::SurfaceContext;

/// Wallboard: live queue figures plus today's top agents and the week trend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayState {
    pub realtime: ViewState<RealTimeStatus>,
    pub today: ViewState<QueueStatistics>,
    pub leaderboard: ViewState<Vec<LeaderboardEntry>>,
    pub weekly: ViewState<ComparisonData>,
}

impl DisplayState {
    pub fn top_performer(&self) -> Option<&LeaderboardEntry> {
        self.leaderboard
            .data()
            .and_then(|entries| entries.iter().min_by_key(|entry| entry.rank))
    }

    pub fn today_answer_rate(&self) -> Option<f64> {
        self.today.data().map(QueueStatistics::answer_rate)
    }

    pub fn available_agents(&self) -> Option<u64> {
        self.realtime.data().map(|status| status.agents.available)
    }
}

pub fn synchronizer(ctx: &SurfaceContext) -> PollingSynchronizer<DisplayState> {
    let limit = ctx.settings.display_leaderboard_limit;

    PollingSynchronizer::new(
        SurfaceKind::Display.as_str(),
        ctx.sync_config(SurfaceKind::Display),
    )
    .endpoint(Endpoint::new(
        "realtime",
        |state: &mut DisplayState| &mut state.realtime,
        ctx.fetch(|api| async move { api.realtime().await }),
    ))
    .endpoint(Endpoint::new(
        "queue_stats",
        |state: &mut DisplayState| &mut state.today,
        ctx.fetch(|api| async move {
            let stats = api.queue_stats(Period::Today).await?;
            Ok::<_, DashboardError>(stats.map(|stats| stats.statistics))
        }),
    ))
    .endpoint(
        Endpoint::new(
            "leaderboard",
            |state: &mut DisplayState| &mut state.leaderboard,
            ctx.fetch(move |api| async move { api.leaderboard(Period::Today, limit).await }),
        )
        .poll_only(),
    )
    .endpoint(
        Endpoint::new(
            "weekly",
            |state: &mut DisplayState| &mut state.weekly,
            ctx.fetch(|api| async move { api.compare_weekly().await }),
        )
        .poll_only(),
    )
}
