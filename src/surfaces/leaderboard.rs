use serde::Serialize;

use crate::config::SurfaceKind;
use crate::dashboard_client::{LeaderboardEntry, Period};
use crate::sync::{Endpoint, PollingSynchronizer, ViewState};

use super::SurfaceContext;

#[derive(Debug, Clone, Default, Serialize)]
pub struct LeaderboardState {
    pub entries: ViewState<Vec<LeaderboardEntry>>,
}

impl LeaderboardState {
    pub fn podium(&self) -> &[LeaderboardEntry] {
        let entries = self.entries.data().map(Vec::as_slice).unwrap_or_default();
        &entries[..entries.len().min(3)]
    }
}

pub fn synchronizer(ctx: &SurfaceContext) -> PollingSynchronizer<LeaderboardState> {
    let limit = ctx.settings.leaderboard_limit;

    PollingSynchronizer::new(
        SurfaceKind::Leaderboard.as_str(),
        ctx.sync_config(SurfaceKind::Leaderboard),
    )
    .endpoint(Endpoint::new(
        "leaderboard",
        |state: &mut LeaderboardState| &mut state.entries,
        ctx.fetch(move |api| async move { api.leaderboard(Period::Today, limit).await }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn podium_holds_at_most_three() {
        let mut state = LeaderboardState::default();
        assert!(state.podium().is_empty());

        state.entries.replace(
            (1..=5)
                .map(|rank| LeaderboardEntry {
                    rank,
                    ..Default::default()
                })
                .collect(),
        );
        let ranks: Vec<u32> = state.podium().iter().map(|entry| entry.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }
}
