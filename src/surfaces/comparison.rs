use serde::Serialize;

use crate::config::SurfaceKind;
use crate::dashboard_client::{ChangeDirection, ComparisonData};
use crate::sync::{Endpoint, PollingSynchronizer, ViewState};

use super::SurfaceContext;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ComparisonState {
    pub weekly: ViewState<ComparisonData>,
    pub monthly: ViewState<ComparisonData>,
}

impl ComparisonState {
    /// Direction of the weekly call volume change, once loaded.
    pub fn weekly_direction(&self) -> Option<ChangeDirection> {
        self.weekly
            .data()
            .map(|data| ChangeDirection::of(&data.comparison.calls_change))
    }
}

/// Both comparisons are fetched on activation and then only on the slow poll.
pub fn synchronizer(ctx: &SurfaceContext) -> PollingSynchronizer<ComparisonState> {
    PollingSynchronizer::new(
        SurfaceKind::Comparison.as_str(),
        ctx.sync_config(SurfaceKind::Comparison),
    )
    .endpoint(Endpoint::new(
        "weekly",
        |state: &mut ComparisonState| &mut state.weekly,
        ctx.fetch(|api| async move { api.compare_weekly().await }),
    ))
    .endpoint(Endpoint::new(
        "monthly",
        |state: &mut ComparisonState| &mut state.monthly,
        ctx.fetch(|api| async move { api.compare_monthly().await }),
    ))
}

#[cfg(test)]
mod tests {
    use crate::dashboard_client::ComparisonSummary;

    use super::*;

    #[test]
    fn weekly_direction_follows_call_change() {
        let mut state = ComparisonState::default();
        assert_eq!(state.weekly_direction(), None);

        state.weekly.replace(ComparisonData {
            comparison: ComparisonSummary {
                calls_change: "-12.5%".to_string(),
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(state.weekly_direction(), Some(ChangeDirection::Down));
    }
}
