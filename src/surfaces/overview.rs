use serde::Serialize;

use crate::config::SurfaceKind;
use crate::dashboard_client::{HourlyDistribution, Period, RealTimeStatus, SlaMetrics};
use crate::stream::{EventFilter, EventKind};
use crate::sync::{Endpoint, PollingSynchronizer, ViewState};

use super::SurfaceContext;

#[derive(Debug, Clone, Default, Serialize)]
pub struct OverviewState {
    pub realtime: ViewState<RealTimeStatus>,
    pub sla: ViewState<SlaMetrics>,
    pub hourly: ViewState<HourlyDistribution>,
}

impl OverviewState {
    /// Bars for the hourly chart, labelled `H:00`.
    pub fn hourly_chart(&self) -> Vec<(String, u64)> {
        self.hourly
            .data()
            .map(|hourly| {
                hourly
                    .series()
                    .into_iter()
                    .map(|(hour, count)| (format!("{hour}:00"), count))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn calls_in_queue(&self) -> Option<u64> {
        self.realtime.data().map(|status| status.queue.calls_in_queue)
    }
}

/// Realtime figures follow every stream event except `welcome`; SLA and the
/// hourly chart stay on the regular poll.
pub fn synchronizer(ctx: &SurfaceContext) -> PollingSynchronizer<OverviewState> {
    let refresh_on = EventFilter::only(
        EventKind::CALL_EVENTS
            .into_iter()
            .chain([EventKind::Ping]),
    );

    PollingSynchronizer::new(
        SurfaceKind::Overview.as_str(),
        ctx.sync_config(SurfaceKind::Overview).refresh_on(refresh_on),
    )
    .endpoint(Endpoint::new(
        "realtime",
        |state: &mut OverviewState| &mut state.realtime,
        ctx.fetch(|api| async move { api.realtime().await }),
    ))
    .endpoint(
        Endpoint::new(
            "sla",
            |state: &mut OverviewState| &mut state.sla,
            ctx.fetch(|api| async move { api.sla(Period::Today).await }),
        )
        .poll_only(),
    )
    .endpoint(
        Endpoint::new(
            "hourly",
            |state: &mut OverviewState| &mut state.hourly,
            ctx.fetch(|api| async move { api.hourly(Period::Today).await }),
        )
        .poll_only(),
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::dashboard_client::HourlyStat;

    use super::*;

    #[test]
    fn chart_is_empty_until_loaded() {
        assert!(OverviewState::default().hourly_chart().is_empty());
    }

    #[test]
    fn chart_labels_hours() {
        let mut state = OverviewState::default();
        state.hourly.replace(HourlyDistribution {
            hourly_stats: vec![
                HourlyStat {
                    hour: 9,
                    call_count: 4,
                },
                HourlyStat {
                    hour: 10,
                    call_count: 0,
                },
            ],
            ..Default::default()
        });

        assert_eq!(
            state.hourly_chart(),
            vec![("9:00".to_string(), 4), ("10:00".to_string(), 0)]
        );
    }
}
