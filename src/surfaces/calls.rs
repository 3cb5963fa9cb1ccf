use serde::Serialize;

use crate::config::SurfaceKind;
use crate::dashboard_client::Call;
use crate::sync::{Endpoint, PollingSynchronizer, ViewState};

use super::SurfaceContext;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CallsState {
    pub calls: ViewState<Vec<Call>>,
}

impl CallsState {
    pub fn count(&self) -> usize {
        self.calls.data().map(Vec::len).unwrap_or_default()
    }

    pub fn longest(&self) -> Option<&Call> {
        self.calls
            .data()
            .and_then(|calls| calls.iter().max_by_key(|call| call.duration))
    }
}

pub fn synchronizer(ctx: &SurfaceContext) -> PollingSynchronizer<CallsState> {
    PollingSynchronizer::new(SurfaceKind::Calls.as_str(), ctx.sync_config(SurfaceKind::Calls))
        .endpoint(Endpoint::new(
            "active_calls",
            |state: &mut CallsState| &mut state.calls,
            ctx.fetch(|api| async move { api.active_calls().await }),
        ))
}
