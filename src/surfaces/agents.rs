use serde::Serialize;

use crate::config::SurfaceKind;
use crate::dashboard_client::{Agent, AgentStatus};
use crate::sync::{Endpoint, PollingSynchronizer, ViewState};

use super::SurfaceContext;

#[derive(Debug, Clone, Default, Serialize)]
pub struct AgentsState {
    pub agents: ViewState<Vec<Agent>>,
}

impl AgentsState {
    pub fn count(&self) -> usize {
        self.agents.data().map(Vec::len).unwrap_or_default()
    }

    pub fn with_status(&self, status: &AgentStatus) -> usize {
        self.agents
            .data()
            .map(|agents| agents.iter().filter(|agent| &agent.status == status).count())
            .unwrap_or_default()
    }

    pub fn on_call(&self) -> impl Iterator<Item = &Agent> {
        self.agents
            .data()
            .into_iter()
            .flatten()
            .filter(|agent| agent.is_on_call())
    }
}

pub fn synchronizer(ctx: &SurfaceContext) -> PollingSynchronizer<AgentsState> {
    PollingSynchronizer::new(
        SurfaceKind::Agents.as_str(),
        ctx.sync_config(SurfaceKind::Agents),
    )
    .endpoint(Endpoint::new(
        "agents",
        |state: &mut AgentsState| &mut state.agents,
        ctx.fetch(|api| async move { api.agents().await }),
    ))
}
