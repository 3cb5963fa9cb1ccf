use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::time;
use tracing::{debug, warn};

use crate::types::DashboardError;

use super::synchronizer::SyncShared;
use super::view_state::ViewState;

type Refresh<S> =
    Arc<dyn Fn(Arc<SyncShared<S>>, Duration) -> BoxFuture<'static, ()> + Send + Sync>;

/// One fetch operation bound to one slot of a surface's state `S`.
pub struct Endpoint<S> {
    name: &'static str,
    on_events: bool,
    refresh: Refresh<S>,
}

impl<S> Clone for Endpoint<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            on_events: self.on_events,
            refresh: self.refresh.clone(),
        }
    }
}

impl<S: Send + Sync + 'static> Endpoint<S> {
    /// `fetch` yields `Ok(None)` when the backend answered without data.
    pub fn new<T, F, Fut>(
        name: &'static str,
        slot: fn(&mut S) -> &mut ViewState<T>,
        fetch: F,
    ) -> Self
    where
        T: Send + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<T>, DashboardError>> + Send + 'static,
    {
        let refresh: Refresh<S> = Arc::new(move |shared: Arc<SyncShared<S>>, timeout: Duration| {
            let request = fetch();
            async move {
                let outcome = match time::timeout(timeout, request).await {
                    Ok(result) => result,
                    Err(_) => Err(DashboardError::Timeout(format!(
                        "{name} did not answer within {}s",
                        timeout.as_secs()
                    ))),
                };
                match outcome {
                    Ok(Some(value)) => {
                        if shared.apply(|state| slot(state).replace(value)) {
                            debug!(surface = shared.name(), endpoint = name, "Slot updated");
                        }
                    }
                    Ok(None) => {
                        warn!(
                            surface = shared.name(),
                            endpoint = name,
                            "No data in response, keeping previous value"
                        );
                        shared.apply(|state| slot(state).keep());
                    }
                    Err(err) => {
                        warn!(
                            surface = shared.name(),
                            endpoint = name,
                            error = ?err,
                            "Fetch failed"
                        );
                        shared.apply(|state| slot(state).mark_failed());
                    }
                }
            }
            .boxed()
        });

        Self {
            name,
            on_events: true,
            refresh,
        }
    }

    /// Leave this endpoint to the regular poll; event-triggered rounds skip it.
    pub fn poll_only(mut self) -> Self {
        self.on_events = false;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn refreshes_on_events(&self) -> bool {
        self.on_events
    }

    pub(crate) fn refresh(
        &self,
        shared: Arc<SyncShared<S>>,
        timeout: Duration,
    ) -> BoxFuture<'static, ()> {
        (self.refresh)(shared, timeout)
    }
}
