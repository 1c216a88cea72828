//! Periodic polling of the backend while a session is active.
//!
//! Every tick spawns a fetch without waiting for the previous one. Within one
//! generation a slow response may land after a faster, newer one and
//! overwrite it; polling accepts that. Responses from an older generation are
//! dropped on arrival.

use std::sync::Arc;
use std::time::Duration;

use goldrush_domain::{EntityKey, SessionMode};
use tracing::{debug, error, warn};

use crate::application::state::{SyncEpoch, ViewState, ViewStore};
use crate::ports::outbound::{ApiError, GameApiPort, TaskFuture, TaskScheduler};

/// What a live fetch asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveTarget {
    /// Full world, authenticated with the admin credential
    World { credential: String },
    /// Status of a single participant
    Status { token: EntityKey },
}

impl LiveTarget {
    pub fn for_mode(mode: &SessionMode) -> Option<Self> {
        match mode {
            SessionMode::Unresolved => None,
            SessionMode::Admin { credential } => Some(Self::World {
                credential: credential.clone(),
            }),
            SessionMode::User { token } => Some(Self::Status {
                token: token.clone(),
            }),
        }
    }
}

/// Builds the live polling worker for one generation
#[derive(Clone)]
pub struct LiveSync {
    api: Arc<dyn GameApiPort>,
    scheduler: Arc<dyn TaskScheduler>,
    store: ViewStore,
    epoch: SyncEpoch,
    period: Duration,
}

impl LiveSync {
    pub fn new(
        api: Arc<dyn GameApiPort>,
        scheduler: Arc<dyn TaskScheduler>,
        store: ViewStore,
        epoch: SyncEpoch,
        period: Duration,
    ) -> Self {
        Self {
            api,
            scheduler,
            store,
            epoch,
            period,
        }
    }

    /// The polling loop: fetch now, then once per period until `generation`
    /// goes stale.
    pub fn run(&self, target: LiveTarget, generation: u64) -> TaskFuture {
        let this = self.clone();
        Box::pin(async move {
            while this.epoch.is_current(generation) {
                this.scheduler
                    .spawn(this.clone().fetch_once(target.clone(), generation));
                this.scheduler.sleep(this.period).await;
            }
            debug!(generation, "Live sync loop stopped");
        })
    }

    fn fetch_once(self, target: LiveTarget, generation: u64) -> TaskFuture {
        Box::pin(async move {
            match target {
                LiveTarget::World { credential } => {
                    debug!(generation, "Fetching world");
                    match self.api.fetch_world(&credential).await {
                        Ok(snapshot) => self.apply(generation, "world", |state| {
                            state.world = Some(snapshot);
                        }),
                        Err(err) => self.record_failure(generation, "world", err),
                    }
                }
                LiveTarget::Status { token } => {
                    debug!(generation, entity_key = %token, "Fetching status");
                    match self.api.fetch_status(&token).await {
                        Ok(status) => self.apply(generation, "status", |state| {
                            state.status = Some(status);
                        }),
                        Err(err) => self.record_failure(generation, "status", err),
                    }
                }
            }
        })
    }

    fn apply(
        &self,
        generation: u64,
        what: &str,
        f: impl FnOnce(&mut ViewState),
    ) {
        let applied = self.store.update_if_current(&self.epoch, generation, |state| {
            f(state);
            state.last_error = None;
        });
        if applied.is_none() {
            warn!(generation, what, "Discarding stale live response");
        }
    }

    fn record_failure(&self, generation: u64, what: &str, err: ApiError) {
        let message = err.to_string();
        let recorded = self.store.update_if_current(&self.epoch, generation, |state| {
            state.last_error = Some(message);
        });
        match recorded {
            Some(()) => error!(generation, what, error = %err, "Live fetch failed"),
            None => debug!(generation, what, error = %err, "Stale live fetch failed"),
        }
    }
}
