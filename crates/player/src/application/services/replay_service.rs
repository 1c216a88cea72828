//! Playback of the archived snapshot log.

use std::sync::Arc;
use std::time::Duration;

use goldrush_domain::{LogEntry, Snapshot};
use tracing::{debug, info};

use crate::application::state::{ReplayStatus, SyncEpoch, ViewStore};
use crate::ports::outbound::{ApiError, GameApiPort, TaskFuture, TaskScheduler};

/// Loads the log and animates it frame by frame
#[derive(Clone)]
pub struct ReplayEngine {
    api: Arc<dyn GameApiPort>,
    scheduler: Arc<dyn TaskScheduler>,
    store: ViewStore,
    epoch: SyncEpoch,
    frame_period: Duration,
}

impl ReplayEngine {
    pub fn new(
        api: Arc<dyn GameApiPort>,
        scheduler: Arc<dyn TaskScheduler>,
        store: ViewStore,
        epoch: SyncEpoch,
        frame_period: Duration,
    ) -> Self {
        Self {
            api,
            scheduler,
            store,
            epoch,
            frame_period,
        }
    }

    /// Fetch the whole log in one request
    pub async fn load(&self, credential: &str) -> Result<Vec<LogEntry>, ApiError> {
        let mut log = self.api.fetch_logs(credential).await?;
        log.sort_by_key(|entry| entry.sequence);
        Ok(log)
    }

    /// Fixed-rate playback: one frame per period, first frame after one period.
    ///
    /// The last frame stays on screen and `replay_active` is left set.
    pub fn playback(&self, frames: Vec<Snapshot>, generation: u64) -> TaskFuture {
        let this = self.clone();
        Box::pin(async move {
            let total = frames.len();
            info!(generation, total, "Replay started");
            for (index, snapshot) in frames.into_iter().enumerate() {
                this.scheduler.sleep(this.frame_period).await;
                let frame = index + 1;
                let shown = this
                    .store
                    .update_if_current(&this.epoch, generation, |state| {
                        state.world = Some(snapshot);
                        state.replay = if frame == total {
                            ReplayStatus::Finished { total }
                        } else {
                            ReplayStatus::Playing { frame, total }
                        };
                    });
                if shown.is_none() {
                    debug!(generation, frame, "Replay cancelled");
                    return;
                }
            }
            info!(generation, total, "Replay finished");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::state::ViewState;
    use crate::infrastructure::platform::TokioScheduler;
    use crate::infrastructure::testing::fixtures;
    use crate::ports::outbound::MockGameApiPort;
    use futures_util::StreamExt;

    fn engine(api: MockGameApiPort, store: ViewStore, epoch: SyncEpoch) -> ReplayEngine {
        ReplayEngine::new(
            Arc::new(api),
            Arc::new(TokioScheduler),
            store,
            epoch,
            Duration::from_millis(300),
        )
    }

    #[tokio::test]
    async fn load_orders_by_sequence() {
        let mut api = MockGameApiPort::new();
        api.expect_fetch_logs().times(1).returning(|_| {
            Ok(vec![
                LogEntry::new(1, fixtures::snapshot_with_entity_at(1, 1)),
                LogEntry::new(0, fixtures::snapshot_with_entity_at(0, 0)),
            ])
        });
        let engine = engine(api, ViewStore::default(), SyncEpoch::new());

        let log = engine.load("pw").await.expect("log");

        assert_eq!(log[0].sequence, 0);
        assert_eq!(log[1].sequence, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn plays_each_frame_once_at_fixed_rate() {
        let store = ViewStore::new(ViewState::logged_out());
        let epoch = SyncEpoch::new();
        let engine = engine(MockGameApiPort::new(), store.clone(), epoch.clone());
        let frames = fixtures::three_frames();
        let mut rx = store.subscribe();
        let _initial = rx.next().await;

        tokio::spawn(engine.playback(frames.clone(), epoch.current()));

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(store.current().world.is_none());
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(store.current().world.as_ref(), Some(&frames[0]));

        tokio::time::sleep(Duration::from_millis(5000)).await;
        let mut updates = Vec::new();
        while let Ok(Some(state)) = rx.try_next() {
            updates.push(state);
        }
        assert_eq!(updates.len(), 3);
        assert_eq!(updates[1].replay, ReplayStatus::Playing { frame: 2, total: 3 });
        let last = store.current();
        assert_eq!(last.world.as_ref(), Some(&frames[2]));
        assert_eq!(last.replay, ReplayStatus::Finished { total: 3 });
    }

    #[tokio::test(start_paused = true)]
    async fn stale_playback_stops() {
        let store = ViewStore::new(ViewState::logged_out());
        let epoch = SyncEpoch::new();
        let engine = engine(MockGameApiPort::new(), store.clone(), epoch.clone());
        let frames = fixtures::three_frames();

        tokio::spawn(engine.playback(frames.clone(), epoch.current()));
        tokio::time::sleep(Duration::from_millis(450)).await;
        epoch.advance();
        tokio::time::sleep(Duration::from_millis(2000)).await;

        assert_eq!(store.current().world.as_ref(), Some(&frames[0]));
        assert_eq!(
            store.current().replay,
            ReplayStatus::Playing { frame: 1, total: 3 }
        );
    }
}
