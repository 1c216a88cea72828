//! Top-level orchestration of the client.
//!
//! The composer is the only writer of the session mode. It decides which
//! worker owns the displayed data (live polling or replay) and makes sure the
//! previous worker is cancelled on every transition.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures_channel::mpsc;
use futures_util::future::{abortable, AbortHandle};
use goldrush_domain::{EntityKey, SessionMode, UserStatus};
use tracing::{debug, error, info, warn};

use super::live_sync::{LiveSync, LiveTarget};
use super::mode_resolver::{resolve_login, LoginKind, ModeResolver, StartupResolution};
use super::replay_service::ReplayEngine;
use crate::application::error::{LoginError, ServiceError};
use crate::application::state::{ReplayStatus, SyncEpoch, ViewState, ViewStore};
use crate::ports::outbound::{GameApiPort, TaskFuture, TaskScheduler};

/// Timer periods for the two workers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncTiming {
    pub live_period: Duration,
    pub replay_frame: Duration,
}

impl Default for SyncTiming {
    fn default() -> Self {
        Self {
            live_period: Duration::from_millis(1000),
            replay_frame: Duration::from_millis(300),
        }
    }
}

/// Which worker currently holds a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerKind {
    LiveSync,
    Replay,
}

#[derive(Debug)]
struct WorkerHandle {
    kind: WorkerKind,
    generation: u64,
    abort: AbortHandle,
}

/// Owns the view state and the lifecycle of the sync workers
#[derive(Clone)]
pub struct ViewComposer {
    api: Arc<dyn GameApiPort>,
    scheduler: Arc<dyn TaskScheduler>,
    store: ViewStore,
    epoch: SyncEpoch,
    resolver: ModeResolver,
    live: LiveSync,
    replay: ReplayEngine,
    worker: Arc<Mutex<Option<WorkerHandle>>>,
}

impl ViewComposer {
    pub fn new(
        api: Arc<dyn GameApiPort>,
        scheduler: Arc<dyn TaskScheduler>,
        timing: SyncTiming,
    ) -> Self {
        let store = ViewStore::new(ViewState::new());
        let epoch = SyncEpoch::new();
        Self {
            resolver: ModeResolver::new(Arc::clone(&api)),
            live: LiveSync::new(
                Arc::clone(&api),
                Arc::clone(&scheduler),
                store.clone(),
                epoch.clone(),
                timing.live_period,
            ),
            replay: ReplayEngine::new(
                Arc::clone(&api),
                Arc::clone(&scheduler),
                store.clone(),
                epoch.clone(),
                timing.replay_frame,
            ),
            api,
            scheduler,
            store,
            epoch,
            worker: Arc::new(Mutex::new(None)),
        }
    }

    /// Copy of the current view state
    pub fn state(&self) -> ViewState {
        self.store.current()
    }

    /// Current state, then every change
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<ViewState> {
        self.store.subscribe()
    }

    /// Worker that currently owns a timer, if any
    pub fn active_worker(&self) -> Option<WorkerKind> {
        self.worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|handle| handle.kind)
    }

    /// Leave the checking state, validating `token` first if one was supplied.
    pub async fn start(&self, token: Option<EntityKey>) {
        let generation = self.epoch.current();
        match self.resolver.resolve_startup(token).await {
            StartupResolution::Validated { mode, status } => {
                self.enter_mode(mode, Some(status));
            }
            StartupResolution::Anonymous => {
                self.store
                    .update_if_current(&self.epoch, generation, |state| state.checking = false);
            }
            StartupResolution::Rejected { error, .. } => {
                let message = error.to_string();
                self.store.update_if_current(&self.epoch, generation, |state| {
                    state.checking = false;
                    state.last_error = Some(message);
                });
            }
        }
    }

    /// Interactive login from the form
    pub fn login(&self, kind: LoginKind, input: &str) -> Result<(), LoginError> {
        match resolve_login(kind, input) {
            Ok(mode) => {
                self.enter_mode(mode, None);
                Ok(())
            }
            Err(err) => {
                debug!(?kind, "Login input rejected");
                self.store
                    .update(|state| state.login_error = Some(err.to_string()));
                Err(err)
            }
        }
    }

    pub fn login_admin(&self, credential: &str) -> Result<(), LoginError> {
        self.login(LoginKind::Admin, credential)
    }

    pub fn login_user(&self, token: &str) -> Result<(), LoginError> {
        self.login(LoginKind::User, token)
    }

    /// Forget the identity, clear displayed data and cancel every worker
    pub fn logout(&self) {
        self.store.update(|state| {
            self.epoch.advance();
            *state = ViewState::logged_out();
        });
        self.stop_worker();
        info!("Logged out");
    }

    /// Fetch the log and play it back, suspending live updates.
    ///
    /// Returns the number of frames that will be shown.
    pub async fn play_replay(&self) -> Result<usize, ServiceError> {
        let (credential, generation) = self.admin_credential()?;

        let log = match self.replay.load(&credential).await {
            Ok(log) => log,
            Err(err) => {
                error!(error = %err, "Failed to load snapshot log");
                let message = err.to_string();
                self.store.update_if_current(&self.epoch, generation, |state| {
                    state.last_error = Some(message);
                });
                return Err(err.into());
            }
        };

        let total = log.len();
        let playback_generation = self
            .store
            .update_if_current(&self.epoch, generation, |state| {
                state.replay_active = true;
                state.replay = if total == 0 {
                    ReplayStatus::Finished { total }
                } else {
                    ReplayStatus::Playing { frame: 0, total }
                };
                state.last_error = None;
                self.epoch.advance()
            })
            .ok_or_else(|| {
                warn!("Snapshot log arrived after the session changed; dropped");
                ServiceError::Superseded
            })?;

        self.stop_worker();
        let frames = log.into_iter().map(|entry| entry.snapshot).collect();
        let task = self.replay.playback(frames, playback_generation);
        self.spawn_worker(WorkerKind::Replay, playback_generation, task);
        Ok(total)
    }

    /// Suspend (`true`) or resume (`false`) live updates.
    ///
    /// Resuming also stops a running playback.
    pub fn set_replay_active(&self, active: bool) -> Result<(), ServiceError> {
        let generation = self
            .store
            .update(|state| {
                if !state.mode.is_admin() {
                    return Err(ServiceError::NotAuthorized);
                }
                if state.replay_active == active {
                    return Ok(None);
                }
                let generation = self.epoch.advance();
                state.replay_active = active;
                if !active {
                    state.replay = ReplayStatus::Idle;
                }
                Ok(Some(generation))
            })?;

        let Some(generation) = generation else {
            return Ok(());
        };
        self.stop_worker();
        if active {
            info!("Live updates paused");
        } else {
            info!("Live updates resumed");
            self.start_live(generation);
        }
        Ok(())
    }

    pub fn toggle_replay_active(&self) -> Result<(), ServiceError> {
        let active = self.store.read(|state| state.replay_active);
        self.set_replay_active(!active)
    }

    /// Truncate the archived log. Client state is left alone apart from diagnostics.
    pub async fn clear_logs(&self) -> Result<(), ServiceError> {
        let (credential, generation) = self.admin_credential()?;
        match self.api.clear_logs(&credential).await {
            Ok(()) => {
                info!("Snapshot log cleared");
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "Failed to clear snapshot log");
                let message = err.to_string();
                self.store.update_if_current(&self.epoch, generation, |state| {
                    state.last_error = Some(message);
                });
                Err(err.into())
            }
        }
    }

    fn admin_credential(&self) -> Result<(String, u64), ServiceError> {
        self.store.read(|state| {
            state
                .mode
                .credential()
                .map(|credential| (credential.to_string(), self.epoch.current()))
                .ok_or(ServiceError::NotAuthorized)
        })
    }

    fn enter_mode(&self, mode: SessionMode, status: Option<UserStatus>) {
        info!(%mode, "Session started");
        let generation = self.store.update(|state| {
            let generation = self.epoch.advance();
            *state = ViewState {
                mode,
                status,
                ..ViewState::logged_out()
            };
            generation
        });
        self.stop_worker();
        self.start_live(generation);
    }

    fn start_live(&self, generation: u64) {
        let Some(target) = self.store.read(|state| LiveTarget::for_mode(&state.mode)) else {
            return;
        };
        let task = self.live.run(target, generation);
        self.spawn_worker(WorkerKind::LiveSync, generation, task);
    }

    fn spawn_worker(&self, kind: WorkerKind, generation: u64, task: TaskFuture) {
        let (task, abort) = abortable(task);
        {
            let mut slot = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
            if !self.epoch.is_current(generation) {
                debug!(?kind, generation, "Not starting superseded worker");
                return;
            }
            if let Some(previous) = slot.replace(WorkerHandle {
                kind,
                generation,
                abort,
            }) {
                previous.abort.abort();
            }
        }

        let slot = Arc::clone(&self.worker);
        self.scheduler.spawn(Box::pin(async move {
            // Err means the worker was aborted
            let _ = task.await;
            let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
            if slot
                .as_ref()
                .is_some_and(|handle| handle.generation == generation)
            {
                *slot = None;
            }
        }));
    }

    fn stop_worker(&self) {
        let handle = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            debug!(kind = ?handle.kind, generation = handle.generation, "Stopping worker");
            handle.abort.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::state::{Phase, Screen};
    use crate::infrastructure::platform::TokioScheduler;
    use crate::infrastructure::testing::{fixtures, ScriptedGameApi};
    use crate::ports::outbound::{ApiError, MockGameApiPort};
    use goldrush_domain::LogEntry;

    fn composer(api: Arc<dyn GameApiPort>) -> ViewComposer {
        ViewComposer::new(api, Arc::new(TokioScheduler), SyncTiming::default())
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    fn replay_mock(live: goldrush_domain::Snapshot) -> MockGameApiPort {
        let mut api = MockGameApiPort::new();
        api.expect_fetch_world()
            .returning(move |_| Ok(live.clone()));
        api.expect_fetch_logs().times(1).returning(|_| {
            Ok(fixtures::three_frames()
                .into_iter()
                .enumerate()
                .map(|(sequence, snapshot)| LogEntry::new(sequence, snapshot))
                .collect())
        });
        api
    }

    #[tokio::test(start_paused = true)]
    async fn startup_token_with_gold_becomes_user() {
        let mut api = MockGameApiPort::new();
        api.expect_fetch_status()
            .returning(|_| Ok(fixtures::status_with_gold(5)));
        let composer = composer(Arc::new(api));
        assert!(composer.state().checking);

        composer.start(Some(EntityKey::new("abc123"))).await;

        let state = composer.state();
        assert_eq!(state.mode, SessionMode::user("abc123"));
        assert_eq!(state.status.map(|s| s.gold), Some(5));
        assert_eq!(composer.active_worker(), Some(WorkerKind::LiveSync));
        composer.logout();
    }

    #[tokio::test(start_paused = true)]
    async fn startup_token_not_found_leaves_logged_out() {
        let mut api = MockGameApiPort::new();
        api.expect_fetch_status().times(1).returning(|_| {
            Err(ApiError::HttpStatus {
                status: 404,
                body: String::new(),
            })
        });
        let composer = composer(Arc::new(api));

        composer.start(Some(EntityKey::new("abc123"))).await;
        tokio::time::sleep(Duration::from_millis(5000)).await;

        let state = composer.state();
        assert!(!state.checking);
        assert_eq!(state.mode, SessionMode::Unresolved);
        assert!(state.last_error.is_some());
        assert_eq!(composer.active_worker(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_login_makes_no_request() {
        let mut api = MockGameApiPort::new();
        api.expect_fetch_world().never();
        api.expect_fetch_status().never();
        let composer = composer(Arc::new(api));
        composer.start(None).await;

        assert_eq!(composer.login_admin(""), Err(LoginError::EmptyCredential));
        assert_eq!(composer.login_user("  "), Err(LoginError::EmptyToken));
        settle().await;

        let state = composer.state();
        assert_eq!(state.login_error.as_deref(), Some("Entity key required"));
        assert_eq!(state.mode, SessionMode::Unresolved);
        assert_eq!(composer.active_worker(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn replay_plays_every_frame_and_keeps_the_last() {
        let live = fixtures::snapshot_with_entity_at(9, 9);
        let composer = composer(Arc::new(replay_mock(live.clone())));
        composer.start(None).await;
        composer.login_admin("pw").expect("login");
        settle().await;
        assert_eq!(composer.state().world, Some(live));

        let total = composer.play_replay().await.expect("replay");
        assert_eq!(total, 3);
        assert_eq!(composer.active_worker(), Some(WorkerKind::Replay));
        let mut rx = composer.subscribe();
        let _current = rx.try_next();

        tokio::time::sleep(Duration::from_millis(10_000)).await;

        let mut worlds = Vec::new();
        while let Ok(Some(state)) = rx.try_next() {
            worlds.push(state.world);
        }
        let frames = fixtures::three_frames();
        assert_eq!(worlds.len(), 3);
        assert_eq!(worlds[2].as_ref(), Some(&frames[2]));

        let state = composer.state();
        assert_eq!(state.world.as_ref(), Some(&frames[2]));
        assert!(state.replay_active);
        assert_eq!(state.replay, ReplayStatus::Finished { total: 3 });
        assert_eq!(composer.active_worker(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn replay_and_live_sync_are_exclusive() {
        let api = Arc::new(ScriptedGameApi::new());
        api.set_world_fallback(Ok(fixtures::snapshot_with_entity_at(9, 9)));
        api.set_logs(Ok(fixtures::three_frames()
            .into_iter()
            .enumerate()
            .map(|(sequence, snapshot)| LogEntry::new(sequence, snapshot))
            .collect()));
        let composer = composer(api.clone());
        composer.start(None).await;
        composer.login_admin("pw").expect("login");
        settle().await;

        composer.play_replay().await.expect("replay");
        let calls_at_replay = api.world_calls();
        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(api.world_calls(), calls_at_replay);

        composer.set_replay_active(false).expect("resume");
        settle().await;
        let state = composer.state();
        assert!(!state.replay_active);
        assert_eq!(state.replay, ReplayStatus::Idle);
        assert_eq!(composer.active_worker(), Some(WorkerKind::LiveSync));
        assert_eq!(api.world_calls(), calls_at_replay + 1);

        composer.toggle_replay_active().expect("pause");
        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert!(composer.state().replay_active);
        assert_eq!(composer.active_worker(), None);
        assert_eq!(api.world_calls(), calls_at_replay + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn logout_cancels_everything() {
        let api = Arc::new(ScriptedGameApi::new());
        api.push_world(
            Duration::from_millis(500),
            Ok(fixtures::snapshot_with_entity_at(1, 1)),
        );
        api.set_world_fallback(Ok(fixtures::snapshot_with_entity_at(2, 2)));
        let composer = composer(api.clone());
        composer.start(None).await;
        composer.login_admin("pw").expect("login");
        tokio::time::sleep(Duration::from_millis(100)).await;

        composer.logout();
        tokio::time::sleep(Duration::from_millis(5000)).await;

        let state = composer.state();
        assert_eq!(state, ViewState::logged_out());
        assert_eq!(composer.active_worker(), None);
        assert_eq!(api.world_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn logout_during_replay_stops_playback() {
        let composer = composer(Arc::new(replay_mock(fixtures::snapshot_with_entity_at(9, 9))));
        composer.start(None).await;
        composer.login_admin("pw").expect("login");
        settle().await;
        composer.play_replay().await.expect("replay");

        tokio::time::sleep(Duration::from_millis(400)).await;
        composer.logout();
        tokio::time::sleep(Duration::from_millis(5000)).await;

        assert_eq!(composer.state(), ViewState::logged_out());
        assert_eq!(composer.active_worker(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn log_arriving_after_logout_is_superseded() {
        let api = Arc::new(ScriptedGameApi::new());
        api.set_world_fallback(Ok(fixtures::snapshot_with_entity_at(9, 9)));
        api.push_logs(
            Duration::from_millis(500),
            Ok(fixtures::three_frames()
                .into_iter()
                .enumerate()
                .map(|(sequence, snapshot)| LogEntry::new(sequence, snapshot))
                .collect()),
        );
        let composer = composer(api.clone());
        composer.start(None).await;
        composer.login_admin("pw").expect("login");
        settle().await;

        let (result, ()) = tokio::join!(composer.play_replay(), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            composer.logout();
        });

        assert_eq!(result, Err(ServiceError::Superseded));
        assert_eq!(api.log_calls(), 1);
        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(composer.state(), ViewState::logged_out());
        assert_eq!(composer.active_worker(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_log_finishes_immediately() {
        let live = fixtures::snapshot_with_entity_at(9, 9);
        let api = Arc::new(ScriptedGameApi::new());
        api.set_world_fallback(Ok(live.clone()));
        api.set_logs(Ok(Vec::new()));
        let composer = composer(api.clone());
        composer.start(None).await;
        composer.login_admin("pw").expect("login");
        settle().await;

        assert_eq!(composer.play_replay().await, Ok(0));
        let calls_at_replay = api.world_calls();
        tokio::time::sleep(Duration::from_millis(5000)).await;

        let state = composer.state();
        assert!(state.replay_active);
        assert_eq!(state.replay, ReplayStatus::Finished { total: 0 });
        assert_eq!(state.world, Some(live));
        assert_eq!(composer.active_worker(), None);
        assert_eq!(api.world_calls(), calls_at_replay);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_credential_waits_on_loading_until_logout() {
        let mut api = MockGameApiPort::new();
        api.expect_fetch_world().returning(|_| {
            Err(ApiError::HttpStatus {
                status: 401,
                body: "Unauthorized".to_string(),
            })
        });
        let composer = composer(Arc::new(api));
        composer.start(None).await;
        composer.login_admin("wrong").expect("login");
        tokio::time::sleep(Duration::from_millis(2500)).await;

        let state = composer.state();
        assert_eq!(state.phase(), Phase::AdminActive);
        assert_eq!(state.screen(), Screen::Loading);
        assert!(state.awaiting_data());
        assert_eq!(state.last_error.as_deref(), Some("HTTP 401: Unauthorized"));

        composer.logout();
        let state = composer.state();
        assert_eq!(state.screen(), Screen::Login);
        assert_eq!(state, ViewState::logged_out());
        assert_eq!(composer.active_worker(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn log_failure_leaves_state_unchanged() {
        let live = fixtures::snapshot_with_entity_at(9, 9);
        let mut api = MockGameApiPort::new();
        let world = live.clone();
        api.expect_fetch_world()
            .returning(move |_| Ok(world.clone()));
        api.expect_fetch_logs()
            .returning(|_| Err(ApiError::RequestFailed("offline".to_string())));
        let composer = composer(Arc::new(api));
        composer.start(None).await;
        composer.login_admin("pw").expect("login");
        settle().await;

        let result = composer.play_replay().await;

        assert!(matches!(result, Err(ServiceError::Api(_))));
        let state = composer.state();
        assert_eq!(state.world, Some(live));
        assert!(!state.replay_active);
        assert_eq!(state.replay, ReplayStatus::Idle);
        assert_eq!(composer.active_worker(), Some(WorkerKind::LiveSync));
        composer.logout();
    }

    #[tokio::test(start_paused = true)]
    async fn admin_only_operations_require_admin() {
        let mut api = MockGameApiPort::new();
        api.expect_fetch_status()
            .returning(|_| Ok(fixtures::status_with_gold(1)));
        api.expect_fetch_logs().never();
        api.expect_clear_logs().never();
        let composer = composer(Arc::new(api));
        composer.start(None).await;
        composer.login_user("abc123").expect("login");

        assert_eq!(composer.play_replay().await, Err(ServiceError::NotAuthorized));
        assert_eq!(composer.clear_logs().await, Err(ServiceError::NotAuthorized));
        assert_eq!(
            composer.set_replay_active(true),
            Err(ServiceError::NotAuthorized)
        );
        composer.logout();
    }

    #[tokio::test(start_paused = true)]
    async fn clear_log_failure_is_only_diagnostic() {
        let live = fixtures::snapshot_with_entity_at(9, 9);
        let mut api = MockGameApiPort::new();
        let world = live.clone();
        api.expect_fetch_world()
            .returning(move |_| Ok(world.clone()));
        api.expect_clear_logs().times(1).returning(|_| {
            Err(ApiError::HttpStatus {
                status: 401,
                body: "Unauthorized".to_string(),
            })
        });
        let composer = composer(Arc::new(api));
        composer.start(None).await;
        composer.login_admin("pw").expect("login");
        settle().await;

        assert!(composer.clear_logs().await.is_err());

        let state = composer.state();
        assert_eq!(state.world, Some(live));
        assert_eq!(state.last_error.as_deref(), Some("HTTP 401: Unauthorized"));
        composer.logout();
    }

    #[tokio::test(start_paused = true)]
    async fn clear_log_success_leaves_board_and_replay_alone() {
        let live = fixtures::snapshot_with_entity_at(9, 9);
        let mut api = MockGameApiPort::new();
        let world = live.clone();
        api.expect_fetch_world()
            .returning(move |_| Ok(world.clone()));
        api.expect_clear_logs().times(1).returning(|_| Ok(()));
        let composer = composer(Arc::new(api));
        composer.start(None).await;
        composer.login_admin("pw").expect("login");
        settle().await;

        assert_eq!(composer.clear_logs().await, Ok(()));

        let state = composer.state();
        assert_eq!(state.world, Some(live));
        assert!(!state.replay_active);
        assert_eq!(state.last_error, None);
        assert_eq!(composer.active_worker(), Some(WorkerKind::LiveSync));
        composer.logout();
    }

    #[tokio::test(start_paused = true)]
    async fn user_login_skips_validation_and_loads_lazily() {
        let api = Arc::new(ScriptedGameApi::new());
        api.set_status_fallback(Ok(fixtures::status_with_gold(3)));
        let composer = composer(api.clone());
        composer.start(None).await;
        assert_eq!(api.status_calls(), 0);

        composer.login_user("abc123").expect("login");
        let state = composer.state();
        assert_eq!(state.mode, SessionMode::user("abc123"));
        assert!(state.status.is_none());

        settle().await;
        assert_eq!(composer.state().status.map(|s| s.gold), Some(3));
        assert_eq!(api.status_calls(), 1);
        composer.logout();
    }
}
