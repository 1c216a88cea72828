//! Shared, observable holder of the [`ViewState`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_channel::mpsc;

use super::{SyncEpoch, ViewState};

/// Owns the view state and pushes every change to subscribers.
///
/// Cloning shares the same state. The lock is never held across an await.
#[derive(Clone)]
pub struct ViewStore {
    state: Arc<Mutex<ViewState>>,
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<ViewState>>>>,
}

impl ViewStore {
    pub fn new(initial: ViewState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state
    pub fn current(&self) -> ViewState {
        self.lock_state().clone()
    }

    /// Mutate the state and notify subscribers.
    pub fn update<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        let (result, snapshot) = {
            let mut state = self.lock_state();
            let result = f(&mut state);
            (result, state.clone())
        };
        self.publish(snapshot);
        result
    }

    /// Read from the state without notifying anyone.
    pub fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        f(&self.lock_state())
    }

    /// Mutate only if `generation` is still current.
    ///
    /// Returns `None` when the generation is stale. The epoch is checked under
    /// the state lock, and every epoch advance happens under the same lock, so
    /// a stale worker can never slip a write in after cancellation.
    pub fn update_if_current<R>(
        &self,
        epoch: &SyncEpoch,
        generation: u64,
        f: impl FnOnce(&mut ViewState) -> R,
    ) -> Option<R> {
        let (result, snapshot) = {
            let mut state = self.lock_state();
            if !epoch.is_current(generation) {
                return None;
            }
            let result = f(&mut state);
            (result, state.clone())
        };
        self.publish(snapshot);
        Some(result)
    }

    /// Receive the current state immediately, then every change.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<ViewState> {
        let (tx, rx) = mpsc::unbounded();
        let _ = tx.unbounded_send(self.current());
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    fn publish(&self, snapshot: ViewState) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Dropped receivers are pruned here.
        subscribers.retain(|tx| tx.unbounded_send(snapshot.clone()).is_ok());
    }
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new(ViewState::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use goldrush_domain::SessionMode;

    #[tokio::test]
    async fn subscribers_see_current_then_changes() {
        let store = ViewStore::new(ViewState::logged_out());
        let mut rx = store.subscribe();

        store.update(|s| s.mode = SessionMode::admin("pw"));

        let first = rx.next().await.expect("initial state");
        assert!(!first.mode.is_active());
        let second = rx.next().await.expect("updated state");
        assert!(second.mode.is_admin());
    }

    #[test]
    fn stale_generation_does_not_apply() {
        let store = ViewStore::default();
        let epoch = SyncEpoch::new();
        let stale = epoch.current();
        epoch.advance();

        let applied = store.update_if_current(&epoch, stale, |s| {
            s.last_error = Some("late".to_string());
        });

        assert!(applied.is_none());
        assert!(store.current().last_error.is_none());
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let store = ViewStore::default();
        drop(store.subscribe());
        store.update(|s| s.checking = false);
        assert!(store.subscribers.lock().expect("lock").is_empty());
    }
}
