//! Hand-written `GameApiPort` fake with per-call latency

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use goldrush_domain::{EntityKey, LogEntry, Snapshot, UserStatus};

use crate::ports::outbound::{ApiError, GameApiPort};

type Scripted<T> = (Duration, Result<T, ApiError>);

/// Answers from queued responses, then from a fallback.
///
/// Each queued response carries its own delay so tests can make an older
/// request finish after a newer one.
pub struct ScriptedGameApi {
    worlds: Mutex<VecDeque<Scripted<Snapshot>>>,
    world_fallback: Mutex<Option<Result<Snapshot, ApiError>>>,
    statuses: Mutex<VecDeque<Scripted<UserStatus>>>,
    status_fallback: Mutex<Option<Result<UserStatus, ApiError>>>,
    logs: Mutex<VecDeque<Scripted<Vec<LogEntry>>>>,
    log_fallback: Mutex<Option<Result<Vec<LogEntry>, ApiError>>>,
    world_calls: AtomicUsize,
    status_calls: AtomicUsize,
    log_calls: AtomicUsize,
}

impl Default for ScriptedGameApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedGameApi {
    pub fn new() -> Self {
        Self {
            worlds: Mutex::new(VecDeque::new()),
            world_fallback: Mutex::new(None),
            statuses: Mutex::new(VecDeque::new()),
            status_fallback: Mutex::new(None),
            logs: Mutex::new(VecDeque::new()),
            log_fallback: Mutex::new(None),
            world_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            log_calls: AtomicUsize::new(0),
        }
    }

    pub fn push_world(&self, delay: Duration, response: Result<Snapshot, ApiError>) {
        lock(&self.worlds).push_back((delay, response));
    }

    pub fn set_world_fallback(&self, response: Result<Snapshot, ApiError>) {
        *lock(&self.world_fallback) = Some(response);
    }

    pub fn push_status(&self, delay: Duration, response: Result<UserStatus, ApiError>) {
        lock(&self.statuses).push_back((delay, response));
    }

    pub fn set_status_fallback(&self, response: Result<UserStatus, ApiError>) {
        *lock(&self.status_fallback) = Some(response);
    }

    pub fn push_logs(&self, delay: Duration, response: Result<Vec<LogEntry>, ApiError>) {
        lock(&self.logs).push_back((delay, response));
    }

    pub fn set_logs(&self, response: Result<Vec<LogEntry>, ApiError>) {
        *lock(&self.log_fallback) = Some(response);
    }

    pub fn world_calls(&self) -> usize {
        self.world_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn log_calls(&self) -> usize {
        self.log_calls.load(Ordering::SeqCst)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn unscripted<T>() -> Result<T, ApiError> {
    Err(ApiError::RequestFailed("no scripted response".to_string()))
}

async fn answer<T: Clone>(
    queue: &Mutex<VecDeque<Scripted<T>>>,
    fallback: &Mutex<Option<Result<T, ApiError>>>,
) -> Result<T, ApiError> {
    let next = lock(queue).pop_front();
    let (delay, response) = match next {
        Some(scripted) => scripted,
        None => (
            Duration::ZERO,
            lock(fallback).clone().unwrap_or_else(unscripted),
        ),
    };
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    response
}

#[async_trait::async_trait]
impl GameApiPort for ScriptedGameApi {
    async fn fetch_world(&self, _credential: &str) -> Result<Snapshot, ApiError> {
        self.world_calls.fetch_add(1, Ordering::SeqCst);
        answer(&self.worlds, &self.world_fallback).await
    }

    async fn fetch_status(&self, _token: &EntityKey) -> Result<UserStatus, ApiError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        answer(&self.statuses, &self.status_fallback).await
    }

    async fn fetch_logs(&self, _credential: &str) -> Result<Vec<LogEntry>, ApiError> {
        self.log_calls.fetch_add(1, Ordering::SeqCst);
        answer(&self.logs, &self.log_fallback).await
    }

    async fn clear_logs(&self, _credential: &str) -> Result<(), ApiError> {
        Ok(())
    }
}
