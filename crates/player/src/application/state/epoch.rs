//! Generation counter used to cancel sync workers cooperatively.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared generation tag.
///
/// Every worker remembers the generation it was started under. Advancing the
/// epoch makes all of them stale: loops exit at their next wake-up and late
/// responses are dropped instead of applied.
#[derive(Debug, Clone, Default)]
pub struct SyncEpoch {
    generation: Arc<AtomicU64>,
}

impl SyncEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Invalidate every outstanding worker and return the new generation.
    pub fn advance(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }
}
