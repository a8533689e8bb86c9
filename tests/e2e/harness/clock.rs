use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Fixed start so generated record names are predictable.
pub const EPOCH: i64 = 1_700_000_123;

/// Controllable time for synthetic record generation.
///
/// Hand `as_provider()` to the CRUD suite; records created before and after
/// `advance` get different names.
#[derive(Clone)]
pub struct MockClock {
    current: Arc<AtomicI64>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::at(EPOCH)
    }

    pub fn at(timestamp: i64) -> Self {
        Self {
            current: Arc::new(AtomicI64::new(timestamp)),
        }
    }

    /// Creates a time provider closure reading this clock.
    pub fn as_provider(&self) -> impl Fn() -> i64 + Send + Sync + 'static {
        let current = self.current.clone();
        move || current.load(Ordering::SeqCst)
    }

    pub fn now(&self) -> i64 {
        self.current.load(Ordering::SeqCst)
    }

    pub fn advance(&self, duration: Duration) {
        self.current
            .fetch_add(duration.as_secs() as i64, Ordering::SeqCst);
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}
