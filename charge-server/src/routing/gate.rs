//! Admission control for outbound routing requests.
//!
//! Two limits apply to every request, across all callers sharing a gate:
//! a fair counting semaphore caps how many requests are in flight, and a
//! dispatch schedule keeps consecutive requests at least `min_interval`
//! apart. Each admitted caller reserves the next free dispatch slot while
//! holding the schedule lock, then sleeps until that slot outside the
//! lock, so waiting callers never serialise on a sleeping lock holder.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Permission to dispatch one request.
///
/// Holds a concurrency permit; dropping the admission frees it.
#[derive(Debug)]
pub struct Admission {
    _permit: OwnedSemaphorePermit,
    dispatch_at: Instant,
}

impl Admission {
    /// The slot this admission was scheduled for.
    pub fn dispatch_at(&self) -> Instant {
        self.dispatch_at
    }
}

/// Shared concurrency and spacing limiter.
///
/// Cloning yields a handle to the same limits.
#[derive(Debug, Clone)]
pub struct RequestGate {
    permits: Arc<Semaphore>,
    last_dispatch: Arc<Mutex<Option<Instant>>>,
    min_interval: Duration,
}

impl RequestGate {
    /// Create a gate. `max_concurrent` is raised to at least one.
    pub fn new(max_concurrent: usize, min_interval: Duration) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
            last_dispatch: Arc::new(Mutex::new(None)),
            min_interval,
        }
    }

    /// Permits not currently held.
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// Minimum spacing between dispatches.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait for a permit and a dispatch slot.
    ///
    /// Returns `None` if `cancel` fires first. A slot reserved before
    /// cancellation stays reserved, so later callers may wait slightly
    /// longer than strictly necessary but never dispatch too early.
    pub async fn admit(&self, cancel: &CancellationToken) -> Option<Admission> {
        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => return None,
            permit = Arc::clone(&self.permits).acquire_owned() => permit.ok()?,
        };

        let slot = self.reserve_slot().await;
        trace!(
            wait_ms = slot.saturating_duration_since(Instant::now()).as_millis() as u64,
            "routing request admitted"
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return None,
            _ = tokio::time::sleep_until(slot) => {}
        }

        Some(Admission {
            _permit: permit,
            dispatch_at: slot,
        })
    }

    async fn reserve_slot(&self) -> Instant {
        let mut last = self.last_dispatch.lock().await;
        let now = Instant::now();
        let slot = match *last {
            Some(prev) => (prev + self.min_interval).max(now),
            None => now,
        };
        *last = Some(slot);
        slot
    }
}
