//! Scripted route provider for testing without the routing service.
//!
//! Plays back a queue of outcomes, then repeats a fallback. Records
//! every dispatch so tests can check call counts, spacing and how many
//! calls were in flight at once.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::domain::Coordinate;

use super::RouteProvider;
use super::error::RoutingError;
use super::types::DirectionResponse;

/// What a single mock call returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockOutcome {
    /// A route of this many kilometres.
    DistanceKm(f64),
    /// A service response with this status and no routes.
    Status(i64),
    /// A non-2xx HTTP response.
    HttpStatus(u16),
}

impl MockOutcome {
    fn into_result(self) -> Result<f64, RoutingError> {
        match self {
            MockOutcome::DistanceKm(km) => Ok(km),
            MockOutcome::Status(status) => DirectionResponse {
                status,
                message: format!("mock status {status}"),
                result: None,
            }
            .into_distance_km(),
            MockOutcome::HttpStatus(status) => Err(RoutingError::HttpStatus {
                status,
                body: String::new(),
            }),
        }
    }
}

#[derive(Default)]
struct MockStats {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    dispatches: Mutex<Vec<Instant>>,
}

/// Route provider that serves scripted outcomes.
#[derive(Clone)]
pub struct MockRouteProvider {
    script: Arc<Mutex<VecDeque<MockOutcome>>>,
    fallback: MockOutcome,
    latency: Duration,
    stats: Arc<MockStats>,
}

impl MockRouteProvider {
    /// A provider that always returns `fallback`.
    pub fn new(fallback: MockOutcome) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback,
            latency: Duration::ZERO,
            stats: Arc::new(MockStats::default()),
        }
    }

    /// A provider that always succeeds with `km`.
    pub fn always(km: f64) -> Self {
        Self::new(MockOutcome::DistanceKm(km))
    }

    /// Serve these outcomes in order before falling back.
    pub fn with_script(mut self, outcomes: impl IntoIterator<Item = MockOutcome>) -> Self {
        self.script = Arc::new(Mutex::new(outcomes.into_iter().collect()));
        self
    }

    /// Delay every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of calls dispatched so far.
    pub fn calls(&self) -> usize {
        self.stats.calls.load(Ordering::SeqCst)
    }

    /// Highest number of calls observed in flight at once.
    pub fn peak_in_flight(&self) -> usize {
        self.stats.peak_in_flight.load(Ordering::SeqCst)
    }

    /// When each call was dispatched, in dispatch order.
    pub async fn dispatch_times(&self) -> Vec<Instant> {
        self.stats.dispatches.lock().await.clone()
    }
}

/// Decrements the in-flight count even if the call is dropped midway.
struct InFlight<'a>(&'a MockStats);

impl<'a> InFlight<'a> {
    fn enter(stats: &'a MockStats) -> Self {
        let now = stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        stats.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        Self(stats)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl RouteProvider for MockRouteProvider {
    async fn route_distance_km(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
    ) -> Result<f64, RoutingError> {
        self.stats.calls.fetch_add(1, Ordering::SeqCst);
        self.stats.dispatches.lock().await.push(Instant::now());
        let _in_flight = InFlight::enter(&self.stats);

        let outcome = self
            .script
            .lock()
            .await
            .pop_front()
            .unwrap_or(self.fallback);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        outcome.into_result()
    }
}
