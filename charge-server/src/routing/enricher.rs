//! Replace great-circle distances with driving distances.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::{Coordinate, RankedStation};

use super::RouteProvider;
use super::error::RetryClass;
use super::gate::RequestGate;

/// Default number of routing requests allowed in flight.
const DEFAULT_MAX_CONCURRENT: usize = 3;

/// Default minimum spacing between dispatches.
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(500);

/// Default attempts per station, including the first.
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base backoff after a transient failure.
const DEFAULT_TRANSIENT_BACKOFF: Duration = Duration::from_secs(1);

/// Default base backoff after the service reports concurrency overload.
const DEFAULT_CONCURRENCY_BACKOFF: Duration = Duration::from_secs(3);

/// Retry and rate-limit settings for route enrichment.
#[derive(Debug, Clone)]
pub struct EnricherConfig {
    /// Maximum requests in flight across all callers
    pub max_concurrent: usize,
    /// Minimum spacing between any two dispatches
    pub min_interval: Duration,
    /// Attempts per station, including the first
    pub max_attempts: u32,
    /// Backoff base after a transient failure, doubled per attempt
    pub transient_backoff: Duration,
    /// Backoff base after a concurrency-limit response, doubled per attempt
    pub concurrency_backoff: Duration,
}

impl Default for EnricherConfig {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            min_interval: DEFAULT_MIN_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            transient_backoff: DEFAULT_TRANSIENT_BACKOFF,
            concurrency_backoff: DEFAULT_CONCURRENCY_BACKOFF,
        }
    }
}

impl EnricherConfig {
    /// Set how many routing calls may be in flight at once.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set the minimum spacing between dispatched calls.
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    /// Set the number of attempts per station, including the first.
    pub fn with_max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Set the base backoff after a transient failure.
    pub fn with_transient_backoff(mut self, base: Duration) -> Self {
        self.transient_backoff = base;
        self
    }

    /// Set the base backoff after the service reports a concurrency limit.
    pub fn with_concurrency_backoff(mut self, base: Duration) -> Self {
        self.concurrency_backoff = base;
        self
    }

    /// Delay before retrying after failed attempt number `attempt` (0-based).
    ///
    /// `None` means the failure is not worth retrying.
    pub fn backoff_for(&self, class: RetryClass, attempt: u32) -> Option<Duration> {
        let base = match class {
            RetryClass::ConcurrencyLimited => self.concurrency_backoff,
            RetryClass::Transient => self.transient_backoff,
            RetryClass::Fatal => return None,
        };
        Some(base.saturating_mul(1u32 << attempt.min(16)))
    }
}

/// Looks up driving distances under the routing service's quotas.
///
/// All lookups through one enricher share a [`RequestGate`], so the
/// concurrency and spacing limits hold across concurrent requests.
pub struct RouteDistanceEnricher<P> {
    provider: P,
    gate: RequestGate,
    config: EnricherConfig,
}

impl<P: RouteProvider> RouteDistanceEnricher<P> {
    /// Create an enricher with its own gate.
    pub fn new(provider: P, config: EnricherConfig) -> Self {
        let gate = RequestGate::new(config.max_concurrent, config.min_interval);
        Self::with_gate(provider, config, gate)
    }

    /// Create an enricher sharing an existing gate.
    pub fn with_gate(provider: P, config: EnricherConfig, gate: RequestGate) -> Self {
        Self {
            provider,
            gate,
            config,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn gate(&self) -> &RequestGate {
        &self.gate
    }

    pub fn config(&self) -> &EnricherConfig {
        &self.config
    }

    /// Driving distance in km, or `None` if it could not be obtained.
    ///
    /// Retries concurrency-limited and transient failures with
    /// exponential backoff up to `max_attempts`; gives up immediately
    /// on fatal ones. Cancellation is honoured while waiting for
    /// admission, during the call and during backoff.
    pub async fn enrich(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        cancel: &CancellationToken,
    ) -> Option<f64> {
        let max_attempts = self.config.max_attempts;

        for attempt in 0..max_attempts {
            let result = {
                let _admission = self.gate.admit(cancel).await?;
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return None,
                    result = self.provider.route_distance_km(origin, destination) => result,
                }
            };

            let err = match result {
                Ok(km) => return Some(km),
                Err(err) => err,
            };

            let class = err.retry_class();
            let Some(delay) = self.config.backoff_for(class, attempt) else {
                warn!(
                    %destination,
                    error = %err,
                    remediation = err.remediation().unwrap_or("check the routing service configuration"),
                    "routing service rejected request; keeping great-circle distance"
                );
                return None;
            };

            if attempt + 1 >= max_attempts {
                debug!(
                    %destination,
                    attempts = max_attempts,
                    error = %err,
                    "route lookup retries exhausted"
                );
                break;
            }

            debug!(
                attempt = attempt + 1,
                max_attempts,
                delay_ms = delay.as_millis() as u64,
                ?class,
                error = %err,
                "route lookup failed, backing off"
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return None,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        None
    }

    /// Refine every station that only has a great-circle distance.
    ///
    /// Stations are processed one at a time, in order. Failures keep the
    /// existing figure. Stops early once `cancel` fires. Returns the
    /// number of stations that received a route distance.
    pub async fn fill_route_distances(
        &self,
        stations: &mut [RankedStation],
        origin: Coordinate,
        cancel: &CancellationToken,
    ) -> usize {
        let mut refined = 0;

        for ranked in stations.iter_mut().filter(|s| !s.has_route_distance()) {
            if cancel.is_cancelled() {
                debug!(refined, "route enrichment cancelled");
                break;
            }

            if let Some(km) = self
                .enrich(origin, ranked.station.location, cancel)
                .await
            {
                ranked.set_route_distance(km);
                refined += 1;
            }
        }

        debug!(refined, total = stations.len(), "route enrichment finished");
        refined
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::routing::MockRouteProvider;
    use futures::future::join_all;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn run_paused<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap()
            .block_on(future)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// However many callers pile on, at most three calls are in flight
        /// and dispatches are at least 500ms apart.
        #[test]
        fn concurrent_callers_respect_limits(
            callers in 1usize..12,
            latency_ms in 0u64..3000,
        ) {
            let (peak, times, calls) = run_paused(async move {
                let mock = MockRouteProvider::always(1.0)
                    .with_latency(Duration::from_millis(latency_ms));
                let enricher = Arc::new(RouteDistanceEnricher::new(
                    mock.clone(),
                    EnricherConfig::default(),
                ));
                let cancel = CancellationToken::new();
                let origin = Coordinate::new(30.5, 114.3).unwrap();

                let lookups = (0..callers).map(|i| {
                    let enricher = Arc::clone(&enricher);
                    let cancel = cancel.clone();
                    let destination =
                        Coordinate::new(30.5 + i as f64 * 0.01, 114.3).unwrap();
                    async move { enricher.enrich(origin, destination, &cancel).await }
                });
                let results = join_all(lookups).await;
                assert!(results.iter().all(|r| *r == Some(1.0)));

                (mock.peak_in_flight(), mock.dispatch_times().await, mock.calls())
            });

            prop_assert_eq!(calls, callers);
            prop_assert!(peak <= 3, "peak in flight {}", peak);

            let mut sorted = times.clone();
            sorted.sort();
            for pair in sorted.windows(2) {
                prop_assert!(
                    pair[1] - pair[0] >= Duration::from_millis(500),
                    "dispatches {:?} apart",
                    pair[1] - pair[0]
                );
            }
        }
    }
}
