//! Probe scheduling loop.
//!
//! One cycle probes every endpoint in configured order, records each outcome
//! against the endpoint's domain, and reports once. Cycles are separated by a
//! fixed sleep that starts only after the whole cycle has finished.

use crate::classifier::classify;
use crate::domain::extract_domain;
use crate::prober::Prober;
use crate::reporter::Reporter;
use crate::stats::{StatsAggregator, StatsSnapshot};
use crate::types::{EndpointSpec, HealthStatus, ProbeOutcome};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Pause between the end of one cycle and the start of the next
pub const CYCLE_INTERVAL: Duration = Duration::from_secs(15);

/// Sleep abstraction so tests can run many cycles without wall-clock delay
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[async_trait]
impl<S: Sleeper + ?Sized> Sleeper for Arc<S> {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await
    }
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Hooks for out-of-band observers such as metrics exporters
pub trait CycleObserver: Send + Sync {
    fn on_probe(&self, _domain: &str, _outcome: &ProbeOutcome, _status: HealthStatus) {}

    fn on_dropped(&self, _spec: &EndpointSpec) {}

    fn on_cycle(&self, _snapshot: &StatsSnapshot, _summary: &CycleSummary) {}
}

/// Scheduler lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Domains not yet registered
    Idle,
    /// Registered and probing
    Cycling,
}

/// What happened during one cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Probes counted against a domain
    pub recorded: usize,
    /// Recorded probes classified healthy
    pub healthy: usize,
    /// Probes with no domain key, left out of the stats
    pub dropped: usize,
    /// Wall-clock duration of the cycle
    pub elapsed: Duration,
}

/// Drives repeated probe cycles over a fixed endpoint list
pub struct Scheduler<P, R, S = TokioSleeper> {
    endpoints: Vec<EndpointSpec>,
    stats: StatsAggregator,
    prober: P,
    reporter: R,
    sleeper: S,
    interval: Duration,
    observer: Option<Arc<dyn CycleObserver>>,
    state: SchedulerState,
}

impl<P: Prober, R: Reporter> Scheduler<P, R, TokioSleeper> {
    /// Create a scheduler that sleeps on the tokio timer
    pub fn new(
        endpoints: Vec<EndpointSpec>,
        stats: StatsAggregator,
        prober: P,
        reporter: R,
    ) -> Self {
        Self {
            endpoints,
            stats,
            prober,
            reporter,
            sleeper: TokioSleeper,
            interval: CYCLE_INTERVAL,
            observer: None,
            state: SchedulerState::Idle,
        }
    }
}

impl<P: Prober, R: Reporter, S: Sleeper> Scheduler<P, R, S> {
    /// Replace the sleeper
    pub fn with_sleeper<S2: Sleeper>(self, sleeper: S2) -> Scheduler<P, R, S2> {
        Scheduler {
            endpoints: self.endpoints,
            stats: self.stats,
            prober: self.prober,
            reporter: self.reporter,
            sleeper,
            interval: self.interval,
            observer: self.observer,
            state: self.state,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn CycleObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn endpoints(&self) -> &[EndpointSpec] {
        &self.endpoints
    }

    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Pre-register every endpoint's domain with zero counts.
    ///
    /// Endpoints whose URL yields no domain are logged and skipped here; they
    /// are still probed each cycle.
    pub async fn register_domains(&mut self) -> usize {
        let mut registered = 0;
        for spec in &self.endpoints {
            match extract_domain(&spec.url) {
                Ok(domain) => {
                    self.stats.register(&domain).await;
                    registered += 1;
                }
                Err(e) => {
                    warn!(
                        url = %spec.url,
                        error = %e,
                        "Error extracting domain, skipping registration"
                    );
                }
            }
        }

        self.state = SchedulerState::Cycling;
        info!(endpoints = self.endpoints.len(), registered, "Domains registered");
        registered
    }

    async fn ensure_started(&mut self) {
        if self.state == SchedulerState::Idle {
            self.register_domains().await;
        }
    }

    /// Probe every endpoint once, in order, then report.
    pub async fn run_cycle(&mut self) -> CycleSummary {
        self.ensure_started().await;

        let start = Instant::now();
        let mut summary = CycleSummary::default();

        for spec in &self.endpoints {
            let outcome = self.prober.probe(spec).await;
            let status = classify(&outcome);

            if let Some(error) = &outcome.error {
                warn!(url = %spec.url, error = %error, "Probe failed");
            } else {
                debug!(
                    url = %spec.url,
                    status = outcome.status_code,
                    latency_ms = outcome.latency.as_millis(),
                    health = %status,
                    "Probe classified"
                );
            }

            let domain = match extract_domain(&spec.url) {
                Ok(domain) => domain,
                Err(e) => {
                    warn!(
                        url = %spec.url,
                        error = %e,
                        "Error extracting domain, probe not counted"
                    );
                    summary.dropped += 1;
                    if let Some(observer) = &self.observer {
                        observer.on_dropped(spec);
                    }
                    continue;
                }
            };

            self.stats.record(&domain, status.is_healthy()).await;
            summary.recorded += 1;
            if status.is_healthy() {
                summary.healthy += 1;
            }
            if let Some(observer) = &self.observer {
                observer.on_probe(&domain, &outcome, status);
            }
        }

        let snapshot = self.stats.snapshot().await;
        self.reporter.report(&snapshot);
        summary.elapsed = start.elapsed();

        if let Some(observer) = &self.observer {
            observer.on_cycle(&snapshot, &summary);
        }

        debug!(
            recorded = summary.recorded,
            healthy = summary.healthy,
            dropped = summary.dropped,
            elapsed_ms = summary.elapsed.as_millis(),
            "Cycle complete"
        );

        summary
    }

    /// Run `cycles` cycles, sleeping between them but not after the last.
    pub async fn run_cycles(&mut self, cycles: usize) -> Vec<CycleSummary> {
        let mut summaries = Vec::with_capacity(cycles);
        for i in 0..cycles {
            summaries.push(self.run_cycle().await);
            if i + 1 < cycles {
                self.sleeper.sleep(self.interval).await;
            }
        }
        summaries
    }

    /// Cycle until `shutdown` is notified.
    ///
    /// Shutdown is observed between cycles only; a started cycle always
    /// finishes and reports.
    pub async fn run_until(&mut self, shutdown: &Notify) {
        self.ensure_started().await;
        info!(interval_secs = self.interval.as_secs_f64(), "Scheduler started");

        loop {
            self.run_cycle().await;

            tokio::select! {
                _ = self.sleeper.sleep(self.interval) => {}
                _ = shutdown.notified() => {
                    info!("Scheduler stopping");
                    break;
                }
            }
        }
    }

    /// Cycle forever.
    pub async fn run(&mut self) {
        let never = Notify::new();
        self.run_until(&never).await;
    }
}
