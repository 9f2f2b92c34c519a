//! Prometheus metrics for the availability monitor.

use availability::{
    CycleObserver, CycleSummary, EndpointSpec, HealthStatus, ProbeOutcome, StatsSnapshot,
};
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::metrics::histogram::{Histogram, exponential_buckets};
use prometheus_client::registry::Registry;
use std::time::Duration;

/// Labels for per-domain metrics
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct DomainLabels {
    /// Domain key
    pub domain: String,
}

/// Labels for probe result metrics
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct ProbeLabels {
    /// Domain key
    pub domain: String,
    /// Result (healthy, unhealthy, error)
    pub result: String,
}

/// Media type of the text exposition produced by [`MetricsRegistry::encode`]
pub const OPENMETRICS_CONTENT_TYPE: &str =
    "application/openmetrics-text; version=1.0.0; charset=utf-8";

/// Metrics registry with all availability monitor metrics
pub struct MetricsRegistry {
    registry: Registry,

    /// Probes recorded, by domain and result
    probes_total: Family<ProbeLabels, Counter>,
    /// Probe latency
    probe_latency_seconds: Family<DomainLabels, Histogram>,
    /// Availability percentage after the latest cycle
    availability_percent: Family<DomainLabels, Gauge>,
    /// Probes left out of the stats for lack of a domain key
    dropped_probes_total: Counter,
    /// Completed cycles
    cycles_total: Counter,
    /// Cycle duration
    cycle_duration_seconds: Histogram,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let probes_total = Family::<ProbeLabels, Counter>::default();
        registry.register(
            "availability_probes",
            "Total probes recorded",
            probes_total.clone(),
        );

        let probe_latency_seconds = Family::<DomainLabels, Histogram>::new_with_constructor(|| {
            // 5ms to ~10s
            Histogram::new(exponential_buckets(0.005, 2.0, 12))
        });
        registry.register(
            "availability_probe_latency_seconds",
            "Probe latency in seconds",
            probe_latency_seconds.clone(),
        );

        let availability_percent = Family::<DomainLabels, Gauge>::default();
        registry.register(
            "availability_percent",
            "Cumulative availability percentage per domain",
            availability_percent.clone(),
        );

        let dropped_probes_total = Counter::default();
        registry.register(
            "availability_dropped_probes",
            "Probes not attributable to a domain",
            dropped_probes_total.clone(),
        );

        let cycles_total = Counter::default();
        registry.register(
            "availability_cycles",
            "Completed probe cycles",
            cycles_total.clone(),
        );

        let cycle_duration_seconds = Histogram::new(exponential_buckets(0.01, 2.0, 12));
        registry.register(
            "availability_cycle_duration_seconds",
            "Probe cycle duration in seconds",
            cycle_duration_seconds.clone(),
        );

        Self {
            registry,
            probes_total,
            probe_latency_seconds,
            availability_percent,
            dropped_probes_total,
            cycles_total,
            cycle_duration_seconds,
        }
    }

    /// Record a probe result
    pub fn record_probe(&self, domain: &str, result: &str, latency: Duration) {
        self.probes_total
            .get_or_create(&ProbeLabels {
                domain: domain.to_string(),
                result: result.to_string(),
            })
            .inc();

        self.probe_latency_seconds
            .get_or_create(&DomainLabels {
                domain: domain.to_string(),
            })
            .observe(latency.as_secs_f64());
    }

    /// Refresh availability gauges from a snapshot
    pub fn update_availability(&self, snapshot: &StatsSnapshot) {
        for (domain, stats) in snapshot.iter() {
            self.availability_percent
                .get_or_create(&DomainLabels {
                    domain: domain.to_string(),
                })
                .set(stats.percentage() as i64);
        }
    }

    pub fn record_dropped(&self) {
        self.dropped_probes_total.inc();
    }

    pub fn record_cycle(&self, duration: Duration) {
        self.cycles_total.inc();
        self.cycle_duration_seconds.observe(duration.as_secs_f64());
    }

    /// Render every metric in OpenMetrics text format
    pub fn encode(&self) -> Result<String, std::fmt::Error> {
        let mut buffer = String::new();
        encode(&mut buffer, &self.registry)?;
        Ok(buffer)
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Metric label for a probe result
fn result_label(outcome: &ProbeOutcome, status: HealthStatus) -> &'static str {
    if outcome.error.is_some() {
        "error"
    } else if status.is_healthy() {
        "healthy"
    } else {
        "unhealthy"
    }
}

impl CycleObserver for MetricsRegistry {
    fn on_probe(&self, domain: &str, outcome: &ProbeOutcome, status: HealthStatus) {
        self.record_probe(domain, result_label(outcome, status), outcome.latency);
    }

    fn on_dropped(&self, _spec: &EndpointSpec) {
        self.record_dropped();
    }

    fn on_cycle(&self, snapshot: &StatsSnapshot, summary: &CycleSummary) {
        self.update_availability(snapshot);
        self.record_cycle(summary.elapsed);
    }
}
