//! Process wiring: loads endpoints, starts the optional metrics endpoint and
//! drives the scheduler.

use crate::config::EndpointFile;
use crate::http_server::MetricsServer;
use crate::metrics::MetricsRegistry;
use crate::types::MonitorSettings;
use anyhow::Context;
use availability::{EndpointSpec, HttpProber, Reporter, Scheduler, StatsAggregator, WriterReporter};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{info, warn};
use validator::Validate;

/// Load and validate the endpoint file
pub fn load_endpoints(path: &Path) -> anyhow::Result<Vec<EndpointSpec>> {
    let file = EndpointFile::load_from_file(path)
        .with_context(|| format!("Cannot load endpoints from {}", path.display()))?;
    Ok(file.into_specs())
}

/// Run the monitor, printing reports to stdout
pub async fn run(
    settings: MonitorSettings,
    endpoints: Vec<EndpointSpec>,
    shutdown: Arc<Notify>,
) -> anyhow::Result<()> {
    run_with_reporter(settings, endpoints, WriterReporter::stdout(), shutdown).await
}

/// Run the monitor with a custom reporter.
///
/// Returns after `settings.cycles` cycles when set, otherwise when
/// `shutdown` is notified.
pub async fn run_with_reporter<R: Reporter>(
    settings: MonitorSettings,
    endpoints: Vec<EndpointSpec>,
    reporter: R,
    shutdown: Arc<Notify>,
) -> anyhow::Result<()> {
    settings.validate().context("Invalid monitor settings")?;

    let prober = HttpProber::new(settings.probe_timeout).context("Failed to build HTTP client")?;
    let probe_timeout = prober.timeout();
    if endpoints.is_empty() {
        warn!("No endpoints configured, reports will be empty");
    }

    let mut scheduler = Scheduler::new(endpoints, StatsAggregator::new(), prober, reporter)
        .with_interval(settings.interval);

    let metrics_handle = match &settings.metrics_addr {
        Some(addr) => {
            let registry = Arc::new(MetricsRegistry::new());
            let server = MetricsServer::bind(registry.clone(), addr)
                .await
                .with_context(|| format!("Cannot bind metrics endpoint on {}", addr))?;
            scheduler = scheduler.with_observer(registry);

            Some(tokio::spawn(async move {
                if let Err(e) = server.run().await {
                    warn!(error = %e, "Metrics server error");
                }
            }))
        }
        None => {
            info!("Metrics disabled");
            None
        }
    };

    info!(
        endpoints = scheduler.endpoints().len(),
        timeout_ms = probe_timeout.as_millis(),
        interval_secs = scheduler.interval().as_secs_f64(),
        "Availability monitor starting"
    );

    match settings.cycles {
        Some(cycles) => {
            scheduler.run_cycles(cycles).await;
            info!(cycles, "Requested cycles complete");
        }
        None => scheduler.run_until(&shutdown).await,
    }

    if let Some(handle) = metrics_handle {
        handle.abort();
    }

    info!("Availability monitor stopped");
    Ok(())
}
