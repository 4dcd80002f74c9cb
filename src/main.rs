mod adapters;
mod application;
mod config;
mod domain;
mod error;
mod interface;
mod ports;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adapters::{LogSink, MemorySeriesStore, ProcfsConfig, ProcfsMetricSource};
use application::{SampleCollector, Scheduler};
use config::Config;
use interface::http::create_router;
use ports::SeriesStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("resmon={},tower_http=info", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resmon v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {:?}", config);

    let interval = config.interval()?;

    let source = Arc::new(ProcfsMetricSource::new(ProcfsConfig::new(config.proc_path.clone())));
    let store = Arc::new(MemorySeriesStore::new());

    let collector = SampleCollector::new(source, config.disk_mount.clone());
    let scheduler = Scheduler::new(collector, store.clone(), interval).with_sink(Arc::new(LogSink::new()));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    if let Some(port) = config.http_port {
        let app = create_router(store.clone());
        let addr = format!("0.0.0.0:{}", port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("Series view listening on {}", addr);

        let mut http_shutdown = shutdown_rx.clone();
        tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = http_shutdown.wait_for(|stop| *stop).await;
            });
            if let Err(e) = serve.await {
                warn!(error = %e, "Series view stopped");
            }
        });
    }

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C, only process termination will stop the monitor");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl-C, stopping");
        let _ = shutdown_tx.send(true);
    });

    match scheduler.run(shutdown_rx).await {
        Ok(ticks) => {
            info!(ticks, rows = store.len(), "Monitor stopped");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Monitor aborted");
            Err(e.into())
        }
    }
}
