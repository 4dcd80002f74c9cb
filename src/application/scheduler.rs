use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::domain::Metric;
use crate::error::{MonitorError, MonitorResult};
use crate::ports::{SeriesSink, SeriesStore};

use super::SampleCollector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Stopped,
}

/// Outcome of one sampling cycle
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub unavailable: Vec<Metric>,
    /// Metric read failures absorbed into this tick's sample
    pub failures: Vec<MonitorError>,
    pub sink_failures: usize,
}

/// Fixed-delay sampling loop: collect, append, notify sinks, then sleep.
///
/// The interval is the idle gap after each cycle, so tick spacing is
/// `interval + processing time`.
pub struct Scheduler {
    collector: SampleCollector,
    store: Arc<dyn SeriesStore>,
    sinks: Vec<Arc<dyn SeriesSink>>,
    interval: Duration,
    state: SchedulerState,
    ticks: u64,
}

impl Scheduler {
    pub fn new(collector: SampleCollector, store: Arc<dyn SeriesStore>, interval: Duration) -> Self {
        Self {
            collector,
            store,
            sinks: Vec::new(),
            interval,
            state: SchedulerState::Stopped,
            ticks: 0,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn SeriesSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Run one complete cycle without sleeping.
    ///
    /// Only a store invariant violation is returned as an error.
    pub async fn tick(&mut self) -> MonitorResult<TickReport> {
        let collection = self.collector.collect().await;
        let unavailable = collection.sample.unavailable_metrics();
        for failure in &collection.failures {
            warn!(tick = self.ticks + 1, error = %failure, "Metric unavailable this tick");
        }

        if let Err(e) = self.store.append(collection.sample) {
            error!(error = %e, fatal = e.is_fatal(), "Series store rejected sample");
            return Err(e);
        }
        self.ticks += 1;

        let mut sink_failures = 0;
        for metric in Metric::ALL {
            let series = self.store.snapshot(metric);
            for sink in &self.sinks {
                if let Err(e) = sink.render(&series) {
                    sink_failures += 1;
                    warn!(sink = sink.name(), metric = metric.slug(), error = %e, "Sink failed to render");
                }
            }
        }

        Ok(TickReport {
            tick: self.ticks,
            unavailable,
            failures: collection.failures,
            sink_failures,
        })
    }

    /// Sample until `shutdown` turns true (or its sender is dropped).
    ///
    /// Updates that leave the flag false do not shorten the sleep.
    ///
    /// A cycle in progress always completes; the signal is only observed
    /// before a cycle and during the sleep that follows it.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> MonitorResult<u64> {
        info!(interval_ms = self.interval.as_millis() as u64, sinks = self.sinks.len(), "Starting sampling loop");
        self.state = SchedulerState::Running;

        while !*shutdown.borrow() {
            let start = Instant::now();
            let report = match self.tick().await {
                Ok(report) => report,
                Err(e) => {
                    self.state = SchedulerState::Stopped;
                    return Err(e);
                }
            };

            debug!(
                tick = report.tick,
                unavailable = report.unavailable.len(),
                failures = report.failures.len(),
                sink_failures = report.sink_failures,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Tick complete"
            );

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.wait_for(|stop| *stop) => break,
            }
        }

        self.state = SchedulerState::Stopped;
        info!(ticks = self.ticks, state = ?self.state, "Sampling loop stopped");
        Ok(self.ticks)
    }
}
