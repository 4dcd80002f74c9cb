//! Scripted metric source and recording sinks shared by the application tests

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::{Metric, Series};
use crate::error::{MonitorError, MonitorResult};
use crate::ports::{MetricSource, SeriesSink};

/// Replays queued readings per metric; an exhausted queue reads as unavailable
#[derive(Default)]
pub struct ScriptedSource {
    queues: Mutex<[VecDeque<MonitorResult<f64>>; 4]>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(self, metric: Metric, values: &[f64]) -> Self {
        self.queues.lock().unwrap()[metric.index()].extend(values.iter().map(|v| Ok(*v)));
        self
    }

    pub fn with_failure(self, metric: Metric) -> Self {
        self.queues.lock().unwrap()[metric.index()]
            .push_back(Err(MonitorError::unavailable(metric, "permission denied")));
        self
    }

    fn next(&self, metric: Metric) -> MonitorResult<f64> {
        self.queues.lock().unwrap()[metric.index()]
            .pop_front()
            .unwrap_or_else(|| Err(MonitorError::unavailable(metric, "script exhausted")))
    }
}

#[async_trait]
impl MetricSource for ScriptedSource {
    async fn read_cpu(&self) -> MonitorResult<f64> {
        self.next(Metric::Cpu)
    }

    async fn read_memory(&self) -> MonitorResult<f64> {
        self.next(Metric::Memory)
    }

    async fn read_disk(&self, _mount_point: &Path) -> MonitorResult<f64> {
        self.next(Metric::Disk)
    }

    async fn read_network_cumulative(&self) -> MonitorResult<f64> {
        self.next(Metric::Network)
    }
}

/// Keeps every series it was asked to render
#[derive(Default)]
pub struct RecordingSink {
    pub rendered: Mutex<Vec<Series>>,
}

impl SeriesSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn render(&self, series: &Series) -> MonitorResult<()> {
        self.rendered.lock().unwrap().push(series.clone());
        Ok(())
    }
}

/// Always fails to render
pub struct BrokenSink;

impl SeriesSink for BrokenSink {
    fn name(&self) -> &str {
        "broken"
    }

    fn render(&self, _series: &Series) -> MonitorResult<()> {
        Err(MonitorError::sink(self.name(), "surface closed"))
    }
}

/// Requests shutdown once the network series reaches `after` points
pub struct StopAfter {
    pub after: usize,
    pub shutdown: watch::Sender<bool>,
}

impl SeriesSink for StopAfter {
    fn name(&self) -> &str {
        "stop-after"
    }

    fn render(&self, series: &Series) -> MonitorResult<()> {
        if series.metric == Metric::Network && series.len() >= self.after {
            let _ = self.shutdown.send(true);
        }
        Ok(())
    }
}
