use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use crate::domain::{Metric, Reading, Sample};
use crate::error::{MonitorError, MonitorResult};
use crate::ports::MetricSource;

/// A sample plus the per-metric failures absorbed while producing it
#[derive(Debug, Clone)]
pub struct Collection {
    pub sample: Sample,
    pub failures: Vec<MonitorError>,
}

/// Assembles one timestamped sample from the metric source
pub struct SampleCollector {
    source: Arc<dyn MetricSource>,
    disk_mount: PathBuf,
    last_timestamp: Option<DateTime<Utc>>,
}

impl SampleCollector {
    pub fn new(source: Arc<dyn MetricSource>, disk_mount: impl Into<PathBuf>) -> Self {
        Self {
            source,
            disk_mount: disk_mount.into(),
            last_timestamp: None,
        }
    }

    /// Read all four metrics under a single timestamp.
    ///
    /// A failed read marks only that field unavailable; the sample is always produced.
    pub async fn collect(&mut self) -> Collection {
        let timestamp = self.next_timestamp(Utc::now());
        let mut sample = Sample::new(timestamp);
        let mut failures = Vec::new();

        for metric in Metric::ALL {
            let result = match metric {
                Metric::Cpu => self.source.read_cpu().await,
                Metric::Memory => self.source.read_memory().await,
                Metric::Disk => self.source.read_disk(&self.disk_mount).await,
                Metric::Network => self.source.read_network_cumulative().await,
            };

            match result.and_then(|value| validate(metric, value)) {
                Ok(value) => sample = sample.with_reading(metric, Reading::Available(value)),
                Err(e) => failures.push(e),
            }
        }

        Collection { sample, failures }
    }

    /// Keep tick timestamps strictly increasing even if the wall clock stalls or steps back
    fn next_timestamp(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        let timestamp = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(timestamp);
        timestamp
    }
}

fn validate(metric: Metric, value: f64) -> MonitorResult<f64> {
    let in_range = if metric.is_percentage() {
        (0.0..=100.0).contains(&value)
    } else {
        value >= 0.0
    };

    if value.is_finite() && in_range {
        Ok(value)
    } else {
        Err(MonitorError::unavailable(metric, format!("reading {} out of range", value)))
    }
}
