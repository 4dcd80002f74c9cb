use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Metric;

/// A single metric value, or a marker that the source could not be read.
///
/// Serializes as a number or `null`, so consumers can tell "0%" from "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Reading {
    Available(f64),
    Unavailable,
}

impl Reading {
    pub fn value(&self) -> Option<f64> {
        match self {
            Reading::Available(v) => Some(*v),
            Reading::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Reading::Available(_))
    }
}

impl From<Option<f64>> for Reading {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Reading::Available(v),
            None => Reading::Unavailable,
        }
    }
}

impl From<Reading> for Option<f64> {
    fn from(reading: Reading) -> Self {
        reading.value()
    }
}

/// One fully-timestamped reading of every tracked metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub cpu_usage: Reading,
    pub memory_used: Reading,
    pub disk_usage: Reading,
    /// Cumulative bytes sent and received since boot, in GiB
    pub network_bytes_total: Reading,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            cpu_usage: Reading::Unavailable,
            memory_used: Reading::Unavailable,
            disk_usage: Reading::Unavailable,
            network_bytes_total: Reading::Unavailable,
        }
    }

    pub fn with_reading(mut self, metric: Metric, reading: Reading) -> Self {
        match metric {
            Metric::Cpu => self.cpu_usage = reading,
            Metric::Memory => self.memory_used = reading,
            Metric::Disk => self.disk_usage = reading,
            Metric::Network => self.network_bytes_total = reading,
        }
        self
    }

    pub fn reading(&self, metric: Metric) -> Reading {
        match metric {
            Metric::Cpu => self.cpu_usage,
            Metric::Memory => self.memory_used,
            Metric::Disk => self.disk_usage,
            Metric::Network => self.network_bytes_total,
        }
    }

    /// Metrics whose reading is missing in this sample
    pub fn unavailable_metrics(&self) -> Vec<Metric> {
        Metric::ALL
            .into_iter()
            .filter(|m| !self.reading(*m).is_available())
            .collect()
    }
}
