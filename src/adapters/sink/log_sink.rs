use tracing::info;

use crate::domain::{Reading, Series};
use crate::error::{MonitorError, MonitorResult};
use crate::ports::SeriesSink;

/// Renders the newest point of each series as a structured log event
#[derive(Debug, Default, Clone)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl SeriesSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    fn render(&self, series: &Series) -> MonitorResult<()> {
        let point = series
            .last()
            .ok_or_else(|| MonitorError::sink(self.name(), format!("{} series is empty", series.metric)))?;

        match point.value {
            Reading::Available(value) => info!(
                metric = series.metric.slug(),
                points = series.len(),
                timestamp = %point.timestamp.to_rfc3339(),
                "{}: {:.2}{}",
                series.metric,
                value,
                series.metric.unit()
            ),
            Reading::Unavailable => info!(
                metric = series.metric.slug(),
                points = series.len(),
                timestamp = %point.timestamp.to_rfc3339(),
                "{}: unavailable",
                series.metric
            ),
        }

        Ok(())
    }
}
