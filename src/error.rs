use thiserror::Error;

use crate::domain::Metric;

/// Errors raised while sampling, storing or rendering metrics
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MonitorError {
    /// A single metric could not be read this tick; the tick continues
    #[error("{metric} unavailable: {reason}")]
    MetricUnavailable { metric: Metric, reason: String },

    /// The combined table and the per-metric series disagree; never recoverable
    #[error("series store invariant violated: table has {table_rows} rows but {metric} series has {series_len} points")]
    StoreInvariantViolation {
        metric: Metric,
        table_rows: usize,
        series_len: usize,
    },

    #[error("sink '{sink}' failed to render: {reason}")]
    SinkRenderFailure { sink: String, reason: String },
}

impl MonitorError {
    pub fn unavailable(metric: Metric, reason: impl ToString) -> Self {
        Self::MetricUnavailable {
            metric,
            reason: reason.to_string(),
        }
    }

    pub fn sink(sink: impl Into<String>, reason: impl ToString) -> Self {
        Self::SinkRenderFailure {
            sink: sink.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error must stop the process
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::StoreInvariantViolation { .. })
    }
}

pub type MonitorResult<T> = Result<T, MonitorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_store_violation_is_fatal() {
        assert!(!MonitorError::unavailable(Metric::Cpu, "denied").is_fatal());
        assert!(!MonitorError::sink("log", "closed").is_fatal());
        assert!(MonitorError::StoreInvariantViolation {
            metric: Metric::Disk,
            table_rows: 2,
            series_len: 1,
        }
        .is_fatal());
    }

    #[test]
    fn test_unavailable_message_names_metric() {
        let err = MonitorError::unavailable(Metric::Memory, "no MemTotal");
        assert_eq!(err.to_string(), "Memory Used unavailable: no MemTotal");
    }
}
