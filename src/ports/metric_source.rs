use std::path::Path;

use async_trait::async_trait;

use crate::error::MonitorResult;

/// Port for reading instantaneous and cumulative host metrics
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// System-wide CPU utilization (percent) since the previous call
    async fn read_cpu(&self) -> MonitorResult<f64>;

    /// Physical memory in use (percent)
    async fn read_memory(&self) -> MonitorResult<f64>;

    /// Occupancy of the filesystem mounted at `mount_point` (percent)
    async fn read_disk(&self, mount_point: &Path) -> MonitorResult<f64>;

    /// Bytes sent plus received by all interfaces since boot, in GiB
    async fn read_network_cumulative(&self) -> MonitorResult<f64>;
}
