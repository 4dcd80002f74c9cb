use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use nix::sys::statvfs::statvfs;
use tracing::debug;

use crate::domain::Metric;
use crate::error::{MonitorError, MonitorResult};
use crate::ports::MetricSource;

use super::parser::{self, CpuStat, ParseResult};
use super::ProcfsConfig;

/// Window used for the very first CPU reading, when no previous stat exists
const FIRST_CPU_WINDOW: Duration = Duration::from_millis(100);

/// Metric source backed by procfs and statvfs
pub struct ProcfsMetricSource {
    config: ProcfsConfig,
    last_cpu_stat: Mutex<Option<CpuStat>>,
}

impl ProcfsMetricSource {
    pub fn new(config: ProcfsConfig) -> Self {
        Self {
            config,
            last_cpu_stat: Mutex::new(None),
        }
    }

    fn read_proc(&self, relative: &str) -> ParseResult<String> {
        Ok(fs::read_to_string(self.config.proc_path.join(relative))?)
    }

    fn read_cpu_stat(&self) -> ParseResult<CpuStat> {
        parser::parse_cpu_stat(&self.read_proc("stat")?)
    }

    fn swap_cpu_stat(&self, current: CpuStat) -> Option<CpuStat> {
        let mut last = self.last_cpu_stat.lock().unwrap_or_else(|e| e.into_inner());
        last.replace(current)
    }
}

#[async_trait]
impl MetricSource for ProcfsMetricSource {
    async fn read_cpu(&self) -> MonitorResult<f64> {
        let mut current = self
            .read_cpu_stat()
            .map_err(|e| MonitorError::unavailable(Metric::Cpu, e))?;

        let previous = match self.swap_cpu_stat(current.clone()) {
            Some(previous) => previous,
            None => {
                debug!(window_ms = FIRST_CPU_WINDOW.as_millis() as u64, "Priming CPU counters");
                tokio::time::sleep(FIRST_CPU_WINDOW).await;
                let first = current;
                current = self
                    .read_cpu_stat()
                    .map_err(|e| MonitorError::unavailable(Metric::Cpu, e))?;
                self.swap_cpu_stat(current.clone());
                first
            }
        };

        Ok(current.usage_since(&previous))
    }

    async fn read_memory(&self) -> MonitorResult<f64> {
        self.read_proc("meminfo")
            .and_then(|content| parser::parse_meminfo(&content))
            .and_then(|meminfo| parser::memory_percent(&meminfo))
            .map(|percent| percent.clamp(0.0, 100.0))
            .map_err(|e| MonitorError::unavailable(Metric::Memory, e))
    }

    async fn read_disk(&self, mount_point: &Path) -> MonitorResult<f64> {
        let stat = statvfs(mount_point).map_err(|e| {
            MonitorError::unavailable(Metric::Disk, format!("statvfs {}: {}", mount_point.display(), e))
        })?;

        parser::disk_percent(
            stat.blocks() as u64,
            stat.blocks_free() as u64,
            stat.blocks_available() as u64,
            stat.fragment_size() as u64,
        )
        .map_err(|e| MonitorError::unavailable(Metric::Disk, e))
    }

    async fn read_network_cumulative(&self) -> MonitorResult<f64> {
        let totals = self
            .read_proc("net/dev")
            .and_then(|content| parser::parse_net_dev(&content))
            .map_err(|e| MonitorError::unavailable(Metric::Network, e))?;

        Ok(parser::bytes_to_gib(totals.tx_bytes, totals.rx_bytes))
    }
}
