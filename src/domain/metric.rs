use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Title of the timestamp column in the combined table
pub const TIME_COLUMN: &str = "Time";

/// One of the four tracked host metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Cpu,
    Memory,
    Disk,
    Network,
}

impl Metric {
    /// All metrics in column order
    pub const ALL: [Metric; 4] = [Metric::Cpu, Metric::Memory, Metric::Disk, Metric::Network];

    /// Column title used by the combined table and by sinks
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Cpu => "CPU Usage",
            Metric::Memory => "Memory Used",
            Metric::Disk => "Disk Usage",
            Metric::Network => "Network Bandwidth Used",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Metric::Cpu => "cpu",
            Metric::Memory => "memory",
            Metric::Disk => "disk",
            Metric::Network => "network",
        }
    }

    /// Position of this metric inside per-metric arrays
    pub fn index(&self) -> usize {
        match self {
            Metric::Cpu => 0,
            Metric::Memory => 1,
            Metric::Disk => 2,
            Metric::Network => 3,
        }
    }

    /// Percentage metrics must stay within [0, 100]
    pub fn is_percentage(&self) -> bool {
        !matches!(self, Metric::Network)
    }

    pub fn unit(&self) -> &'static str {
        if self.is_percentage() {
            "%"
        } else {
            "GiB"
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMetric(pub String);

impl fmt::Display for UnknownMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown metric '{}'", self.0)
    }
}

impl std::error::Error for UnknownMetric {}

impl FromStr for Metric {
    type Err = UnknownMetric;

    /// Accepts either the short slug or the column title, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Metric::ALL
            .into_iter()
            .find(|m| m.slug().eq_ignore_ascii_case(needle) || m.column().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

/// Column titles of the combined table, fixed at construction
pub fn table_columns() -> [&'static str; 5] {
    [
        TIME_COLUMN,
        Metric::Cpu.column(),
        Metric::Memory.column(),
        Metric::Disk.column(),
        Metric::Network.column(),
    ]
}
