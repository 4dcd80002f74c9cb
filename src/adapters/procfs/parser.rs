use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Missing field: {0}")]
    MissingField(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// CPU stats from /proc/stat
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuStat {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuStat {
    pub fn total(&self) -> u64 {
        self.user + self.nice + self.system + self.idle + self.iowait + self.irq + self.softirq + self.steal
    }

    pub fn busy(&self) -> u64 {
        self.total() - self.idle - self.iowait
    }

    /// Busy share of the time elapsed since `prev`, in percent
    pub fn usage_since(&self, prev: &CpuStat) -> f64 {
        let total_delta = self.total().saturating_sub(prev.total());
        if total_delta == 0 {
            return 0.0;
        }
        let busy_delta = self.busy().saturating_sub(prev.busy());
        ((busy_delta as f64 / total_delta as f64) * 100.0).clamp(0.0, 100.0)
    }
}

/// Parse /proc/stat (first line only for aggregate CPU)
pub fn parse_cpu_stat(content: &str) -> ParseResult<CpuStat> {
    let first_line = content
        .lines()
        .next()
        .ok_or_else(|| ParseError::Parse("Empty stat file".to_string()))?;

    if !first_line.starts_with("cpu ") {
        return Err(ParseError::Parse("Missing cpu line".to_string()));
    }

    let parts: Vec<&str> = first_line.split_whitespace().skip(1).collect();
    if parts.len() < 8 {
        return Err(ParseError::Parse("Incomplete cpu stat".to_string()));
    }

    Ok(CpuStat {
        user: parts[0].parse().map_err(|e| ParseError::Parse(format!("user: {}", e)))?,
        nice: parts[1].parse().map_err(|e| ParseError::Parse(format!("nice: {}", e)))?,
        system: parts[2].parse().map_err(|e| ParseError::Parse(format!("system: {}", e)))?,
        idle: parts[3].parse().map_err(|e| ParseError::Parse(format!("idle: {}", e)))?,
        iowait: parts[4].parse().map_err(|e| ParseError::Parse(format!("iowait: {}", e)))?,
        irq: parts[5].parse().map_err(|e| ParseError::Parse(format!("irq: {}", e)))?,
        softirq: parts[6].parse().map_err(|e| ParseError::Parse(format!("softirq: {}", e)))?,
        steal: parts[7].parse().map_err(|e| ParseError::Parse(format!("steal: {}", e)))?,
    })
}

/// Parse /proc/meminfo into a map
pub fn parse_meminfo(content: &str) -> ParseResult<HashMap<String, u64>> {
    let mut map = HashMap::new();

    for line in content.lines() {
        let parts: Vec<&str> = line.split(':').collect();
        if parts.len() != 2 {
            continue;
        }

        let key = parts[0].trim().to_string();
        let value_str = parts[1].trim().trim_end_matches(" kB");

        if let Ok(value) = value_str.parse::<u64>() {
            map.insert(key, value * 1024); // Convert kB to bytes
        }
    }

    Ok(map)
}

/// Used share of physical memory from a parsed meminfo map, in percent
pub fn memory_percent(meminfo: &HashMap<String, u64>) -> ParseResult<f64> {
    let total = *meminfo
        .get("MemTotal")
        .ok_or_else(|| ParseError::MissingField("MemTotal".to_string()))?;
    if total == 0 {
        return Err(ParseError::Parse("MemTotal is zero".to_string()));
    }
    let available = *meminfo
        .get("MemAvailable")
        .ok_or_else(|| ParseError::MissingField("MemAvailable".to_string()))?;

    let used = total.saturating_sub(available);
    Ok((used as f64 / total as f64) * 100.0)
}

/// Total receive and transmit bytes over all interfaces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetTotals {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

/// Parse /proc/net/dev and sum byte counters over every interface
pub fn parse_net_dev(content: &str) -> ParseResult<NetTotals> {
    let mut totals = NetTotals::default();
    let mut interfaces = 0;

    // Two header lines, then "iface: rx_bytes rx_packets ... (8 rx cols) tx_bytes ..."
    for line in content.lines().skip(2) {
        let Some((name, counters)) = line.split_once(':') else {
            continue;
        };

        let fields: Vec<&str> = counters.split_whitespace().collect();
        if fields.len() < 9 {
            return Err(ParseError::Parse(format!("Incomplete counters for {}", name.trim())));
        }

        let rx: u64 = fields[0]
            .parse()
            .map_err(|e| ParseError::Parse(format!("{} rx_bytes: {}", name.trim(), e)))?;
        let tx: u64 = fields[8]
            .parse()
            .map_err(|e| ParseError::Parse(format!("{} tx_bytes: {}", name.trim(), e)))?;

        totals.rx_bytes = totals.rx_bytes.saturating_add(rx);
        totals.tx_bytes = totals.tx_bytes.saturating_add(tx);
        interfaces += 1;
    }

    if interfaces == 0 {
        return Err(ParseError::MissingField("network interface".to_string()));
    }

    Ok(totals)
}

const GIB: f64 = (1u64 << 30) as f64;

/// Sent and received byte counts converted to GiB separately, then summed
pub fn bytes_to_gib(sent: u64, received: u64) -> f64 {
    sent as f64 / GIB + received as f64 / GIB
}

/// Used share of a filesystem, matching `df`: used / (used + available)
pub fn disk_percent(blocks: u64, blocks_free: u64, blocks_available: u64, fragment_size: u64) -> ParseResult<f64> {
    let used = blocks.saturating_sub(blocks_free).saturating_mul(fragment_size);
    let available = blocks_available.saturating_mul(fragment_size);
    let denominator = used.saturating_add(available);
    if denominator == 0 {
        return Err(ParseError::Parse("Filesystem reports zero size".to_string()));
    }
    Ok(((used as f64 / denominator as f64) * 100.0).clamp(0.0, 100.0))
}
