use super::model::Indicator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const GIB: u64 = 1024 * 1024 * 1024;

/// Host resource usage at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub cpu_percent: f64,
    pub memory: MemoryUsage,
    /// Keyed by mount point
    pub disk_usage: BTreeMap<String, DiskUsage>,
    pub network: NetworkTotals,
    pub timestamp: DateTime<Utc>,
}

impl SystemInfo {
    /// Usage of `/`, or of the first mount when there is no root entry
    pub fn root_disk(&self) -> Option<&DiskUsage> {
        self.disk_usage
            .get("/")
            .or_else(|| self.disk_usage.values().next())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub percent: f64,
}

impl MemoryUsage {
    pub fn new(total: u64, available: u64, used: u64) -> Self {
        Self {
            total,
            available,
            used,
            percent: percent_of(total.saturating_sub(available), total),
        }
    }

    pub fn used_gb(&self) -> u64 {
        self.used / GIB
    }

    pub fn total_gb(&self) -> u64 {
        self.total / GIB
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiskUsage {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
}

impl DiskUsage {
    pub fn new(total: u64, free: u64) -> Self {
        let used = total.saturating_sub(free);
        Self {
            total,
            used,
            free,
            percent: percent_of(used, total),
        }
    }

    pub fn free_gb(&self) -> u64 {
        self.free / GIB
    }
}

/// Counters summed over all interfaces since boot
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkTotals {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
}

fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

impl Indicator {
    /// Red above 80%, yellow above 60%, green otherwise
    pub fn for_usage(percent: f64) -> Self {
        if percent > 80.0 {
            Indicator::Red
        } else if percent > 60.0 {
            Indicator::Yellow
        } else {
            Indicator::Green
        }
    }
}

/// Twenty-cell bar, one filled cell per 5%
pub fn usage_bar(percent: f64) -> String {
    let filled = ((percent / 5.0) as usize).min(20);
    format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled))
}
