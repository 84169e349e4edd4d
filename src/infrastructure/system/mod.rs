use crate::domain::monitor::{DiskUsage, MemoryUsage, MonitorError, NetworkTotals, SystemInfo};
use async_trait::async_trait;
use std::collections::BTreeMap;
use sysinfo::{Disks, Networks, System};

#[async_trait]
pub trait SystemSampler: Send + Sync {
    async fn sample(&self) -> Result<SystemInfo, MonitorError>;
}

/// Reads host usage through `sysinfo`. CPU usage needs two refreshes, so a
/// sample takes at least `sysinfo::MINIMUM_CPU_UPDATE_INTERVAL`.
pub struct SysinfoSampler;

impl SysinfoSampler {
    pub fn new() -> Self {
        Self
    }

    fn collect() -> SystemInfo {
        let mut system = System::new();
        system.refresh_cpu();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        system.refresh_cpu();
        system.refresh_memory();

        let disk_usage: BTreeMap<String, DiskUsage> = Disks::new_with_refreshed_list()
            .iter()
            .filter(|disk| disk.total_space() > 0)
            .map(|disk| {
                (
                    disk.mount_point().display().to_string(),
                    DiskUsage::new(disk.total_space(), disk.available_space()),
                )
            })
            .collect();

        let network = Networks::new_with_refreshed_list().iter().fold(
            NetworkTotals::default(),
            |mut totals, (_, data)| {
                totals.bytes_sent += data.total_transmitted();
                totals.bytes_recv += data.total_received();
                totals.packets_sent += data.total_packets_transmitted();
                totals.packets_recv += data.total_packets_received();
                totals
            },
        );

        SystemInfo {
            cpu_percent: f64::from(system.global_cpu_info().cpu_usage()),
            memory: MemoryUsage::new(
                system.total_memory(),
                system.available_memory(),
                system.used_memory(),
            ),
            disk_usage,
            network,
            timestamp: chrono::Utc::now(),
        }
    }
}

impl Default for SysinfoSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemSampler for SysinfoSampler {
    async fn sample(&self) -> Result<SystemInfo, MonitorError> {
        let info = tokio::task::spawn_blocking(Self::collect)
            .await
            .map_err(|e| MonitorError::System(e.to_string()))?;

        tracing::debug!(
            cpu = info.cpu_percent,
            memory = info.memory.percent,
            disks = info.disk_usage.len(),
            "Sampled system usage"
        );
        Ok(info)
    }
}
