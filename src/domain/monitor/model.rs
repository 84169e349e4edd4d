use crate::domain::ecosystem::ProcessDefinition;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_HEALTH_PATH: &str = "/health";

/// A declared process as seen by the monitor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitoredService {
    pub id: String,
    pub display_name: String,
    pub port: Option<u16>,
    pub health_url: Option<String>,
    pub log_file: PathBuf,
    pub error_log: PathBuf,
}

impl MonitoredService {
    /// Log files are looked up by file name under `log_dir`
    pub fn from_definition(definition: &ProcessDefinition, log_dir: &Path) -> Self {
        let port = definition.port();
        let health_path = definition
            .health_path
            .as_deref()
            .unwrap_or(DEFAULT_HEALTH_PATH);
        let health_url = port.map(|p| format!("http://localhost:{}{}", p, health_path));

        Self {
            id: definition.name.clone(),
            display_name: definition
                .display_name
                .clone()
                .unwrap_or_else(|| definition.name.clone()),
            port,
            health_url,
            log_file: in_dir(log_dir, &definition.out_file),
            error_log: in_dir(log_dir, &definition.error_file),
        }
    }
}

fn in_dir(dir: &Path, file: &Path) -> PathBuf {
    match file.file_name() {
        Some(name) => dir.join(name),
        None => dir.join(file),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Unhealthy,
    Down,
    Timeout,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    pub fn responded(status_code: u16, response_time_ms: u64) -> Self {
        Self {
            status: if status_code == 200 {
                HealthState::Healthy
            } else {
                HealthState::Unhealthy
            },
            status_code: Some(status_code),
            response_time_ms: Some(response_time_ms),
            error: None,
        }
    }

    pub fn failed(status: HealthState, error: impl Into<String>) -> Self {
        Self {
            status,
            status_code: None,
            response_time_ms: None,
            error: Some(error.into()),
        }
    }
}

/// One entry of `pm2 jlist`, reduced to the fields the monitor reads
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Pm2Process {
    pub name: String,
    #[serde(default)]
    pub pid: Option<u32>,
    #[serde(default)]
    pub monit: Pm2Monit,
    #[serde(default)]
    pub pm2_env: Pm2Env,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Pm2Monit {
    #[serde(default)]
    pub cpu: f64,
    #[serde(default)]
    pub memory: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Pm2Env {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub restart_time: u32,
    #[serde(default)]
    pub pm_uptime: Option<i64>,
}

/// Traffic-light summary of a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Green,
    Yellow,
    Red,
}

impl Indicator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Indicator::Green => "🟢",
            Indicator::Yellow => "🟡",
            Indicator::Red => "🔴",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceSnapshot {
    pub id: String,
    pub name: String,
    pub port: Option<u16>,
    pub pm2_status: String,
    pub pid: Option<u32>,
    pub cpu: f64,
    pub memory: u64,
    pub restarts: u32,
    pub uptime: Option<i64>,
    pub uptime_display: String,
    pub health: HealthReport,
    pub indicator: Indicator,
}

impl ServiceSnapshot {
    pub fn new(
        service: &MonitoredService,
        process: Option<&Pm2Process>,
        health: HealthReport,
        now_ms: i64,
    ) -> Self {
        let pm2_status = process
            .and_then(|p| p.pm2_env.status.clone())
            .unwrap_or_else(|| "unknown".to_string());
        let uptime = process.and_then(|p| p.pm2_env.pm_uptime);
        let indicator = overall(&pm2_status, health.status);

        Self {
            id: service.id.clone(),
            name: service.display_name.clone(),
            port: service.port,
            pid: process.and_then(|p| p.pid),
            cpu: process.map(|p| p.monit.cpu).unwrap_or(0.0),
            memory: process.map(|p| p.monit.memory).unwrap_or(0),
            restarts: process.map(|p| p.pm2_env.restart_time).unwrap_or(0),
            uptime_display: format_uptime(uptime, now_ms),
            uptime,
            pm2_status,
            health,
            indicator,
        }
    }

    pub fn memory_mb(&self) -> u64 {
        self.memory / (1024 * 1024)
    }
}

/// Green when online and healthy, yellow when only online, red otherwise
pub fn overall(pm2_status: &str, health: HealthState) -> Indicator {
    match (pm2_status, health) {
        ("online", HealthState::Healthy) => Indicator::Green,
        ("online", _) => Indicator::Yellow,
        _ => Indicator::Red,
    }
}

/// `"{h}h {m}m"` since `started_ms`, or `"N/A"` when unknown
pub fn format_uptime(started_ms: Option<i64>, now_ms: i64) -> String {
    match started_ms {
        Some(started) if started > 0 => {
            let seconds = ((now_ms - started) / 1000).max(0);
            format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
        }
        _ => "N/A".to_string(),
    }
}
