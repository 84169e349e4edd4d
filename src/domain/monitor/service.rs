use super::error::MonitorError;
use super::logs::{tail_lines, LogKind};
use super::model::{HealthReport, HealthState, MonitoredService, ServiceSnapshot};
use super::system::SystemInfo;
use crate::domain::ecosystem::Ecosystem;
use crate::infrastructure::health::HealthProbe;
use crate::infrastructure::pm2::ProcessSupervisor;
use crate::infrastructure::system::SystemSampler;
use futures::future::join_all;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// One refresh of the console monitor
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub services: Vec<ServiceSnapshot>,
    pub system: Option<SystemInfo>,
    pub log_service: Option<String>,
    /// `None` when the log file does not exist yet
    pub recent_logs: Option<Vec<String>>,
}

/// Combines supervisor state, health probes, host usage and log files for the declared services
pub struct MonitorService {
    services: Vec<MonitoredService>,
    supervisor: Arc<dyn ProcessSupervisor>,
    probe: Arc<dyn HealthProbe>,
    sampler: Arc<dyn SystemSampler>,
}

impl MonitorService {
    pub fn new(
        ecosystem: &Ecosystem,
        log_dir: &Path,
        supervisor: Arc<dyn ProcessSupervisor>,
        probe: Arc<dyn HealthProbe>,
        sampler: Arc<dyn SystemSampler>,
    ) -> Self {
        let services = ecosystem
            .apps
            .iter()
            .map(|app| MonitoredService::from_definition(app, log_dir))
            .collect();

        Self {
            services,
            supervisor,
            probe,
            sampler,
        }
    }

    pub fn services(&self) -> &[MonitoredService] {
        &self.services
    }

    pub fn service(&self, id: &str) -> Result<&MonitoredService, MonitorError> {
        self.services
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| MonitorError::UnknownService(id.to_string()))
    }

    /// Current state of every service, in declaration order
    pub async fn snapshot(&self) -> Vec<ServiceSnapshot> {
        let processes = match self.supervisor.list().await {
            Ok(processes) => processes,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read process supervisor state");
                Vec::new()
            }
        };
        let by_name: HashMap<&str, _> = processes.iter().map(|p| (p.name.as_str(), p)).collect();

        let health = join_all(self.services.iter().map(|service| async move {
            match &service.health_url {
                Some(url) => self.probe.check(url).await,
                None => HealthReport::failed(HealthState::Error, "no port declared"),
            }
        }))
        .await;

        let now_ms = chrono::Utc::now().timestamp_millis();
        self.services
            .iter()
            .zip(health)
            .map(|(service, health)| {
                ServiceSnapshot::new(
                    service,
                    by_name.get(service.id.as_str()).copied(),
                    health,
                    now_ms,
                )
            })
            .collect()
    }

    pub async fn system(&self) -> Result<SystemInfo, MonitorError> {
        self.sampler.sample().await
    }

    /// Services, host usage and the last `log_lines` output lines of
    /// `log_service` (the first declared service when it is not declared)
    pub async fn dashboard(&self, log_service: &str, log_lines: usize) -> Dashboard {
        let log_service = self
            .service(log_service)
            .ok()
            .or_else(|| self.services.first())
            .map(|s| s.id.clone());

        let (services, system) = futures::join!(self.snapshot(), self.system());
        let system = match system {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read system usage");
                None
            }
        };

        let recent_logs = match &log_service {
            Some(id) => match self.logs(id, log_lines, LogKind::Output).await {
                Ok(lines) => Some(lines),
                Err(e) => {
                    tracing::debug!(service = %id, error = %e, "No recent logs");
                    None
                }
            },
            None => None,
        };

        Dashboard {
            services,
            system,
            log_service,
            recent_logs,
        }
    }

    /// Tail of the output or error log of `id`
    pub async fn logs(
        &self,
        id: &str,
        lines: usize,
        kind: LogKind,
    ) -> Result<Vec<String>, MonitorError> {
        let service = self.service(id)?;
        let path = match kind {
            LogKind::Output => &service.log_file,
            LogKind::Error => &service.error_log,
        };
        tracing::debug!(service = id, path = %path.display(), lines, "Reading log tail");

        Ok(tail_lines(path, lines).await?)
    }
}
