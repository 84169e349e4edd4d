use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    domain::monitor::{
        LogError, LogKind, MonitorError, MonitorService, ServiceSnapshot, SystemInfo,
    },
    error::{AppError, AppResult},
};

pub const DEFAULT_LOG_LINES: usize = 100;
pub const MAX_LOG_LINES: usize = 5000;
pub const LOG_NOT_FOUND: &str = "log file not found";

/// Query for GET /api/logs/:service_id. Values are read leniently: a
/// non-numeric `lines` means the default and any `type` but `error` means output.
#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    pub lines: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl LogsQuery {
    pub fn line_count(&self) -> AppResult<usize> {
        let lines = match self.lines.as_deref().map(|raw| raw.trim().parse::<i64>()) {
            Some(Ok(n)) => n,
            _ => DEFAULT_LOG_LINES as i64,
        };
        if lines < 1 || lines > MAX_LOG_LINES as i64 {
            return Err(AppError::BadRequest(format!(
                "lines must be between 1 and {}",
                MAX_LOG_LINES
            )));
        }
        Ok(lines as usize)
    }

    pub fn log_kind(&self) -> LogKind {
        match self.kind.as_deref() {
            Some(kind) if kind.eq_ignore_ascii_case("error") => LogKind::Error,
            _ => LogKind::Output,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogsResponse {
    pub service: String,
    pub log_type: LogKind,
    pub logs: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

pub struct MonitorController {
    monitor_service: Arc<MonitorService>,
}

impl MonitorController {
    pub fn new(monitor_service: Arc<MonitorService>) -> Self {
        Self { monitor_service }
    }

    /// GET /api/services - supervisor state and health of every service
    pub async fn list_services(
        State(controller): State<Arc<MonitorController>>,
    ) -> AppResult<Json<BTreeMap<String, ServiceSnapshot>>> {
        let snapshots = controller.monitor_service.snapshot().await;

        Ok(Json(
            snapshots
                .into_iter()
                .map(|snapshot| (snapshot.id.clone(), snapshot))
                .collect(),
        ))
    }

    /// GET /api/system - CPU, memory, disk and network usage of the host
    pub async fn get_system(
        State(controller): State<Arc<MonitorController>>,
    ) -> AppResult<Json<SystemInfo>> {
        Ok(Json(controller.monitor_service.system().await?))
    }

    /// GET /api/logs/:service_id - tail of a service log
    pub async fn get_logs(
        State(controller): State<Arc<MonitorController>>,
        Path(service_id): Path<String>,
        Query(query): Query<LogsQuery>,
    ) -> AppResult<Json<LogsResponse>> {
        let lines = query.line_count()?;
        let kind = query.log_kind();

        let logs = match controller
            .monitor_service
            .logs(&service_id, lines, kind)
            .await
        {
            Ok(logs) => logs,
            Err(MonitorError::Log(LogError::NotFound(path))) => {
                tracing::warn!(service = %service_id, path = %path.display(), "Log file missing");
                vec![LOG_NOT_FOUND.to_string()]
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Json(LogsResponse {
            service: service_id,
            log_type: kind,
            logs,
            timestamp: Utc::now(),
        }))
    }
}
