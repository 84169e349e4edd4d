use crate::error::AppError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("log file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read log file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    #[error("process supervisor unavailable: {0}")]
    Unavailable(String),
    #[error("failed to parse supervisor output: {0}")]
    Parse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("unknown service '{0}'")]
    UnknownService(String),
    #[error(transparent)]
    Log(#[from] LogError),
    #[error("failed to read system usage: {0}")]
    System(String),
}

impl From<MonitorError> for AppError {
    fn from(err: MonitorError) -> Self {
        match err {
            MonitorError::UnknownService(id) => {
                AppError::NotFound(format!("Service '{}' not found", id))
            }
            MonitorError::Log(e) => AppError::Internal(e.to_string()),
            MonitorError::System(e) => AppError::Internal(e),
        }
    }
}
