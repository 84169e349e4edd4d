use crate::domain::monitor::{Pm2Process, SupervisorError};
use async_trait::async_trait;
use tokio::process::Command;

/// Source of process state for the monitor.
#[async_trait]
pub trait ProcessSupervisor: Send + Sync {
    /// Every process the supervisor knows about
    async fn list(&self) -> Result<Vec<Pm2Process>, SupervisorError>;
}

/// Reads process state from the `pm2 jlist` command
pub struct Pm2Cli {
    program: String,
}

impl Pm2Cli {
    pub fn new() -> Self {
        Self::with_program("pm2")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn parse_jlist(stdout: &str) -> Result<Vec<Pm2Process>, SupervisorError> {
        let trimmed = stdout.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(trimmed).map_err(|e| SupervisorError::Parse(e.to_string()))
    }
}

impl Default for Pm2Cli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessSupervisor for Pm2Cli {
    async fn list(&self) -> Result<Vec<Pm2Process>, SupervisorError> {
        let output = Command::new(&self.program)
            .arg("jlist")
            .output()
            .await
            .map_err(|e| {
                SupervisorError::Unavailable(format!("failed to run {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            return Err(SupervisorError::Unavailable(format!(
                "{} jlist exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Self::parse_jlist(&String::from_utf8_lossy(&output.stdout))
    }
}
