pub mod error;
pub mod logs;
pub mod model;
pub mod render;
pub mod service;
pub mod system;

pub use error::{LogError, MonitorError, SupervisorError};
pub use logs::{decorate, tail_lines, LogKind, LogLevel};
pub use model::{
    format_uptime, overall, HealthReport, HealthState, Indicator, MonitoredService, Pm2Env,
    Pm2Monit, Pm2Process, ServiceSnapshot,
};
pub use service::{Dashboard, MonitorService};
pub use system::{usage_bar, DiskUsage, MemoryUsage, NetworkTotals, SystemInfo};
