use super::logs::decorate;
use super::model::{Indicator, ServiceSnapshot};
use super::service::Dashboard;
use super::system::{usage_bar, SystemInfo};

const RULE_WIDTH: usize = 80;

pub fn header(timestamp: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "{rule}\n{:^width$}\n{:^width$}\n{rule}",
        "MoshengAI service monitor",
        timestamp,
        rule = rule,
        width = RULE_WIDTH
    )
}

/// Three-line console block per service
pub fn services(snapshots: &[ServiceSnapshot]) -> String {
    let mut out = format!("Services:\n{}\n", "-".repeat(RULE_WIDTH));
    for s in snapshots {
        let port = s.port.map(|p| p.to_string()).unwrap_or_else(|| "-".into());
        let pid = s.pid.map(|p| p.to_string()).unwrap_or_else(|| "N/A".into());
        let response_time = s
            .health
            .response_time_ms
            .map(|ms| format!("{}ms", ms))
            .unwrap_or_else(|| "N/A".into());

        out.push_str(&format!(
            "{} {:<20} | port:{:<5} | pm2:{:<8} | pid:{:<8}\n",
            s.indicator.symbol(),
            s.name,
            port,
            s.pm2_status,
            pid
        ));
        out.push_str(&format!(
            "   health: {:<10} | response time: {:<8}\n",
            format!("{:?}", s.health.status).to_lowercase(),
            response_time
        ));
        out.push_str(&format!(
            "   cpu: {}% | memory: {}MB | restarts: {} | uptime: {}\n\n",
            s.cpu,
            s.memory_mb(),
            s.restarts,
            s.uptime_display
        ));
    }
    out
}

/// Log tail with a level marker on every non-blank line
pub fn log_tail(title: &str, lines: &[String]) -> String {
    let mut out = format!("{}\n{}\n", title, "-".repeat(RULE_WIDTH));
    for line in lines.iter().filter(|l| !l.trim().is_empty()) {
        out.push_str(&decorate(line));
        out.push('\n');
    }
    out
}

/// CPU, memory and root disk usage with a bar and traffic light each
pub fn system(info: Option<&SystemInfo>) -> String {
    let mut out = format!("System resources:\n{}\n", "-".repeat(RULE_WIDTH));
    let Some(info) = info else {
        out.push_str("System usage unavailable\n");
        return out;
    };

    out.push_str(&usage_line("CPU", info.cpu_percent, String::new()));
    out.push_str(&usage_line(
        "Memory",
        info.memory.percent,
        format!(" ({}GB/{}GB)", info.memory.used_gb(), info.memory.total_gb()),
    ));
    if let Some(disk) = info.root_disk() {
        out.push_str(&usage_line(
            "Disk",
            disk.percent,
            format!(" ({}GB free)", disk.free_gb()),
        ));
    }
    out
}

fn usage_line(label: &str, percent: f64, detail: String) -> String {
    format!(
        "{:<7} {} [{}] {:.1}%{}\n",
        label,
        Indicator::for_usage(percent).symbol(),
        usage_bar(percent),
        percent,
        detail
    )
}

/// Full screen of the watch mode
pub fn dashboard(timestamp: &str, dashboard: &Dashboard, interval_secs: u64) -> String {
    let mut out = format!("{}\n\n", header(timestamp));
    out.push_str(&services(&dashboard.services));
    out.push_str(&system(dashboard.system.as_ref()));

    if let Some(id) = &dashboard.log_service {
        let name = dashboard
            .services
            .iter()
            .find(|s| &s.id == id)
            .map(|s| s.name.as_str())
            .unwrap_or(id);
        let title = format!("\nRecent logs of {}:", name);
        match &dashboard.recent_logs {
            Some(lines) => out.push_str(&log_tail(&title, lines)),
            None => out.push_str(&log_tail(&title, &["log file not found".to_string()])),
        }
    }

    out.push_str(&format!(
        "\n{rule}\nPress Ctrl+C to stop | refreshing every {}s\n{rule}\n",
        interval_secs,
        rule = "=".repeat(RULE_WIDTH)
    ));
    out
}
