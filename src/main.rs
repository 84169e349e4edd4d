use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mosheng_ops::controllers::monitor::MonitorController;
use mosheng_ops::domain::ecosystem::Ecosystem;
use mosheng_ops::domain::monitor::{render, LogError, LogKind, MonitorError, MonitorService};
use mosheng_ops::domain::tts::{SmokeTestService, SynthesisRequest};
use mosheng_ops::infrastructure::config::{Config, LogFormat};
use mosheng_ops::infrastructure::health::HttpHealthProbe;
use mosheng_ops::infrastructure::http::start_http_server;
use mosheng_ops::infrastructure::pm2::Pm2Cli;
use mosheng_ops::infrastructure::system::SysinfoSampler;
use mosheng_ops::infrastructure::tts_api::HttpTtsClient;

/// MoshengAI operations: process declaration, TTS smoke test and service monitor
#[derive(Parser, Debug)]
#[command(name = "mosheng-ops")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Ecosystem TOML file (defaults to the builtin three-service layout)
    #[arg(long, global = true)]
    ecosystem: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the TTS API smoke test
    Smoke {
        /// Service base URL, e.g. http://localhost:8080
        #[arg(long)]
        base_url: Option<String>,

        /// Seconds to wait between job submission and the status check
        #[arg(long)]
        delay: Option<u64>,
    },
    /// Validate the process declaration and print it as pm2 ecosystem JSON
    Ecosystem,
    /// Print supervisor state, health of every service and host usage
    Status {
        /// Keep redrawing, with the latest tts-service log lines, until Ctrl+C
        #[arg(short, long)]
        watch: bool,

        /// Seconds between redraws in watch mode
        #[arg(long, default_value_t = 5)]
        interval: u64,
    },
    /// Print the tail of a service log
    Logs {
        /// Service name as declared in the ecosystem
        service: String,

        /// Number of lines
        #[arg(short = 'n', long, default_value_t = 20)]
        lines: usize,

        /// Read the error log instead of the output log
        #[arg(long)]
        error: bool,
    },
    /// Serve the JSON monitor panel
    Monitor {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    if let Some(path) = &cli.ecosystem {
        config.ecosystem_file = Some(path.clone());
    }

    init_logging(&config, cli.verbose);
    tracing::debug!(
        environment = ?config.environment,
        log_format = ?config.log_format,
        "Configuration loaded"
    );

    if let Err(e) = run(cli.command, config).await {
        tracing::error!(error = %format!("{:#}", e), "mosheng-ops failed");
        std::process::exit(1);
    }
}

async fn run(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Smoke { base_url, delay } => {
            if let Some(base_url) = base_url {
                config.tts_base_url = base_url;
            }
            if let Some(delay) = delay {
                config.smoke_status_delay_secs = delay;
            }
            smoke(&config).await
        }
        Commands::Ecosystem => {
            let ecosystem = load_ecosystem(&config)?;
            ecosystem.validate()?;
            println!("{}", serde_json::to_string_pretty(&ecosystem.to_pm2_json())?);
            Ok(())
        }
        Commands::Status { watch, interval } => {
            let monitor = monitor_service(&config)?;
            if watch {
                return watch_status(&monitor, interval.max(1)).await;
            }

            let (snapshots, system) = futures::join!(monitor.snapshot(), monitor.system());
            println!("{}\n", render::header(&local_timestamp()));
            print!("{}", render::services(&snapshots));
            if let Err(e) = &system {
                tracing::warn!(error = %e, "Could not read system usage");
            }
            print!("{}", render::system(system.as_ref().ok()));
            Ok(())
        }
        Commands::Logs {
            service,
            lines,
            error,
        } => {
            let monitor = monitor_service(&config)?;
            let kind = if error { LogKind::Error } else { LogKind::Output };
            let title = format!("{} ({} lines)", service, lines);

            match monitor.logs(&service, lines, kind).await {
                Ok(logs) => print!("{}", render::log_tail(&title, &logs)),
                Err(MonitorError::Log(LogError::NotFound(path))) => {
                    println!("Log file does not exist: {}", path.display())
                }
                Err(e) => return Err(e.into()),
            }
            Ok(())
        }
        Commands::Monitor { port } => {
            if let Some(port) = port {
                config.monitor_port = port;
            }
            let monitor = Arc::new(monitor_service(&config)?);
            let controller = Arc::new(MonitorController::new(monitor));

            start_http_server(Arc::new(config), controller)
                .await
                .map_err(|e| anyhow!("monitor server failed: {}", e))
        }
    }
}

async fn smoke(config: &Config) -> Result<()> {
    let client = HttpTtsClient::new(
        &config.tts_base_url,
        &config.tts_path_prefix,
        config.tts_request_timeout(),
    )
    .context("failed to build TTS client")?;
    tracing::info!(base_url = %client.base_url(), "Testing TTS API");

    let service = SmokeTestService::new(
        Arc::new(client),
        SynthesisRequest::smoke_default(),
        config.smoke_status_delay(),
    );

    let report = service.run().await?;
    print!("{}", report.summary());
    Ok(())
}

const WATCH_LOG_SERVICE: &str = "tts-service";
const WATCH_LOG_LINES: usize = 5;

/// Redraw the dashboard every `interval_secs` until Ctrl+C
async fn watch_status(monitor: &MonitorService, interval_secs: u64) -> Result<()> {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let dashboard = monitor.dashboard(WATCH_LOG_SERVICE, WATCH_LOG_LINES).await;
                // Clear the screen and move the cursor home before each frame
                print!(
                    "\x1B[2J\x1B[H{}",
                    render::dashboard(&local_timestamp(), &dashboard, interval_secs)
                );
            }
            result = &mut ctrl_c => {
                result.context("failed to listen for Ctrl+C")?;
                println!("\nMonitor stopped");
                return Ok(());
            }
        }
    }
}

fn local_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn load_ecosystem(config: &Config) -> Result<Ecosystem> {
    Ecosystem::load_or_builtin(config.ecosystem_file.as_deref())
        .context("failed to load ecosystem")
}

fn monitor_service(config: &Config) -> Result<MonitorService> {
    let ecosystem = load_ecosystem(config)?;
    let probe = HttpHealthProbe::new(config.health_timeout())
        .context("failed to build health probe")?;

    Ok(MonitorService::new(
        &ecosystem,
        &config.log_dir,
        Arc::new(Pm2Cli::new()),
        Arc::new(probe),
        Arc::new(SysinfoSampler::new()),
    ))
}

fn init_logging(config: &Config, verbose: bool) {
    let default_filter = if verbose {
        "mosheng_ops=debug,tower_http=debug"
    } else {
        "mosheng_ops=info,tower_http=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
