use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TTS_BASE_URL: &str = "http://moshengai.kcriss.dev";
pub const DEFAULT_TTS_PATH_PREFIX: &str = "/tts";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // TTS API
    pub tts_base_url: String,
    pub tts_path_prefix: String,
    pub tts_request_timeout_secs: u64,
    pub smoke_status_delay_secs: u64,
    // Process declaration
    pub ecosystem_file: Option<PathBuf>,
    pub log_dir: PathBuf,
    // Monitor
    pub health_timeout_secs: u64,
    pub monitor_host: String,
    pub monitor_port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// An explicit `LOG_FORMAT` wins; otherwise production logs are JSON.
    pub fn resolve(raw: Option<&str>, environment: &Environment) -> Self {
        match raw {
            Some("json") => LogFormat::Json,
            Some(_) => LogFormat::Pretty,
            None if *environment == Environment::Production => LogFormat::Json,
            None => LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let environment = match env::var("ENVIRONMENT").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        };
        let log_format = LogFormat::resolve(env::var("LOG_FORMAT").ok().as_deref(), &environment);

        let config = Config {
            tts_base_url: env::var("TTS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_TTS_BASE_URL.to_string()),
            tts_path_prefix: env::var("TTS_PATH_PREFIX")
                .unwrap_or_else(|_| DEFAULT_TTS_PATH_PREFIX.to_string()),
            tts_request_timeout_secs: env::var("TTS_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            smoke_status_delay_secs: env::var("SMOKE_STATUS_DELAY_SECS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()?,
            ecosystem_file: env::var("ECOSYSTEM_FILE").ok().map(PathBuf::from),
            log_dir: env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./logs")),
            health_timeout_secs: env::var("HEALTH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
            monitor_host: env::var("MONITOR_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            monitor_port: env::var("MONITOR_PORT")
                .unwrap_or_else(|_| "9999".to_string())
                .parse()?,
            environment,
            log_format,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn tts_request_timeout(&self) -> Duration {
        Duration::from_secs(self.tts_request_timeout_secs)
    }

    pub fn smoke_status_delay(&self) -> Duration {
        Duration::from_secs(self.smoke_status_delay_secs)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tts_base_url: DEFAULT_TTS_BASE_URL.to_string(),
            tts_path_prefix: DEFAULT_TTS_PATH_PREFIX.to_string(),
            tts_request_timeout_secs: 30,
            smoke_status_delay_secs: 3,
            ecosystem_file: None,
            log_dir: PathBuf::from("./logs"),
            health_timeout_secs: 5,
            monitor_host: "0.0.0.0".to_string(),
            monitor_port: 9999,
            environment: Environment::Development,
            log_format: LogFormat::Pretty,
        }
    }
}
