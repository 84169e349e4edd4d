use super::error::EcosystemError;
use super::memory::MemoryLimit;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_DATE_FORMAT: &str = "YYYY-MM-DD HH:mm:ss";

fn default_log_date_format() -> String {
    DEFAULT_LOG_DATE_FORMAT.to_string()
}

fn default_true() -> bool {
    true
}

/// One long-running process as handed to pm2.
/// Restarting, memory enforcement and log handling are done by pm2 itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDefinition {
    pub name: String,
    pub script: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
    pub error_file: PathBuf,
    pub out_file: PathBuf,
    #[serde(default = "default_log_date_format")]
    pub log_date_format: String,
    #[serde(default = "default_true")]
    pub merge_logs: bool,
    #[serde(default = "default_true")]
    pub autorestart: bool,
    #[serde(default)]
    pub watch: bool,
    pub max_memory_restart: MemoryLimit,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Monitor-only settings, never rendered into the pm2 entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_path: Option<String>,
}

impl ProcessDefinition {
    /// Value of the PORT variable, if declared and numeric
    pub fn port(&self) -> Option<u16> {
        self.env.get("PORT").and_then(|p| p.parse().ok())
    }

    /// pm2 ecosystem entry for this process
    pub fn to_pm2_json(&self) -> Value {
        let mut app = Map::new();
        app.insert("name".into(), json!(self.name));
        app.insert("script".into(), json!(self.script));
        if !self.args.is_empty() {
            app.insert("args".into(), json!(self.args.join(" ")));
        }
        if let Some(interpreter) = &self.interpreter {
            app.insert("interpreter".into(), json!(interpreter));
        }
        if let Some(cwd) = &self.cwd {
            app.insert("cwd".into(), json!(cwd.display().to_string()));
        }
        app.insert("log_date_format".into(), json!(self.log_date_format));
        app.insert(
            "error_file".into(),
            json!(self.error_file.display().to_string()),
        );
        app.insert("out_file".into(), json!(self.out_file.display().to_string()));
        app.insert("merge_logs".into(), json!(self.merge_logs));
        app.insert("autorestart".into(), json!(self.autorestart));
        app.insert("watch".into(), json!(self.watch));
        app.insert(
            "max_memory_restart".into(),
            json!(self.max_memory_restart.to_string()),
        );
        app.insert("env".into(), json!(self.env));
        Value::Object(app)
    }
}

/// The full set of processes the supervisor manages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ecosystem {
    pub apps: Vec<ProcessDefinition>,
}

impl Ecosystem {
    /// Production layout: TTS service, backend API and frontend dev server
    pub fn builtin() -> Self {
        let wrapper = |name: &str,
                       display_name: &str,
                       script: &str,
                       log_stem: &str,
                       port: &str| ProcessDefinition {
            name: name.to_string(),
            script: script.to_string(),
            args: Vec::new(),
            interpreter: Some("/bin/bash".to_string()),
            cwd: None,
            error_file: PathBuf::from(format!("./logs/{}-error.log", log_stem)),
            out_file: PathBuf::from(format!("./logs/{}-out.log", log_stem)),
            log_date_format: default_log_date_format(),
            merge_logs: true,
            autorestart: true,
            watch: false,
            max_memory_restart: MemoryLimit::megabytes(500),
            env: BTreeMap::from([
                ("NODE_ENV".to_string(), "production".to_string()),
                ("PYTHONIOENCODING".to_string(), "utf-8".to_string()),
                ("PORT".to_string(), port.to_string()),
            ]),
            display_name: Some(display_name.to_string()),
            health_path: Some("/health".to_string()),
        };

        let frontend = ProcessDefinition {
            name: "frontend-service".to_string(),
            script: "npm".to_string(),
            args: vec!["run".to_string(), "dev".to_string()],
            interpreter: None,
            cwd: Some(PathBuf::from("./moshengAI/frontend")),
            error_file: PathBuf::from("./logs/frontend-error.log"),
            out_file: PathBuf::from("./logs/frontend-out.log"),
            log_date_format: default_log_date_format(),
            merge_logs: true,
            autorestart: true,
            watch: false,
            max_memory_restart: MemoryLimit::megabytes(300),
            env: BTreeMap::from([
                ("NODE_ENV".to_string(), "production".to_string()),
                ("PORT".to_string(), "5173".to_string()),
            ]),
            display_name: Some("前端Web服务".to_string()),
            // vite dev server has no health route; any 200 on the root counts
            health_path: Some(String::new()),
        };

        Self {
            apps: vec![
                wrapper(
                    "tts-service",
                    "TTS语音合成服务",
                    "./start_tts_wrapper.sh",
                    "tts-service",
                    "8080",
                ),
                wrapper(
                    "backend-service",
                    "后端API服务",
                    "./start_backend_wrapper.sh",
                    "backend",
                    "8000",
                ),
                frontend,
            ],
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, EcosystemError> {
        let ecosystem: Ecosystem = toml::from_str(source)?;
        ecosystem.validate()?;
        Ok(ecosystem)
    }

    pub fn load(path: &Path) -> Result<Self, EcosystemError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Load from `path` when given, otherwise use the builtin layout
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, EcosystemError> {
        match path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading ecosystem file");
                Self::load(path)
            }
            None => Ok(Self::builtin()),
        }
    }

    pub fn validate(&self) -> Result<(), EcosystemError> {
        if self.apps.is_empty() {
            return Err(EcosystemError::Invalid("no apps declared".to_string()));
        }

        let mut names = HashSet::new();
        let mut ports = HashSet::new();

        for app in &self.apps {
            if app.name.trim().is_empty() {
                return Err(EcosystemError::Invalid("app name cannot be empty".to_string()));
            }
            if !names.insert(app.name.as_str()) {
                return Err(EcosystemError::Invalid(format!(
                    "duplicate app name '{}'",
                    app.name
                )));
            }
            if app.script.trim().is_empty() {
                return Err(EcosystemError::Invalid(format!(
                    "app '{}' has no script",
                    app.name
                )));
            }
            // pm2 receives args as one space-joined string
            if let Some(arg) = app
                .args
                .iter()
                .find(|arg| arg.is_empty() || arg.chars().any(char::is_whitespace))
            {
                return Err(EcosystemError::Invalid(format!(
                    "app '{}' has argument '{}' that is empty or contains whitespace",
                    app.name, arg
                )));
            }
            if app.max_memory_restart.bytes() == 0 {
                return Err(EcosystemError::Invalid(format!(
                    "app '{}' has a zero memory limit",
                    app.name
                )));
            }
            if let Some(raw) = app.env.get("PORT") {
                let port: u16 = raw.parse().map_err(|_| {
                    EcosystemError::Invalid(format!("app '{}' has invalid PORT '{}'", app.name, raw))
                })?;
                if !ports.insert(port) {
                    return Err(EcosystemError::Invalid(format!(
                        "port {} is used by more than one app",
                        port
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ProcessDefinition> {
        self.apps.iter().find(|app| app.name == name)
    }

    pub fn port_of(&self, name: &str) -> Option<u16> {
        self.get(name).and_then(ProcessDefinition::port)
    }

    /// The `module.exports` object of a pm2 ecosystem file
    pub fn to_pm2_json(&self) -> Value {
        json!({
            "apps": self.apps.iter().map(ProcessDefinition::to_pm2_json).collect::<Vec<_>>()
        })
    }
}
