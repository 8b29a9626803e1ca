//! pm2 app records
//!
//! Field names follow the pm2 ecosystem file, so serializing an [`Ecosystem`]
//! yields a document pm2 accepts as-is.

use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_SCRIPT: &str = "carbonbot";
pub const DEFAULT_INSTANCES: u32 = 1;
pub const DEFAULT_RESTART_DELAY_MS: u64 = 5000;
pub const LOGROTATE_NAME: &str = "logrotate";
pub const DEFAULT_LOGROTATE_CRON: &str = "*/15 * * * *";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum ExecInterpreter {
    /// The script is a native binary
    #[default]
    #[serde(rename = "none")]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum ExecMode {
    #[default]
    #[serde(rename = "fork_mode")]
    Fork,
}

/// Long-running crawler process for one (exchange, market type) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchSpec {
    pub name: String,
    pub script: String,
    pub args: String,
    pub exec_interpreter: ExecInterpreter,
    pub exec_mode: ExecMode,
    pub instances: u32,
    #[serde(rename = "restart_delay")]
    pub restart_delay_ms: u64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

/// Cron-triggered logrotate run, never restarted on exit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRotateSpec {
    pub name: String,
    pub script: String,
    pub args: String,
    pub exec_interpreter: ExecInterpreter,
    pub exec_mode: ExecMode,
    pub cron_restart: String,
    pub autorestart: bool,
}

impl LogRotateSpec {
    pub fn new(conf_path: impl Into<String>, cron: impl Into<String>) -> Self {
        Self {
            name: LOGROTATE_NAME.to_string(),
            script: LOGROTATE_NAME.to_string(),
            args: conf_path.into(),
            exec_interpreter: ExecInterpreter::None,
            exec_mode: ExecMode::Fork,
            cron_restart: cron.into(),
            autorestart: false,
        }
    }

    /// Rotation job for the logrotate config of a crawler channel
    pub fn for_channel(channel: &str) -> Self {
        Self::new(
            format!("/usr/local/etc/logrotate.{}.conf", channel),
            DEFAULT_LOGROTATE_CRON,
        )
    }
}

impl Default for LogRotateSpec {
    fn default() -> Self {
        Self::for_channel("funding_rate")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum App {
    Launch(LaunchSpec),
    LogRotate(LogRotateSpec),
}

impl App {
    pub fn name(&self) -> &str {
        match self {
            App::Launch(spec) => &spec.name,
            App::LogRotate(spec) => &spec.name,
        }
    }

    pub fn as_launch(&self) -> Option<&LaunchSpec> {
        match self {
            App::Launch(spec) => Some(spec),
            App::LogRotate(_) => None,
        }
    }
}

/// The ordered app list handed to pm2
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Ecosystem {
    pub apps: Vec<App>,
}

impl Ecosystem {
    pub fn launch_specs(&self) -> impl Iterator<Item = &LaunchSpec> {
        self.apps.iter().filter_map(App::as_launch)
    }

    pub fn log_rotate(&self) -> Option<&LogRotateSpec> {
        self.apps.iter().rev().find_map(|app| match app {
            App::LogRotate(spec) => Some(spec),
            App::Launch(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_log_rotate_default() {
        let spec = LogRotateSpec::default();
        assert_eq!(spec.name, "logrotate");
        assert_eq!(spec.script, "logrotate");
        assert_eq!(spec.args, "/usr/local/etc/logrotate.funding_rate.conf");
        assert_eq!(spec.cron_restart, "*/15 * * * *");
        assert!(!spec.autorestart);
    }

    #[test]
    fn test_log_rotate_serializes_pm2_keys() {
        let value = serde_json::to_value(App::LogRotate(LogRotateSpec::default())).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "logrotate",
                "script": "logrotate",
                "args": "/usr/local/etc/logrotate.funding_rate.conf",
                "exec_interpreter": "none",
                "exec_mode": "fork_mode",
                "cron_restart": "*/15 * * * *",
                "autorestart": false,
            })
        );
    }

    #[test]
    fn test_launch_spec_serializes_restart_delay() {
        let mut spec = LaunchSpec {
            name: "crawler-trade-binance-spot".to_string(),
            script: DEFAULT_SCRIPT.to_string(),
            args: "binance spot trade".to_string(),
            exec_interpreter: ExecInterpreter::None,
            exec_mode: ExecMode::Fork,
            instances: DEFAULT_INSTANCES,
            restart_delay_ms: DEFAULT_RESTART_DELAY_MS,
            env: BTreeMap::new(),
        };
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["restart_delay"], 5000);
        assert!(value.get("restart_delay_ms").is_none());
        assert!(value.get("env").is_none());

        spec.env.insert("DATA_DIR".to_string(), "/data".to_string());
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["env"], json!({ "DATA_DIR": "/data" }));
    }
}
