use crate::ecosystem::app::{
    LogRotateSpec, DEFAULT_INSTANCES, DEFAULT_LOGROTATE_CRON, DEFAULT_RESTART_DELAY_MS,
    DEFAULT_SCRIPT,
};
use crate::ecosystem::{Channel, ExchangeEntry, ExchangeMarketTable, Generator};
use crate::error::{Error, Result};
use log::{info, warn};
use serde_derive::Deserialize;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RuntimeConfig {
    #[serde(default = "default_script")]
    pub script: String,
    #[serde(default)]
    pub channel: Channel,
    #[serde(default = "default_instances")]
    pub instances: u32,
    #[serde(default = "default_restart_delay_ms")]
    pub restart_delay_ms: u64,
    /// Defaults to `/usr/local/etc/logrotate.<channel>.conf`
    #[serde(default)]
    pub logrotate_conf: Option<String>,
    #[serde(default = "default_logrotate_cron")]
    pub logrotate_cron: String,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Falls back to the built-in table when absent
    #[serde(default)]
    pub exchanges: Option<Vec<ExchangeEntry>>,
}

fn default_script() -> String {
    DEFAULT_SCRIPT.to_string()
}

fn default_instances() -> u32 {
    DEFAULT_INSTANCES
}

fn default_restart_delay_ms() -> u64 {
    DEFAULT_RESTART_DELAY_MS
}

fn default_logrotate_cron() -> String {
    DEFAULT_LOGROTATE_CRON.to_string()
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        RuntimeConfig {
            script: default_script(),
            channel: Channel::default(),
            instances: default_instances(),
            restart_delay_ms: default_restart_delay_ms(),
            logrotate_conf: None,
            logrotate_cron: default_logrotate_cron(),
            env: BTreeMap::new(),
            exchanges: None,
        }
    }

    /// Loads the config file at `path`.
    ///
    /// A missing file is not an error, the built-in defaults are used instead.
    /// A file that exists but cannot be read or parsed is.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "runtime config {} not found, using built-in defaults",
                    path.display()
                );
                return Ok(RuntimeConfig::new());
            }
            Err(e) => {
                return Err(Error::ConfigRead {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };
        let config = Self::from_toml_str(&contents).map_err(|e| Error::ConfigParse {
            path: path.display().to_string(),
            source: e,
        })?;
        info!("loaded runtime config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// The crawl table, validated
    pub fn table(&self) -> Result<ExchangeMarketTable> {
        let table = match &self.exchanges {
            Some(entries) => ExchangeMarketTable::from(entries.clone()),
            None => ExchangeMarketTable::builtin(),
        };
        table.validate()?;
        if table.is_empty() {
            warn!("exchange table is empty, only the logrotate job will be generated");
        }
        Ok(table)
    }

    pub fn generator(&self) -> Generator {
        let log_rotate = match &self.logrotate_conf {
            Some(conf) => LogRotateSpec::new(conf.clone(), self.logrotate_cron.clone()),
            None => {
                let mut spec = LogRotateSpec::for_channel(self.channel.as_str());
                spec.cron_restart.clone_from(&self.logrotate_cron);
                spec
            }
        };
        Generator {
            script: self.script.clone(),
            channel: self.channel,
            instances: self.instances,
            restart_delay_ms: self.restart_delay_ms,
            env: self.env.clone(),
            log_rotate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_matches_defaults() {
        let config = RuntimeConfig::from_toml_str("").unwrap();
        assert_eq!(config, RuntimeConfig::new());
        assert_eq!(config.generator(), Generator::default());
        assert_eq!(config.table().unwrap(), ExchangeMarketTable::builtin());
    }

    #[test]
    fn test_full_config() {
        let config = RuntimeConfig::from_toml_str(
            r#"
script = "/usr/local/bin/carbonbot"
channel = "l2_event"
instances = 2
restart_delay_ms = 10000
logrotate_cron = "0 * * * *"

[env]
DATA_DIR = "/data"

[[exchanges]]
name = "okex"
market_types = ["inverse_swap", "linear_swap"]

[[exchanges]]
name = "binance"
market_types = ["spot"]
"#,
        )
        .unwrap();

        let table = config.table().unwrap();
        let pairs: Vec<(&str, &str)> = table.pairs().collect();
        assert_eq!(
            pairs,
            vec![
                ("okex", "inverse_swap"),
                ("okex", "linear_swap"),
                ("binance", "spot"),
            ]
        );

        let generator = config.generator();
        assert_eq!(generator.channel, Channel::L2Event);
        assert_eq!(generator.script, "/usr/local/bin/carbonbot");
        assert_eq!(generator.instances, 2);
        assert_eq!(generator.restart_delay_ms, 10000);
        assert_eq!(generator.env["DATA_DIR"], "/data");
        assert_eq!(
            generator.log_rotate,
            LogRotateSpec::new("/usr/local/etc/logrotate.l2_event.conf", "0 * * * *")
        );
    }

    #[test]
    fn test_explicit_logrotate_conf() {
        let config =
            RuntimeConfig::from_toml_str(r#"logrotate_conf = "/etc/logrotate.d/carbonbot""#)
                .unwrap();
        let generator = config.generator();
        assert_eq!(generator.log_rotate.args, "/etc/logrotate.d/carbonbot");
        assert_eq!(generator.log_rotate.cron_restart, "*/15 * * * *");
    }

    #[test]
    fn test_rejects_unknown_keys_and_channels() {
        assert!(RuntimeConfig::from_toml_str("restart_delay = 5000").is_err());
        assert!(RuntimeConfig::from_toml_str(r#"channel = "funding""#).is_err());
    }

    #[test]
    fn test_invalid_table_is_an_error() {
        let config = RuntimeConfig::from_toml_str(
            r#"
[[exchanges]]
name = "huobi"
market_types = []
"#,
        )
        .unwrap();
        assert!(matches!(config.table(), Err(Error::NoMarketTypes(_))));
    }

    #[test]
    fn test_padded_market_type_is_an_error() {
        let config = RuntimeConfig::from_toml_str(
            r#"
[[exchanges]]
name = "binance"
market_types = ["linear_swap", "linear_swap "]
"#,
        )
        .unwrap();
        assert!(matches!(
            config.table(),
            Err(Error::InvalidIdentifier(ref id)) if id == "linear_swap "
        ));
    }

    #[test]
    fn test_from_toml_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RuntimeConfig::from_toml(dir.path().join("pm2gen.toml")).unwrap();
        assert_eq!(config, RuntimeConfig::new());
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "channel = \"ticker\"").unwrap();
        let config = RuntimeConfig::from_toml(file.path()).unwrap();
        assert_eq!(config.channel, Channel::Ticker);

        let mut broken = NamedTempFile::new().unwrap();
        writeln!(broken, "channel = ").unwrap();
        assert!(matches!(
            RuntimeConfig::from_toml(broken.path()),
            Err(Error::ConfigParse { .. })
        ));
    }
}
