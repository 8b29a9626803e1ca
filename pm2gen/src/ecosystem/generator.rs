//! Expands an [`ExchangeMarketTable`] into a pm2 [`Ecosystem`].

use crate::ecosystem::app::{
    App, Ecosystem, ExecInterpreter, ExecMode, LaunchSpec, LogRotateSpec, DEFAULT_INSTANCES,
    DEFAULT_RESTART_DELAY_MS, DEFAULT_SCRIPT,
};
use crate::ecosystem::market::Channel;
use crate::ecosystem::table::ExchangeMarketTable;
use log::debug;
use std::collections::BTreeMap;

/// Expands `table` with the default generator settings.
///
/// One launch spec per (exchange, market type) pair in table order, then the
/// logrotate job. Never fails, the table is not validated here.
pub fn generate(table: &ExchangeMarketTable) -> Ecosystem {
    Generator::default().generate(table)
}

/// pm2 app name of the crawler for one pair, e.g. `crawler-funding-rate-okex-linear_swap`
pub fn app_name(channel: Channel, exchange: &str, market_type: &str) -> String {
    format!(
        "crawler-{}-{}-{}",
        channel.name_fragment(),
        exchange,
        market_type
    )
}

/// Settings shared by every generated app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    /// Crawler binary pm2 launches
    pub script: String,
    /// Message type the crawlers collect
    pub channel: Channel,
    pub instances: u32,
    /// Delay before pm2 restarts a crashed crawler
    pub restart_delay_ms: u64,
    /// Environment passed to every crawler
    pub env: BTreeMap<String, String>,
    /// Maintenance job appended after the crawlers
    pub log_rotate: LogRotateSpec,
}

impl Default for Generator {
    fn default() -> Self {
        Self::for_channel(Channel::default())
    }
}

impl Generator {
    pub fn for_channel(channel: Channel) -> Self {
        Self {
            script: DEFAULT_SCRIPT.to_string(),
            channel,
            instances: DEFAULT_INSTANCES,
            restart_delay_ms: DEFAULT_RESTART_DELAY_MS,
            env: BTreeMap::new(),
            log_rotate: LogRotateSpec::for_channel(channel.as_str()),
        }
    }

    pub fn launch_spec(&self, exchange: &str, market_type: &str) -> LaunchSpec {
        LaunchSpec {
            name: app_name(self.channel, exchange, market_type),
            script: self.script.clone(),
            args: format!("{} {} {}", exchange, market_type, self.channel),
            exec_interpreter: ExecInterpreter::None,
            exec_mode: ExecMode::Fork,
            instances: self.instances,
            restart_delay_ms: self.restart_delay_ms,
            env: self.env.clone(),
        }
    }

    pub fn generate(&self, table: &ExchangeMarketTable) -> Ecosystem {
        let mut apps = Vec::with_capacity(table.pair_count() + 1);
        for (exchange, market_type) in table.pairs() {
            let spec = self.launch_spec(exchange, market_type);
            debug!("generated {} ({})", spec.name, spec.args);
            apps.push(App::Launch(spec));
        }
        apps.push(App::LogRotate(self.log_rotate.clone()));
        Ecosystem { apps }
    }
}
