//! Ecosystem Module
//!
//! Everything needed to turn the crawl table into a pm2 ecosystem:
//! - `table`: ordered exchange to market-type table and its validation
//! - `market`: market types and channels the crawler accepts
//! - `app`: pm2 app records and the ecosystem document
//! - `generator`: expansion of a table into apps

pub mod app;
pub mod generator;
pub mod market;
pub mod table;

pub use app::{App, Ecosystem, ExecInterpreter, ExecMode, LaunchSpec, LogRotateSpec};
pub use generator::{app_name, generate, Generator};
pub use market::{Channel, MarketType};
pub use table::{ExchangeEntry, ExchangeMarketTable};
