//! Generates the pm2 ecosystem that runs one crawler per exchange and market
//! type, plus the logrotate job that keeps their logs in check.

pub mod config;
pub mod ecosystem;
pub mod error;
pub mod writer;

pub use error::{Error, Result};
