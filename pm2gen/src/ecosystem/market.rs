//! Market and channel vocabularies understood by the crawler binary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Contract category a crawler process subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketType {
    Spot,
    LinearFuture,
    InverseFuture,
    QuantoFuture,
    LinearSwap,
    InverseSwap,
    QuantoSwap,
    EuropeanOption,
    AmericanOption,
}

impl MarketType {
    pub const ALL: [MarketType; 9] = [
        MarketType::Spot,
        MarketType::LinearFuture,
        MarketType::InverseFuture,
        MarketType::QuantoFuture,
        MarketType::LinearSwap,
        MarketType::InverseSwap,
        MarketType::QuantoSwap,
        MarketType::EuropeanOption,
        MarketType::AmericanOption,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketType::Spot => "spot",
            MarketType::LinearFuture => "linear_future",
            MarketType::InverseFuture => "inverse_future",
            MarketType::QuantoFuture => "quanto_future",
            MarketType::LinearSwap => "linear_swap",
            MarketType::InverseSwap => "inverse_swap",
            MarketType::QuantoSwap => "quanto_swap",
            MarketType::EuropeanOption => "european_option",
            MarketType::AmericanOption => "american_option",
        }
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MarketType::ALL
            .iter()
            .find(|m| m.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown market type: {}", s))
    }
}

/// Message type the crawler is asked to collect, passed as its third argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Trade,
    L2Event,
    L2Snapshot,
    L3Event,
    L3Snapshot,
    Ticker,
    #[default]
    FundingRate,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Trade => "trade",
            Channel::L2Event => "l2_event",
            Channel::L2Snapshot => "l2_snapshot",
            Channel::L3Event => "l3_event",
            Channel::L3Snapshot => "l3_snapshot",
            Channel::Ticker => "ticker",
            Channel::FundingRate => "funding_rate",
        }
    }

    /// Channel as it appears inside a process name, e.g. `funding-rate`
    pub fn name_fragment(&self) -> String {
        self.as_str().replace('_', "-")
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
