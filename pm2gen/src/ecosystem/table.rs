//! Exchange to market-type table
//!
//! The table is the only input of the generator. Exchanges and the market
//! types listed under each exchange keep their insertion order, which is also
//! the order of the generated apps.

use crate::ecosystem::market::MarketType;
use crate::error::{Error, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One exchange and the market types crawled on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExchangeEntry {
    /// Exchange identifier passed to the crawler (e.g. "binance")
    pub name: String,
    /// Market types in crawl order (e.g. "linear_swap")
    pub market_types: Vec<String>,
}

/// Ordered mapping from exchange identifier to its market types
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExchangeMarketTable {
    entries: Vec<ExchangeEntry>,
}

impl ExchangeMarketTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Table crawled for funding rates in production
    pub fn builtin() -> Self {
        Self::new()
            .with("binance", ["linear_swap", "inverse_swap"])
            .with("bitget", ["inverse_swap", "linear_swap"])
            // the bitmex funding channel already covers quanto pairs
            .with("bitmex", ["inverse_swap"])
            .with("huobi", ["linear_swap", "inverse_swap"])
            .with("okex", ["linear_swap", "inverse_swap"])
    }

    /// Appends market types to an exchange, adding the exchange at the end
    /// if it is not in the table yet.
    pub fn insert<E, I, M>(&mut self, exchange: E, market_types: I)
    where
        E: Into<String>,
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let exchange = exchange.into();
        let market_types = market_types.into_iter().map(Into::into);
        match self.entries.iter_mut().find(|e| e.name == exchange) {
            Some(entry) => entry.market_types.extend(market_types),
            None => self.entries.push(ExchangeEntry {
                name: exchange,
                market_types: market_types.collect(),
            }),
        }
    }

    pub fn with<E, I, M>(mut self, exchange: E, market_types: I) -> Self
    where
        E: Into<String>,
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        self.insert(exchange, market_types);
        self
    }

    pub fn entries(&self) -> &[ExchangeEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every (exchange, market type) pair in table order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().flat_map(|entry| {
            entry
                .market_types
                .iter()
                .map(move |m| (entry.name.as_str(), m.as_str()))
        })
    }

    pub fn pair_count(&self) -> usize {
        self.entries.iter().map(|e| e.market_types.len()).sum()
    }

    /// Checks the table before it is expanded.
    ///
    /// Empty identifiers, identifiers containing whitespace, exchanges
    /// without market types and repeated pairs are rejected. Whitespace would
    /// be split away from the crawler args and let a repeated pair through.
    /// Market types the crawler does not know are only logged, new ones show
    /// up before this vocabulary is updated.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if entry.name.is_empty() {
                return Err(Error::EmptyExchange);
            }
            check_identifier(&entry.name)?;
            if entry.market_types.is_empty() {
                return Err(Error::NoMarketTypes(entry.name.clone()));
            }
            for market_type in &entry.market_types {
                if market_type.is_empty() {
                    return Err(Error::EmptyMarketType(entry.name.clone()));
                }
                check_identifier(market_type)?;
                if !seen.insert((entry.name.as_str(), market_type.as_str())) {
                    return Err(Error::DuplicatePair {
                        exchange: entry.name.clone(),
                        market_type: market_type.clone(),
                    });
                }
                if market_type.parse::<MarketType>().is_err() {
                    warn!(
                        "exchange {} lists unknown market type {}",
                        entry.name, market_type
                    );
                }
            }
        }
        Ok(())
    }
}

fn check_identifier(id: &str) -> Result<()> {
    if id.chars().any(char::is_whitespace) {
        return Err(Error::InvalidIdentifier(id.to_string()));
    }
    Ok(())
}

impl From<Vec<ExchangeEntry>> for ExchangeMarketTable {
    fn from(entries: Vec<ExchangeEntry>) -> Self {
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry.name, entry.market_types);
        }
        table
    }
}
