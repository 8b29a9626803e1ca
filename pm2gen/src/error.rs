use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading, validating or writing an ecosystem
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: String,
        source: toml::de::Error,
    },

    #[error("Failed to render ecosystem: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Exchange identifier must not be empty")]
    EmptyExchange,

    #[error("Exchange {0} has no market types")]
    NoMarketTypes(String),

    #[error("Exchange {0} lists an empty market type")]
    EmptyMarketType(String),

    #[error("Identifier {0:?} must not contain whitespace")]
    InvalidIdentifier(String),

    #[error("Market type {market_type} is listed twice for exchange {exchange}")]
    DuplicatePair {
        exchange: String,
        market_type: String,
    },
}
