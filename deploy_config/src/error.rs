use ethers::providers::ProviderError;
use thiserror::Error;

use crate::network::NetworkId;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing secret: environment variable `{var}` is not set or is empty. Set it (or add it to .env) before using a provider-backed network")]
    MissingSecret { var: String },

    #[error("Unknown network: `{0}`")]
    UnknownNetwork(String),

    #[error("Invalid RPC url for network `{network}`: {url}")]
    InvalidRpcUrl { network: String, url: String },

    // the wallet error can echo words of the phrase, so it is dropped
    #[error("Mnemonic in `{var}` was rejected by the HD wallet (expected a BIP-39 English phrase)")]
    InvalidMnemonic { var: String },

    #[error("Configuration validation failed: {0}")]
    Validation(String),

    #[error("Failed to extract configuration: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("RPC error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Network id mismatch for `{network}`: expected {expected}, node reports {actual}")]
    NetworkIdMismatch {
        network: String,
        expected: NetworkId,
        actual: u64,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Figment(Box::new(e))
    }
}
