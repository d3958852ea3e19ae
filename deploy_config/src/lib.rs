//! Network, path and compiler configuration for a Solidity build/deploy toolchain.
//!
//! Loading is pure: it produces an immutable [`DeployConfig`] and never touches
//! the mnemonic. Signing clients are built on demand by [`DeployConfig::connect`]
//! from an injected [`SecretSource`].

pub mod client;
pub mod compiler;
pub mod config;
pub mod error;
pub mod loader;
pub mod network;
pub mod paths;
pub mod secrets;

pub use client::{Connection, EtherSigner, NetworkClient};
pub use compiler::{CompilerSpec, OptimizerSpec, SolcSpec};
pub use config::DeployConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use network::{DirectProfile, NetworkId, NetworkProfile, ProviderProfile};
pub use paths::PathConfig;
pub use secrets::{EnvSecrets, Mnemonic, SecretSource, StaticSecrets, MNEMONIC_ENV_VAR};
