use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    client::Connection,
    compiler::CompilerSpec,
    error::ConfigError,
    network::{DirectProfile, NetworkId, NetworkProfile, ProviderProfile},
    paths::PathConfig,
    secrets::SecretSource,
};

pub const DEVELOPMENT: &str = "development";
pub const BSC: &str = "bsc";
pub const BSC_TESTNET: &str = "bscTestnet";
pub const MATIC: &str = "matic";

const DEVELOPMENT_HOST: &str = "127.0.0.1";
const DEVELOPMENT_PORT: u16 = 9545;
const BSC_RPC_URL: &str = "https://bsc-dataseed.binance.org/";
const BSC_TESTNET_RPC_URL: &str = "https://data-seed-prebsc-1-s1.binance.org:8545";
const MATIC_RPC_URL: &str = "https://rpc-mumbai.maticvigil.com";

/// Everything the build/deploy tool needs: targets, directories and compiler.
///
/// Building one never reads a secret. Secrets are handed to [`DeployConfig::connect`]
/// when a network is actually used.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkProfile>,
    #[serde(flatten)]
    pub paths: PathConfig,
    #[serde(default)]
    pub compilers: CompilerSpec,
}

impl Default for DeployConfig {
    fn default() -> Self {
        let development = DirectProfile {
            host: DEVELOPMENT_HOST.to_owned(),
            port: DEVELOPMENT_PORT,
            network_id: NetworkId::Any,
        };

        let bsc = ProviderProfile {
            skip_dry_run: true,
            ..ProviderProfile::new(BSC_RPC_URL, 56)
        };

        let bsc_testnet = ProviderProfile {
            skip_dry_run: true,
            ..ProviderProfile::new(BSC_TESTNET_RPC_URL, 97)
        };

        let matic = ProviderProfile {
            confirmations: Some(2),
            timeout_blocks: Some(200),
            skip_dry_run: true,
            ..ProviderProfile::new(MATIC_RPC_URL, 80001)
        };

        let networks = BTreeMap::from([
            (DEVELOPMENT.to_owned(), development.into()),
            (BSC.to_owned(), bsc.into()),
            (BSC_TESTNET.to_owned(), bsc_testnet.into()),
            (MATIC.to_owned(), matic.into()),
        ]);

        Self {
            networks,
            paths: PathConfig::default(),
            compilers: CompilerSpec::default(),
        }
    }
}

impl DeployConfig {
    pub fn network(&self, name: &str) -> Result<&NetworkProfile, ConfigError> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_owned()))
    }

    pub fn network_names(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    /// Select `name` and build its client. A provider-backed network reads the
    /// mnemonic from `secrets` here, and fails if it is not there.
    pub fn connect(
        &self,
        name: &str,
        secrets: &impl SecretSource,
    ) -> Result<Connection, ConfigError> {
        Connection::open(name, self.network(name)?, secrets)
    }

    /// JSON document in the shape the external build tool consumes.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
