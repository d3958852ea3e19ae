use std::sync::Arc;

use ethers::{
    core::k256::ecdsa::SigningKey,
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{coins_bip39::English, MnemonicBuilder, Signer, Wallet, WalletError},
    types::Address,
};

use crate::{
    error::ConfigError,
    network::{DirectProfile, NetworkId, NetworkProfile, ProviderProfile, DEFAULT_TIMEOUT_BLOCKS},
    secrets::{resolve_mnemonic, SecretSource, MNEMONIC_ENV_VAR},
};

pub type EtherSigner = SignerMiddleware<Provider<Http>, Wallet<SigningKey>>;

fn http_provider(network: &str, url: &str) -> Result<Provider<Http>, ConfigError> {
    Provider::<Http>::try_from(url).map_err(|_| ConfigError::InvalidRpcUrl {
        network: network.to_owned(),
        url: url.to_owned(),
    })
}

impl DirectProfile {
    /// Read/write client for a local node. Transactions are signed by the
    /// node's unlocked accounts, so no secret is needed.
    pub fn connect(&self, network: &str) -> Result<Arc<Provider<Http>>, ConfigError> {
        Ok(Arc::new(http_provider(network, &self.endpoint())?))
    }
}

impl ProviderProfile {
    /// Derive the signing wallet from the mnemonic and bind it to `rpc_url`.
    ///
    /// This is the only place the mnemonic is read. Nothing is sent over the
    /// network.
    pub fn connect(
        &self,
        network: &str,
        secrets: &impl SecretSource,
    ) -> Result<Arc<EtherSigner>, ConfigError> {
        let mnemonic = resolve_mnemonic(secrets)?;
        let invalid_mnemonic = |_: WalletError| ConfigError::InvalidMnemonic {
            var: MNEMONIC_ENV_VAR.to_owned(),
        };

        let mut wallet = MnemonicBuilder::<English>::default()
            .phrase(mnemonic.phrase())
            .index(self.address_index.unwrap_or_default())
            .map_err(invalid_mnemonic)?
            .build()
            .map_err(invalid_mnemonic)?;
        if let Some(chain_id) = self.network_id.chain_id() {
            wallet = wallet.with_chain_id(chain_id);
        }

        let provider = http_provider(network, &self.rpc_url)?;
        Ok(Arc::new(SignerMiddleware::new(provider, wallet)))
    }
}

#[derive(Clone, Debug)]
pub enum NetworkClient {
    /// plain JSON-RPC client against a node that signs for itself
    Node(Arc<Provider<Http>>),
    /// JSON-RPC client that signs locally with the derived wallet
    Signer(Arc<EtherSigner>),
}

impl NetworkClient {
    pub fn provider(&self) -> &Provider<Http> {
        match self {
            NetworkClient::Node(p) => p.as_ref(),
            NetworkClient::Signer(s) => s.inner(),
        }
    }

    pub fn signer_address(&self) -> Option<Address> {
        match self {
            NetworkClient::Node(_) => None,
            NetworkClient::Signer(s) => Some(s.address()),
        }
    }
}

/// A selected network, ready to be used by a deployment.
#[derive(Clone, Debug)]
pub struct Connection {
    pub network: String,
    pub network_id: NetworkId,
    pub client: NetworkClient,
    pub confirmations: usize,
    pub timeout_blocks: u64,
    pub skip_dry_run: bool,
}

impl Connection {
    pub(crate) fn open(
        network: &str,
        profile: &NetworkProfile,
        secrets: &impl SecretSource,
    ) -> Result<Self, ConfigError> {
        let connection = match profile {
            NetworkProfile::Direct(direct) => Self {
                network: network.to_owned(),
                network_id: direct.network_id,
                client: NetworkClient::Node(direct.connect(network)?),
                confirmations: 0,
                timeout_blocks: DEFAULT_TIMEOUT_BLOCKS,
                skip_dry_run: false,
            },
            NetworkProfile::Provider(remote) => Self {
                network: network.to_owned(),
                network_id: remote.network_id,
                client: NetworkClient::Signer(remote.connect(network, secrets)?),
                confirmations: remote.confirmations.unwrap_or_default(),
                timeout_blocks: remote.timeout_blocks.unwrap_or(DEFAULT_TIMEOUT_BLOCKS),
                skip_dry_run: remote.skip_dry_run,
            },
        };

        tracing::info!(
            network,
            url = %connection.client.provider().url(),
            signer = ?connection.client.signer_address(),
            "connected network client"
        );
        Ok(connection)
    }

    /// Ask the node for its network id and check it against the profile.
    pub async fn verify_network_id(&self) -> Result<u64, ConfigError> {
        let reported = self.client.provider().get_net_version().await?;
        let reported = check_reported_network_id(&self.network, self.network_id, &reported)?;

        tracing::debug!(network = %self.network, reported, "network id verified");
        Ok(reported)
    }
}

/// Parse a `net_version` reply and match it against the expected id.
pub fn check_reported_network_id(
    network: &str,
    expected: NetworkId,
    reported: &str,
) -> Result<u64, ConfigError> {
    let reported: u64 = reported.trim().parse().map_err(|_| {
        ConfigError::Validation(format!(
            "node for `{network}` reported a non-numeric network id: {reported}"
        ))
    })?;

    if !expected.matches(reported) {
        return Err(ConfigError::NetworkIdMismatch {
            network: network.to_owned(),
            expected,
            actual: reported,
        });
    }
    Ok(reported)
}
