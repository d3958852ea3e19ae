use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

const WILDCARD: &str = "*";

/// Default number of blocks to wait for a deployment before giving up.
pub const DEFAULT_TIMEOUT_BLOCKS: u64 = 50;

/// Identifier a node must report for a profile to be usable against it.
///
/// `Any` is written as `"*"` in configuration files and matches every node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NetworkId {
    Any,
    Id(u64),
}

impl NetworkId {
    pub fn matches(&self, reported: u64) -> bool {
        match self {
            NetworkId::Any => true,
            NetworkId::Id(id) => *id == reported,
        }
    }

    /// the chain id a signer should be bound to, if there is a fixed one
    pub fn chain_id(&self) -> Option<u64> {
        match self {
            NetworkId::Any => None,
            NetworkId::Id(id) => Some(*id),
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkId::Any => f.write_str(WILDCARD),
            NetworkId::Id(id) => write!(f, "{id}"),
        }
    }
}

impl Serialize for NetworkId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NetworkId::Any => serializer.serialize_str(WILDCARD),
            NetworkId::Id(id) => serializer.serialize_u64(*id),
        }
    }
}

impl<'de> Deserialize<'de> for NetworkId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Id(u64),
            Text(String),
        }

        match Helper::deserialize(deserializer)? {
            Helper::Id(id) => Ok(NetworkId::Id(id)),
            Helper::Text(text) if text.trim() == WILDCARD => Ok(NetworkId::Any),
            // quoted ids show up when a value comes from an env var
            Helper::Text(text) => text.trim().parse().map(NetworkId::Id).map_err(|_| {
                de::Error::custom(format!(
                    "invalid network id `{text}`: expected a non-negative integer or \"*\""
                ))
            }),
        }
    }
}

/// A node reached directly over `host:port`, signing with the node's own accounts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectProfile {
    pub host: String,
    pub port: u16,
    pub network_id: NetworkId,
}

impl DirectProfile {
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// A remote RPC endpoint used through an HD wallet derived from the mnemonic.
///
/// Nothing here touches the secret. The wallet and RPC client are only built
/// by [`ProviderProfile::connect`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderProfile {
    pub rpc_url: String,
    pub network_id: NetworkId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<usize>,
    #[serde(
        rename = "timeoutBlocks",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout_blocks: Option<u64>,
    #[serde(rename = "skipDryRun", default)]
    pub skip_dry_run: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_index: Option<u32>,
}

impl ProviderProfile {
    pub fn new(rpc_url: impl Into<String>, network_id: u64) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            network_id: NetworkId::Id(network_id),
            confirmations: None,
            timeout_blocks: None,
            skip_dry_run: false,
            address_index: None,
        }
    }
}

/// One named deployment target. Exactly one connection mode per profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NetworkProfile {
    Direct(DirectProfile),
    Provider(ProviderProfile),
}

impl NetworkProfile {
    pub fn network_id(&self) -> NetworkId {
        match self {
            NetworkProfile::Direct(p) => p.network_id,
            NetworkProfile::Provider(p) => p.network_id,
        }
    }

    pub fn requires_secret(&self) -> bool {
        matches!(self, NetworkProfile::Provider(_))
    }

    pub fn skip_dry_run(&self) -> bool {
        match self {
            NetworkProfile::Direct(_) => false,
            NetworkProfile::Provider(p) => p.skip_dry_run,
        }
    }
}

impl From<DirectProfile> for NetworkProfile {
    fn from(p: DirectProfile) -> Self {
        NetworkProfile::Direct(p)
    }
}

impl From<ProviderProfile> for NetworkProfile {
    fn from(p: ProviderProfile) -> Self {
        NetworkProfile::Provider(p)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_network_id_wildcard_and_numeric() {
        let any: NetworkId = serde_json::from_value(json!("*")).unwrap();
        assert_eq!(any, NetworkId::Any);
        assert!(any.matches(1));
        assert!(any.matches(80001));
        assert_eq!(any.chain_id(), None);

        let bsc: NetworkId = serde_json::from_value(json!(56)).unwrap();
        assert_eq!(bsc, NetworkId::Id(56));
        assert!(bsc.matches(56));
        assert!(!bsc.matches(97));

        let quoted: NetworkId = serde_json::from_value(json!("97")).unwrap();
        assert_eq!(quoted, NetworkId::Id(97));

        assert!(serde_json::from_value::<NetworkId>(json!("mainnet")).is_err());
        assert!(serde_json::from_value::<NetworkId>(json!(-1)).is_err());

        assert_eq!(serde_json::to_value(NetworkId::Any).unwrap(), json!("*"));
        assert_eq!(serde_json::to_value(NetworkId::Id(56)).unwrap(), json!(56));
    }

    #[test]
    fn test_profile_mode_is_picked_by_fields() {
        let direct: NetworkProfile = serde_json::from_value(json!({
            "host": "127.0.0.1",
            "port": 9545,
            "network_id": "*",
        }))
        .unwrap();
        assert!(matches!(direct, NetworkProfile::Direct(_)));
        assert!(!direct.requires_secret());
        assert!(!direct.skip_dry_run());

        let provider: NetworkProfile = serde_json::from_value(json!({
            "rpc_url": "https://rpc-mumbai.maticvigil.com",
            "network_id": 80001,
            "confirmations": 2,
            "timeoutBlocks": 200,
            "skipDryRun": true,
        }))
        .unwrap();
        let NetworkProfile::Provider(p) = &provider else {
            panic!("expected a provider profile: {provider:?}");
        };
        assert_eq!(p.confirmations, Some(2));
        assert_eq!(p.timeout_blocks, Some(200));
        assert!(p.skip_dry_run);
        assert!(provider.requires_secret());
        assert!(provider.skip_dry_run());
    }

    #[test]
    fn test_mixed_profile_is_rejected() {
        let mixed = serde_json::from_value::<NetworkProfile>(json!({
            "host": "127.0.0.1",
            "port": 9545,
            "rpc_url": "https://bsc-dataseed.binance.org/",
            "network_id": 56,
        }));
        assert!(mixed.is_err());

        let direct_with_tuning = serde_json::from_value::<NetworkProfile>(json!({
            "host": "127.0.0.1",
            "port": 9545,
            "network_id": 1,
            "skipDryRun": true,
        }));
        assert!(direct_with_tuning.is_err());
    }

    #[test]
    fn test_provider_profile_serializes_only_set_fields() {
        let profile = ProviderProfile::new("https://bsc-dataseed.binance.org/", 56);
        let value = serde_json::to_value(NetworkProfile::from(profile)).unwrap();
        assert_eq!(
            value,
            json!({
                "rpc_url": "https://bsc-dataseed.binance.org/",
                "network_id": 56,
                "skipDryRun": false,
            })
        );
    }
}
