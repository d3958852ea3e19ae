use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    value::{Uncased, UncasedStr},
    Figment,
};
use url::Url;

use crate::{
    config::{DeployConfig, BSC_TESTNET},
    error::ConfigError,
    network::NetworkProfile,
};

/// Project-local configuration file, optional.
pub const CONFIG_FILE: &str = "deploy-config.yaml";
/// Prefix of environment overrides. `__` separates nesting levels,
/// e.g. `DEPLOY_COMPILERS__SOLC__VERSION`.
pub const ENV_PREFIX: &str = "DEPLOY_";

/// Schema keys that are not all lowercase. Environment variable names carry no
/// case, so these are matched case-insensitively and restored.
const CAMEL_CASE_KEYS: &[&str] = &["timeoutBlocks", "skipDryRun", BSC_TESTNET];

fn restore_key_case(key: &UncasedStr) -> Uncased<'_> {
    let key = key
        .as_str()
        .split('.')
        .map(|segment| {
            CAMEL_CASE_KEYS
                .iter()
                .find(|known| known.eq_ignore_ascii_case(segment))
                .map(|known| (*known).to_owned())
                .unwrap_or_else(|| segment.to_ascii_lowercase())
        })
        .collect::<Vec<_>>()
        .join(".");
    Uncased::from(key)
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Precedence (lowest to highest):
    /// 1. built-in defaults
    /// 2. `deploy-config.yaml` in the working directory, if present
    /// 3. `DEPLOY_*` environment variables
    ///
    /// Camel-case network names other than `bscTestnet` can only be
    /// overridden from the file.
    pub fn load() -> Result<DeployConfig, ConfigError> {
        Self::from_figment(
            Figment::new()
                .merge(Serialized::defaults(DeployConfig::default()))
                .merge(Yaml::file(CONFIG_FILE))
                .merge(
                    Env::prefixed(ENV_PREFIX)
                        .split("__")
                        .map(restore_key_case)
                        .lowercase(false),
                ),
        )
    }

    /// Defaults overlaid with a specific YAML file, which must exist.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<DeployConfig, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::Validation(format!(
                "config file {} does not exist",
                path.display()
            )));
        }

        Self::from_figment(
            Figment::new()
                .merge(Serialized::defaults(DeployConfig::default()))
                .merge(Yaml::file(path)),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<DeployConfig, ConfigError> {
        let config: DeployConfig = figment.extract()?;
        Self::validate(&config)?;

        tracing::debug!(
            networks = ?config.network_names().collect::<Vec<_>>(),
            solc = %config.compilers.solc.version,
            "loaded deploy configuration"
        );
        Ok(config)
    }

    /// Load-time checks. Nothing here looks at secrets.
    pub fn validate(config: &DeployConfig) -> Result<(), ConfigError> {
        for (name, profile) in &config.networks {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "network name cannot be empty".to_owned(),
                ));
            }

            match profile {
                NetworkProfile::Direct(direct) => {
                    if direct.host.trim().is_empty() {
                        return Err(ConfigError::Validation(format!(
                            "networks.{name}.host cannot be empty"
                        )));
                    }
                    if direct.port == 0 {
                        return Err(ConfigError::Validation(format!(
                            "networks.{name}.port must be non-zero"
                        )));
                    }
                }
                NetworkProfile::Provider(remote) => {
                    let valid = Url::parse(&remote.rpc_url)
                        .map(|url| matches!(url.scheme(), "http" | "https"))
                        .unwrap_or(false);
                    if !valid {
                        return Err(ConfigError::InvalidRpcUrl {
                            network: name.clone(),
                            url: remote.rpc_url.clone(),
                        });
                    }
                }
            }
        }

        if config.paths.contracts_directory.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "contracts_directory cannot be empty".to_owned(),
            ));
        }
        if config.paths.contracts_build_directory.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "contracts_build_directory cannot be empty".to_owned(),
            ));
        }

        let solc = &config.compilers.solc;
        solc.semver()?;
        if solc.optimizer.runs == 0 {
            return Err(ConfigError::Validation(
                "compilers.solc.optimizer.runs must be a positive integer".to_owned(),
            ));
        }

        Ok(())
    }
}
