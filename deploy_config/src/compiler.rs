use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_SOLC_VERSION: &str = "0.7.4";
pub const DEFAULT_OPTIMIZER_RUNS: u32 = 200;

/// Compiler selection, shared by every network.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerSpec {
    #[serde(default)]
    pub solc: SolcSpec,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolcSpec {
    pub version: String,
    #[serde(default)]
    pub optimizer: OptimizerSpec,
}

impl Default for SolcSpec {
    fn default() -> Self {
        Self {
            version: DEFAULT_SOLC_VERSION.to_owned(),
            optimizer: OptimizerSpec::default(),
        }
    }
}

impl SolcSpec {
    /// Parse `version` as `major.minor.patch`.
    pub fn semver(&self) -> Result<(u64, u64, u64), ConfigError> {
        let invalid = || {
            ConfigError::Validation(format!(
                "compilers.solc.version `{}` is not a major.minor.patch version",
                self.version
            ))
        };

        let mut parts = self.version.trim().split('.');
        let mut next = || -> Result<u64, ConfigError> {
            parts
                .next()
                .ok_or_else(invalid)?
                .parse()
                .map_err(|_| invalid())
        };
        let version = (next()?, next()?, next()?);

        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

/// `runs` trades deployed bytecode size against the gas of each call:
/// low values favour cheap deployment, high values favour cheap execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerSpec {
    pub enabled: bool,
    pub runs: u32,
}

impl Default for OptimizerSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            runs: DEFAULT_OPTIMIZER_RUNS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_compiler_literals() {
        let spec = CompilerSpec::default();
        assert_eq!(spec.solc.version, "0.7.4");
        assert!(spec.solc.optimizer.enabled);
        assert_eq!(spec.solc.optimizer.runs, 200);
        assert_eq!(spec.solc.semver().unwrap(), (0, 7, 4));
    }

    #[test]
    fn test_semver_rejects_partial_and_garbage_versions() {
        for version in ["0.7", "0.7.4.1", "latest", "0.x.4", ""] {
            let solc = SolcSpec {
                version: version.to_owned(),
                ..Default::default()
            };
            assert!(
                matches!(solc.semver(), Err(ConfigError::Validation(_))),
                "accepted {version:?}"
            );
        }
    }
}
