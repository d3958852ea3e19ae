use std::{collections::HashMap, env, fmt};

use crate::error::ConfigError;

/// Environment variable holding the HD wallet mnemonic.
pub const MNEMONIC_ENV_VAR: &str = "DEV_MNEMONIC";

/// Where secrets come from. Passed into `connect`, never read at load time.
pub trait SecretSource {
    fn var(&self, name: &str) -> Option<String>;
}

impl<T: SecretSource + ?Sized> SecretSource for &T {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// Reads secrets from the process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvSecrets;

impl EnvSecrets {
    /// Load `.env` (if there is one) into the process environment first.
    pub fn with_dotenv() -> Self {
        if let Ok(path) = dotenv::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self
    }
}

impl SecretSource for EnvSecrets {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// Fixed in-memory secrets.
#[derive(Clone, Default)]
pub struct StaticSecrets {
    vars: HashMap<String, String>,
}

impl StaticSecrets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mnemonic(phrase: impl Into<String>) -> Self {
        Self::new().with_var(MNEMONIC_ENV_VAR, phrase)
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl SecretSource for StaticSecrets {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl fmt::Debug for StaticSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticSecrets")
            .field("vars", &self.vars.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A mnemonic phrase. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic(String);

impl Mnemonic {
    pub fn phrase(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mnemonic(<redacted>)")
    }
}

pub fn resolve_mnemonic(source: &impl SecretSource) -> Result<Mnemonic, ConfigError> {
    match source.var(MNEMONIC_ENV_VAR) {
        Some(phrase) if !phrase.trim().is_empty() => Ok(Mnemonic(phrase.trim().to_owned())),
        _ => Err(ConfigError::MissingSecret {
            var: MNEMONIC_ENV_VAR.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASE: &str = "test test test test test test test test test test test junk";

    #[test]
    fn test_resolve_mnemonic_from_static_secrets() {
        let secrets = StaticSecrets::with_mnemonic(format!("  {PHRASE}\n"));
        let mnemonic = resolve_mnemonic(&secrets).unwrap();
        assert_eq!(mnemonic.phrase(), PHRASE);
    }

    #[test]
    fn test_missing_or_blank_mnemonic_names_the_variable() {
        for secrets in [
            StaticSecrets::new(),
            StaticSecrets::with_mnemonic(""),
            StaticSecrets::with_mnemonic("   "),
        ] {
            let err = resolve_mnemonic(&secrets).unwrap_err();
            assert!(matches!(&err, ConfigError::MissingSecret { var } if var == MNEMONIC_ENV_VAR));
            assert!(err.to_string().contains("DEV_MNEMONIC"));
        }
    }

    #[test]
    fn test_mnemonic_is_never_printed() {
        let secrets = StaticSecrets::with_mnemonic(PHRASE);
        let mnemonic = resolve_mnemonic(&secrets).unwrap();

        assert!(!format!("{mnemonic:?}").contains("junk"));
        assert!(!format!("{secrets:?}").contains("junk"));
        assert!(format!("{secrets:?}").contains(MNEMONIC_ENV_VAR));
    }

    #[test]
    fn test_env_secrets_reads_process_environment() {
        temp_env::with_var(MNEMONIC_ENV_VAR, Some(PHRASE), || {
            let mnemonic = resolve_mnemonic(&EnvSecrets).unwrap();
            assert_eq!(mnemonic.phrase(), PHRASE);
        });

        temp_env::with_var_unset(MNEMONIC_ENV_VAR, || {
            assert!(matches!(
                resolve_mnemonic(&EnvSecrets),
                Err(ConfigError::MissingSecret { .. })
            ));
        });
    }
}
