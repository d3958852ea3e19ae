use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use deploy_config::{ConfigLoader, DeployConfig};

/// Print the deploy configuration and, optionally, check one network.
#[derive(Parser, Debug)]
#[command(name = "deploy_config_demo", version)]
pub struct DemoArgs {
    /// YAML file to overlay on the defaults (instead of ./deploy-config.yaml + DEPLOY_* env)
    #[arg(long, env = "DEPLOY_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Network to connect to, e.g. `development` or `bscTestnet`
    #[arg(long)]
    pub network: Option<String>,

    /// Ask the node for its network id and compare it with the profile
    #[arg(long, requires = "network")]
    pub check: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

impl DemoArgs {
    /// load from the given file, else from the default layered sources
    pub fn load_config(&self) -> anyhow::Result<DeployConfig> {
        match &self.config {
            Some(path) => {
                let config = ConfigLoader::load_from_file(path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?;
                tracing::info!(path = %path.display(), "loaded config from file");
                Ok(config)
            }
            None => {
                let config = ConfigLoader::load().context("Failed to load config")?;
                tracing::info!("loaded config from defaults and environment");
                Ok(config)
            }
        }
    }
}
