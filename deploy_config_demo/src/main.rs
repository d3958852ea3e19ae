mod config;
mod logging;

use anyhow::Context;
use clap::Parser;
use deploy_config::{Connection, DeployConfig, EnvSecrets};

use crate::{config::DemoArgs, logging::init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = DemoArgs::parse();
    init_logging(args.json_logs);

    let config = args.load_config()?;
    println!("{}", config.to_json()?);

    let project_root = std::env::current_dir().context("Could not read working directory")?;
    tracing::info!(
        sources = %config.paths.contracts_dir_in(&project_root).display(),
        artifacts = %config.paths.build_dir_in(&project_root).display(),
        "contract directories"
    );

    let Some(network) = &args.network else {
        return Ok(());
    };

    let connection = select_network(&config, network)?;
    if args.check {
        let reported = connection
            .verify_network_id()
            .await
            .with_context(|| format!("Preflight failed for network `{network}`"))?;
        tracing::info!(network = %network, reported, "node network id matches profile");
    }

    Ok(())
}

fn select_network(config: &DeployConfig, network: &str) -> anyhow::Result<Connection> {
    let profile = config.network(network)?;
    tracing::info!(
        network,
        network_id = %profile.network_id(),
        needs_mnemonic = profile.requires_secret(),
        skip_dry_run = profile.skip_dry_run(),
        "selecting network"
    );

    // .env is only consulted once a network is actually selected
    let secrets = EnvSecrets::with_dotenv();
    let connection = config
        .connect(network, &secrets)
        .with_context(|| format!("Could not open network `{network}`"))?;

    tracing::info!(
        network = %connection.network,
        confirmations = connection.confirmations,
        timeout_blocks = connection.timeout_blocks,
        signer = ?connection.client.signer_address(),
        "selected network"
    );
    Ok(connection)
}
