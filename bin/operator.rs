use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use squaring_operator::{
    Operator, OperatorConfig, DEFAULT_AVS_ARTIFACT, DEFAULT_CORE_ARTIFACT,
};

#[derive(Debug, Parser)]
struct CliOpts {
    /// Path to the operator YAML configuration file.
    #[clap(long, env = "OPERATOR_CONFIG_PATH", default_value = "config-files/operator.anvil.yaml")]
    pub config: PathBuf,
    /// Path to the core-protocol deployment artifact.
    #[clap(long, env = "CORE_DEPLOYMENT_PATH", default_value = DEFAULT_CORE_ARTIFACT)]
    pub core_deployment: PathBuf,
    /// Path to the AVS deployment artifact.
    #[clap(long, env = "AVS_DEPLOYMENT_PATH", default_value = DEFAULT_AVS_ARTIFACT)]
    pub avs_deployment: PathBuf,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let _ = tracing_subscriber::fmt::try_init();
    let opts = CliOpts::parse();

    let config = OperatorConfig::load(&opts.config)?;
    let operator = Operator::new(config, &opts.core_deployment, &opts.avs_deployment)?;

    if operator.registration_enabled() {
        operator.register().await?;
    } else {
        info!("Registration on startup is disabled, skipping");
    }

    Ok(())
}
