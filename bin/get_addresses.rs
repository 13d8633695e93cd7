use std::path::PathBuf;

use clap::Parser;

use squaring_operator::{DeploymentAddresses, DEFAULT_LISTER_ARTIFACT};

#[derive(Debug, Parser)]
struct CliOpts {
    /// Path to the deployment artifact to list.
    #[clap(long, default_value = DEFAULT_LISTER_ARTIFACT)]
    pub path: PathBuf,
}

fn main() -> eyre::Result<()> {
    let opts = CliOpts::parse();

    let deployment = DeploymentAddresses::read_from_file(&opts.path)?;
    for (name, address) in deployment.entries() {
        println!("{name}: {address}");
    }

    Ok(())
}
