use anyhow::Result;
use clap::Parser;
use learning_curve::{cli, logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = logging::init(cli.log_dir.as_deref());
    logging::install_panic_hook();

    tracing::info!("learning_curve started.");

    if let Err(e) = cli::run(cli) {
        tracing::error!("{:#}", e);
        return Err(e);
    }

    Ok(())
}
