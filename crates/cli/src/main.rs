use clap::Parser;
use tracing::error;
use wablast_cli::{cli::Cli, commands, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = commands::dispatch(cli.command).await {
        error!(target = "wablast", error = %err, "run failed");
        std::process::exit(1);
    }
}
