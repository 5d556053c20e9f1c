//! Binary entrypoint: logging init, argument parsing, dispatch.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use snipharvest::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("snipharvest={default_level}"))),
        )
        .with_writer(std::io::stderr)
        .init();

    let code = cli::run(cli).await;
    std::process::exit(code);
}
