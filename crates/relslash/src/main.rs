use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

/// Log filter, in `RUST_LOG` syntax.
const LOG_ENV: &str = "RELSLASH_LOG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse first so --help works without a subscriber.
    let cli = cli::Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    cli.run().await
}
