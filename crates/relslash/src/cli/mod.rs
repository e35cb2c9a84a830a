use clap::{Parser, Subcommand};

mod classify;
mod inspect;
mod progress;

#[derive(Debug, Parser)]
#[command(name = "relslash", version, about = "Classify and inspect release assets for dotslash files")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Classify(classify::Classify),
    Inspect(inspect::Inspect),
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Classify(cmd) => cmd.run(),
            Command::Inspect(cmd) => cmd.run().await,
        }
    }
}
