use clap::Parser;
use pmp_multihop_qa::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Evaluate(args) => cli::evaluate::run(args).await,
        Command::Ask(args) => cli::ask::run(args).await,
    }
}
