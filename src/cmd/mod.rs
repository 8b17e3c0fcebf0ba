use crate::{pkg::server::listen, prelude::Result};
use clap::{Parser, Subcommand};

mod search;

#[derive(Parser)]
#[command(about = "job listing aggregation service")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    Listen,
    Search(search::SearchArgs),
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    match args.command {
        Some(SubCommandType::Listen) => {
            listen().await?;
        }
        Some(SubCommandType::Search(args)) => {
            search::run(args).await?;
        }
        None => {
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}
