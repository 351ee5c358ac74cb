use anyhow::Result;
use clap::Parser;
use taskboard::cli::{self, Cli};

async fn try_main(cli: Cli) -> Result<()> {
    let config = cli::load_config(&cli)?;
    taskboard::logger::init(&config.logging)?;
    cli::run(cli, config).await
}

#[tokio::main]
async fn main() {
    if let Err(e) = try_main(Cli::parse()).await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
