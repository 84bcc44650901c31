use anyhow::{Context, Result};
use gitstats::cli::Cli;
use simple_logger::SimpleLogger;

fn main() -> Result<()> {
    let cli = Cli::parse();
    SimpleLogger::new()
        .with_level(cli.common.log_level())
        .env()
        .init()
        .context("Failed to initialize logging")?;
    cli.execute()
}
