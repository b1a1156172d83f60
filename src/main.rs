use anyhow::Result;
use clap::Parser;
use job_postings::cli::{handle_command, Cli};
use job_postings::logging::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;

    handle_command(cli.command).await
}
