use anyhow::Result;
use commit_plots::cli::Cli;
use commit_plots::logging::setup_logger;

fn main() -> Result<()> {
    setup_logger();
    let cli = Cli::parse();
    cli.execute()
}
