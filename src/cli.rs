use crate::render::OutputFormat;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "commit-plots")]
#[command(about = "Render edit and cursor statistics of interesting commits as bar charts")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Read the stats document from this file instead of stdin")]
    pub input: Option<PathBuf>,

    #[arg(long, help = "Directory to write charts into", default_value = "latex-out/plots")]
    pub out_dir: PathBuf,

    #[arg(long, value_enum, help = "Chart file format", default_value_t = OutputFormat::Pdf)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render both charts (the default)
    Render,
    /// Print the plotting tables without rendering
    Tables {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command.unwrap_or(Commands::Render) {
            Commands::Render => crate::plot::exec(self.common),
            Commands::Tables { json, ndjson } => crate::tables::exec(self.common, json, ndjson),
        }
    }
}
