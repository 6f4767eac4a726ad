//! ScriptForge CLI: prepares the text of a video script.
//!
//! Fetches source text for a topic, cleans it, splits it into sentences and
//! tags each kept sentence with keywords, all against a JSON state file.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
