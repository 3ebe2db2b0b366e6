//! LangPak CLI - Command-line interface for game language files

pub mod commands;
pub mod progress;

use std::path::PathBuf;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "langpak")]
#[command(about = "LangPak: language files for RPG Maker games", long_about = None)]
struct Cli {
    /// Game root (holds langpak.toml, Game.ini and the text assets)
    #[arg(short, long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Run the LangPak CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute(&cli.root)?;

    Ok(())
}
