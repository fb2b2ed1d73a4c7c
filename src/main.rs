mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::book::BookArgs;

#[derive(Parser)]
#[command(name = "slotbook")]
#[command(about = "Book a 30 minute product demo from your terminal")]
struct Cli {
    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through the booking wizard
    Book(BookArgs),
    /// List the time zones you can book in
    Zones,
    /// List the available time slots
    Slots,
    /// Show where settings are read from and their current values
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::logging::init_tracing(cli.verbose);

    match cli.command {
        Commands::Book(args) => commands::book::run(args).await,
        Commands::Zones => commands::zones::run(),
        Commands::Slots => commands::slots::run(),
        Commands::Config => commands::config::run(),
    }
}
