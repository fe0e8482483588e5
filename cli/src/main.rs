mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{assemble, locate};
use tracing_subscriber::FmtSubscriber;

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match &cli.command {
        Commands::Assemble(args) => assemble::run(&cli, args),
        Commands::Locate(args) => locate::run(&cli, args),
    }
}

fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(match verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> anyhow::Result<()> { run() }
