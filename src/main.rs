//! Delta Skin Overlay - Delta emulator skins to RetroArch overlays
//!
//! Reads `.deltaskin` packages (or expanded skin directories) and writes one
//! RetroArch overlay directory per device: a `.cfg` file plus the portrait and
//! landscape background images.

use clap::{Parser, Subcommand};
use deltaskin_overlay::cli::{ConfigArgs, ConvertArgs, InspectArgs};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Delta Skin Overlay - convert Delta skins to RetroArch overlays
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert skin packages to RetroArch overlays
    Convert(ConvertArgs),
    /// Show what a skin package contains
    Inspect(InspectArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays clean on stdout
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Inspect(args) => args.execute(),
        Commands::Config(args) => args.execute(),
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            err.exit_code.into()
        }
    }
}
