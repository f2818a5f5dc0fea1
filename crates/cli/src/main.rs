//! Entry point for the `fitting-room` binary.
//!
//! Drives the outfit wizard headlessly: a photo and three catalog choices go
//! in, a generated video reference (and optionally the file) comes out.

mod commands;
mod render;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fitting-room", version, about = "Virtual fitting room generation driver")]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project directory containing `.fitting-room/`.
    #[arg(short = 'C', long = "dir", global = true, default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a portrait and video for one outfit.
    Generate(commands::generate::GenerateArgs),
    /// Poll an existing job until it finishes.
    Poll(commands::poll::PollArgs),
    /// List the outfit catalog.
    Catalog(commands::catalog::CatalogArgs),
    /// Create a `.fitting-room/` directory with default settings.
    Init(commands::init::InitArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Generate(args) => commands::generate::run(args, &cli.dir).await,
        Command::Poll(args) => commands::poll::run(args, &cli.dir).await,
        Command::Catalog(args) => commands::catalog::run(args, &cli.dir).await,
        Command::Init(args) => commands::init::run(args, &cli.dir).await,
    }
}
