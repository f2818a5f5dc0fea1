//! `fitting-room init`: scaffold `.fitting-room/`.

use clap::Args;
use color_eyre::eyre::{Result, WrapErr};
use colored::Colorize;
use fr_core::init::{generate_fitting_room_structure, InitOptions};
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing `.fitting-room/` directory.
    #[arg(long)]
    pub force: bool,

    /// Only write `config.toml`; use the built-in catalog.
    #[arg(long)]
    pub minimal: bool,
}

pub async fn run(args: InitArgs, root: &Path) -> Result<()> {
    let written = generate_fitting_room_structure(InitOptions {
        target_dir: root.to_path_buf(),
        force: args.force,
        minimal: args.minimal,
    })
    .await
    .wrap_err("Failed to initialize .fitting-room")?;

    println!(
        "{} {}",
        "Initialized".green().bold(),
        root.join(fr_core::config::FITTING_ROOM_DIR).display()
    );
    for file in written {
        println!("  {file}");
    }
    Ok(())
}
