//! Saturn ring strip, written with default settings unless a config / output path is given.
//!
//!   cargo run --bin gen_saturn

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use disk_texgen::{config::DEFAULT_CONFIG_PATH, generators::run_standalone, logging, TextureKind};

#[derive(Parser, Debug)]
#[command(about = "Saturn ring strip", version)]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)] config: PathBuf,
    #[arg(long)] out: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();
    let path = run_standalone(TextureKind::Saturn, &args.config, args.out)?;
    println!("Wrote {}", path.display());
    Ok(())
}
