//! Unified texture generator CLI
//!
//! Subcommands:
//!   adisk   Accretion-disk gradient strip (noise-driven black-body ramp)
//!   jdisk   Tileable greyscale simplex noise disk
//!   saturn  Saturn ring strip (ring color + transparency pattern)
//!   all     Run the three generators in order
//!   inspect Summary statistics for a generated PNG
//!
//! Example:
//!   cargo run -- --config assets/config/texgen.ron jdisk --ratio 8 --out out/jdisk.png

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use disk_texgen::{config::DEFAULT_CONFIG_PATH, logging, output, TexgenConfig, TextureKind};

#[derive(Parser, Debug)]
#[command(author, version, about = "Procedural disk / ring texture generator", long_about = None)]
struct Cli {
    /// RON config; a missing file means built-in defaults, a malformed one is an error.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Fail instead of overwriting an existing output file.
    #[arg(long, global = true)]
    no_clobber: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Accretion-disk gradient strip
    Adisk(AdiskArgs),
    /// Tileable noise disk
    Jdisk(JdiskArgs),
    /// Saturn ring strip
    Saturn(SaturnArgs),
    /// Generate every texture with config paths
    All,
    /// Print statistics about an existing PNG
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct AdiskArgs {
    #[arg(long)] out: Option<PathBuf>,
    #[arg(long)] seed: Option<u64>,
    #[arg(long)] ramp: Option<PathBuf>,
    #[arg(long)] width: Option<u32>,
    #[arg(long)] height: Option<u32>,
}

#[derive(Args, Debug)]
struct JdiskArgs {
    #[arg(long)] out: Option<PathBuf>,
    #[arg(long)] seed: Option<u64>,
    #[arg(long)] ratio: Option<u32>,
    #[arg(long)] width: Option<u32>,
    #[arg(long)] height: Option<u32>,
}

#[derive(Args, Debug)]
struct SaturnArgs {
    #[arg(long)] out: Option<PathBuf>,
    #[arg(long)] color: Option<PathBuf>,
    #[arg(long)] pattern: Option<PathBuf>,
    #[arg(long)] width: Option<u32>,
    #[arg(long)] height: Option<u32>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[arg(long)] png: PathBuf,
    /// Emit JSON instead of a text summary
    #[arg(long)] json: bool,
}

fn cmd_generate(kind: TextureKind, cfg: &TexgenConfig, no_clobber: bool) -> Result<()> {
    let path = kind.run(cfg, no_clobber)?;
    println!("Generated {}: {}", kind.name(), path.display());
    Ok(())
}

fn cmd_inspect(a: InspectArgs) -> Result<()> {
    let res = output::inspect(&a.png)?;
    if a.json {
        println!("{}", serde_json::to_string_pretty(&res)?);
    } else {
        println!(
            "{}: {}x{} opaque={} partial={} transparent={} mean_luma={:.2} uniform_rows={}",
            a.png.display(), res.width, res.height, res.opaque, res.partial, res.transparent, res.mean_luma, res.uniform_rows
        );
    }
    Ok(())
}

impl AdiskArgs {
    fn apply(self, cfg: &mut TexgenConfig) {
        let c = &mut cfg.adisk;
        if let Some(p) = self.out { c.output = p; }
        if let Some(s) = self.seed { c.seed = Some(s); }
        if let Some(p) = self.ramp { c.ramp_path = p; }
        if let Some(w) = self.width { c.width = w; }
        if let Some(h) = self.height { c.height = h; }
    }
}

impl JdiskArgs {
    fn apply(self, cfg: &mut TexgenConfig) {
        let c = &mut cfg.jdisk;
        if let Some(p) = self.out { c.output = p; }
        if let Some(s) = self.seed { c.seed = Some(s); }
        if let Some(r) = self.ratio { c.ratio = r; }
        if let Some(w) = self.width { c.width = w; }
        if let Some(h) = self.height { c.height = h; }
    }
}

impl SaturnArgs {
    fn apply(self, cfg: &mut TexgenConfig) {
        let c = &mut cfg.saturn;
        if let Some(p) = self.out { c.output = p; }
        if let Some(p) = self.color { c.color_path = p; }
        if let Some(p) = self.pattern { c.pattern_path = p; }
        if let Some(w) = self.width { c.width = w; }
        if let Some(h) = self.height { c.height = h; }
    }
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let no_clobber = cli.no_clobber;
    match cli.command {
        Commands::Adisk(a) => {
            let mut cfg = TexgenConfig::load_logged(&cli.config)?;
            a.apply(&mut cfg);
            cmd_generate(TextureKind::Adisk, &cfg, no_clobber)
        }
        Commands::Jdisk(a) => {
            let mut cfg = TexgenConfig::load_logged(&cli.config)?;
            a.apply(&mut cfg);
            cmd_generate(TextureKind::Jdisk, &cfg, no_clobber)
        }
        Commands::Saturn(a) => {
            let mut cfg = TexgenConfig::load_logged(&cli.config)?;
            a.apply(&mut cfg);
            cmd_generate(TextureKind::Saturn, &cfg, no_clobber)
        }
        Commands::All => {
            let cfg = TexgenConfig::load_logged(&cli.config)?;
            for kind in TextureKind::ALL {
                cmd_generate(kind, &cfg, no_clobber)?;
            }
            Ok(())
        }
        Commands::Inspect(a) => cmd_inspect(a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(std::iter::once("disk_texgen").chain(args.iter().copied())).unwrap().command
    }

    #[test]
    fn size_overrides_reach_every_generator() {
        let mut cfg = TexgenConfig::default();
        match parse(&["adisk", "--width", "64", "--height", "32"]) {
            Commands::Adisk(a) => a.apply(&mut cfg),
            other => panic!("parsed {other:?}"),
        }
        match parse(&["saturn", "--width", "10", "--height", "20"]) {
            Commands::Saturn(a) => a.apply(&mut cfg),
            other => panic!("parsed {other:?}"),
        }
        match parse(&["jdisk", "--width", "8", "--height", "4", "--ratio", "2"]) {
            Commands::Jdisk(a) => a.apply(&mut cfg),
            other => panic!("parsed {other:?}"),
        }
        assert_eq!((cfg.adisk.width, cfg.adisk.height), (64, 32));
        assert_eq!((cfg.saturn.width, cfg.saturn.height), (10, 20));
        assert_eq!((cfg.jdisk.width, cfg.jdisk.height, cfg.jdisk.ratio), (8, 4, 2));
        assert_eq!(cfg.adisk.seed, Some(256), "unset flags leave config values alone");
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["disk_texgen", "jdisk", "--no-clobber", "--config", "x.ron"]).unwrap();
        assert!(cli.no_clobber);
        assert_eq!(cli.config, PathBuf::from("x.ron"));
    }
}
