//! The three texture pipelines. Each one takes its config section, samples into a `Raster`
//! and writes a PNG; they share nothing beyond the raster, source and noise helpers.

pub mod adisk;
pub mod jdisk;
pub mod saturn;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::TexgenConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureKind {
    Adisk,
    Jdisk,
    Saturn,
}

impl TextureKind {
    pub const ALL: [TextureKind; 3] = [TextureKind::Adisk, TextureKind::Jdisk, TextureKind::Saturn];

    pub fn name(self) -> &'static str {
        match self {
            TextureKind::Adisk => "adisk",
            TextureKind::Jdisk => "jdisk",
            TextureKind::Saturn => "saturn",
        }
    }

    pub fn output_mut(self, cfg: &mut TexgenConfig) -> &mut PathBuf {
        match self {
            TextureKind::Adisk => &mut cfg.adisk.output,
            TextureKind::Jdisk => &mut cfg.jdisk.output,
            TextureKind::Saturn => &mut cfg.saturn.output,
        }
    }

    pub fn run(self, cfg: &TexgenConfig, no_clobber: bool) -> Result<PathBuf> {
        let res = match self {
            TextureKind::Adisk => adisk::run(&cfg.adisk, no_clobber),
            TextureKind::Jdisk => jdisk::run(&cfg.jdisk, no_clobber),
            TextureKind::Saturn => saturn::run(&cfg.saturn, no_clobber),
        };
        res.with_context(|| format!("generate {}", self.name()))
    }
}

/// Entry point shared by the single-purpose binaries: config file (defaults if absent), optional
/// output override, one generator.
pub fn run_standalone(kind: TextureKind, config: &Path, out: Option<PathBuf>) -> Result<PathBuf> {
    let mut cfg = TexgenConfig::load_logged(config)?;
    if let Some(out) = out {
        *kind.output_mut(&mut cfg) = out;
    }
    kind.run(&cfg, false)
}
