use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

/// Default location the binaries look for an override file.
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/texgen.ron";

/// Rasters above this many pixels get a validation warning.
const LARGE_RASTER_PIXELS: u64 = 64_000_000;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AdiskConfig {
    pub width: u32,
    pub height: u32,
    /// Extent of the synthetic noise axis; also the envelope's zero point.
    pub nwidth: f64,
    pub min_col_ind: u32,
    pub max_col_ind: u32,
    /// Row of the ramp strip the colors are read from.
    pub ramp_row: u32,
    /// `None` selects the classic permutation table.
    pub seed: Option<u64>,
    pub ramp_path: PathBuf,
    pub output: PathBuf,
}
impl Default for AdiskConfig {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 400,
            nwidth: 5.0,
            min_col_ind: 175,
            max_col_ind: 375,
            ramp_row: 25,
            seed: Some(256),
            ramp_path: PathBuf::from("resources/bb-scale.jpg"),
            output: PathBuf::from("adisk.png"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct JdiskConfig {
    pub width: u32,
    pub height: u32,
    /// Tile count across the image; the noise repeats this many times per axis.
    pub ratio: u32,
    pub seed: Option<u64>,
    /// Log a progress line every N rows (0 disables).
    pub progress_every: u32,
    pub output: PathBuf,
}
impl Default for JdiskConfig {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 2000,
            ratio: 16,
            seed: None,
            progress_every: 100,
            output: PathBuf::from("jdisk.png"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SaturnConfig {
    pub width: u32,
    pub height: u32,
    pub source_row: u32,
    pub color_path: PathBuf,
    pub pattern_path: PathBuf,
    pub output: PathBuf,
}
impl Default for SaturnConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 915,
            source_row: 32,
            color_path: PathBuf::from("resources/saturnringcolor.jpg"),
            pattern_path: PathBuf::from("resources/saturnringpattern.gif"),
            output: PathBuf::from("saturn.png"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct TexgenConfig {
    pub adisk: AdiskConfig,
    pub jdisk: JdiskConfig,
    pub saturn: SaturnConfig,
}

impl TexgenConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data =
            fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        Self::parse(&data, path)
    }

    /// Defaults only when the file does not exist; unreadable or malformed files are errors.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(data) => Self::parse(&data, path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("read config {}", path.display())),
        }
    }

    /// `load_or_default`, then log any validation warnings.
    pub fn load_logged(path: impl AsRef<Path>) -> Result<Self> {
        let cfg = Self::load_or_default(path)?;
        for w in cfg.validate() {
            tracing::warn!("config: {w}");
        }
        Ok(cfg)
    }

    fn parse(data: &str, path: &Path) -> Result<Self> {
        ron::from_str(data).with_context(|| format!("parse RON {}", path.display()))
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        let a = &self.adisk;
        check_dims("adisk", a.width, a.height, &mut w);
        if a.nwidth <= 0.0 || !a.nwidth.is_finite() {
            w.push(format!("adisk.nwidth {} must be a positive finite number", a.nwidth));
        }
        if a.min_col_ind > a.max_col_ind {
            w.push(format!(
                "adisk column range inverted ({} > {}); gradient will run backwards",
                a.min_col_ind, a.max_col_ind
            ));
        } else if a.min_col_ind == a.max_col_ind {
            w.push("adisk column range is empty; every row gets the same color".into());
        }

        let j = &self.jdisk;
        check_dims("jdisk", j.width, j.height, &mut w);
        if j.ratio == 0 {
            w.push("jdisk.ratio must be >= 1 (tile count)".into());
        }
        if j.ratio > j.width.min(j.height) && j.width > 0 && j.height > 0 {
            w.push(format!(
                "jdisk.ratio {} exceeds the smaller image side; tiles are under one pixel",
                j.ratio
            ));
        }

        let s = &self.saturn;
        check_dims("saturn", s.width, s.height, &mut w);
        w
    }
}

fn check_dims(section: &str, width: u32, height: u32, w: &mut Vec<String>) {
    if width == 0 || height == 0 {
        w.push(format!("{section} dimensions must be > 0 (got {width}x{height})"));
    }
    if width as u64 * height as u64 > LARGE_RASTER_PIXELS {
        w.push(format!("very large {section} raster: {width}x{height}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let cfg = TexgenConfig::default();
        assert_eq!((cfg.adisk.width, cfg.adisk.height), (2000, 400));
        assert_eq!(cfg.adisk.seed, Some(256));
        assert_eq!((cfg.jdisk.width, cfg.jdisk.height, cfg.jdisk.ratio), (2000, 2000, 16));
        assert_eq!((cfg.saturn.width, cfg.saturn.height, cfg.saturn.source_row), (1000, 915, 32));
        assert!(cfg.validate().is_empty(), "defaults should validate cleanly: {:?}", cfg.validate());
    }

    #[test]
    fn partial_ron_keeps_other_defaults() {
        let cfg: TexgenConfig = ron::from_str("(jdisk: (ratio: 4, seed: Some(9)))").unwrap();
        assert_eq!(cfg.jdisk.ratio, 4);
        assert_eq!(cfg.jdisk.seed, Some(9));
        assert_eq!(cfg.jdisk.width, 2000);
        assert_eq!(cfg.adisk, AdiskConfig::default());
        assert_eq!(cfg.saturn, SaturnConfig::default());
    }

    #[test]
    fn validate_flags_bad_values() {
        let mut cfg = TexgenConfig::default();
        cfg.adisk.min_col_ind = 400;
        cfg.jdisk.ratio = 0;
        cfg.saturn.height = 0;
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.contains("inverted")));
        assert!(warnings.iter().any(|w| w.contains("jdisk.ratio")));
        assert!(warnings.iter().any(|w| w.starts_with("saturn dimensions")));
    }

    #[test]
    fn load_or_default_only_covers_missing_file() {
        let cfg = TexgenConfig::load_or_default("definitely/not/here.ron").unwrap();
        assert_eq!(cfg, TexgenConfig::default());
        let err = TexgenConfig::load_from_file("definitely/not/here.ron").unwrap_err();
        assert!(err.to_string().contains("read config"));
    }
}
