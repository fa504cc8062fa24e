//! PNG output and post-hoc inspection of generated textures.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use image::ImageFormat;
use serde::Serialize;

use crate::raster::Raster;

/// Encode `raster` as RGBA PNG at `path`, creating parent directories.
pub fn save_png(raster: Raster, path: &Path, no_clobber: bool) -> Result<()> {
    if no_clobber && path.exists() {
        bail!("Refusing to overwrite {} (drop --no-clobber)", path.display());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output dir {}", parent.display()))?;
        }
    }
    let (w, h) = raster.dimensions();
    let img = raster.into_image()?;
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("write {}", path.display()))?;
    tracing::info!("wrote {} ({}x{})", path.display(), w, h);
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inspection {
    pub width: u32,
    pub height: u32,
    pub transparent: u64,
    pub partial: u64,
    pub opaque: u64,
    pub mean_luma: f64,
    /// Every row is a single broadcast color (true for adisk / saturn output).
    pub uniform_rows: bool,
}

pub fn inspect(path: &Path) -> Result<Inspection> {
    let img = image::open(path)
        .with_context(|| format!("open {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    let (mut transparent, mut partial, mut opaque) = (0u64, 0u64, 0u64);
    let mut luma_sum = 0f64;
    for p in img.pixels() {
        match p[3] {
            0 => transparent += 1,
            255 => opaque += 1,
            _ => partial += 1,
        }
        luma_sum += 0.299 * p[0] as f64 + 0.587 * p[1] as f64 + 0.114 * p[2] as f64;
    }
    let total = width as u64 * height as u64;
    let mean_luma = if total == 0 { 0.0 } else { luma_sum / total as f64 };
    let uniform_rows = img.rows().all(|mut row| match row.next() {
        Some(first) => row.all(|p| p == first),
        None => true,
    });
    Ok(Inspection { width, height, transparent, partial, opaque, mean_luma, uniform_rows })
}
