//! Saturn ring strip: output row `r` is the ring color at column `r` of the color photograph,
//! with alpha from the same column of the transparency pattern.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::{config::SaturnConfig, output, raster::Raster, source::SourceImage};

pub fn row_color(
    color: &SourceImage,
    pattern: &SourceImage,
    row: u32,
    cfg: &SaturnConfig,
) -> Result<[u8; 4]> {
    let [r, g, b, _] = color.pixel(row, cfg.source_row)?;
    // Luma equals the GIF palette value only when the palette is an identity grey ramp.
    let a = pattern.luma(row, cfg.source_row)?;
    Ok([r, g, b, a])
}

pub fn generate(cfg: &SaturnConfig, color: &SourceImage, pattern: &SourceImage) -> Result<Raster> {
    let mut raster = Raster::new(cfg.width, cfg.height)?;
    for y in 0..cfg.height {
        let rgba = row_color(color, pattern, y, cfg)
            .with_context(|| format!("saturn row {y}"))?;
        raster.fill_row(y, rgba)?;
    }
    info!("saturn: {}x{} from source row {}", cfg.width, cfg.height, cfg.source_row);
    Ok(raster)
}

pub fn run(cfg: &SaturnConfig, no_clobber: bool) -> Result<PathBuf> {
    let color = SourceImage::open(&cfg.color_path)?;
    let pattern = SourceImage::open(&cfg.pattern_path)?;
    let raster = generate(cfg, &color, &pattern)?;
    output::save_png(raster, &cfg.output, no_clobber)?;
    Ok(cfg.output.clone())
}
