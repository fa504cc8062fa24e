//! Accretion-disk gradient.
//!
//! One noise sample per output row, shaped by a linear envelope that falls to zero at
//! `nwidth`, normalized against the largest sample, then mapped onto a column range of the
//! black-body ramp. Every pixel of a row gets that one color; rows with a negative sample are
//! left transparent.

use std::path::PathBuf;

use anyhow::{bail, Result};
use tracing::{info, trace};

use crate::{
    config::AdiskConfig,
    noise::{NoiseField, Simplex},
    output,
    raster::Raster,
    source::SourceImage,
};

/// Raw envelope-weighted samples, one per row.
pub fn sample_rows(cfg: &AdiskConfig, noise: &impl NoiseField) -> Vec<f64> {
    let step = cfg.nwidth / cfg.height as f64;
    (0..cfg.height)
        .map(|i| {
            let x = i as f64 * step;
            (cfg.nwidth - x) * noise.sample(x, 0.0)
        })
        .collect()
}

/// Divide every sample by the global maximum. Fails when the maximum is not positive.
pub fn normalize(samples: &mut [f64]) -> Result<()> {
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !(max.is_finite() && max > 0.0) {
        bail!("degenerate normalization: maximum row sample is {max} (need > 0)");
    }
    for v in samples.iter_mut() {
        *v /= max;
    }
    Ok(())
}

/// Ramp column for a normalized sample; `None` means the row stays transparent.
pub fn ramp_column(cfg: &AdiskConfig, v: f64) -> Option<u32> {
    if v < 0.0 {
        return None;
    }
    let span = cfg.max_col_ind as f64 - cfg.min_col_ind as f64;
    Some((v * span + cfg.min_col_ind as f64) as u32)
}

pub fn generate(cfg: &AdiskConfig, ramp: &SourceImage, noise: &impl NoiseField) -> Result<Raster> {
    let mut samples = sample_rows(cfg, noise);
    normalize(&mut samples)?;

    let mut raster = Raster::new(cfg.width, cfg.height)?;
    let mut transparent = 0u32;
    for (y, v) in samples.iter().enumerate() {
        trace!(row = y, value = *v, "adisk sample");
        match ramp_column(cfg, *v) {
            Some(col) => {
                let [r, g, b, _] = ramp.pixel(col, cfg.ramp_row)?;
                raster.fill_row(y as u32, [r, g, b, 255])?;
            }
            None => transparent += 1,
        }
    }
    info!("adisk: {} rows colored, {} transparent", cfg.height - transparent, transparent);
    Ok(raster)
}

pub fn run(cfg: &AdiskConfig, no_clobber: bool) -> Result<PathBuf> {
    let ramp = SourceImage::open(&cfg.ramp_path)?;
    info!("adisk: ramp {} row {}", ramp.path().display(), cfg.ramp_row);
    let noise = Simplex::from_seed(cfg.seed);
    let raster = generate(cfg, &ramp, &noise)?;
    output::save_png(raster, &cfg.output, no_clobber)?;
    Ok(cfg.output.clone())
}
