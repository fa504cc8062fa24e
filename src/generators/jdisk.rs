//! Tiled greyscale noise disk.

use std::path::PathBuf;

use anyhow::{bail, Result};
use tracing::{debug, info};

use crate::{
    config::JdiskConfig,
    noise::{NoiseField, Simplex, Tiled},
    output,
    raster::Raster,
};

/// Noise field that repeats `ratio` times across the image on both axes.
pub fn field(cfg: &JdiskConfig) -> Tiled {
    let period = cfg.ratio as f64;
    Tiled { noise: Simplex::from_seed(cfg.seed), period_x: period, period_y: period }
}

/// Grey level for pixel `(x, y)`: the signed sample remapped from [-1, 1] to [0, 255].
pub fn sample_value(field: &impl NoiseField, x: u32, y: u32, cfg: &JdiskConfig) -> u8 {
    let ratio = cfg.ratio as f64;
    let nx = x as f64 / cfg.width as f64 * ratio;
    let ny = y as f64 / cfg.height as f64 * ratio;
    let v = field.sample(nx, ny);
    ((v + 1.0) / 2.0 * 255.0).trunc().clamp(0.0, 255.0) as u8
}

pub fn generate(cfg: &JdiskConfig, field: &impl NoiseField) -> Result<Raster> {
    if cfg.ratio == 0 {
        bail!("jdisk ratio must be >= 1");
    }
    let mut raster = Raster::new(cfg.width, cfg.height)?;
    for y in 0..cfg.height {
        if cfg.progress_every > 0 && y % cfg.progress_every == 0 {
            debug!("jdisk row {y}/{}", cfg.height);
        }
        for x in 0..cfg.width {
            let v = sample_value(field, x, y, cfg);
            raster.put(x, y, [v, v, v, 255])?;
        }
    }
    info!("jdisk: {}x{} with {} tiles per axis", cfg.width, cfg.height, cfg.ratio);
    Ok(raster)
}

pub fn run(cfg: &JdiskConfig, no_clobber: bool) -> Result<PathBuf> {
    let raster = generate(cfg, &field(cfg))?;
    output::save_png(raster, &cfg.output, no_clobber)?;
    Ok(cfg.output.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_cfg() -> JdiskConfig {
        JdiskConfig { width: 64, height: 48, ratio: 4, ..JdiskConfig::default() }
    }

    struct Fixed(f64);
    impl NoiseField for Fixed {
        fn sample(&self, _x: f64, _y: f64) -> f64 { self.0 }
    }

    #[test]
    fn remap_covers_full_range_and_clamps() {
        let cfg = small_cfg();
        assert_eq!(sample_value(&Fixed(-1.0), 0, 0, &cfg), 0);
        assert_eq!(sample_value(&Fixed(1.0), 0, 0, &cfg), 255);
        assert_eq!(sample_value(&Fixed(0.0), 0, 0, &cfg), 127);
        assert_eq!(sample_value(&Fixed(-1.7), 0, 0, &cfg), 0);
        assert_eq!(sample_value(&Fixed(1.3), 0, 0, &cfg), 255);
    }

    #[test]
    fn pixels_are_opaque_grey() {
        let cfg = small_cfg();
        let raster = generate(&cfg, &field(&cfg)).unwrap();
        for p in raster.as_bytes().chunks(4) {
            assert_eq!(p[0], p[1]);
            assert_eq!(p[1], p[2]);
            assert_eq!(p[3], 255);
        }
    }

    #[test]
    fn same_seed_same_pixels() {
        let cfg = JdiskConfig { seed: Some(42), ..small_cfg() };
        let a = generate(&cfg, &field(&cfg)).unwrap();
        let b = generate(&cfg, &field(&cfg)).unwrap();
        assert_eq!(a, b);
        assert_eq!(sample_value(&field(&cfg), 5, 9, &cfg), sample_value(&field(&cfg), 5, 9, &cfg));
    }

    #[test]
    fn different_seed_different_pixels() {
        let a_cfg = JdiskConfig { seed: Some(1), ..small_cfg() };
        let b_cfg = JdiskConfig { seed: Some(2), ..small_cfg() };
        let a = generate(&a_cfg, &field(&a_cfg)).unwrap();
        let b = generate(&b_cfg, &field(&b_cfg)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn field_wraps_at_image_edges() {
        let cfg = small_cfg();
        let f = field(&cfg);
        let r = cfg.ratio as f64;
        for i in 0..16 {
            let t = i as f64 / 16.0 * r;
            assert!((f.sample(0.0, t) - f.sample(r, t)).abs() < 1e-9);
            assert!((f.sample(t, 0.0) - f.sample(t, r)).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_ratio_rejected() {
        let cfg = JdiskConfig { ratio: 0, ..small_cfg() };
        assert!(generate(&cfg, &Fixed(0.0)).is_err());
    }
}
