//! Read-only source strips (color ramps, ring photographs, transparency patterns).

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use image::RgbaImage;

pub struct SourceImage {
    path: PathBuf,
    image: RgbaImage,
}

impl SourceImage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .with_context(|| format!("open source image {}", path.display()))?
            .to_rgba8();
        tracing::debug!("loaded {} ({}x{})", path.display(), image.width(), image.height());
        Ok(Self { path: path.to_path_buf(), image })
    }

    /// Wraps an already decoded image; `label` is only used in error messages.
    pub fn from_image(label: impl Into<PathBuf>, image: RgbaImage) -> Self {
        Self { path: label.into(), image }
    }

    pub fn path(&self) -> &Path { &self.path }
    pub fn dimensions(&self) -> (u32, u32) { self.image.dimensions() }

    /// Pixel at `(x, y)`. Coordinates past either edge are an error, never clamped.
    pub fn pixel(&self, x: u32, y: u32) -> Result<[u8; 4]> {
        let (w, h) = self.image.dimensions();
        if x >= w || y >= h {
            bail!("pixel ({x}, {y}) outside {} ({w}x{h})", self.path.display());
        }
        Ok(self.image.get_pixel(x, y).0)
    }

    /// Rec. 601 luma of the pixel at `(x, y)`; used for single-channel pattern strips.
    pub fn luma(&self, x: u32, y: u32) -> Result<u8> {
        let [r, g, b, _] = self.pixel(x, y)?;
        let l = (299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000;
        Ok(l as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn strip() -> SourceImage {
        let img = RgbaImage::from_fn(4, 3, |x, y| Rgba([x as u8 * 10, y as u8 * 10, 0, 255]));
        SourceImage::from_image("strip", img)
    }

    #[test]
    fn pixel_lookup() {
        let s = strip();
        assert_eq!(s.pixel(3, 2).unwrap(), [30, 20, 0, 255]);
        assert_eq!(s.dimensions(), (4, 3));
        assert_eq!(s.path(), Path::new("strip"));
    }

    #[test]
    fn out_of_bounds_fails_instead_of_clamping() {
        let s = strip();
        let err = s.pixel(4, 0).unwrap_err().to_string();
        assert!(err.contains("outside strip"), "{err}");
        assert!(s.pixel(0, 3).is_err());
        assert!(s.luma(4, 2).is_err());
    }

    #[test]
    fn luma_of_grey_is_identity() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([77, 77, 77, 255]));
        let s = SourceImage::from_image("grey", img);
        assert_eq!(s.luma(0, 0).unwrap(), 77);
    }

    #[test]
    fn missing_file_names_path() {
        let err = SourceImage::open("no/such/ramp.jpg").err().unwrap();
        assert!(format!("{err:#}").contains("no/such/ramp.jpg"));
    }
}
