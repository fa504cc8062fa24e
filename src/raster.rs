//! Owned RGBA output buffer.
//!
//! Generators write into a `Raster` by coordinate and hand it to the PNG writer once every
//! pixel has been visited. Dimensions are fixed at construction.

use anyhow::{bail, Result};
use image::RgbaImage;

pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Raster {
    /// Fully transparent raster.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            bail!("raster dimensions must be > 0 (got {width}x{height})");
        }
        let len = width as usize * height as usize;
        Ok(Self { width, height, pixels: vec![TRANSPARENT; len] })
    }

    pub fn dimensions(&self) -> (u32, u32) { (self.width, self.height) }

    /// Row-major offset of `(x, y)`.
    pub fn index(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            bail!("raster coordinate ({x}, {y}) outside {}x{}", self.width, self.height);
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u32, y: u32) -> Result<[u8; 4]> {
        let i = self.index(x, y)?;
        Ok(self.pixels[i])
    }

    pub fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> Result<()> {
        let i = self.index(x, y)?;
        self.pixels[i] = rgba;
        Ok(())
    }

    /// Broadcast one color across row `y`.
    pub fn fill_row(&mut self, y: u32, rgba: [u8; 4]) -> Result<()> {
        let start = self.index(0, y)?;
        self.pixels[start..start + self.width as usize].fill(rgba);
        Ok(())
    }

    pub fn row(&self, y: u32) -> Result<&[[u8; 4]]> {
        let start = self.index(0, y)?;
        Ok(&self.pixels[start..start + self.width as usize])
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn into_image(self) -> Result<RgbaImage> {
        let (w, h) = (self.width, self.height);
        let bytes: Vec<u8> = bytemuck::cast_slice(&self.pixels).to_vec();
        match RgbaImage::from_raw(w, h, bytes) {
            Some(img) => Ok(img),
            None => bail!("raster buffer does not match {w}x{h}"),
        }
    }
}
