//! In-memory 16-bit pixel grid

use crate::config::BarrierConfig;

/// Row-major grid of 16-bit pixels, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<u16>,
}

impl PixelGrid {
    /// Size of one packed pixel in the emitted data
    pub const BYTES_PER_PIXEL: u32 = 2;

    /// Create a grid with every pixel set to `fill`
    pub fn new(width: u32, height: u32, fill: u16) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![fill; count],
        }
    }

    pub fn from_config(config: &BarrierConfig) -> Self {
        Self::new(config.width, config.height, config.fill_color)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Pixel at column `x`, scanline `y`
    pub fn get(&self, x: u32, y: u32) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Scanlines from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u16]> {
        // chunks_exact panics on zero; an empty grid simply has no rows
        let chunk = (self.width as usize).max(1);
        self.pixels.chunks_exact(chunk)
    }

    /// Declared `pixel_data` capacity: packed bytes plus the string terminator
    pub fn data_capacity(&self) -> usize {
        self.pixel_count() * Self::BYTES_PER_PIXEL as usize + 1
    }
}

/// Split a pixel into `[low, high]` bytes
pub fn split_pixel(value: u16) -> [u8; 2] {
    value.to_le_bytes()
}
