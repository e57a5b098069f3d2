use std::sync::Arc;

use crate::error::LoadError;

/// Row-major 8-bit grayscale pixels. Cloning shares the sample buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayscaleImage {
    width: usize,
    height: usize,
    pixels: Arc<[u8]>,
}

impl GrayscaleImage {
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, LoadError> {
        if width == 0 || height == 0 || pixels.is_empty() {
            return Err(LoadError::EmptyImage { width, height });
        }

        let expected = width
            .checked_mul(height)
            .ok_or(LoadError::SizeMismatch {
                expected: usize::MAX,
                actual: pixels.len(),
            })?;
        if pixels.len() != expected {
            return Err(LoadError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels: Arc::from(pixels.into_boxed_slice()),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Builds a new image of the same size from a per-sample mapping.
    pub fn map_pixels(&self, map: impl Fn(u8) -> u8) -> GrayscaleImage {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&sample| map(sample)).collect(),
        }
    }

    /// True when both images share the same sample allocation.
    #[cfg(test)]
    pub fn shares_pixels_with(&self, other: &GrayscaleImage) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}
