use eframe::egui::{Color32, ColorImage};

use crate::grayscale::GrayscaleImage;

pub const DEFAULT_WINDOW_CENTER: i32 = 128;
pub const DEFAULT_WINDOW_WIDTH: i32 = 256;

/// Window/level parameters. `width` is never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLevel {
    center: i32,
    width: i32,
}

impl WindowLevel {
    pub fn new(center: i32, width: i32) -> Self {
        Self {
            center,
            width: width.max(1),
        }
    }

    pub fn center(self) -> i32 {
        self.center
    }

    pub fn width(self) -> i32 {
        self.width
    }

    pub fn slope(self) -> f64 {
        255.0 / f64::from(self.width.max(1))
    }

    pub fn map_sample(self, sample: u8) -> u8 {
        let shifted = i64::from(sample) - i64::from(self.center);
        let value = (self.slope() * shifted as f64 + 127.0).round();
        value.clamp(0.0, 255.0) as u8
    }
}

impl Default for WindowLevel {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CENTER, DEFAULT_WINDOW_WIDTH)
    }
}

/// Remaps every sample of `source` into a new buffer; `source` is left as is.
pub fn render_window_level(source: &GrayscaleImage, window: WindowLevel) -> GrayscaleImage {
    let mut lut = [0u8; 256];
    for (sample, slot) in lut.iter_mut().enumerate() {
        *slot = window.map_sample(sample as u8);
    }

    source.map_pixels(|sample| lut[sample as usize])
}

pub fn render_color_image(image: &GrayscaleImage) -> ColorImage {
    ColorImage {
        size: [image.width(), image.height()],
        pixels: image
            .pixels()
            .iter()
            .map(|&gray| Color32::from_gray(gray))
            .collect(),
    }
}
