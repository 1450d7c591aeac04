//! RAM-backed strip driver
//!
//! Keeps the pixel buffer in memory and hands brightness-scaled frames to an
//! [`OutputDriver`] on every flush.

use crate::{
    OutputDriver,
    color::{BLACK, Rgb},
    math8::scale8,
};

use super::{StripConfig, StripDriver};

/// Buffered strip with room for up to `MAX_PIXELS` pixels.
///
/// A config asking for more pixels than `MAX_PIXELS` is truncated.
pub struct BufferedStrip<O: OutputDriver, const MAX_PIXELS: usize> {
    output: O,
    pixels: [Rgb; MAX_PIXELS],
    len: u8,
    brightness: u8,
}

impl<O: OutputDriver, const MAX_PIXELS: usize> BufferedStrip<O, MAX_PIXELS> {
    /// Create a dark strip sized after `config`
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(output: O, config: &StripConfig) -> Self {
        let len = (config.pixel_count as usize).min(MAX_PIXELS).min(u8::MAX as usize) as u8;
        Self {
            output,
            pixels: [BLACK; MAX_PIXELS],
            len,
            brightness: config.brightness,
        }
    }

    /// Current buffer contents, before brightness scaling
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels[..self.len as usize]
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    fn active(&mut self) -> &mut [Rgb] {
        &mut self.pixels[..self.len as usize]
    }
}

impl<O: OutputDriver, const MAX_PIXELS: usize> StripDriver for BufferedStrip<O, MAX_PIXELS> {
    fn pixel_rgb(&mut self, index: u8, color: Rgb) {
        if let Some(pixel) = self.active().get_mut(index as usize) {
            *pixel = color;
        }
    }

    fn pixel_range_rgb(&mut self, from: u8, to: u8, color: Rgb) {
        if self.len == 0 || from > to {
            return;
        }
        let to = to.min(self.len - 1);
        if from > to {
            return;
        }
        for pixel in &mut self.pixels[from as usize..=to as usize] {
            *pixel = color;
        }
    }

    fn shift_to_next(&mut self) {
        let step = 1.min(self.len as usize);
        self.active().rotate_right(step);
    }

    fn shift_to_previous(&mut self) {
        let step = 1.min(self.len as usize);
        self.active().rotate_left(step);
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }

    fn clear(&mut self) {
        self.active().fill(BLACK);
    }

    fn show(&mut self) {
        let len = self.len as usize;
        if self.brightness == u8::MAX {
            self.output.write(&self.pixels[..len]);
            return;
        }

        let mut frame = self.pixels;
        for pixel in &mut frame[..len] {
            pixel.r = scale8(pixel.r, self.brightness);
            pixel.g = scale8(pixel.g, self.brightness);
            pixel.b = scale8(pixel.b, self.brightness);
        }
        self.output.write(&frame[..len]);
    }

    fn pixel_count(&self) -> u8 {
        self.len
    }
}
