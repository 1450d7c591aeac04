//! Strip driver contract
//!
//! The registry never talks to LED hardware directly. Each configured group
//! owns one [`StripDriver`], built by a [`StripFactory`] from the group's
//! [`StripConfig`]. Bus protocol, color order and gamma belong to the driver.

mod buffered;

pub use buffered::BufferedStrip;

use crate::{color::Rgb, group::PixelGroup};

/// LED chip family
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelDriver {
    Ws2811,
    #[default]
    Ws2812,
    Ws2815,
    Sk6812,
    Ucs1903,
}

/// Order in which the chip expects the color channels on the wire
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Rbg,
    #[default]
    Grb,
    Gbr,
    Brg,
    Bgr,
}

/// Hardware description of one pixel group
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StripConfig {
    /// GPIO wired to the strip data line
    pub data_pin: u8,
    pub pixel_count: u8,
    /// Data line goes through a level shifter
    pub level_shift: bool,
    pub driver: PixelDriver,
    pub format: PixelFormat,
    /// Global brightness (0-255)
    pub brightness: u8,
}

impl StripConfig {
    /// Config with the default chip family, color order and full brightness
    pub const fn new(data_pin: u8, pixel_count: u8) -> Self {
        Self {
            data_pin,
            pixel_count,
            level_shift: false,
            driver: PixelDriver::Ws2812,
            format: PixelFormat::Grb,
            brightness: u8::MAX,
        }
    }
}

/// Pixel buffer and physical output of a single group.
///
/// Writes only touch the buffer; nothing reaches the LEDs until [`show`].
/// Indices outside the strip are ignored.
///
/// [`show`]: StripDriver::show
pub trait StripDriver {
    /// Write one pixel
    fn pixel_rgb(&mut self, index: u8, color: Rgb);

    /// Write the inclusive range `from..=to`, clamped to the strip length
    fn pixel_range_rgb(&mut self, from: u8, to: u8, color: Rgb);

    /// Rotate the buffer one position towards the end, wrapping the last pixel
    fn shift_to_next(&mut self);

    /// Rotate the buffer one position towards the start, wrapping the first pixel
    fn shift_to_previous(&mut self);

    /// Set global brightness (0-255)
    fn set_brightness(&mut self, level: u8);

    /// Zero the buffer without flushing
    fn clear(&mut self);

    /// Flush the buffer to the LEDs
    fn show(&mut self);

    fn pixel_count(&self) -> u8;
}

/// Builds strip drivers during configuration.
pub trait StripFactory {
    type Strip: StripDriver;

    /// Create the driver for `group`
    ///
    /// Brightness is applied by the registry right after creation.
    fn create(&mut self, group: PixelGroup, config: &StripConfig) -> Self::Strip;
}
