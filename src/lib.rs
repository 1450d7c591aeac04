#![no_std]

pub mod color;
pub mod error;
pub mod group;
pub mod math8;
pub mod notification;
pub mod registry;
pub mod strip;

pub use error::{Error, Result};
pub use group::{GROUP_COUNT, PixelGroup};
pub use notification::{
    AnimationTimings, BatterySource, BatteryStyle, CLUTCH_FULL_VALUE, NoBattery,
    NotificationConfig, PixelNotifier, render_battery_level,
};
pub use registry::{LOCK_TIMEOUT, Outcome, PixelGroups, PixelGroupsGuard, Strips};
pub use strip::{
    BufferedStrip, PixelDriver, PixelFormat, StripConfig, StripDriver, StripFactory,
};

pub use color::Rgb;
pub use embassy_time::Duration;

/// Abstract LED output trait
///
/// Implement this trait to push frames to the LED bus of a given platform.
/// [`BufferedStrip`] is generic over it.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
