#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Duration;
use simwheel_pixels::{
    AnimationTimings, BatterySource, NotificationConfig, PixelGroup, PixelGroups, Rgb,
    StripConfig, StripDriver, StripFactory, color::BLACK,
};

pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

pub type Groups = PixelGroups<MockFactory, CriticalSectionRawMutex>;

/// Everything a mock strip did, kept after the strip itself is dropped
#[derive(Debug, Default)]
pub struct StripLog {
    pub config: Option<StripConfig>,
    pub pixels: Vec<Rgb>,
    /// Buffer contents at every `show`
    pub frames: Vec<Vec<Rgb>>,
    pub brightness: Option<u8>,
    pub released: bool,
}

pub struct MockStrip {
    pixels: Vec<Rgb>,
    log: Arc<Mutex<StripLog>>,
}

impl MockStrip {
    fn sync(&self) {
        self.log.lock().unwrap().pixels = self.pixels.clone();
    }
}

impl StripDriver for MockStrip {
    fn pixel_rgb(&mut self, index: u8, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index as usize) {
            *pixel = color;
        }
        self.sync();
    }

    fn pixel_range_rgb(&mut self, from: u8, to: u8, color: Rgb) {
        let to = (to as usize).min(self.pixels.len().saturating_sub(1));
        for index in from as usize..=to {
            if let Some(pixel) = self.pixels.get_mut(index) {
                *pixel = color;
            }
        }
        self.sync();
    }

    fn shift_to_next(&mut self) {
        if !self.pixels.is_empty() {
            self.pixels.rotate_right(1);
        }
        self.sync();
    }

    fn shift_to_previous(&mut self) {
        if !self.pixels.is_empty() {
            self.pixels.rotate_left(1);
        }
        self.sync();
    }

    fn set_brightness(&mut self, level: u8) {
        self.log.lock().unwrap().brightness = Some(level);
    }

    fn clear(&mut self) {
        self.pixels.fill(BLACK);
        self.sync();
    }

    fn show(&mut self) {
        self.log.lock().unwrap().frames.push(self.pixels.clone());
    }

    fn pixel_count(&self) -> u8 {
        self.pixels.len() as u8
    }
}

impl Drop for MockStrip {
    fn drop(&mut self) {
        self.log.lock().unwrap().released = true;
    }
}

pub struct MockFactory {
    logs: [Arc<Mutex<StripLog>>; 3],
}

impl StripFactory for MockFactory {
    type Strip = MockStrip;

    fn create(&mut self, group: PixelGroup, config: &StripConfig) -> MockStrip {
        let log = self.logs[group.index()].clone();
        log.lock().unwrap().config = Some(*config);
        let strip = MockStrip {
            pixels: vec![BLACK; config.pixel_count as usize],
            log,
        };
        strip.sync();
        strip
    }
}

/// Test-side view of the strips a [`MockFactory`] builds
#[derive(Default)]
pub struct Probe {
    logs: [Arc<Mutex<StripLog>>; 3],
}

impl Probe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn factory(&self) -> MockFactory {
        MockFactory {
            logs: self.logs.clone(),
        }
    }

    pub fn pixels(&self, group: PixelGroup) -> Vec<Rgb> {
        self.logs[group.index()].lock().unwrap().pixels.clone()
    }

    pub fn frames(&self, group: PixelGroup) -> Vec<Vec<Rgb>> {
        self.logs[group.index()].lock().unwrap().frames.clone()
    }

    pub fn last_frame(&self, group: PixelGroup) -> Option<Vec<Rgb>> {
        self.logs[group.index()].lock().unwrap().frames.last().cloned()
    }

    pub fn brightness(&self, group: PixelGroup) -> Option<u8> {
        self.logs[group.index()].lock().unwrap().brightness
    }

    pub fn config(&self, group: PixelGroup) -> Option<StripConfig> {
        self.logs[group.index()].lock().unwrap().config
    }

    pub fn released(&self, group: PixelGroup) -> bool {
        self.logs[group.index()].lock().unwrap().released
    }
}

/// Configure the three groups with the given pixel counts
pub async fn configure_all(groups: &Groups, counts: [u8; 3]) {
    for (group, count) in PixelGroup::ALL.into_iter().zip(counts) {
        groups
            .configure(group, &StripConfig::new(group.index() as u8 + 10, count))
            .await
            .unwrap();
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedBattery(pub u8);

impl BatterySource for FixedBattery {
    fn has_battery(&self) -> bool {
        true
    }

    fn last_battery_level(&self) -> u8 {
        self.0
    }
}

/// Notification config with short holds so tests run quickly
pub fn fast_config(bar_color: u32) -> NotificationConfig {
    let step = Duration::from_millis(10);
    NotificationConfig {
        bar_color,
        timings: AnimationTimings {
            start: step,
            bite_point: step,
            discovering: step,
            low_battery_step: step,
            save_settings_step: step,
        },
    }
}
