//! Notification rendering
//!
//! Turns device events into short color animations on the pixel groups.
//!
//! Every handler takes the gate once, with the bounded wait, and keeps it
//! for the whole animation including the holds between steps. If the gate is
//! busy the event is dropped; nothing is queued or retried. Once started, an
//! animation always runs to the end.

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_time::{Duration, Timer};

use crate::{
    color::{
        BLACK, DARK_YELLOW, DIM_BLUE, DIM_GREEN, DIM_RED, GRAY, PURPLE, Rgb, battery_gradient,
        rgb_from_u32,
    },
    group::PixelGroup,
    math8::{ceil_div, percent_of},
    registry::{Outcome, PixelGroups, Strips},
    strip::{StripDriver, StripFactory},
};

/// Clutch position reported as fully engaged
pub const CLUTCH_FULL_VALUE: u8 = 254;

/// Number of rotation steps of the low battery animation
const LOW_BATTERY_STEPS: usize = 5;

/// Battery telemetry consulted at startup.
pub trait BatterySource {
    fn has_battery(&self) -> bool;

    /// Last measured state of charge (0-100 %)
    fn last_battery_level(&self) -> u8;
}

/// Battery source of a wired device
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBattery;

impl BatterySource for NoBattery {
    fn has_battery(&self) -> bool {
        false
    }

    fn last_battery_level(&self) -> u8 {
        0
    }
}

/// How a battery level is drawn on a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryStyle {
    /// Whole group in one color, red when empty and green when full
    Gradient,
    /// First `soc %` of the pixels in a packed `0xRRGGBB` color.
    /// The remaining pixels are left untouched.
    Bar(u32),
}

/// Hold times of the built-in animations
#[derive(Debug, Clone, Copy)]
pub struct AnimationTimings {
    /// How long the startup colors stay on
    pub start: Duration,
    /// How long the bite point bar stays on
    pub bite_point: Duration,
    /// How long the discovery color stays on
    pub discovering: Duration,
    /// Delay between low battery rotation steps
    pub low_battery_step: Duration,
    /// Length of each save settings flash
    pub save_settings_step: Duration,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            start: Duration::from_millis(1500),
            bite_point: Duration::from_millis(250),
            discovering: Duration::from_millis(250),
            low_battery_step: Duration::from_millis(200),
            save_settings_step: Duration::from_millis(150),
        }
    }
}

/// Configuration for the notification renderer
#[derive(Debug, Clone, Copy)]
pub struct NotificationConfig {
    /// Packed `0xRRGGBB` color of the telemetry battery bar
    pub bar_color: u32,
    pub timings: AnimationTimings,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            bar_color: 0x00_FF_00,
            timings: AnimationTimings::default(),
        }
    }
}

/// Draw a state of charge on `group`. Does not flush.
pub fn render_battery_level<S: StripDriver>(
    strips: &mut Strips<S>,
    group: PixelGroup,
    style: BatteryStyle,
    soc: u8,
) {
    match style {
        BatteryStyle::Gradient => {
            strips.set_all(group, battery_gradient(soc));
        }
        BatteryStyle::Bar(bar_color) => {
            let color = rgb_from_u32(bar_color);
            let lit = percent_of(strips.count(group), soc);
            for index in 0..lit {
                strips.set(group, index, color);
            }
        }
    }
}

/// Number of telemetry pixels lit for a bite point, rounded up so that any
/// non-zero value lights at least one pixel.
#[allow(clippy::cast_possible_truncation)]
pub const fn bite_point_lit_count(value: u8, pixel_count: u8) -> u8 {
    let value = if value > CLUTCH_FULL_VALUE {
        CLUTCH_FULL_VALUE
    } else {
        value
    };
    ceil_div(value as u16 * pixel_count as u16, CLUTCH_FULL_VALUE as u16) as u8
}

/// Renders device notifications on a [`PixelGroups`] registry.
pub struct PixelNotifier<'a, F, B, M = CriticalSectionRawMutex>
where
    F: StripFactory,
    B: BatterySource,
    M: RawMutex,
{
    groups: &'a PixelGroups<F, M>,
    battery: B,
    config: NotificationConfig,
}

impl<'a, F, B, M> PixelNotifier<'a, F, B, M>
where
    F: StripFactory,
    B: BatterySource,
    M: RawMutex,
{
    /// Create a notifier drawing on `groups`
    pub const fn new(groups: &'a PixelGroups<F, M>, battery: B, config: NotificationConfig) -> Self {
        Self {
            groups,
            battery,
            config,
        }
    }

    /// Device powered up: show the battery level, or gray without a battery
    pub async fn on_start(&self) -> Outcome {
        let Some(mut strips) = self.groups.lock().await else {
            return Outcome::Busy;
        };
        self.render_start(&mut strips).await;
        Outcome::Applied
    }

    /// Clutch bite point calibration, `value` in `0..=CLUTCH_FULL_VALUE`
    pub async fn on_bite_point(&self, value: u8) -> Outcome {
        let Some(mut strips) = self.groups.lock().await else {
            return Outcome::Busy;
        };
        self.render_bite_point(&mut strips, value).await;
        Outcome::Applied
    }

    /// Host connected: everything dark
    pub async fn on_connected(&self) -> Outcome {
        let Some(mut strips) = self.groups.lock().await else {
            return Outcome::Busy;
        };
        strips.reset();
        Outcome::Applied
    }

    /// Bluetooth pairing mode
    pub async fn on_ble_discovering(&self) -> Outcome {
        let Some(mut strips) = self.groups.lock().await else {
            return Outcome::Busy;
        };
        self.render_discovering(&mut strips).await;
        Outcome::Applied
    }

    /// Battery running low: red and blue rotating on every group, then dark
    pub async fn on_low_battery(&self) -> Outcome {
        let Some(mut strips) = self.groups.lock().await else {
            return Outcome::Busy;
        };
        self.render_low_battery(&mut strips).await;
        Outcome::Applied
    }

    /// Settings stored: two dim green flashes
    pub async fn on_save_settings(&self) -> Outcome {
        let Some(mut strips) = self.groups.lock().await else {
            return Outcome::Busy;
        };
        self.render_save_settings(&mut strips).await;
        Outcome::Applied
    }

    /// Paint one pixel, see [`PixelGroups::set`]
    pub async fn set(&self, group: PixelGroup, index: u8, color: Rgb) -> Outcome {
        self.groups.set(group, index, color).await
    }

    /// Paint a whole group, see [`PixelGroups::set_all`]
    pub async fn set_all(&self, group: PixelGroup, color: Rgb) -> Outcome {
        self.groups.set_all(group, color).await
    }

    /// Rotate a group forwards, see [`PixelGroups::shift_to_next`]
    pub async fn shift_to_next(&self, group: PixelGroup) -> Outcome {
        self.groups.shift_to_next(group).await
    }

    /// Rotate a group backwards, see [`PixelGroups::shift_to_previous`]
    pub async fn shift_to_previous(&self, group: PixelGroup) -> Outcome {
        self.groups.shift_to_previous(group).await
    }

    async fn render_start(&self, strips: &mut Strips<F::Strip>) {
        if self.battery.has_battery() {
            let soc = self.battery.last_battery_level();
            let bar = BatteryStyle::Bar(self.config.bar_color);
            render_battery_level(strips, PixelGroup::Telemetry, bar, soc);
            render_battery_level(strips, PixelGroup::Buttons, BatteryStyle::Gradient, soc);
            render_battery_level(strips, PixelGroup::Individual, BatteryStyle::Gradient, soc);
        } else {
            strips.fill(GRAY);
        }
        strips.show();
        Timer::after(self.config.timings.start).await;
    }

    async fn render_bite_point(&self, strips: &mut Strips<F::Strip>, value: u8) {
        let lit = bite_point_lit_count(value, strips.count(PixelGroup::Telemetry));
        strips.fill(BLACK);
        for index in 0..lit {
            strips.set(PixelGroup::Telemetry, index, DARK_YELLOW);
        }
        strips.show();
        Timer::after(self.config.timings.bite_point).await;
        strips.set_all(PixelGroup::Telemetry, BLACK);
        strips.show();
    }

    async fn render_discovering(&self, strips: &mut Strips<F::Strip>) {
        strips.fill(PURPLE);
        strips.show();
        Timer::after(self.config.timings.discovering).await;
    }

    async fn render_low_battery(&self, strips: &mut Strips<F::Strip>) {
        let step = self.config.timings.low_battery_step;

        for group in PixelGroup::ALL {
            for index in 0..strips.count(group) {
                let color = if index % 2 == 0 { DIM_RED } else { DIM_BLUE };
                strips.set(group, index, color);
            }
        }
        strips.show();

        for _ in 0..LOW_BATTERY_STEPS {
            Timer::after(step).await;
            for group in PixelGroup::ALL {
                strips.shift_to_next(group);
            }
            strips.show();
        }

        Timer::after(step).await;
        strips.fill(BLACK);
        strips.show();
    }

    async fn render_save_settings(&self, strips: &mut Strips<F::Strip>) {
        let step = self.config.timings.save_settings_step;

        strips.fill(DIM_GREEN);
        strips.show();
        Timer::after(step).await;
        strips.reset();
        Timer::after(step).await;

        strips.fill(DIM_GREEN);
        strips.show();
        Timer::after(step).await;
        strips.reset();
    }
}
