//! Pixel group registry
//!
//! Owns the strip of every configured group behind a single gate. Runtime
//! pixel commands wait at most [`LOCK_TIMEOUT`] for the gate and are dropped
//! when it stays busy. Shutdown waits as long as it takes.
//!
//! The gate covers the whole registry, not one strip: notification
//! animations write to all groups and must not interleave with anything.

use core::cell::Cell;
use core::ops::{Deref, DerefMut};

use embassy_sync::{
    blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex},
    mutex::{Mutex, MutexGuard},
    signal::Signal,
};
use embassy_time::{Duration, with_timeout};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    color::{BLACK, Rgb},
    error::{Error, Result},
    group::{GROUP_COUNT, PixelGroup},
    strip::{StripConfig, StripDriver, StripFactory},
};

/// Longest wait for the gate before a pixel command is dropped
pub const LOCK_TIMEOUT: Duration = Duration::from_millis(80);

/// What happened to a pixel command.
///
/// Callers are free to ignore it: a skipped command is not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The command ran
    Applied,
    /// The gate stayed busy past [`LOCK_TIMEOUT`]
    Busy,
    /// The target group has no strip
    Unconfigured,
}

enum Slot<S> {
    Vacant,
    Active(S),
    /// Torn down at shutdown; never reopened
    Released,
}

/// Strips of all groups, reachable only while the gate is held.
///
/// Nothing here touches the gate, so a handler can chain as many writes and
/// flushes as it needs inside one acquisition.
pub struct Strips<S> {
    slots: [Slot<S>; GROUP_COUNT],
}

impl<S: StripDriver> Strips<S> {
    const fn new() -> Self {
        Self {
            slots: [Slot::Vacant, Slot::Vacant, Slot::Vacant],
        }
    }

    fn strip_mut(&mut self, group: PixelGroup) -> Option<&mut S> {
        match &mut self.slots[group.index()] {
            Slot::Active(strip) => Some(strip),
            Slot::Vacant | Slot::Released => None,
        }
    }

    fn apply(&mut self, group: PixelGroup, op: impl FnOnce(&mut S)) -> Outcome {
        match self.strip_mut(group) {
            Some(strip) => {
                op(strip);
                Outcome::Applied
            }
            None => Outcome::Unconfigured,
        }
    }

    fn strips_mut(&mut self) -> impl Iterator<Item = &mut S> {
        self.slots.iter_mut().filter_map(|slot| match slot {
            Slot::Active(strip) => Some(strip),
            Slot::Vacant | Slot::Released => None,
        })
    }

    /// Pixel count of `group`, 0 when unconfigured
    pub fn count(&self, group: PixelGroup) -> u8 {
        match &self.slots[group.index()] {
            Slot::Active(strip) => strip.pixel_count(),
            Slot::Vacant | Slot::Released => 0,
        }
    }

    /// Paint one pixel; out-of-range indices are ignored by the strip
    pub fn set(&mut self, group: PixelGroup, index: u8, color: Rgb) -> Outcome {
        self.apply(group, |strip| strip.pixel_rgb(index, color))
    }

    /// Paint the whole group with one color
    pub fn set_all(&mut self, group: PixelGroup, color: Rgb) -> Outcome {
        self.apply(group, |strip| fill_strip(strip, color))
    }

    /// Rotate the group one pixel towards the end, wrapping around
    pub fn shift_to_next(&mut self, group: PixelGroup) -> Outcome {
        self.apply(group, |strip| strip.shift_to_next())
    }

    /// Rotate the group one pixel towards the start, wrapping around
    pub fn shift_to_previous(&mut self, group: PixelGroup) -> Outcome {
        self.apply(group, |strip| strip.shift_to_previous())
    }

    /// Paint every configured group with one color, without flushing
    pub fn fill(&mut self, color: Rgb) {
        for group in PixelGroup::ALL {
            self.set_all(group, color);
        }
    }

    /// Flush every configured group
    pub fn show(&mut self) {
        for strip in self.strips_mut() {
            strip.show();
        }
    }

    /// Turn every configured group black and flush
    pub fn reset(&mut self) {
        for group in PixelGroup::ALL {
            self.set_all(group, BLACK);
        }
        self.show();
    }

    /// Clear, flush and drop every strip
    fn release(&mut self) {
        for slot in &mut self.slots {
            if let Slot::Active(strip) = slot {
                strip.clear();
                strip.show();
                *slot = Slot::Released;
            }
        }
    }
}

/// Ranged write over the whole addressable span
fn fill_strip<S: StripDriver>(strip: &mut S, color: Rgb) {
    let count = strip.pixel_count();
    if count > 0 {
        strip.pixel_range_rgb(0, count - 1, color);
    }
}

struct Registry<F: StripFactory> {
    factory: F,
    strips: Strips<F::Strip>,
}

/// Registry of the device's pixel groups and the gate guarding it.
///
/// Created empty; each group becomes usable after one [`configure`] call.
///
/// [`configure`]: PixelGroups::configure
pub struct PixelGroups<F: StripFactory, M: RawMutex = CriticalSectionRawMutex> {
    gate: Mutex<M, Registry<F>>,
    /// Pixel count per configured group, readable without the gate
    counts: critical_section::Mutex<Cell<[Option<u8>; GROUP_COUNT]>>,
}

impl<F: StripFactory, M: RawMutex> PixelGroups<F, M> {
    /// Create a registry with no configured groups
    pub const fn new(factory: F) -> Self {
        Self {
            gate: Mutex::new(Registry {
                factory,
                strips: Strips::new(),
            }),
            counts: critical_section::Mutex::new(Cell::new([None; GROUP_COUNT])),
        }
    }

    /// Build the strip of `group` and set its brightness.
    ///
    /// Meant to run once per group at startup. Configuring a group twice is a
    /// wiring error and returns [`Error::AlreadyConfigured`], which firmware
    /// should treat as fatal.
    pub async fn configure(&self, group: PixelGroup, config: &StripConfig) -> Result<()> {
        let mut registry = self.gate.lock().await;
        let registry = &mut *registry;
        let slot = &mut registry.strips.slots[group.index()];
        if !matches!(slot, Slot::Vacant) {
            return Err(Error::AlreadyConfigured(group));
        }

        let mut strip = registry.factory.create(group, config);
        strip.set_brightness(config.brightness);
        let count = strip.pixel_count();
        *slot = Slot::Active(strip);
        self.record_count(group, Some(count));

        #[cfg(feature = "esp32-log")]
        println!(
            "[PixelGroups.configure] {} group on pin {} with {} pixels",
            group.as_str(),
            config.data_pin,
            count
        );
        Ok(())
    }

    /// Pixel count of `group`, 0 if it was never configured.
    ///
    /// Never waits on the gate.
    pub fn count(&self, group: PixelGroup) -> u8 {
        self.recorded_count(group).unwrap_or(0)
    }

    /// Whether `group` has a strip. Never waits on the gate.
    pub fn is_configured(&self, group: PixelGroup) -> bool {
        self.recorded_count(group).is_some()
    }

    /// Acquire the gate, waiting at most [`LOCK_TIMEOUT`].
    ///
    /// Returns `None` when the gate stays busy.
    pub async fn lock(&self) -> Option<PixelGroupsGuard<'_, F, M>> {
        with_timeout(LOCK_TIMEOUT, self.gate.lock())
            .await
            .ok()
            .map(|guard| PixelGroupsGuard { guard })
    }

    async fn with_group(&self, group: PixelGroup, op: impl FnOnce(&mut F::Strip)) -> Outcome {
        if !self.is_configured(group) {
            return Outcome::Unconfigured;
        }
        match self.lock().await {
            Some(mut strips) => strips.apply(group, op),
            None => Outcome::Busy,
        }
    }

    /// Paint one pixel of `group`
    pub async fn set(&self, group: PixelGroup, index: u8, color: Rgb) -> Outcome {
        self.with_group(group, |strip| strip.pixel_rgb(index, color)).await
    }

    /// Paint the whole group with one color
    pub async fn set_all(&self, group: PixelGroup, color: Rgb) -> Outcome {
        self.with_group(group, |strip| fill_strip(strip, color)).await
    }

    /// Rotate `group` one pixel towards the end
    pub async fn shift_to_next(&self, group: PixelGroup) -> Outcome {
        self.with_group(group, |strip| strip.shift_to_next()).await
    }

    /// Rotate `group` one pixel towards the start
    pub async fn shift_to_previous(&self, group: PixelGroup) -> Outcome {
        self.with_group(group, |strip| strip.shift_to_previous()).await
    }

    /// Turn every configured group black and flush
    pub async fn reset(&self) -> Outcome {
        match self.lock().await {
            Some(mut strips) => {
                strips.reset();
                Outcome::Applied
            }
            None => Outcome::Busy,
        }
    }

    /// Flush every configured group
    pub async fn show(&self) -> Outcome {
        match self.lock().await {
            Some(mut strips) => {
                strips.show();
                Outcome::Applied
            }
            None => Outcome::Busy,
        }
    }

    /// Leave every strip dark and release it.
    ///
    /// Waits for the gate without a timeout: running animations finish first,
    /// then the LEDs are cleared no matter what.
    pub async fn shutdown(&self) {
        let mut registry = self.gate.lock().await;
        registry.strips.release();
        critical_section::with(|cs| self.counts.borrow(cs).set([None; GROUP_COUNT]));

        #[cfg(feature = "esp32-log")]
        println!("[PixelGroups.shutdown] all pixel groups released");
    }

    /// Park until `shutdown` is signaled, then run [`shutdown`].
    ///
    /// Spawn this once at startup next to the other long-running tasks.
    ///
    /// [`shutdown`]: PixelGroups::shutdown
    pub async fn shutdown_on<SM: RawMutex>(&self, shutdown: &Signal<SM, ()>) {
        shutdown.wait().await;
        self.shutdown().await;
    }

    fn recorded_count(&self, group: PixelGroup) -> Option<u8> {
        critical_section::with(|cs| self.counts.borrow(cs).get()[group.index()])
    }

    fn record_count(&self, group: PixelGroup, count: Option<u8>) {
        critical_section::with(|cs| {
            let cell = self.counts.borrow(cs);
            let mut counts = cell.get();
            counts[group.index()] = count;
            cell.set(counts);
        });
    }
}

/// Proof that the gate is held.
///
/// Derefs to [`Strips`]; the gate opens again when the guard is dropped.
pub struct PixelGroupsGuard<'a, F: StripFactory, M: RawMutex> {
    guard: MutexGuard<'a, M, Registry<F>>,
}

impl<F: StripFactory, M: RawMutex> Deref for PixelGroupsGuard<'_, F, M> {
    type Target = Strips<F::Strip>;

    fn deref(&self) -> &Self::Target {
        &self.guard.strips
    }
}

impl<F: StripFactory, M: RawMutex> DerefMut for PixelGroupsGuard<'_, F, M> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard.strips
    }
}
