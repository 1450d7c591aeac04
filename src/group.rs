//! Pixel group identifiers
//!
//! A device carries at most three independently addressable LED groups.
//! The set is fixed at compile time.

const GROUP_NAME_TELEMETRY: &str = "telemetry";
const GROUP_NAME_BUTTONS: &str = "buttons";
const GROUP_NAME_INDIVIDUAL: &str = "individual";

const GROUP_ID_TELEMETRY: u8 = 0;
const GROUP_ID_BUTTONS: u8 = 1;
const GROUP_ID_INDIVIDUAL: u8 = 2;

/// Number of pixel groups a device can have
pub const GROUP_COUNT: usize = 3;

/// One of the LED groups attached to the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PixelGroup {
    /// Telemetry bar (rev lights, flags, percentage bars)
    Telemetry = GROUP_ID_TELEMETRY,
    /// Backlight of the push buttons
    Buttons = GROUP_ID_BUTTONS,
    /// Individually wired pixels
    Individual = GROUP_ID_INDIVIDUAL,
}

impl PixelGroup {
    /// All groups in index order
    pub const ALL: [Self; GROUP_COUNT] = [Self::Telemetry, Self::Buttons, Self::Individual];

    /// Slot index of this group
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            GROUP_ID_TELEMETRY => Self::Telemetry,
            GROUP_ID_BUTTONS => Self::Buttons,
            GROUP_ID_INDIVIDUAL => Self::Individual,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Telemetry => GROUP_NAME_TELEMETRY,
            Self::Buttons => GROUP_NAME_BUTTONS,
            Self::Individual => GROUP_NAME_INDIVIDUAL,
        }
    }
}
