mod battery;

pub use battery::battery_gradient;
use smart_leds::RGB8;

pub type Rgb = RGB8;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
/// Neutral idle color shown at startup when there is no battery
pub const GRAY: Rgb = Rgb { r: 85, g: 85, b: 85 };
/// Bite point bar
pub const DARK_YELLOW: Rgb = Rgb { r: 85, g: 85, b: 0 };
/// Bluetooth discovery
pub const PURPLE: Rgb = Rgb { r: 85, g: 0, b: 85 };
/// Settings saved
pub const DIM_GREEN: Rgb = Rgb { r: 0, g: 85, b: 0 };
/// Low battery, even pixels
pub const DIM_RED: Rgb = Rgb { r: 127, g: 0, b: 0 };
/// Low battery, odd pixels
pub const DIM_BLUE: Rgb = Rgb { r: 0, g: 0, b: 127 };

/// Create an RGB color from a u32 value (0xRRGGBB format)
///
/// Blue is the low byte, red the high byte. The top byte is ignored.
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}
