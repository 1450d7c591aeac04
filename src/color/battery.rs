use crate::color::Rgb;

/// Red-to-green color for a state of charge (0-100 %).
///
/// `green = 255 * soc / 100` with integer division and `red = 255 - green`,
/// so 50 % renders as `(128, 127, 0)`. Values above 100 are treated as 100.
#[allow(clippy::cast_possible_truncation)]
pub const fn battery_gradient(soc: u8) -> Rgb {
    let soc = if soc > 100 { 100 } else { soc };
    let green = ((255 * soc as u16) / 100) as u8;
    Rgb {
        r: 255 - green,
        g: green,
        b: 0,
    }
}
