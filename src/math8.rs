/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Integer division rounding up. `divisor` must not be zero.
#[inline]
pub const fn ceil_div(dividend: u16, divisor: u16) -> u16 {
    dividend.div_ceil(divisor)
}

/// Number of pixels covered by `percent` of `count`, rounded down.
///
/// `percent` above 100 is treated as 100.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn percent_of(count: u8, percent: u8) -> u8 {
    let percent = if percent > 100 { 100 } else { percent };
    ((percent as u16 * count as u16) / 100) as u8
}
