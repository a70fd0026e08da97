//! Packing of RGB channels into 24-bit color codes

use crate::io::configuration::MAX_PACKED_COLOR;

/// Combine three channels into `(r << 16) | (g << 8) | b`
pub const fn pack(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Split a packed color into its channels
///
/// Values above the 24-bit range are clamped to white first, so the result is
/// always a valid RGB triplet.
pub const fn unpack(color: u32) -> [u8; 3] {
    let color = if color > MAX_PACKED_COLOR {
        MAX_PACKED_COLOR
    } else {
        color
    };
    [
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
    ]
}

/// Round and clamp a perturbed channel value into `[0, 255]`
pub fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

/// Pack a row-major RGB byte buffer into one color per pixel
///
/// Trailing bytes that do not form a full triplet are ignored.
pub fn pack_rgb_bytes(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(3)
        .map(|rgb| match *rgb {
            [r, g, b] => pack(r, g, b),
            _ => 0,
        })
        .collect()
}

/// Expand packed colors back into a row-major RGB byte buffer
pub fn unpack_to_rgb_bytes(colors: &[u32]) -> Vec<u8> {
    colors.iter().flat_map(|&color| unpack(color)).collect()
}
