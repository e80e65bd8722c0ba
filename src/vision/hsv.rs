//! Hue/saturation/value color space and the target color box.
//!
//! All three channels use the full 8-bit range: hue 0..=255 covers the
//! whole color wheel, so one hue step is 360/256 degrees.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// One pixel in HSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self { Self { h, s, v } }

    /// Converts an RGB pixel.
    pub fn from_rgb(color: Rgb888) -> Self {
        let (r, g, b) = (color.r() as i32, color.g() as i32, color.b() as i32);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let s = if max == 0 { 0 } else { (255 * delta + max / 2) / max };
        let h = if delta == 0 {
            0
        } else {
            let delta = delta as f32;
            let sector = if max == r {
                (g - b) as f32 / delta
            } else if max == g {
                2.0 + (b - r) as f32 / delta
            } else {
                4.0 + (r - g) as f32 / delta
            };
            let turn = (sector / 6.0).rem_euclid(1.0);
            ((turn * 256.0) as i32).min(255)
        };

        Self::new(h as u8, s as u8, max as u8)
    }
}

impl From<Rgb888> for Hsv {
    fn from(color: Rgb888) -> Self { Self::from_rgb(color) }
}

/// An inclusive `[low, high]` range on one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRange {
    pub low:  u8,
    pub high: u8,
}

impl ChannelRange {
    pub const fn new(low: u8, high: u8) -> Self { Self { low, high } }

    pub fn contains(&self, value: u8) -> bool { self.low <= value && value <= self.high }
}

/// An HSV acceptance box: a pixel is in when all three channels are within
/// their ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvThreshold {
    pub hue:        ChannelRange,
    pub saturation: ChannelRange,
    pub value:      ChannelRange,
}

impl HsvThreshold {
    pub const fn new(hue: ChannelRange, saturation: ChannelRange, value: ChannelRange) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    pub fn contains(&self, hsv: Hsv) -> bool {
        self.hue.contains(hsv.h) && self.saturation.contains(hsv.s) && self.value.contains(hsv.v)
    }

    pub fn accepts(&self, color: Rgb888) -> bool { self.contains(Hsv::from_rgb(color)) }
}
