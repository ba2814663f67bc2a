//! RGB colors and the 15-bit STL color encoding

use crate::error::{Error, Result};

/// An RGB color with channels in `[0, 1]`
///
/// Alpha is not carried; the export format has no room for it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red channel
    pub r: f64,
    /// Green channel
    pub g: f64,
    /// Blue channel
    pub b: f64,
}

impl Color {
    /// Pure white
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Create a color, clamping each channel into `[0, 1]` (NaN becomes 0)
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: clamp_unit(r),
            g: clamp_unit(g),
            b: clamp_unit(b),
        }
    }

    /// Create a color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Parse `#rrggbb`, `rrggbb` or the short `#rgb` form
    ///
    /// # Example
    /// ```
    /// use studio3d::Color;
    /// let slate = Color::from_hex("#475569").unwrap();
    /// assert_eq!(slate.to_hex(), "#475569");
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(hex.to_string()));
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| Error::InvalidColor(hex.to_string()));
        match digits.len() {
            6 => Ok(Self::from_rgb8(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Self::from_rgb8(r * 17, g * 17, b * 17))
            }
            _ => Err(Error::InvalidColor(hex.to_string())),
        }
    }

    /// Format as lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Channels rounded to 8 bits
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
        ]
    }

    /// Pack into the 15-bit BGR attribute word used by colored binary STL
    ///
    /// Each channel becomes `round(c * 31) & 0x1F`; the word is
    /// `0x8000 | (B << 10) | (G << 5) | R`.
    pub fn to_stl_color(&self) -> u16 {
        let r = quantize5(self.r);
        let g = quantize5(self.g);
        let b = quantize5(self.b);
        0x8000 | (b << 10) | (g << 5) | r
    }

    /// Decode a 15-bit BGR attribute word, or `None` when the color bit is clear
    pub fn from_stl_color(word: u16) -> Option<Self> {
        if word & 0x8000 == 0 {
            return None;
        }
        let r = (word & 0x1F) as f64 / 31.0;
        let g = ((word >> 5) & 0x1F) as f64 / 31.0;
        let b = ((word >> 10) & 0x1F) as f64 / 31.0;
        Some(Self::new(r, g, b))
    }
}

impl std::str::FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

fn quantize5(channel: f64) -> u16 {
    ((clamp_unit(channel) * 31.0).round() as u16) & 0x1F
}
