//! sRGB colors, foreground/background pairs and alpha compositing.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;

use crate::error::{ContrastError, Result};

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

pub const BLACK: Color = Color::new(0, 0, 0);
pub const WHITE: Color = Color::new(255, 255, 255);

/// Check one channel and narrow it to `u8`.
fn channel(name: &str, value: f64) -> Result<u8> {
    if !value.is_finite() || value.fract() != 0.0 || !(0.0..=255.0).contains(&value) {
        return Err(ContrastError::InvalidColor(format!(
            "{name} channel {value} is not an integer in [0, 255]"
        )));
    }
    Ok(value as u8)
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Build a color from wider integers, rejecting channels outside [0, 255].
    pub fn try_new(red: i64, green: i64, blue: i64) -> Result<Self> {
        Self::try_from([red as f64, green as f64, blue as f64])
    }

    pub fn channels(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Channels scaled to [0, 1].
    pub fn normalized(self) -> Srgb<f64> {
        self.to_srgb().into_format::<f64>()
    }

    pub fn to_srgb(self) -> Srgb<u8> {
        Srgb::new(self.red, self.green, self.blue)
    }
}

impl From<Srgb<u8>> for Color {
    fn from(color: Srgb<u8>) -> Self {
        Self::new(color.red, color.green, color.blue)
    }
}

impl From<[u8; 3]> for Color {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl TryFrom<[f64; 3]> for Color {
    type Error = ContrastError;

    fn try_from([red, green, blue]: [f64; 3]) -> Result<Self> {
        Ok(Self::new(
            channel("red", red)?,
            channel("green", green)?,
            channel("blue", blue)?,
        ))
    }
}

impl TryFrom<[i64; 3]> for Color {
    type Error = ContrastError;

    fn try_from([red, green, blue]: [i64; 3]) -> Result<Self> {
        Self::try_new(red, green, blue)
    }
}

impl FromStr for Color {
    type Err = ContrastError;

    /// Parse any CSS color syntax. Translucent colors are rejected; use
    /// [`TranslucentColor`] for those.
    fn from_str(s: &str) -> Result<Self> {
        let parsed = TranslucentColor::from_str(s)?;
        if parsed.alpha < 1.0 {
            return Err(ContrastError::InvalidColor(format!(
                "'{s}' is translucent (alpha {:.3})",
                parsed.alpha
            )));
        }
        Ok(parsed.color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// A color with coverage in [0, 1], composited in gamma-encoded space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslucentColor {
    pub color: Color,
    pub alpha: f64,
}

impl TranslucentColor {
    pub fn new(color: Color, alpha: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(ContrastError::InvalidColor(format!(
                "alpha {alpha} is outside [0, 1]"
            )));
        }
        Ok(Self { color, alpha })
    }

    pub fn opaque(color: Color) -> Self {
        Self { color, alpha: 1.0 }
    }

    /// Composite this color over an opaque backdrop given in [0, 1] channels.
    pub fn over(&self, backdrop: Srgb<f64>) -> Srgb<f64> {
        let src = self.color.normalized();
        let mix = |s: f64, d: f64| s * self.alpha + d * (1.0 - self.alpha);
        Srgb::new(
            mix(src.red, backdrop.red),
            mix(src.green, backdrop.green),
            mix(src.blue, backdrop.blue),
        )
    }
}

impl From<Color> for TranslucentColor {
    fn from(color: Color) -> Self {
        Self::opaque(color)
    }
}

impl FromStr for TranslucentColor {
    type Err = ContrastError;

    fn from_str(s: &str) -> Result<Self> {
        let parsed = s
            .trim()
            .parse::<csscolorparser::Color>()
            .map_err(|e| ContrastError::InvalidColor(format!("'{s}': {e}")))?;
        let [red, green, blue, _] = parsed.to_rgba8();
        Self::new(
            Color::new(red, green, blue),
            f64::from(parsed.a).clamp(0.0, 1.0),
        )
    }
}

/// A foreground (text) color drawn on a background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorPair {
    pub foreground: Color,
    pub background: Color,
}

impl ColorPair {
    pub const fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
        }
    }

    /// The same two colors with the roles exchanged.
    pub const fn swapped(self) -> Self {
        Self::new(self.background, self.foreground)
    }
}

impl FromStr for ColorPair {
    type Err = ContrastError;

    /// Parse `"<fg> on <bg>"`, e.g. `"#767676 on white"`.
    fn from_str(s: &str) -> Result<Self> {
        let (fg, bg) = s.split_once(" on ").ok_or_else(|| {
            ContrastError::InvalidColor(format!("'{s}' is not of the form '<fg> on <bg>'"))
        })?;
        Ok(Self::new(fg.parse()?, bg.parse()?))
    }
}

impl fmt::Display for ColorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.foreground, self.background)
    }
}
