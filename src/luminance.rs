//! sRGB to luminance conversion for the two contrast models.
//!
//! WCAG 2 decodes each channel with the piecewise sRGB transfer function and
//! weights the linear-light channels with the Rec. 709 coefficients. APCA
//! skips the linear toe, raises the encoded value straight to 2.4, and lifts
//! near-black results with a soft clamp so the downstream power functions
//! never see a value close to zero.

use std::sync::LazyLock;

use palette::Srgb;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{ContrastError, Result};

/// Rec. 709 luminance coefficients used by WCAG 2.
const WCAG_COEF: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// sRGB D65 luminance coefficients used by APCA.
const APCA_COEF: [f64; 3] = [0.2126729, 0.7151522, 0.0721750];

/// Encoded value below which the sRGB transfer function is linear.
const SRGB_DECODE_THRESHOLD: f64 = 0.04045;
const SRGB_GAMMA: f64 = 2.4;

/// Threshold and exponent of the near-black soft clamp.
pub const BLACK_THRESHOLD: f64 = 0.022;
pub const BLACK_EXPONENT: f64 = 1.414;

fn srgb_decode(c: f64) -> f64 {
    if c < SRGB_DECODE_THRESHOLD {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(SRGB_GAMMA)
    }
}

fn power_decode(c: f64) -> f64 {
    c.powf(SRGB_GAMMA)
}

/// Piecewise sRGB decode for every 8-bit code value.
static SRGB_DECODE_LUT: LazyLock<[f64; 256]> =
    LazyLock::new(|| std::array::from_fn(|i| srgb_decode(i as f64 / 255.0)));

/// Plain 2.4 power decode for every 8-bit code value.
static POWER_DECODE_LUT: LazyLock<[f64; 256]> =
    LazyLock::new(|| std::array::from_fn(|i| power_decode(i as f64 / 255.0)));

/// Lift luminances below [`BLACK_THRESHOLD`] by `(threshold - y)^1.414`.
pub fn soft_clamp_black(y: f64) -> f64 {
    if y < BLACK_THRESHOLD {
        y + (BLACK_THRESHOLD - y).powf(BLACK_EXPONENT)
    } else {
        y
    }
}

/// Luminance as seen through additive ambient flare, rescaled so that white
/// stays at 1.
pub fn ambient_adjusted(y: f64, ambient: f64) -> f64 {
    (y + ambient) / (1.0 + ambient)
}

fn weighted(coef: &[f64; 3], [r, g, b]: [f64; 3]) -> f64 {
    coef[0] * r + coef[1] * g + coef[2] * b
}

/// Relative luminance per WCAG 2.x, in [0, 1].
pub fn wcag_luminance(color: Color) -> f64 {
    let lut = &*SRGB_DECODE_LUT;
    weighted(&WCAG_COEF, color.channels().map(|c| lut[c as usize]))
}

/// APCA screen luminance, never below `0.022^1.414`.
pub fn apca_luminance(color: Color) -> f64 {
    let lut = &*POWER_DECODE_LUT;
    soft_clamp_black(weighted(
        &APCA_COEF,
        color.channels().map(|c| lut[c as usize]),
    ))
}

/// Which luminance conversion a metric builds on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LuminanceModel {
    /// Piecewise sRGB decode, Rec. 709 weights.
    Wcag,
    /// Plain 2.4 power decode, high-precision weights, near-black soft clamp.
    Apca,
}

impl LuminanceModel {
    pub fn luminance(self, color: Color) -> f64 {
        match self {
            Self::Wcag => wcag_luminance(color),
            Self::Apca => apca_luminance(color),
        }
    }

    /// Luminance of a color with fractional channels in [0, 1], e.g. the
    /// result of alpha compositing.
    pub fn luminance_normalized(self, color: Srgb<f64>) -> Result<f64> {
        let channels = [color.red, color.green, color.blue];
        if channels.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(ContrastError::InvalidColor(format!(
                "normalized channels {channels:?} are outside [0, 1]"
            )));
        }
        Ok(match self {
            Self::Wcag => weighted(&WCAG_COEF, channels.map(srgb_decode)),
            Self::Apca => soft_clamp_black(weighted(&APCA_COEF, channels.map(power_decode))),
        })
    }

    /// Luminance of every color, in input order.
    pub fn luminances(self, colors: &[Color]) -> Vec<f64> {
        colors.par_iter().map(|&c| self.luminance(c)).collect()
    }

    /// The smallest luminance this model can produce.
    pub fn floor(self) -> f64 {
        match self {
            Self::Wcag => 0.0,
            Self::Apca => BLACK_THRESHOLD.powf(BLACK_EXPONENT),
        }
    }
}
