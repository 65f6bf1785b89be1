//! The two contrast formulas behind one [`Metric`] interface.
//!
//! WCAG 2 compares flare-adjusted luminances as a ratio. The ratio is folded
//! so it never drops below 1 and then raised to an exponent that keeps the
//! black-on-white extreme at 21 for any ambient level.
//!
//! APCA raises both luminances to polarity-dependent exponents and subtracts
//! them. Small differences fall into a dead zone and the remainder is pulled
//! toward zero by a fixed offset before scaling to the Lc range (roughly
//! -108 to +106).

use palette::Srgb;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::color::{ColorPair, TranslucentColor};
use crate::error::{ContrastError, Result};
use crate::levels::ThresholdSet;
use crate::luminance::{LuminanceModel, ambient_adjusted};

/// WCAG 2 ambient flare as published.
pub const WCAG_AMBIENT: f64 = 0.05;

/// Ratio assigned to black on white, independent of ambient.
const WCAG_MAX_RATIO: f64 = 21.0;

/// APCA output scale and soft-clip constants.
const APCA_SCALE: f64 = 1.14;
const APCA_OFFSET: f64 = 0.027;
const APCA_CLIP: f64 = 0.1;

/// Exponents for a background lighter than the text (dark on light).
const EXP_BG_LIGHT: f64 = 0.56;
const EXP_FG_LIGHT: f64 = 0.57;

/// Exponents for a background darker than the text (light on dark).
const EXP_BG_DARK: f64 = 0.65;
const EXP_FG_DARK: f64 = 0.62;

/// Polarity exponents as `(foreground, background)`.
pub(crate) fn apca_exponents(y_fg: f64, y_bg: f64) -> (f64, f64) {
    if y_bg > y_fg {
        (EXP_FG_LIGHT, EXP_BG_LIGHT)
    } else {
        (EXP_FG_DARK, EXP_BG_DARK)
    }
}

/// Exponent `log_{(1 + ambient) / ambient}(21)` that maps the largest
/// possible ratio at this ambient level onto 21.
pub fn wcag_exponent(ambient: f64) -> f64 {
    WCAG_MAX_RATIO.ln() / ((1.0 + ambient) / ambient).ln()
}

/// Background over foreground ratio of flare-adjusted luminances, before
/// folding. Values below 1 mean the text is lighter than its background.
pub fn wcag_directional(y_fg: f64, y_bg: f64, ambient: f64) -> f64 {
    let ratio = ambient_adjusted(y_bg, ambient) / ambient_adjusted(y_fg, ambient);
    ratio.powf(wcag_exponent(ambient))
}

/// WCAG contrast ratio, always at least 1 and symmetric in its arguments.
pub fn wcag_contrast(y_fg: f64, y_bg: f64, ambient: f64) -> f64 {
    let ratio = ambient_adjusted(y_bg, ambient) / ambient_adjusted(y_fg, ambient);
    let ratio = if ratio < 1.0 { 1.0 / ratio } else { ratio };
    ratio.powf(wcag_exponent(ambient))
}

/// Raw APCA difference `(Ybg' - Yfg') * 1.14`, before the dead zone.
pub fn apca_raw(y_fg: f64, y_bg: f64) -> f64 {
    let (exp_fg, exp_bg) = apca_exponents(y_fg, y_bg);
    (y_bg.powf(exp_bg) - y_fg.powf(exp_fg)) * APCA_SCALE
}

/// Apply the dead zone and offset to a raw APCA value and scale it to Lc.
pub fn apca_soft_clip(raw: f64) -> f64 {
    if raw.abs() < APCA_CLIP {
        0.0
    } else if raw > 0.0 {
        (raw - APCA_OFFSET) * 100.0
    } else {
        (raw + APCA_OFFSET) * 100.0
    }
}

/// Signed APCA lightness contrast (Lc).
///
/// Positive for dark text on a light background, negative for light text on
/// a dark background.
pub fn apca_signed(y_fg: f64, y_bg: f64) -> f64 {
    apca_soft_clip(apca_raw(y_fg, y_bg))
}

/// APCA contrast magnitude, `|Lc|`.
pub fn apca_contrast(y_fg: f64, y_bg: f64) -> f64 {
    apca_signed(y_fg, y_bg).abs()
}

/// Interval of directional scores reachable by a pair of translucent colors
/// depending on what lies behind them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub low: f64,
    pub high: f64,
}

impl ScoreRange {
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    pub fn point(value: f64) -> Self {
        Self::new(value, value)
    }

    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    pub fn is_point(&self) -> bool {
        self.low == self.high
    }
}

/// A contrast metric with its parameters.
///
/// ```
/// use contrast_coverage::color::{BLACK, ColorPair, WHITE};
/// use contrast_coverage::contrast::Metric;
///
/// let pair = ColorPair::new(BLACK, WHITE);
/// let wcag = Metric::wcag(0.05).unwrap();
/// assert!((wcag.score_pair(&pair) - 21.0).abs() < 1e-9);
/// assert!(Metric::Apca.score_pair(&pair) > 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum Metric {
    /// Luminance ratio with ambient flare.
    Wcag { ambient: f64 },
    /// Asymmetric power difference.
    Apca,
}

impl Default for Metric {
    fn default() -> Self {
        Self::Wcag {
            ambient: WCAG_AMBIENT,
        }
    }
}

impl Metric {
    pub fn wcag(ambient: f64) -> Result<Self> {
        let metric = Self::Wcag { ambient };
        metric.validate()?;
        Ok(metric)
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Wcag { ambient } if !(ambient.is_finite() && ambient > 0.0) => Err(
                ContrastError::InvalidParameter(format!("ambient must be positive, got {ambient}")),
            ),
            _ => Ok(()),
        }
    }

    pub fn luminance_model(&self) -> LuminanceModel {
        match self {
            Self::Wcag { .. } => LuminanceModel::Wcag,
            Self::Apca => LuminanceModel::Apca,
        }
    }

    /// Score before folding: the unfolded ratio for WCAG, signed Lc for APCA.
    pub fn directional(&self, y_fg: f64, y_bg: f64) -> f64 {
        match *self {
            Self::Wcag { ambient } => wcag_directional(y_fg, y_bg, ambient),
            Self::Apca => apca_signed(y_fg, y_bg),
        }
    }

    /// Fold a directional score into a polarity-free magnitude.
    pub fn magnitude(&self, directional: f64) -> f64 {
        match self {
            Self::Wcag { .. } if directional < 1.0 => 1.0 / directional,
            Self::Wcag { .. } => directional,
            Self::Apca => directional.abs(),
        }
    }

    /// Contrast magnitude of two luminances from [`Metric::luminance_model`].
    pub fn score_luminances(&self, y_fg: f64, y_bg: f64) -> f64 {
        match *self {
            Self::Wcag { ambient } => wcag_contrast(y_fg, y_bg, ambient),
            Self::Apca => apca_contrast(y_fg, y_bg),
        }
    }

    pub fn score_pair(&self, pair: &ColorPair) -> f64 {
        let model = self.luminance_model();
        self.score_luminances(
            model.luminance(pair.foreground),
            model.luminance(pair.background),
        )
    }

    pub fn directional_pair(&self, pair: &ColorPair) -> f64 {
        let model = self.luminance_model();
        self.directional(
            model.luminance(pair.foreground),
            model.luminance(pair.background),
        )
    }

    /// Score every pair, in input order.
    pub fn score_population(&self, pairs: &[ColorPair]) -> Result<Vec<f64>> {
        self.validate()?;
        Ok(pairs.par_iter().map(|p| self.score_pair(p)).collect())
    }

    /// Score every pair with foreground and background exchanged.
    pub fn reverse_scores(&self, pairs: &[ColorPair]) -> Result<Vec<f64>> {
        self.validate()?;
        Ok(pairs
            .par_iter()
            .map(|p| self.score_pair(&p.swapped()))
            .collect())
    }

    /// Directional scores of every pair, in input order.
    pub fn directional_population(&self, pairs: &[ColorPair]) -> Result<Vec<f64>> {
        self.validate()?;
        Ok(pairs
            .par_iter()
            .map(|p| self.directional_pair(p))
            .collect())
    }

    /// Directional score range of translucent colors.
    ///
    /// The background is composited over black and over white, the
    /// foreground over each result, and both stacks are scored.
    pub fn directional_range(
        &self,
        foreground: TranslucentColor,
        background: TranslucentColor,
    ) -> Result<ScoreRange> {
        self.validate()?;
        let model = self.luminance_model();
        let score_over = |backdrop: Srgb<f64>| -> Result<f64> {
            let bg = background.over(backdrop);
            let fg = foreground.over(bg);
            Ok(self.directional(
                model.luminance_normalized(fg)?,
                model.luminance_normalized(bg)?,
            ))
        };
        let on_black = score_over(Srgb::new(0.0, 0.0, 0.0))?;
        let on_white = score_over(Srgb::new(1.0, 1.0, 1.0))?;
        Ok(ScoreRange::new(on_black, on_white))
    }

    /// Fold a directional range into the range of magnitudes it can reach,
    /// for display.
    ///
    /// A range that crosses the no-contrast point (1 for WCAG, 0 for APCA)
    /// starts at that point.
    pub fn magnitude_range(&self, range: ScoreRange) -> ScoreRange {
        let neutral = match self {
            Self::Wcag { .. } => 1.0,
            Self::Apca => 0.0,
        };
        if range.low < neutral && range.high > neutral {
            let reach = self.magnitude(range.low).max(self.magnitude(range.high));
            ScoreRange::new(neutral, reach)
        } else {
            ScoreRange::new(self.magnitude(range.low), self.magnitude(range.high))
        }
    }

    /// Share of a directional range whose magnitude falls into each bucket.
    ///
    /// The range is spread signed, so both polarities count. WCAG ratios
    /// are spread in log space, where a swap is a sign flip, APCA Lc
    /// linearly.
    pub fn distribute(&self, range: ScoreRange, thresholds: &ThresholdSet) -> Result<Vec<f64>> {
        self.validate()?;
        let scaled = thresholds.mapped(|t| self.scale(t))?;
        scaled.distribute(self.scale(range.low), self.scale(range.high))
    }

    /// The transform under which this metric's scores are compared linearly.
    fn scale(&self, score: f64) -> f64 {
        match self {
            Self::Wcag { .. } => score.ln(),
            Self::Apca => score,
        }
    }
}
