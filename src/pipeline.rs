//! Staged decomposition of the contrast metrics.
//!
//! Each metric is split into three stages: luminance, lightness, and a
//! contrast taken in lightness space. Swapping one stage at a time between
//! the WCAG and APCA decompositions shows which stage accounts for most of
//! their disagreement.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::ColorPair;
use crate::contrast::apca_exponents;
use crate::error::{ContrastError, Result};
use crate::lightness::LightnessModel;
use crate::luminance::LuminanceModel;

/// Contrast between two lightness values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum LightnessContrast {
    /// `Jbg - Jfg`.
    Difference,
    /// APCA polarity exponents applied to lightness already raised to
    /// `alpha`, i.e. each exponent divided by `alpha`. No scale or clip.
    ApcaRebased { alpha: f64 },
}

impl LightnessContrast {
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::ApcaRebased { alpha } if !(alpha.is_finite() && alpha > 0.0) => Err(
                ContrastError::InvalidParameter(format!("rebase alpha must be positive, got {alpha}")),
            ),
            _ => Ok(()),
        }
    }

    pub fn contrast(&self, j_fg: f64, j_bg: f64) -> f64 {
        match *self {
            Self::Difference => j_bg - j_fg,
            Self::ApcaRebased { alpha } => {
                let (exp_fg, exp_bg) = apca_exponents(j_fg, j_bg);
                j_bg.powf(exp_bg / alpha) - j_fg.powf(exp_fg / alpha)
            }
        }
    }
}

/// A metric assembled from independent stages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StagedMetric {
    pub luminance: LuminanceModel,
    pub lightness: LightnessModel,
    pub contrast: LightnessContrast,
}

impl StagedMetric {
    /// WCAG 2 luminance, log lightness with the published flare, difference.
    pub fn wcag() -> Self {
        Self {
            luminance: LuminanceModel::Wcag,
            lightness: LightnessModel::Weber { flare: 0.05 },
            contrast: LightnessContrast::Difference,
        }
    }

    /// APCA luminance, `Y^0.6` lightness, rebased polarity exponents.
    pub fn apca() -> Self {
        Self {
            luminance: LuminanceModel::Apca,
            lightness: LightnessModel::Stevens {
                flare: 0.0,
                alpha: 0.6,
            },
            contrast: LightnessContrast::ApcaRebased { alpha: 0.6 },
        }
    }

    pub fn with_luminance(self, luminance: LuminanceModel) -> Self {
        Self { luminance, ..self }
    }

    pub fn with_lightness(self, lightness: LightnessModel) -> Self {
        Self { lightness, ..self }
    }

    pub fn with_contrast(self, contrast: LightnessContrast) -> Self {
        Self { contrast, ..self }
    }

    pub fn validate(&self) -> Result<()> {
        self.lightness.validate()?;
        self.contrast.validate()
    }

    pub fn score_pair(&self, pair: &ColorPair) -> Result<f64> {
        let j_fg = self
            .lightness
            .lightness(self.luminance.luminance(pair.foreground))?;
        let j_bg = self
            .lightness
            .lightness(self.luminance.luminance(pair.background))?;
        Ok(self.contrast.contrast(j_fg, j_bg))
    }

    pub fn score_population(&self, pairs: &[ColorPair]) -> Result<Vec<f64>> {
        self.validate()?;
        pairs.par_iter().map(|p| self.score_pair(p)).collect()
    }
}

/// Per-pair `reference - candidate`, in input order.
pub fn divergence(
    reference: &StagedMetric,
    candidate: &StagedMetric,
    pairs: &[ColorPair],
) -> Result<Vec<f64>> {
    let expected = reference.score_population(pairs)?;
    let actual = candidate.score_population(pairs)?;
    let diffs: Vec<f64> = expected.iter().zip(&actual).map(|(r, c)| r - c).collect();

    let max_abs = diffs.iter().fold(0.0_f64, |m, d| m.max(d.abs()));
    debug!(pairs = pairs.len(), max_abs, "stage divergence");

    Ok(diffs)
}

/// The APCA decomposition with one stage at a time replaced by its WCAG
/// counterpart, then with all of them replaced, labelled by what changed.
pub fn stage_swaps() -> [(&'static str, StagedMetric); 4] {
    let apca = StagedMetric::apca();
    let wcag = StagedMetric::wcag();
    [
        ("luminance", apca.with_luminance(wcag.luminance)),
        ("lightness", apca.with_lightness(wcag.lightness)),
        ("contrast", apca.with_contrast(wcag.contrast)),
        ("all", wcag),
    ]
}
