//! Luminance to perceived lightness.
//!
//! Two families of curves are compared: a logarithmic (Weber-Fechner) curve
//! whose shadow compression is set by a flare term, and a power (Stevens)
//! curve with an exponent and an optional flare offset. Both are normalized
//! so that `Y = 0` maps to 0 and `Y = 1` maps to 1.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ContrastError, Result};

/// A lightness curve and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum LightnessModel {
    /// `log(Y + flare)`, normalized.
    Weber { flare: f64 },
    /// `(Y + flare)^alpha`, normalized.
    Stevens { flare: f64, alpha: f64 },
}

impl LightnessModel {
    pub fn weber(flare: f64) -> Result<Self> {
        let model = Self::Weber { flare };
        model.validate()?;
        Ok(model)
    }

    pub fn stevens(flare: f64, alpha: f64) -> Result<Self> {
        let model = Self::Stevens { flare, alpha };
        model.validate()?;
        Ok(model)
    }

    /// The curves plotted against each other when comparing lightness
    /// models: two ambient levels for the log curve, three exponents and
    /// one offset variant for the power curve.
    pub fn presets() -> [Self; 6] {
        [
            Self::Weber { flare: 0.05 },
            Self::Weber { flare: 0.4 },
            Self::Stevens { flare: 0.0, alpha: 0.333 },
            Self::Stevens { flare: 0.025, alpha: 0.333 },
            Self::Stevens { flare: 0.0, alpha: 0.56 },
            Self::Stevens { flare: 0.0, alpha: 0.68 },
        ]
    }

    /// Check the parameters. Models built through the constructors are
    /// always valid; deserialized ones are checked here.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Weber { flare } => {
                if !(flare.is_finite() && flare > 0.0) {
                    return Err(ContrastError::InvalidParameter(format!(
                        "weber flare must be positive, got {flare}"
                    )));
                }
            }
            Self::Stevens { flare, alpha } => {
                if !(alpha.is_finite() && alpha > 0.0) {
                    return Err(ContrastError::InvalidParameter(format!(
                        "stevens alpha must be positive, got {alpha}"
                    )));
                }
                if !(flare.is_finite() && flare >= 0.0) {
                    return Err(ContrastError::InvalidParameter(format!(
                        "stevens flare must be non-negative, got {flare}"
                    )));
                }
            }
        }
        Ok(())
    }

    fn raw(&self, y: f64) -> f64 {
        match *self {
            Self::Weber { flare } => (y + flare).ln(),
            Self::Stevens { flare, alpha } => (y + flare).powf(alpha),
        }
    }

    /// Map one luminance to normalized lightness.
    pub fn lightness(&self, y: f64) -> Result<f64> {
        self.validate()?;
        let shifted = match *self {
            Self::Weber { flare } | Self::Stevens { flare, .. } => y + flare,
        };
        let in_domain = match self {
            Self::Weber { .. } => shifted > 0.0,
            Self::Stevens { .. } => shifted >= 0.0,
        };
        if !y.is_finite() || !in_domain {
            return Err(ContrastError::InvalidParameter(format!(
                "luminance {y} is outside the domain of {self:?}"
            )));
        }
        let low = self.raw(0.0);
        Ok((self.raw(y) - low) / (self.raw(1.0) - low))
    }

    /// Map every luminance, in input order.
    pub fn lightnesses(&self, ys: &[f64]) -> Result<Vec<f64>> {
        ys.par_iter().map(|&y| self.lightness(y)).collect()
    }
}
