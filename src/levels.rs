//! Conformance levels: threshold sets and the half-open buckets they define.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ContrastError, Result};

/// Strictly increasing, finite score boundaries.
///
/// `n` thresholds define `n + 1` buckets: `(-inf, t0)`, `[t0, t1)`, ...,
/// `[t(n-1), +inf)`. A score equal to a threshold belongs to the bucket
/// above it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ThresholdSet(Vec<f64>);

impl ThresholdSet {
    pub fn new(thresholds: Vec<f64>) -> Result<Self> {
        if thresholds.is_empty() {
            return Err(ContrastError::InvalidThresholdSet(
                "threshold set is empty".into(),
            ));
        }
        if let Some(t) = thresholds.iter().find(|t| !t.is_finite()) {
            return Err(ContrastError::InvalidThresholdSet(format!(
                "threshold {t} is not finite"
            )));
        }
        if let Some(w) = thresholds.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ContrastError::InvalidThresholdSet(format!(
                "thresholds must be strictly increasing, found {} before {}",
                w[0], w[1]
            )));
        }
        Ok(Self(thresholds))
    }

    /// WCAG 2 levels: large text, AA, AAA.
    pub fn wcag() -> Self {
        Self(vec![3.0, 4.5, 7.0])
    }

    /// WCAG-style levels rescaled for an ambient flare of 0.4.
    pub fn wcag_high_ambient() -> Self {
        Self(vec![1.6, 2.5, 3.8, 5.7, 8.7, 13.2])
    }

    /// APCA Lc levels in steps of 15.
    pub fn apca() -> Self {
        Self(vec![15.0, 30.0, 45.0, 60.0, 75.0, 90.0])
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.0
    }

    pub fn bucket_count(&self) -> usize {
        self.0.len() + 1
    }

    /// Bucket index of one score.
    pub fn classify(&self, score: f64) -> usize {
        debug_assert!(!score.is_nan(), "scores must not be NaN");
        self.0.partition_point(|&t| t <= score)
    }

    /// Bucket index of every score, in input order.
    pub fn classify_all(&self, scores: &[f64]) -> Vec<usize> {
        scores.iter().map(|&s| self.classify(s)).collect()
    }

    pub fn bucket(&self, index: usize) -> Option<Bucket> {
        if index >= self.bucket_count() {
            return None;
        }
        let lower = if index == 0 {
            f64::NEG_INFINITY
        } else {
            self.0[index - 1]
        };
        let upper = self.0.get(index).copied().unwrap_or(f64::INFINITY);
        Some(Bucket { lower, upper })
    }

    pub fn buckets(&self) -> impl Iterator<Item = Bucket> + '_ {
        (0..self.bucket_count()).filter_map(|i| self.bucket(i))
    }

    /// Apply a strictly increasing transform to every threshold.
    pub fn mapped(&self, f: impl Fn(f64) -> f64) -> Result<Self> {
        Self::new(self.0.iter().map(|&t| f(t)).collect())
    }

    /// Spread a signed interval `[low, high]` over the buckets by the
    /// magnitude of its points, assuming they are uniform over the interval.
    ///
    /// Bucket `k` receives the share of points with `t(k-1) <= |x| < t(k)`,
    /// so the part of the interval mirrored across zero counts twice toward
    /// the low buckets. A zero-width interval is assigned wholly to the
    /// bucket of its magnitude. Thresholds must be positive. The weights sum
    /// to 1.
    pub fn distribute(&self, low: f64, high: f64) -> Result<Vec<f64>> {
        if !(low.is_finite() && high.is_finite()) || low > high {
            return Err(ContrastError::InvalidParameter(format!(
                "cannot distribute interval [{low}, {high}]"
            )));
        }
        if let Some(t) = self.0.iter().find(|&&t| t <= 0.0) {
            return Err(ContrastError::InvalidParameter(format!(
                "spreading a signed interval needs positive thresholds, found {t}"
            )));
        }
        let mut weights = vec![0.0; self.bucket_count()];
        if low == high {
            weights[self.classify(low.abs())] = 1.0;
            return Ok(weights);
        }

        // Share of the interval strictly above `t`
        let above = |t: f64| {
            if low > t {
                1.0
            } else if high > t {
                (high - t) / (high - low)
            } else {
                0.0
            }
        };
        let mut inside = 0.0;
        for (weight, &t) in weights.iter_mut().zip(&self.0) {
            let within = above(-t) - above(t);
            *weight = within - inside;
            inside = within;
        }
        weights[self.0.len()] = 1.0 - inside;
        Ok(weights)
    }
}

impl TryFrom<Vec<f64>> for ThresholdSet {
    type Error = ContrastError;

    fn try_from(thresholds: Vec<f64>) -> Result<Self> {
        Self::new(thresholds)
    }
}

impl From<ThresholdSet> for Vec<f64> {
    fn from(set: ThresholdSet) -> Self {
        set.0
    }
}

/// Half-open score interval `[lower, upper)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub lower: f64,
    pub upper: f64,
}

impl Bucket {
    pub fn contains(&self, score: f64) -> bool {
        self.lower <= score && score < self.upper
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lower, self.upper)
    }
}
