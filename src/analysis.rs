//! Comparing two metrics' conformance levels over one population.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[cfg(debug_assertions)]
use tracing::instrument;

use crate::color::ColorPair;
use crate::contrast::{Metric, WCAG_AMBIENT};
use crate::coverage::{CoverageMatrix, CoverageTable, Scale};
use crate::error::Result;
use crate::levels::ThresholdSet;

/// Ambient flare of the high-ambient WCAG variant.
pub const HIGH_AMBIENT: f64 = 0.4;

/// One side of a comparison: a metric and the levels its scores are cut at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub label: String,
    pub thresholds: ThresholdSet,
    pub metric: Metric,
}

impl Axis {
    pub fn new(label: impl Into<String>, metric: Metric, thresholds: ThresholdSet) -> Result<Self> {
        metric.validate()?;
        Ok(Self {
            label: label.into(),
            metric,
            thresholds,
        })
    }

    pub fn wcag() -> Self {
        Self {
            label: "WCAG 2".into(),
            metric: Metric::Wcag {
                ambient: WCAG_AMBIENT,
            },
            thresholds: ThresholdSet::wcag(),
        }
    }

    pub fn wcag_high_ambient() -> Self {
        Self {
            label: format!("WCAG 2 (ambient {HIGH_AMBIENT})"),
            metric: Metric::Wcag {
                ambient: HIGH_AMBIENT,
            },
            thresholds: ThresholdSet::wcag_high_ambient(),
        }
    }

    pub fn apca() -> Self {
        Self {
            label: "APCA".into(),
            metric: Metric::Apca,
            thresholds: ThresholdSet::apca(),
        }
    }

    pub fn scores(&self, pairs: &[ColorPair]) -> Result<Vec<f64>> {
        self.metric.score_population(pairs)
    }

    pub fn classify(&self, pairs: &[ColorPair]) -> Result<Vec<usize>> {
        Ok(self.thresholds.classify_all(&self.scores(pairs)?))
    }
}

/// Two axes cross-tabulated against each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub name: String,
    pub rows: Axis,
    pub cols: Axis,
}

impl Comparison {
    pub fn new(name: impl Into<String>, rows: Axis, cols: Axis) -> Self {
        Self {
            name: name.into(),
            rows,
            cols,
        }
    }

    /// WCAG 2 against APCA, at the published ambient and at 0.4.
    pub fn standard() -> Vec<Self> {
        vec![
            Self::new("wcag-vs-apca", Axis::wcag(), Axis::apca()),
            Self::new(
                "wcag-high-ambient-vs-apca",
                Axis::wcag_high_ambient(),
                Axis::apca(),
            ),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        self.rows.metric.validate()?;
        self.cols.metric.validate()
    }

    /// Cross-tabulate precomputed scores for the row and column axes.
    pub fn tabulate_scores(&self, row_scores: &[f64], col_scores: &[f64]) -> Result<CoverageMatrix> {
        CoverageMatrix::tabulate(
            &self.rows.thresholds.classify_all(row_scores),
            &self.cols.thresholds.classify_all(col_scores),
            self.rows.thresholds.bucket_count(),
            self.cols.thresholds.bucket_count(),
        )
    }

    /// Score, classify and cross-tabulate a population.
    #[cfg_attr(debug_assertions, instrument(skip(self, pairs), fields(name = %self.name, pairs = pairs.len())))]
    pub fn run(&self, pairs: &[ColorPair]) -> Result<ComparisonReport> {
        let start = Instant::now();
        self.validate()?;
        if pairs.is_empty() {
            warn!(name = %self.name, "comparing an empty population");
        }

        let row_scores = self.rows.scores(pairs)?;
        let col_scores = self.cols.scores(pairs)?;
        debug!(label = %self.rows.label, "row axis scored");
        debug!(label = %self.cols.label, "column axis scored");

        let matrix = self.tabulate_scores(&row_scores, &col_scores)?;

        let elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            name = %self.name,
            pairs = pairs.len(),
            agreement = ?matrix.agreement(),
            elapsed_ms,
            "comparison complete"
        );

        Ok(ComparisonReport {
            comparison: self.clone(),
            matrix,
        })
    }
}

/// Result of [`Comparison::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub comparison: Comparison,
    pub matrix: CoverageMatrix,
}

impl ComparisonReport {
    /// Serializable view of the report in the requested scale.
    pub fn render(&self, scale: Scale) -> RenderedReport {
        RenderedReport {
            name: self.comparison.name.clone(),
            rows: self.comparison.rows.clone(),
            cols: self.comparison.cols.clone(),
            population: self.matrix.population(),
            table: self.matrix.table(scale),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedReport {
    pub name: String,
    pub rows: Axis,
    pub cols: Axis,
    pub population: u64,
    pub table: CoverageTable,
}
