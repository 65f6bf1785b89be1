//! Cross-tabulation of two classifications of the same population.

use float_cmp::approx_eq;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ContrastError, Result};

/// Contingency table of bucket counts.
///
/// Cell `(i, j)` counts the population members placed in bucket `i` by the
/// row metric and bucket `j` by the column metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageMatrix {
    rows: usize,
    cols: usize,
    counts: Vec<u64>,
}

impl CoverageMatrix {
    /// Count co-occurring bucket indices.
    ///
    /// `row_buckets[k]` and `col_buckets[k]` must describe the same
    /// population member, and every index must be below its axis' bucket
    /// count.
    pub fn tabulate(
        row_buckets: &[usize],
        col_buckets: &[usize],
        rows: usize,
        cols: usize,
    ) -> Result<Self> {
        if row_buckets.len() != col_buckets.len() {
            return Err(ContrastError::InvalidParameter(format!(
                "classifications differ in length: {} rows vs {} columns",
                row_buckets.len(),
                col_buckets.len()
            )));
        }
        if rows == 0 || cols == 0 {
            return Err(ContrastError::InvalidParameter(format!(
                "a {rows}x{cols} matrix has no cells"
            )));
        }

        let counts = row_buckets
            .par_iter()
            .zip(col_buckets.par_iter())
            .try_fold(
                || vec![0u64; rows * cols],
                |mut acc, (&i, &j)| {
                    if i >= rows || j >= cols {
                        return Err(ContrastError::InvalidParameter(format!(
                            "bucket ({i}, {j}) is outside a {rows}x{cols} matrix"
                        )));
                    }
                    acc[i * cols + j] += 1;
                    Ok(acc)
                },
            )
            .try_reduce(
                || vec![0u64; rows * cols],
                |mut a, b| {
                    a.iter_mut().zip(b).for_each(|(x, y)| *x += y);
                    Ok(a)
                },
            )?;

        Ok(Self { rows, cols, counts })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn count(&self, row: usize, col: usize) -> u64 {
        self.counts[row * self.cols + col]
    }

    pub fn population(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn row_totals(&self) -> Vec<u64> {
        self.counts
            .chunks(self.cols)
            .map(|row| row.iter().sum())
            .collect()
    }

    pub fn col_totals(&self) -> Vec<u64> {
        (0..self.cols)
            .map(|j| (0..self.rows).map(|i| self.count(i, j)).sum())
            .collect()
    }

    /// Members placed in the same bucket index by both metrics. Only
    /// defined when both axes have the same number of buckets.
    pub fn agreement(&self) -> Option<u64> {
        (self.rows == self.cols).then(|| (0..self.rows).map(|i| self.count(i, i)).sum())
    }

    /// Render the matrix with its marginals in the requested scale.
    pub fn table(&self, scale: Scale) -> CoverageTable {
        let population = self.population();
        let convert = |n: u64| match scale {
            Scale::Count => n as f64,
            Scale::Percent if population == 0 => 0.0,
            Scale::Percent => n as f64 / population as f64 * 100.0,
        };

        CoverageTable {
            scale,
            cells: self
                .counts
                .chunks(self.cols)
                .map(|row| row.iter().map(|&n| convert(n)).collect())
                .collect(),
            row_totals: self.row_totals().into_iter().map(convert).collect(),
            col_totals: self.col_totals().into_iter().map(convert).collect(),
            total: convert(population),
            agreement: self.agreement().map(convert),
        }
    }
}

/// Unit of a rendered [`CoverageTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    /// Raw member counts
    Count,
    /// Share of the population, summing to 100
    #[default]
    Percent,
}

/// A coverage matrix rendered as counts or percentages, with marginals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageTable {
    pub scale: Scale,
    pub cells: Vec<Vec<f64>>,
    pub row_totals: Vec<f64>,
    pub col_totals: Vec<f64>,
    pub total: f64,
    /// Diagonal sum, present for square tables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement: Option<f64>,
}

impl CoverageTable {
    /// Check that marginals match the cells and the table sums to its total.
    pub fn is_consistent(&self) -> bool {
        let close = |a: f64, b: f64| approx_eq!(f64, a, b, epsilon = 1e-6, ulps = 4);

        let rows_ok = self
            .cells
            .iter()
            .zip(&self.row_totals)
            .all(|(row, &total)| close(row.iter().sum(), total));
        let cols_ok = self.col_totals.iter().enumerate().all(|(j, &total)| {
            close(self.cells.iter().map(|row| row[j]).sum(), total)
        });
        let cells_ok = self.cells.iter().flatten().all(|&v| v >= 0.0);
        let total_ok = close(self.row_totals.iter().sum(), self.total)
            && close(self.col_totals.iter().sum(), self.total);
        let agreement_ok = self.agreement.is_none_or(|a| a <= self.total + 1e-6);

        rows_ok && cols_ok && cells_ok && total_ok && agreement_ok
    }
}
