//! Error type shared by every engine component.

use thiserror::Error;

/// Validation failure raised at a component boundary.
///
/// Every error is deterministic for a given input; nothing is retried or
/// silently clamped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContrastError {
    /// A channel was outside [0, 255] or a color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Thresholds were empty, non-finite, or not strictly increasing.
    #[error("invalid threshold set: {0}")]
    InvalidThresholdSet(String),

    /// A model parameter or a stage input was out of its domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Convenience alias for engine results.
pub type Result<T, E = ContrastError> = std::result::Result<T, E>;
