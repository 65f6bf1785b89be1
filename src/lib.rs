//! Compare WCAG 2 contrast ratios with APCA lightness contrast.
//!
//! Color pairs flow through a luminance conversion, a contrast formula and a
//! threshold set; two such classifications of the same population are
//! cross-tabulated into a coverage matrix that shows where the metrics agree.

pub mod analysis;
pub mod cli;
pub mod color;
pub mod config;
pub mod contrast;
pub mod coverage;
pub mod error;
pub mod levels;
pub mod lightness;
pub mod logging;
pub mod luminance;
pub mod pipeline;
pub mod sampler;

pub use error::{ContrastError, Result};
