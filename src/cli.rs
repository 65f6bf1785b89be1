//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{ConfigOverrides, OutputFormat};
use crate::coverage::Scale;

/// Cross-tabulate WCAG 2 and APCA conformance levels over random color pairs.
#[derive(Parser, Debug)]
#[command(name = "contrast-coverage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of random color pairs to sample
    #[arg(short = 'n', long)]
    pub size: Option<usize>,

    /// Seed for reproducible sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Explicit pair "<fg> on <bg>" in any CSS color format; repeatable.
    /// Replaces random sampling.
    #[arg(short, long = "pair", value_name = "PAIR")]
    pub pairs: Vec<String>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Report counts or percentages
    #[arg(long, value_enum)]
    pub scale: Option<ScaleArg>,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Load configuration from TOML file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Save the effective configuration to TOML file
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,

    /// Log file path (default: contrast-coverage.log)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Command-line spelling of [`Scale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScaleArg {
    /// Raw member counts
    Count,
    /// Share of the population
    Percent,
}

impl From<ScaleArg> for Scale {
    fn from(arg: ScaleArg) -> Self {
        match arg {
            ScaleArg::Count => Scale::Count,
            ScaleArg::Percent => Scale::Percent,
        }
    }
}

impl Cli {
    /// Flags that override the configuration file.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            size: self.size,
            seed: self.seed,
            pairs: self.pairs.clone(),
            format: self.format,
            scale: self.scale.map(Scale::from),
        }
    }
}
