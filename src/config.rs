//! Layered configuration: built-in defaults, then a TOML file, then CLI flags.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::analysis::Comparison;
use crate::color::ColorPair;
use crate::coverage::Scale;
use crate::error::ContrastError;
use crate::sampler::{Sampler, UniformSampler};

/// Error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The requested config file does not exist
    #[error("config file not found: {}", .0.display())]
    Missing(PathBuf),
    /// Merging or extracting the layered configuration failed
    #[error("configuration error: {0}")]
    Extract(#[from] figment::Error),
    /// TOML serialization error
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// IO error writing a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A value parsed but is not usable by the engine
    #[error(transparent)]
    Invalid(#[from] ContrastError),
}

/// Report serialization format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// YAML (default)
    #[default]
    Yaml,
    /// JSON
    Json,
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub population: PopulationConfig,
    pub output: OutputConfig,
    pub comparisons: Vec<Comparison>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            population: PopulationConfig::default(),
            output: OutputConfig::default(),
            comparisons: Comparison::standard(),
        }
    }
}

/// Where the color pairs come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Number of random pairs to draw
    pub size: usize,
    /// Seed for reproducible sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Explicit pairs as `"<fg> on <bg>"`; replaces sampling when non-empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pairs: Vec<String>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: 20_000,
            seed: None,
            pairs: Vec::new(),
        }
    }
}

impl PopulationConfig {
    /// Parse the explicit pairs, or sample `size` uniform pairs.
    pub fn build(&self) -> Result<Vec<ColorPair>, ConfigError> {
        if !self.pairs.is_empty() {
            return Ok(self
                .pairs
                .iter()
                .map(|s| s.parse::<ColorPair>())
                .collect::<Result<_, _>>()?);
        }
        let mut sampler = match self.seed {
            Some(seed) => UniformSampler::seeded(seed),
            None => UniformSampler::from_entropy(),
        };
        debug!(size = self.size, seed = ?self.seed, "sampling population");
        Ok(sampler.sample(self.size))
    }
}

/// How reports are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub scale: Scale,
}

/// Values set explicitly on the command line. Unset fields leave the lower
/// layers untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub size: Option<usize>,
    pub seed: Option<u64>,
    pub pairs: Vec<String>,
    pub format: Option<OutputFormat>,
    pub scale: Option<Scale>,
}

impl ConfigOverrides {
    fn apply(&self, mut figment: Figment) -> Figment {
        if let Some(size) = self.size {
            figment = figment.merge(Serialized::default("population.size", size));
        }
        if let Some(seed) = self.seed {
            figment = figment.merge(Serialized::default("population.seed", seed));
        }
        if !self.pairs.is_empty() {
            figment = figment.merge(Serialized::default("population.pairs", &self.pairs));
        }
        if let Some(format) = self.format {
            figment = figment.merge(Serialized::default("output.format", format));
        }
        if let Some(scale) = self.scale {
            figment = figment.merge(Serialized::default("output.scale", scale));
        }
        figment
    }
}

impl AnalysisConfig {
    /// Merge defaults, an optional TOML file and CLI overrides, then
    /// validate the result.
    pub fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::Missing(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }
        let config: Self = overrides.apply(figment).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string layered over the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(content))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ContrastError> {
        for comparison in &self.comparisons {
            comparison.validate()?;
        }
        for pair in &self.population.pairs {
            pair.parse::<ColorPair>()?;
        }
        Ok(())
    }
}
