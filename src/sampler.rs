//! Sources of color-pair populations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::{Color, ColorPair};
use crate::error::{ContrastError, Result};

/// Supplies populations of color pairs.
pub trait Sampler {
    /// Produce `n` pairs.
    fn sample(&mut self, n: usize) -> Vec<ColorPair>;
}

/// Every channel of both colors drawn independently and uniformly from
/// [0, 255].
#[derive(Debug, Clone)]
pub struct UniformSampler {
    rng: StdRng,
}

impl UniformSampler {
    /// Reproducible sampler.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    fn color(&mut self) -> Color {
        Color::new(
            self.rng.gen_range(0..=255),
            self.rng.gen_range(0..=255),
            self.rng.gen_range(0..=255),
        )
    }
}

impl Sampler for UniformSampler {
    fn sample(&mut self, n: usize) -> Vec<ColorPair> {
        (0..n)
            .map(|_| {
                let foreground = self.color();
                ColorPair::new(foreground, self.color())
            })
            .collect()
    }
}

/// Replays a fixed list of pairs, cycling when more are requested.
#[derive(Debug, Clone)]
pub struct FixedSampler {
    pairs: Vec<ColorPair>,
}

impl FixedSampler {
    /// At least one pair is needed to produce a population of any size.
    pub fn new(pairs: Vec<ColorPair>) -> Result<Self> {
        if pairs.is_empty() {
            return Err(ContrastError::InvalidParameter(
                "fixed sampler needs at least one pair".into(),
            ));
        }
        Ok(Self { pairs })
    }
}

impl Sampler for FixedSampler {
    fn sample(&mut self, n: usize) -> Vec<ColorPair> {
        self.pairs.iter().copied().cycle().take(n).collect()
    }
}
