//! Planner configuration.
//!
//! Typically built with `Default` and tweaked in code, or loaded from a JSON
//! file by the application crate (enable the `serde` feature).  Missing
//! fields fall back to their defaults.

use crate::{CoreError, CoreResult};

// ── IndexConfig ───────────────────────────────────────────────────────────────

/// Sizing policy of the coordinate → segments hash index.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct IndexConfig {
    /// Bucket count of a fresh index.  Default: 8.  At most
    /// [`IndexConfig::MAX_INITIAL_BUCKETS`].
    pub initial_buckets: usize,

    /// Entries-per-bucket ratio above which the index doubles its buckets.
    /// Default: 0.5.  At least [`IndexConfig::MIN_LOAD_FACTOR`].
    pub max_load_factor: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self { initial_buckets: 8, max_load_factor: 0.5 }
    }
}

impl IndexConfig {
    /// Lowest accepted load factor.  Smaller values make every insert
    /// double the bucket array many times over.
    pub const MIN_LOAD_FACTOR: f64 = 0.1;

    /// Largest accepted starting bucket count (about 4 MiB of buckets).
    pub const MAX_INITIAL_BUCKETS: usize = 1 << 20;

    pub fn validate(&self) -> CoreResult<()> {
        if self.initial_buckets == 0 || self.initial_buckets > Self::MAX_INITIAL_BUCKETS {
            return Err(CoreError::Config(format!(
                "initial_buckets must be between 1 and {}, got {}",
                Self::MAX_INITIAL_BUCKETS,
                self.initial_buckets
            )));
        }
        if !(self.max_load_factor.is_finite() && self.max_load_factor >= Self::MIN_LOAD_FACTOR) {
            return Err(CoreError::Config(format!(
                "max_load_factor must be a number of at least {}, got {}",
                Self::MIN_LOAD_FACTOR,
                self.max_load_factor
            )));
        }
        Ok(())
    }
}

// ── AnnealingConfig ───────────────────────────────────────────────────────────

/// Cooling schedule and seed of the delivery-order optimizer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct AnnealingConfig {
    /// Candidate moves evaluated at each temperature.  Default: 100.
    pub iterations_per_temperature: u32,

    /// Starting temperature.  Default: 1.0.
    pub initial_temperature: f64,

    /// Geometric cooling multiplier applied after each temperature step.
    /// Must lie strictly between 0 and 1.  Default: 0.9.
    pub cooling_factor: f64,

    /// The search stops once the temperature falls below this.  Default: 1e-4.
    pub min_temperature: f64,

    /// Master RNG seed.  The same seed and input always give the same order.
    pub seed: u64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            iterations_per_temperature: 100,
            initial_temperature:        1.0,
            cooling_factor:             0.9,
            min_temperature:            1e-4,
            seed:                       0x5eed,
        }
    }
}

impl AnnealingConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if self.iterations_per_temperature == 0 {
            return Err(CoreError::Config("iterations_per_temperature must be at least 1".into()));
        }
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(CoreError::Config(format!(
                "initial_temperature must be a positive number, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(CoreError::Config(format!(
                "cooling_factor must be in (0, 1), got {}",
                self.cooling_factor
            )));
        }
        if !(self.min_temperature.is_finite() && self.min_temperature > 0.0) {
            return Err(CoreError::Config(format!(
                "min_temperature must be a positive number, got {}",
                self.min_temperature
            )));
        }
        Ok(())
    }

    /// Number of temperature steps the schedule runs before stopping.
    pub fn temperature_steps(&self) -> u32 {
        let mut steps = 0;
        let mut t = self.initial_temperature;
        while t >= self.min_temperature {
            steps += 1;
            t *= self.cooling_factor;
        }
        steps
    }
}

// ── PlannerConfig ─────────────────────────────────────────────────────────────

/// Top-level configuration handed to the map loader and the planner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct PlannerConfig {
    pub index:     IndexConfig,
    pub annealing: AnnealingConfig,
}

impl PlannerConfig {
    pub fn validate(&self) -> CoreResult<()> {
        self.index.validate()?;
        self.annealing.validate()
    }
}
