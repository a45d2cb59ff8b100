//! Progress sources: where in-flight uploads get their next reading.
//!
//! [`ProgressSource`] is the seam between the upload lifecycle and the
//! transfer itself. [`SimulatedProgress`] stands in for a network
//! transfer with random increments; a real transfer reporting bytes
//! sent would implement the same trait.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{ConfigError, Progress, UploadConfig};

/// Produces cumulative progress readings for one upload.
pub trait ProgressSource {
    /// The next cumulative reading. Callers stop polling once a
    /// reading is complete.
    fn next_progress(&mut self) -> Progress;
}

/// Validated bounds for one simulated progress step, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRange {
    min: f64,
    max: f64,
}

impl StepRange {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStepRange`] unless
    /// `0 < min <= max <= 100` and both are finite.
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        let valid = min.is_finite() && max.is_finite() && min > 0.0 && min <= max && max <= 100.0;
        if valid {
            Ok(Self { min, max })
        } else {
            Err(ConfigError::InvalidStepRange { min, max })
        }
    }

    /// The step range configured in `config`.
    ///
    /// # Errors
    ///
    /// See [`StepRange::new`].
    pub fn from_config(config: &UploadConfig) -> Result<Self, ConfigError> {
        Self::new(config.min_step, config.max_step)
    }

    #[must_use]
    pub const fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub const fn max(self) -> f64 {
        self.max
    }

    /// Upper bound on the ticks needed to reach 100%.
    #[must_use]
    // min >= f64::MIN_POSITIVE, so the result is small and positive.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn max_ticks(self) -> u32 {
        (100.0 / self.min).ceil() as u32
    }
}

impl Default for StepRange {
    fn default() -> Self {
        Self {
            min: UploadConfig::DEFAULT_MIN_STEP,
            max: UploadConfig::DEFAULT_MAX_STEP,
        }
    }
}

/// Simulated transfer: each reading adds a uniformly random step from
/// the configured [`StepRange`], clamped to 100.
#[derive(Debug, Clone)]
pub struct SimulatedProgress {
    current: f64,
    steps: StepRange,
    rng: StdRng,
}

impl SimulatedProgress {
    #[must_use]
    pub const fn new(steps: StepRange, rng: StdRng) -> Self {
        Self {
            current: 0.0,
            steps,
            rng,
        }
    }

    /// Seeded from the OS (or `crypto.getRandomValues` on WASM).
    #[must_use]
    pub fn from_entropy(steps: StepRange) -> Self {
        Self::new(steps, StdRng::from_entropy())
    }

    /// Deterministic source for tests and reproducible CLI runs.
    #[must_use]
    pub fn seeded(steps: StepRange, seed: u64) -> Self {
        Self::new(steps, StdRng::seed_from_u64(seed))
    }
}

impl ProgressSource for SimulatedProgress {
    fn next_progress(&mut self) -> Progress {
        let step = if self.steps.min < self.steps.max {
            self.rng.gen_range(self.steps.min..=self.steps.max)
        } else {
            self.steps.min
        };
        self.current = (self.current + step).min(100.0);
        Progress::new(self.current)
    }
}
