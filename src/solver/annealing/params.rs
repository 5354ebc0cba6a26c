use serde::{Deserialize, Serialize};

use crate::error::SolverError;

/// Tuning for one annealing run. All four values are required; there is no
/// meaningful default schedule for an unknown cost landscape.
///
/// A cooling factor outside (0, 1) or a final temperature at or above the
/// initial one would make the loop spin forever or never start, so
/// [`AnnealingOptimizer::new`](crate::AnnealingOptimizer::new) rejects bad
/// values before the run begins.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnnealingParams {
    /// Starting temperature, must be positive.
    pub initial_temperature: f64,

    /// The run stops once the temperature falls to this level or below.
    /// Must be positive and below `initial_temperature`.
    pub final_temperature: f64,

    /// Geometric cooling factor in (0, 1): `T = T * cooling_factor` after
    /// each temperature level.
    pub cooling_factor: f64,

    /// Neighbor evaluations per temperature level, at least 1.
    pub iterations_per_temperature: usize,
}

impl AnnealingParams {
    pub fn validate(&self) -> Result<(), SolverError> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(SolverError::InvalidParameter {
                name: "initial_temperature",
                reason: format!(
                    "must be a positive finite number, got {}",
                    self.initial_temperature
                ),
            });
        }
        if !self.final_temperature.is_finite() || self.final_temperature <= 0.0 {
            return Err(SolverError::InvalidParameter {
                name: "final_temperature",
                reason: format!(
                    "must be a positive finite number, got {}",
                    self.final_temperature
                ),
            });
        }
        if self.final_temperature >= self.initial_temperature {
            return Err(SolverError::InvalidParameter {
                name: "final_temperature",
                reason: format!(
                    "must be below initial_temperature {}, got {}",
                    self.initial_temperature, self.final_temperature
                ),
            });
        }
        if !self.cooling_factor.is_finite()
            || self.cooling_factor <= 0.0
            || self.cooling_factor >= 1.0
        {
            return Err(SolverError::InvalidParameter {
                name: "cooling_factor",
                reason: format!("must lie in (0, 1), got {}", self.cooling_factor),
            });
        }
        if self.iterations_per_temperature < 1 {
            return Err(SolverError::InvalidParameter {
                name: "iterations_per_temperature",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
