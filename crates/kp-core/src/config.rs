//! Tunable algorithm parameters.
//!
//! # Defaults
//!
//! `ColonyConfig::default()` matches the parameters of the Beijing sample:
//!
//! | Parameter          | Default    |
//! |--------------------|------------|
//! | `iterations`       | 100        |
//! | `ant_count`        | 50         |
//! | `evaporation_rate` | 1 / 100    |
//! | `pheromone_budget` | 100        |
//! | `memory_depth`     | 8          |
//! | `mistake_rate`     | 1 / 50     |
//! | `perturbation`     | 1.0        |
//! | `pheromone_weight` | 1.0        |
//! | `admission_window` | 10 minutes |
//! | `max_interchanges` | 3          |

use crate::{KpError, KpResult};

/// Every parameter the colony, the route ledger, and the driver consume.
///
/// Typically loaded from the `params` object of the network JSON file by
/// `kp-world` and passed by value to the driver.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ColonyConfig {
    /// Iterations per OD pair.  The loop never stops early.
    pub iterations: u32,

    /// Ants per OD pair, stepped in index order each iteration.
    pub ant_count: usize,

    /// Fraction ρ of every pheromone level removed once per iteration.
    pub evaporation_rate: f64,

    /// Pheromone an ant carries; each deposit is `budget / leg_accumulator`.
    pub pheromone_budget: f64,

    /// Capacity of each ant's recent-position ring buffer.
    pub memory_depth: usize,

    /// Probability of picking a non-maximal pheromone neighbor.
    pub mistake_rate: f64,

    /// Probability of overriding the inertia choice with a random neighbor.
    pub perturbation: f64,

    /// Weight of the pheromone matching the ant's mode.  `1.0` ignores the
    /// off-mode trail entirely.
    pub pheromone_weight: f64,

    /// Routes costing more than `shortest + admission_window` are dropped.
    pub admission_window: f64,

    /// Maximum interchange stations a K-path may pass through.
    pub max_interchanges: usize,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        let iterations = 100;
        let ant_count = 50;
        Self {
            iterations,
            ant_count,
            evaporation_rate: 1.0 / iterations as f64,
            pheromone_budget: 100.0,
            memory_depth:     8,
            mistake_rate:     1.0 / ant_count as f64,
            perturbation:     1.0,
            pheromone_weight: 1.0,
            admission_window: 10.0,
            max_interchanges: 3,
            seed:             42,
        }
    }
}

impl ColonyConfig {
    /// Reject parameter combinations the colony cannot run with.
    pub fn validate(&self) -> KpResult<()> {
        if self.iterations == 0 {
            return Err(KpError::Config("iterations must be at least 1".into()));
        }
        if self.ant_count == 0 {
            return Err(KpError::Config("ant_count must be at least 1".into()));
        }
        if self.memory_depth == 0 {
            return Err(KpError::Config("memory_depth must be at least 1".into()));
        }
        for (name, p) in [
            ("evaporation_rate", self.evaporation_rate),
            ("mistake_rate",     self.mistake_rate),
            ("perturbation",     self.perturbation),
            ("pheromone_weight", self.pheromone_weight),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(KpError::Config(format!("{name} must lie in [0, 1], got {p}")));
            }
        }
        if !(self.pheromone_budget.is_finite() && self.pheromone_budget > 0.0) {
            return Err(KpError::Config(format!(
                "pheromone_budget must be positive, got {}",
                self.pheromone_budget
            )));
        }
        if !(self.admission_window.is_finite() && self.admission_window >= 0.0) {
            return Err(KpError::Config(format!(
                "admission_window must be non-negative, got {}",
                self.admission_window
            )));
        }
        Ok(())
    }
}
