//! Values the driver reports to observers and callers.

use kp_core::StationId;
use kp_route::KPathSet;

/// Colony state at the end of one iteration.
#[derive(Clone, Debug, PartialEq)]
pub struct IterationStats {
    pub iteration: u32,
    /// Legs completed this iteration, in either direction.
    pub completed: usize,
    /// Of those, how many the ledger admitted.
    pub admitted: usize,
    /// Ants dead so far.
    pub dead_agents: usize,
    /// Cheapest admitted cost so far.
    pub shortest: Option<f64>,
    /// Field total after evaporation.
    pub pheromone: f64,
}

/// Everything the run learned about one OD pair.
#[derive(Clone, Debug, PartialEq)]
pub struct OdOutcome {
    /// Position of the pair in the demand table.
    pub index:       usize,
    pub origin:      StationId,
    pub destination: StationId,
    pub demand:      u32,
    /// `None` when no route was found within the iteration budget.
    pub paths:       Option<KPathSet>,
    /// Share of demand per K-path.
    pub shares:      Vec<f64>,
    /// Passengers assigned per K-path; filled when flows are merged.
    pub volumes:     Vec<f64>,
    pub dead_agents: usize,
    pub routes_offered: u64,
}

impl OdOutcome {
    pub fn found(&self) -> bool {
        self.paths.is_some()
    }

    /// Number of K-paths found (zero on failure).
    pub fn k(&self) -> usize {
        self.paths.as_ref().map_or(0, KPathSet::len)
    }
}
