//! Run observer trait for progress reporting and data collection.

use kp_route::{EdgeFlowTable, OdDemand};
use kp_world::TransitNetwork;

use crate::{IterationStats, OdOutcome};

/// Callbacks invoked by [`Driver::run`][crate::Driver::run].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Calls always arrive in demand order, also
/// with the `parallel` feature.
pub trait RunObserver {
    /// Called before an OD pair's colony starts.
    fn on_od_start(&mut self, _index: usize, _od: &OdDemand) {}

    /// Called after every iteration of the current OD pair.
    fn on_iteration_end(&mut self, _od: &OdDemand, _stats: &IterationStats) {}

    /// Called once the OD pair's flows have been merged.
    fn on_od_end(&mut self, _outcome: &OdOutcome) {}

    /// Called once after the last OD pair.
    fn on_run_end(&mut self, _flows: &EdgeFlowTable) {}
}

/// A [`RunObserver`] that does nothing.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Reports progress through the `log` facade.
pub struct LogObserver<'a> {
    network: &'a TransitNetwork,
}

impl<'a> LogObserver<'a> {
    pub fn new(network: &'a TransitNetwork) -> Self {
        Self { network }
    }
}

impl RunObserver for LogObserver<'_> {
    fn on_od_start(&mut self, index: usize, od: &OdDemand) {
        log::info!("OD {} ({}): {} passengers", index, od.label(self.network), od.passengers);
    }

    fn on_iteration_end(&mut self, od: &OdDemand, stats: &IterationStats) {
        log::trace!(
            "{} iteration {}: {} legs, {} admitted, {} dead",
            od.label(self.network),
            stats.iteration,
            stats.completed,
            stats.admitted,
            stats.dead_agents,
        );
    }

    fn on_od_end(&mut self, outcome: &OdOutcome) {
        let label = format!(
            "{}{}",
            self.network.label(outcome.origin),
            self.network.label(outcome.destination)
        );
        match &outcome.paths {
            Some(paths) => log::info!(
                "{}: {} K-path(s), shortest {} min, {} dead ants",
                label,
                paths.len(),
                paths.shortest,
                outcome.dead_agents,
            ),
            None => log::warn!(
                "{}: no route found in {} offered legs; demand of {} left unassigned",
                label,
                outcome.routes_offered,
                outcome.demand,
            ),
        }
    }

    fn on_run_end(&mut self, flows: &EdgeFlowTable) {
        let loaded = flows.iter().filter(|&(_, _, f)| f > 0.0).count();
        log::info!(
            "run complete: {:.1} passenger-edges over {} of {} links",
            flows.total(),
            loaded,
            flows.len(),
        );
    }
}
