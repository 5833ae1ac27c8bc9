//! The `Driver` and its per-OD colony loop.

use kp_colony::{Ant, StepOutcome};
use kp_core::{AgentId, AgentRng, ColonyConfig, RandomSource, derive_seed};
use kp_route::{Admission, DemandTable, EdgeFlowTable, FlowSplitter, OdDemand, RouteLedger};
use kp_world::{Environment, GridLayout, TransitNetwork};

use crate::{IterationStats, OdOutcome, RunObserver, SimResult};

/// Solves OD pairs and owns the run-wide edge-flow accumulator.
///
/// The network and layout are borrowed read-only; each OD pair gets its own
/// `Environment` and ant pool, so pairs never see each other's pheromone.
pub struct Driver<'a> {
    network:  &'a TransitNetwork,
    layout:   &'a GridLayout,
    config:   ColonyConfig,
    splitter: FlowSplitter,
    flows:    EdgeFlowTable,
}

impl<'a> Driver<'a> {
    /// Validate `config` and create a driver with an all-zero flow table.
    pub fn new(
        network: &'a TransitNetwork,
        layout:  &'a GridLayout,
        config:  ColonyConfig,
    ) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            network,
            layout,
            config,
            splitter: FlowSplitter,
            flows: EdgeFlowTable::new(network),
        })
    }

    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }

    /// Accumulated flows so far.
    pub fn flows(&self) -> &EdgeFlowTable {
        &self.flows
    }

    pub fn into_flows(self) -> EdgeFlowTable {
        self.flows
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Solve every OD pair of `demand` and merge their flows, in table order.
    ///
    /// A pair with no route is not an error: its outcome has `paths: None`
    /// and its demand is left unassigned.
    pub fn run<O: RunObserver>(
        &mut self,
        demand:   &DemandTable,
        observer: &mut O,
    ) -> SimResult<Vec<OdOutcome>> {
        let mut outcomes = Vec::with_capacity(demand.len());

        #[cfg(not(feature = "parallel"))]
        {
            for (index, od) in demand.iter().enumerate() {
                let outcome = self.solve_od(index, od, observer)?;
                outcomes.push(self.merge(outcome, observer)?);
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let this = &*self;
            let solved: Vec<SimResult<(OdOutcome, Vec<IterationStats>)>> = demand
                .as_slice()
                .par_iter()
                .enumerate()
                .map(|(index, od)| {
                    let mut stats = Vec::with_capacity(this.config.iterations as usize);
                    let outcome = this.colony(index, od, |s| stats.push(s.clone()))?;
                    Ok((outcome, stats))
                })
                .collect();

            // Replay in demand order so observers and the flow table see the
            // same sequence as a sequential run.
            for ((index, od), result) in demand.iter().enumerate().zip(solved) {
                let (outcome, stats) = result?;
                observer.on_od_start(index, od);
                for s in &stats {
                    observer.on_iteration_end(od, s);
                }
                outcomes.push(self.merge(outcome, observer)?);
            }
        }

        observer.on_run_end(&self.flows);
        Ok(outcomes)
    }

    /// Run one OD pair's colony without touching the flow table.
    ///
    /// Calls `on_od_start` and `on_iteration_end`; `on_od_end` is left to
    /// [`run`](Self::run), which calls it after merging flows.
    pub fn solve_od<O: RunObserver>(
        &self,
        index:    usize,
        od:       &OdDemand,
        observer: &mut O,
    ) -> SimResult<OdOutcome> {
        observer.on_od_start(index, od);
        self.colony(index, od, |s| observer.on_iteration_end(od, s))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn colony<F>(&self, index: usize, od: &OdDemand, mut on_iteration: F) -> SimResult<OdOutcome>
    where
        F: FnMut(&IterationStats),
    {
        let cfg = &self.config;
        let mut env = Environment::new(self.layout, self.network.station_count());
        env.set_nest(od.origin)?;
        env.set_food(od.destination)?;

        let stream = derive_seed(cfg.seed, index as u64);
        let mut ants: Vec<Ant> = (0..cfg.ant_count)
            .map(|i| Ant::new(AgentId(i as u32), od.origin, cfg.memory_depth))
            .collect();
        let mut rngs: Vec<AgentRng> = (0..cfg.ant_count)
            .map(|i| AgentRng::new(stream, AgentId(i as u32)))
            .collect();
        let mut ledger =
            RouteLedger::new(od.origin, self.network, cfg.admission_window, cfg.max_interchanges);

        for iteration in 0..cfg.iterations {
            let (completed, admitted) =
                step_ants(&mut ants, &mut rngs, &mut env, self.network, cfg, &mut ledger)?;
            env.evaporate(cfg.evaporation_rate);

            let stats = IterationStats {
                iteration,
                completed,
                admitted,
                dead_agents: ants.iter().filter(|a| a.is_dead()).count(),
                shortest: ledger.best_route().map(|_| ledger.shortest()),
                pheromone: env.total_pheromone(),
            };
            on_iteration(&stats);
        }

        let dead_agents = ants.iter().filter(|a| a.is_dead()).count();
        let routes_offered = ledger.offered();
        let paths = ledger.finalize();
        let shares = paths.as_ref().map(|p| self.splitter.shares(p)).unwrap_or_default();

        log::debug!(
            "{} solved: {} K-path(s), {} legs offered, {} of {} ants dead",
            od.label(self.network),
            paths.as_ref().map_or(0, |p| p.len()),
            routes_offered,
            dead_agents,
            cfg.ant_count,
        );

        Ok(OdOutcome {
            index,
            origin: od.origin,
            destination: od.destination,
            demand: od.passengers,
            paths,
            shares,
            volumes: Vec::new(),
            dead_agents,
            routes_offered,
        })
    }

    /// Add one solved pair's demand to the flow table and notify `observer`.
    fn merge<O: RunObserver>(&mut self, mut outcome: OdOutcome, observer: &mut O) -> SimResult<OdOutcome> {
        if let Some(paths) = &outcome.paths {
            outcome.volumes = self.splitter.assign(paths, outcome.demand as f64, &mut self.flows)?;
        }
        observer.on_od_end(&outcome);
        Ok(outcome)
    }
}

/// Step every ant once and offer completed legs to `ledger`.
///
/// Ants move in index order against the live environment, so each ant sees
/// the deposits of the ants before it.  Returns `(completed, admitted)`.
pub(crate) fn step_ants<R: RandomSource>(
    ants:    &mut [Ant],
    rngs:    &mut [R],
    env:     &mut Environment<'_>,
    network: &TransitNetwork,
    cfg:     &ColonyConfig,
    ledger:  &mut RouteLedger<'_>,
) -> SimResult<(usize, usize)> {
    let mut completed = 0;
    let mut admitted = 0;
    for (ant, rng) in ants.iter_mut().zip(rngs.iter_mut()) {
        if let StepOutcome::Completed(route) = ant.step(env, network, cfg, rng)? {
            completed += 1;
            if ledger.offer(&route.stations, route.cost) == Admission::Admitted {
                admitted += 1;
            }
        }
    }
    Ok((completed, admitted))
}
