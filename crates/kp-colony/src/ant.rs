//! The ant state machine.
//!
//! # One step
//!
//! | Rule            | Applies when                               | Choice                                   |
//! |-----------------|--------------------------------------------|------------------------------------------|
//! | dead            | the ant hit a dead end earlier             | nothing                                  |
//! | foraging        | a candidate carries the target marker      | that candidate; the leg completes        |
//! | trail           | a candidate carries the followed trail     | strongest trail, or a mistake            |
//! | inertia         | no trail                                   | next station on the current line         |
//! | perturbation    | after inertia, with `perturbation` chance  | uniform candidate                        |
//! | avoidance       | nothing chosen yet                         | uniform linked station off the leg       |
//!
//! *Candidates* are the grid neighbors the network links to the current
//! station that are neither on the current leg nor in recent memory.
//!
//! # Cost accounting
//!
//! The leg accumulator starts at [`LEG_COST_BASE`] and grows by the travel
//! time of every move plus any interchange penalty at the station being left.
//! Each move deposits `pheromone_budget / accumulator` at the arrival
//! station, so trails fade with distance from the leg's start.

use kp_core::{AgentId, ColonyConfig, RandomSource, StationId};
use kp_world::{Environment, Mode, TransitNetwork};

use crate::{ColonyError, ColonyResult, RecentMemory, inertia_successor, interchange_penalty};

/// Initial value of the leg accumulator and the divisor of the first deposit.
pub const LEG_COST_BASE: f64 = 1.0;

// ── Outcomes ──────────────────────────────────────────────────────────────────

/// One finished leg, from the marker the ant left to the marker it reached.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletedRoute {
    pub stations: Vec<StationId>,
    /// Final value of the leg accumulator.
    pub cost: f64,
    /// The mode the ant was in while walking the leg.
    pub mode: Mode,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// The ant is dead (now or earlier) and did not move.
    Dead,
    /// The ant moved to the given station.
    Moved(StationId),
    /// The ant reached its target marker.
    Completed(CompletedRoute),
}

// ── Ant ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Ant {
    id:       AgentId,
    position: StationId,
    mode:     Mode,
    previous: Option<StationId>,
    memory:   RecentMemory,
    leg:      Vec<StationId>,
    leg_cost: f64,
    dead:     bool,
    legs:     u32,
}

impl Ant {
    /// A fresh ant at `start`, seeking food.
    pub fn new(id: AgentId, start: StationId, memory_depth: usize) -> Self {
        let mut memory = RecentMemory::new(memory_depth);
        memory.push(start);
        Self {
            id,
            position: start,
            mode: Mode::SeekingFood,
            previous: None,
            memory,
            leg: vec![start],
            leg_cost: LEG_COST_BASE,
            dead: false,
            legs: 0,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn position(&self) -> StationId {
        self.position
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Station the ant arrived from; `None` at the start of a leg.
    pub fn previous(&self) -> Option<StationId> {
        self.previous
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Stations of the leg in progress, starting with the leg's origin.
    pub fn leg(&self) -> &[StationId] {
        &self.leg
    }

    pub fn leg_cost(&self) -> f64 {
        self.leg_cost
    }

    pub fn memory(&self) -> &RecentMemory {
        &self.memory
    }

    /// Number of legs completed so far.
    pub fn legs_completed(&self) -> u32 {
        self.legs
    }

    // ── Step ──────────────────────────────────────────────────────────────

    /// Advance the ant by one move.
    ///
    /// Returns an error only when the chosen move has no configured travel
    /// time, which means the grid and the network disagree.
    pub fn step<R: RandomSource>(
        &mut self,
        env: &mut Environment<'_>,
        net: &TransitNetwork,
        cfg: &ColonyConfig,
        rng: &mut R,
    ) -> ColonyResult<StepOutcome> {
        if self.dead {
            return Ok(StepOutcome::Dead);
        }

        let current = self.position;
        let linked: Vec<StationId> = env
            .neighbors(current)
            .into_iter()
            .flatten()
            .filter(|&n| net.is_linked(current, n))
            .collect();
        let candidates: Vec<StationId> = linked
            .iter()
            .copied()
            .filter(|&n| !self.leg.contains(&n) && !self.memory.contains(n))
            .collect();

        let target = self.mode.target();
        if let Some(&goal) = candidates.iter().find(|&&n| env.marker(n) == target) {
            return self.complete_leg(goal, env, net, cfg).map(StepOutcome::Completed);
        }

        let choice = match self.follow_trail(&candidates, env, cfg, rng) {
            Some(n) => Some(n),
            None => self.wander(&candidates, net, cfg, rng),
        };

        let next = match choice {
            Some(n) => n,
            None => {
                let fallback: Vec<StationId> =
                    linked.into_iter().filter(|n| !self.leg.contains(n)).collect();
                match rng.choose(&fallback) {
                    Some(&n) => n,
                    None => {
                        self.dead = true;
                        log::trace!("{} died at {}", self.id, net.label(current));
                        return Ok(StepOutcome::Dead);
                    }
                }
            }
        };

        self.advance(next, net)?;
        self.memory.push(next);
        self.leg.push(next);
        env.deposit(next, self.mode, cfg.pheromone_budget / self.leg_cost);
        Ok(StepOutcome::Moved(next))
    }

    // ── Rules ─────────────────────────────────────────────────────────────

    /// Trail rule.  `None` when no candidate carries the followed trail or
    /// no candidate's weighted trail is positive.
    fn follow_trail<R: RandomSource>(
        &self,
        candidates: &[StationId],
        env: &Environment<'_>,
        cfg: &ColonyConfig,
        rng: &mut R,
    ) -> Option<StationId> {
        let scented = candidates
            .iter()
            .filter(|&&n| env.pheromone(n).toward(self.mode) > 0.0)
            .count();
        if scented == 0 {
            return None;
        }

        // Only a strictly positive blend counts as guidance.
        let mut best = None;
        let mut best_value = 0.0;
        for (i, &n) in candidates.iter().enumerate() {
            let value = env.pheromone(n).weighted(self.mode, cfg.pheromone_weight);
            if value > best_value {
                best = Some(i);
                best_value = value;
            }
        }
        let best = best?;

        if scented >= 2 && rng.chance(cfg.mistake_rate) {
            let others: Vec<StationId> = candidates
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != best)
                .map(|(_, &n)| n)
                .collect();
            return rng.choose(&others).copied();
        }
        Some(candidates[best])
    }

    /// Inertia plus perturbation.  `None` when no candidate survives.
    fn wander<R: RandomSource>(
        &self,
        candidates: &[StationId],
        net: &TransitNetwork,
        cfg: &ColonyConfig,
        rng: &mut R,
    ) -> Option<StationId> {
        if candidates.is_empty() {
            return None;
        }
        let mut choice = match self.previous {
            Some(prev) => {
                inertia_successor(net, prev, self.position).filter(|n| candidates.contains(n))
            }
            None => rng.choose(candidates).copied(),
        };
        if rng.chance(cfg.perturbation) {
            choice = rng.choose(candidates).copied();
        }
        choice
    }

    // ── State updates ─────────────────────────────────────────────────────

    /// Charge the move `position → next` and make `next` the position.
    fn advance(&mut self, next: StationId, net: &TransitNetwork) -> ColonyResult<()> {
        let current = self.position;
        let minutes = net
            .travel_time(current, next)
            .ok_or(ColonyError::MissingLink { from: current, to: next })?;
        self.leg_cost += minutes;
        if let Some(prev) = self.previous {
            self.leg_cost += interchange_penalty(net, prev, current, next);
        }
        self.previous = Some(current);
        self.position = next;
        Ok(())
    }

    /// Step onto the target marker, report the leg, and turn around.
    fn complete_leg(
        &mut self,
        goal: StationId,
        env: &mut Environment<'_>,
        net: &TransitNetwork,
        cfg: &ColonyConfig,
    ) -> ColonyResult<CompletedRoute> {
        self.advance(goal, net)?;
        self.leg.push(goal);

        let route = CompletedRoute {
            stations: std::mem::replace(&mut self.leg, vec![goal]),
            cost:     self.leg_cost,
            mode:     self.mode,
        };

        self.mode = self.mode.flipped();
        self.previous = None;
        self.leg_cost = LEG_COST_BASE;
        self.memory.clear();
        self.memory.push(goal);
        self.legs += 1;
        env.deposit(goal, self.mode, cfg.pheromone_budget / self.leg_cost);
        Ok(route)
    }
}
