//! Injectable randomness for every stochastic decision an ant makes.
//!
//! # Determinism strategy
//!
//! Each OD pair gets its own stream seed via [`derive_seed`], and each ant in
//! that colony gets an independent `SmallRng` seeded by:
//!
//!   seed = stream_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive IDs uniformly across the seed space.  This means:
//!
//! - A run is fully reproducible from one `u64` seed.
//! - Solving OD pairs in a different order (or in parallel) does not change
//!   any individual pair's result.
//! - Tests substitute a scripted [`RandomSource`] to drive the mistake and
//!   perturbation rules down a chosen branch.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Mix a run seed with a stream index (e.g. the OD pair's position in the
/// demand table) to get an independent, order-free stream seed.
#[inline]
pub fn derive_seed(seed: u64, stream: u64) -> u64 {
    seed ^ stream.wrapping_add(1).wrapping_mul(MIXING_CONSTANT).rotate_left(17)
}

// ── RandomSource ──────────────────────────────────────────────────────────────

/// The single seam through which ants draw randomness.
///
/// Only two primitives are required; everything the movement rules need
/// (mistake draws, perturbation draws, uniform picks) is built from them.
pub trait RandomSource {
    /// `true` with probability `p` (clamped to [0, 1]).
    fn chance(&mut self, p: f64) -> bool;

    /// A uniformly distributed index in `0..len`.  `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;

    /// Choose a uniformly random element; `None` if `items` is empty.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let i = self.pick(items.len());
        items.get(i)
    }
}

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-ant deterministic RNG.
///
/// Created one per ant when a colony is spawned and stored in a parallel
/// `Vec<AgentRng>` beside the ants, so the step loop can hand out
/// `&mut Ant` and `&mut AgentRng` at the same time.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from a stream seed and an agent ID.
    pub fn new(stream_seed: u64, agent: AgentId) -> Self {
        let seed = stream_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }
}

impl RandomSource for AgentRng {
    #[inline]
    fn chance(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    #[inline]
    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}
