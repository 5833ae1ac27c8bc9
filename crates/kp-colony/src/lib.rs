//! `kp-colony` — the ant.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                       |
//! |------------|----------------------------------------------------------------|
//! | [`ant`]    | `Ant`, `StepOutcome`, `CompletedRoute`, the per-step rules     |
//! | [`cost`]   | `interchange_penalty`, `inertia_successor` (pure functions)    |
//! | [`memory`] | `RecentMemory` fixed-capacity ring buffer                      |
//! | [`error`]  | `ColonyError`, `ColonyResult<T>`                               |
//!
//! # Design notes
//!
//! An ant owns only its own walk.  Everything shared (the network, the grid,
//! the pheromone field) is passed into [`Ant::step`] by reference, and every
//! random draw goes through a caller-supplied [`RandomSource`], so a step is
//! a deterministic function of its arguments.
//!
//! [`RandomSource`]: kp_core::RandomSource

pub mod ant;
pub mod cost;
pub mod error;
pub mod memory;


pub use ant::{Ant, CompletedRoute, LEG_COST_BASE, StepOutcome};
pub use cost::{inertia_successor, interchange_penalty};
pub use error::{ColonyError, ColonyResult};
pub use memory::RecentMemory;
