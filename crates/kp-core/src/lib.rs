//! `kp-core` — foundational types for the ant-colony K-path workspace.
//!
//! This crate is a dependency of every other `kp-*` crate.  It has no `kp-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `StationId`, `LineId`                          |
//! | [`rng`]    | `RandomSource` trait, `AgentRng`, `derive_seed`           |
//! | [`config`] | `ColonyConfig` — every tunable algorithm parameter        |
//! | [`error`]  | `KpError`, `KpResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to IDs and `ColonyConfig`.  |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::ColonyConfig;
pub use error::{KpError, KpResult};
pub use ids::{AgentId, LineId, StationId};
pub use rng::{AgentRng, RandomSource, derive_seed};
