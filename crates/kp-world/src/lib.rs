//! `kp-world` — everything an ant can sense: the transit network, the grid
//! the stations sit on, and the pheromone field laid over that grid.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`network`]     | `TransitNetwork`, `TransitNetworkBuilder`, `Line`, `InterchangeRule` |
//! | [`grid`]        | `GridLayout` text parsing, `Direction`, `GridPos`         |
//! | [`environment`] | `Environment` (per-OD pheromone field), `Mode`, `Marker`  |
//! | [`config`]      | `NetworkConfig` JSON loader                               |
//! | [`error`]       | `WorldError`, `WorldResult<T>`                            |
//!
//! # Lifecycle
//!
//! `TransitNetwork` and `GridLayout` are built once per run and shared
//! read-only.  An `Environment` borrows the layout and is created fresh for
//! every OD pair, so no pheromone ever leaks between pairs.

pub mod config;
pub mod environment;
pub mod error;
pub mod grid;
pub mod network;


pub use config::{NetworkConfig, load_network_config, load_network_reader, parse_network_config};
pub use environment::{CellState, Environment, Marker, Mode, Pheromone};
pub use error::{WorldError, WorldResult};
pub use grid::{Direction, GridLayout, GridPos, OBSTACLE};
pub use network::{InterchangeRule, Line, TransitNetwork, TransitNetworkBuilder};
