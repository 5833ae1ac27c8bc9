//! `kp-route` — what happens to routes once ants have found them.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`ledger`] | `RouteLedger` (K-path admission), `Admission`, `KPathSet`        |
//! | [`flow`]   | `attractiveness`, `split_proportions`, `FlowSplitter`, `EdgeFlowTable` |
//! | [`demand`] | `DemandTable`, `OdDemand`, CSV loader                           |
//! | [`error`]  | `RouteError`, `RouteResult<T>`                                  |
//!
//! # Data flow
//!
//! ```text
//! CompletedRoute ──offer──▶ RouteLedger ──finalize──▶ KPathSet
//!                                                        │
//!                      DemandTable ──▶ FlowSplitter::assign ──▶ EdgeFlowTable
//! ```

pub mod demand;
pub mod error;
pub mod flow;
pub mod ledger;

#[cfg(test)]
mod tests;

pub use demand::{DemandTable, OdDemand, load_demand_csv, load_demand_reader};
pub use error::{RouteError, RouteResult};
pub use flow::{EdgeFlowTable, FlowSplitter, attractiveness, split_proportions};
pub use ledger::{Admission, KPathEntry, KPathSet, RouteLedger, SHORTEST_SENTINEL};
