//! `kp-sim` — runs one ant colony per OD pair and turns the results into
//! edge flows.
//!
//! # Per-OD loop
//!
//! ```text
//! for each OD pair, in demand order:
//!   fresh Environment: nest at origin, food at destination
//!   ant_count ants at the nest, each with its own AgentRng
//!   for iteration in 0..iterations:
//!     ① step ants 0..N-1 in order; each deposit is visible to later ants
//!     ② offer every completed leg to the RouteLedger
//!     ③ evaporate once
//!   finalize the ledger → KPathSet (or a failure notice)
//!   split demand over the K-paths into the EdgeFlowTable
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Solves OD colonies on Rayon's thread pool.  Results are identical to a sequential run. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use kp_sim::{Driver, LogObserver};
//!
//! let mut driver = Driver::new(&network, &layout, params)?;
//! let outcomes = driver.run(&demand, &mut LogObserver::new(&network))?;
//! for (from, to, flow) in driver.flows().iter() { /* ... */ }
//! ```

pub mod driver;
pub mod error;
pub mod observer;
pub mod outcome;


pub use driver::Driver;
pub use error::{SimError, SimResult};
pub use observer::{LogObserver, NoopObserver, RunObserver};
pub use outcome::{IterationStats, OdOutcome};
