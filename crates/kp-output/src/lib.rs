//! `kp-output` — run output writers and console report text.
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`row`]      | `KPathRow`, `OdSummaryRow`, `EdgeFlowRow`                  |
//! | [`writer`]   | `OutputWriter` trait                                       |
//! | [`csv`]      | `CsvWriter`: `kpaths.csv`, `od_summary.csv`, `edge_flows.csv` |
//! | [`observer`] | `RunOutputObserver`, bridging `RunObserver` to a writer    |
//! | [`report`]   | One-line console renderings of K-paths, failures, flows   |
//!
//! # Usage
//!
//! ```rust,ignore
//! use kp_output::{CsvWriter, RunOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = RunOutputObserver::new(writer, &network);
//! driver.run(&demand, &mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod report;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::RunOutputObserver;
pub use row::{EdgeFlowRow, KPathRow, OdSummaryRow};
pub use writer::OutputWriter;
