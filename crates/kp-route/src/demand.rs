//! OD demand table and CSV loader.
//!
//! # CSV format
//!
//! ```csv
//! origin,destination,passengers
//! a,b,1053
//! a,c,806
//! ```
//!
//! Labels must name network stations.  Rows are solved in file order.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use kp_core::StationId;
use kp_world::TransitNetwork;

use crate::{RouteError, RouteResult};

/// Passenger volume for one origin–destination pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OdDemand {
    pub origin:      StationId,
    pub destination: StationId,
    pub passengers:  u32,
}

impl OdDemand {
    /// Origin and destination labels run together, e.g. `"xy"`.
    pub fn label(&self, network: &TransitNetwork) -> String {
        format!("{}{}", network.label(self.origin), network.label(self.destination))
    }
}

/// OD pairs in the order they will be solved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DemandTable {
    entries: Vec<OdDemand>,
}

impl DemandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair.  Returns `false` (and changes nothing) if the pair is
    /// already present or origin equals destination.
    pub fn push(&mut self, od: OdDemand) -> bool {
        if od.origin == od.destination || self.get(od.origin, od.destination).is_some() {
            return false;
        }
        self.entries.push(od);
        true
    }

    pub fn get(&self, origin: StationId, destination: StationId) -> Option<u32> {
        self.entries
            .iter()
            .find(|d| d.origin == origin && d.destination == destination)
            .map(|d| d.passengers)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OdDemand> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[OdDemand] {
        &self.entries
    }

    /// Keep only the pairs matching `keep`, preserving order.
    pub fn retain(&mut self, keep: impl FnMut(&OdDemand) -> bool) {
        self.entries.retain(keep);
    }

    /// Sum of all passengers.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|d| d.passengers as u64).sum()
    }
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct DemandRecord {
    origin:      String,
    destination: String,
    passengers:  u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`DemandTable`] from a CSV file, resolving labels against
/// `network`.
pub fn load_demand_csv(path: impl AsRef<Path>, network: &TransitNetwork) -> RouteResult<DemandTable> {
    let file = std::fs::File::open(path)?;
    load_demand_reader(file, network)
}

/// Like [`load_demand_csv`] but accepts any `Read` source.
pub fn load_demand_reader<R: Read>(reader: R, network: &TransitNetwork) -> RouteResult<DemandTable> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut table = DemandTable::new();

    for (i, result) in csv_reader.deserialize::<DemandRecord>().enumerate() {
        let row = i + 1;
        let rec = result?;
        let resolve = |label: &str| {
            network.station(label).ok_or_else(|| RouteError::Demand {
                row,
                reason: format!("unknown station {label:?}"),
            })
        };
        let od = OdDemand {
            origin:      resolve(&rec.origin)?,
            destination: resolve(&rec.destination)?,
            passengers:  rec.passengers,
        };
        if od.origin == od.destination {
            return Err(RouteError::Demand {
                row,
                reason: format!("origin and destination are both {:?}", rec.origin),
            });
        }
        if !table.push(od) {
            return Err(RouteError::Demand {
                row,
                reason: format!("duplicate pair {}{}", rec.origin, rec.destination),
            });
        }
    }

    log::debug!("demand loaded: {} OD pairs, {} passengers", table.len(), table.total());
    Ok(table)
}
