//! JSON network loader.
//!
//! # File format
//!
//! ```json
//! {
//!   "links": [ { "from": "x", "to": "y", "minutes": 5 } ],
//!   "lines": [ { "name": "1", "stations": ["x", "y"], "circular": false } ],
//!   "interchanges": [
//!     { "station": "y", "from_line": "1", "to_line": "2", "minutes": 4 }
//!   ],
//!   "params": { "iterations": 100, "ant_count": 50, "seed": 7 }
//! }
//! ```
//!
//! Links are undirected.  `lines`, `interchanges`, and `params` may be
//! omitted; any parameter missing from `params` takes its
//! [`ColonyConfig::default`] value.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use kp_core::ColonyConfig;

use crate::{TransitNetwork, TransitNetworkBuilder, WorldResult};

// ── JSON records ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NetworkFile {
    links: Vec<LinkRecord>,
    #[serde(default)]
    lines: Vec<LineRecord>,
    #[serde(default)]
    interchanges: Vec<InterchangeRecord>,
    #[serde(default)]
    params: ColonyConfig,
}

#[derive(Deserialize)]
struct LinkRecord {
    from:    String,
    to:      String,
    minutes: f64,
}

#[derive(Deserialize)]
struct LineRecord {
    name:     String,
    stations: Vec<String>,
    #[serde(default)]
    circular: bool,
}

#[derive(Deserialize)]
struct InterchangeRecord {
    station:   String,
    from_line: String,
    to_line:   String,
    minutes:   f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// A validated network plus the algorithm parameters stored beside it.
#[derive(Clone, Debug)]
pub struct NetworkConfig {
    pub network: TransitNetwork,
    pub params:  ColonyConfig,
}

/// Load a [`NetworkConfig`] from a JSON file.
pub fn load_network_config(path: impl AsRef<Path>) -> WorldResult<NetworkConfig> {
    let file = std::fs::File::open(path)?;
    load_network_reader(std::io::BufReader::new(file))
}

/// Like [`load_network_config`] but accepts any `Read` source.
pub fn load_network_reader<R: Read>(reader: R) -> WorldResult<NetworkConfig> {
    let file: NetworkFile = serde_json::from_reader(reader)?;
    build(file)
}

/// Parse a [`NetworkConfig`] from JSON text.
pub fn parse_network_config(text: &str) -> WorldResult<NetworkConfig> {
    let file: NetworkFile = serde_json::from_str(text)?;
    build(file)
}

fn build(file: NetworkFile) -> WorldResult<NetworkConfig> {
    file.params.validate()?;

    let mut b = TransitNetworkBuilder::new();
    for link in &file.links {
        b.add_link(&link.from, &link.to, link.minutes);
    }
    for line in &file.lines {
        let stations: Vec<&str> = line.stations.iter().map(String::as_str).collect();
        b.add_line(&line.name, &stations, line.circular);
    }
    for rule in &file.interchanges {
        b.add_interchange(&rule.station, &rule.from_line, &rule.to_line, rule.minutes);
    }
    let network = b.build()?;

    log::debug!(
        "network loaded: {} stations, {} directed links, {} lines, {} interchange stations",
        network.station_count(),
        network.edge_count(),
        network.lines().len(),
        network.interchange_count(),
    );

    Ok(NetworkConfig { network, params: file.params })
}
