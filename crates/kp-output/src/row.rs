//! Plain data row types written by output backends.

use kp_route::EdgeFlowTable;
use kp_sim::OdOutcome;
use kp_world::TransitNetwork;

/// One discovered K-path.
#[derive(Debug, Clone, PartialEq)]
pub struct KPathRow {
    /// Origin and destination labels run together, e.g. `"ah"`.
    pub od:     String,
    /// 1-based rank within the OD pair.
    pub rank:   usize,
    /// Dash-joined station labels.
    pub route:  String,
    pub cost:   f64,
    pub share:  f64,
    /// Passengers assigned; zero until flows are merged.
    pub volume: f64,
}

/// One line per OD pair, found or not.
#[derive(Debug, Clone, PartialEq)]
pub struct OdSummaryRow {
    pub od:          String,
    pub demand:      u32,
    pub k:           usize,
    /// `None` when no route was found.
    pub shortest:    Option<f64>,
    pub dead_agents: usize,
}

/// Total flow on one directed link.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeFlowRow {
    pub from: String,
    pub to:   String,
    pub flow: f64,
}

pub fn od_label(network: &TransitNetwork, outcome: &OdOutcome) -> String {
    format!("{}{}", network.label(outcome.origin), network.label(outcome.destination))
}

impl KPathRow {
    /// Rows for every K-path of `outcome`; empty on failure.
    pub fn from_outcome(network: &TransitNetwork, outcome: &OdOutcome) -> Vec<KPathRow> {
        let Some(paths) = &outcome.paths else {
            return Vec::new();
        };
        let od = od_label(network, outcome);
        paths
            .iter()
            .enumerate()
            .map(|(i, e)| KPathRow {
                od:     od.clone(),
                rank:   i + 1,
                route:  network.join_labels(&e.stations, "-"),
                cost:   e.cost,
                share:  outcome.shares.get(i).copied().unwrap_or(0.0),
                volume: outcome.volumes.get(i).copied().unwrap_or(0.0),
            })
            .collect()
    }
}

impl OdSummaryRow {
    pub fn from_outcome(network: &TransitNetwork, outcome: &OdOutcome) -> Self {
        Self {
            od:          od_label(network, outcome),
            demand:      outcome.demand,
            k:           outcome.k(),
            shortest:    outcome.paths.as_ref().map(|p| p.shortest),
            dead_agents: outcome.dead_agents,
        }
    }
}

impl EdgeFlowRow {
    /// One row per directed link, zero flows included, in table order.
    pub fn from_table(network: &TransitNetwork, flows: &EdgeFlowTable) -> Vec<EdgeFlowRow> {
        flows
            .iter()
            .map(|(a, b, flow)| EdgeFlowRow {
                from: network.label(a).to_owned(),
                to:   network.label(b).to_owned(),
                flow,
            })
            .collect()
    }
}
