//! Console report lines.
//!
//! ```text
//! The 1 K-path for OD: ah->a-c-d-e-f-g-h time:49 min
//! search K-path for OD:xq failed, please run again with another seed.
//! ah 472
//! ```

use kp_sim::OdOutcome;
use kp_world::TransitNetwork;

use crate::row::od_label;

/// `rank` is 1-based.
pub fn kpath_line(rank: usize, od: &str, route: &str, cost: f64) -> String {
    format!("The {rank} K-path for OD: {od}->{route} time:{cost} min")
}

pub fn failure_notice(od: &str) -> String {
    format!("search K-path for OD:{od} failed, please run again with another seed.")
}

/// Edge flow rounded up to whole passengers.
pub fn flow_line(from: &str, to: &str, flow: f64) -> String {
    format!("{from}{to} {}", flow.ceil() as u64)
}

/// Every console line for one OD pair: its K-paths in rank order, or the
/// failure notice.
pub fn outcome_lines(network: &TransitNetwork, outcome: &OdOutcome) -> Vec<String> {
    let od = od_label(network, outcome);
    match &outcome.paths {
        None => vec![failure_notice(&od)],
        Some(paths) => paths
            .iter()
            .enumerate()
            .map(|(i, e)| kpath_line(i + 1, &od, &network.join_labels(&e.stations, "-"), e.cost))
            .collect(),
    }
}
