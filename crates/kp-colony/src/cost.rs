//! Pure move rules that depend only on the network tables.

use kp_core::StationId;
use kp_world::TransitNetwork;

/// Extra minutes for passing through `current` on the way `prev → current →
/// next`.
///
/// The first rule at `current` whose `from_line` serves `prev` and whose
/// `to_line` serves `next` applies.  Stations without rules, and line pairs
/// no rule covers, cost nothing.
pub fn interchange_penalty(
    net: &TransitNetwork,
    prev: StationId,
    current: StationId,
    next: StationId,
) -> f64 {
    net.interchange_rules(current)
        .iter()
        .find(|r| net.on_line(prev, r.from_line) && net.on_line(next, r.to_line))
        .map_or(0.0, |r| r.penalty)
}

/// The station an ant would reach by carrying on along its current line.
///
/// The line is the first one serving both `prev` and `current`; the direction
/// is the one that took the ant from `prev` to `current`.  Linear lines end at
/// their termini (`None`); circular lines wrap around.
pub fn inertia_successor(
    net: &TransitNetwork,
    prev: StationId,
    current: StationId,
) -> Option<StationId> {
    let line = net
        .lines_of(current)
        .iter()
        .map(|&id| net.line(id))
        .find(|l| l.contains(prev))?;

    let n = line.stations.len();
    let p = line.position(prev)?;
    let c = line.position(current)?;

    let forward = if line.circular && n > 2 && (p + 1) % n == c {
        true
    } else if line.circular && n > 2 && (c + 1) % n == p {
        false
    } else {
        c > p
    };

    let next = if forward {
        if c + 1 < n {
            c + 1
        } else if line.circular {
            0
        } else {
            return None;
        }
    } else if c > 0 {
        c - 1
    } else if line.circular {
        n - 1
    } else {
        return None;
    };

    Some(line.stations[next])
}
