//! K-path admission.
//!
//! A [`RouteLedger`] collects every route reported for one OD pair, in report
//! order, and keeps the admissible ones sorted by cost.  Admission checks run
//! in this order; the first failing check decides the [`Admission`] result:
//!
//! 1. the route must start at the origin;
//! 2. its cost must lie within `window` of the cheapest cost seen so far;
//! 3. (the cheapest cost and best route are updated here);
//! 4. the first route is always kept;
//! 5. a route already in the ledger is dropped;
//! 6. a route through more than `max_interchanges` interchange stations is
//!    dropped;
//! 7. otherwise it is inserted before the first entry costing at least as
//!    much, so a new route goes ahead of existing routes of equal cost.
//!
//! [`RouteLedger::finalize`] then drops everything that fell out of the
//! window as the cheapest cost improved.

use kp_core::StationId;
use kp_world::TransitNetwork;

/// Starting value of the cheapest-cost tracker.
pub const SHORTEST_SENTINEL: f64 = 10_000.0;

/// Result of offering a route to the ledger.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    /// Empty, or does not start at the origin.
    Malformed,
    /// Costs more than `shortest + window`.
    OutsideWindow,
    /// Identical station sequence already held.
    Duplicate,
    TooManyInterchanges,
}

#[derive(Clone, Debug, PartialEq)]
pub struct KPathEntry {
    pub stations: Vec<StationId>,
    pub cost:     f64,
}

impl KPathEntry {
    /// Consecutive station pairs along the path.
    pub fn edges(&self) -> impl Iterator<Item = (StationId, StationId)> + '_ {
        self.stations.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Final, cost-ascending K-path list for one OD pair.
#[derive(Clone, Debug, PartialEq)]
pub struct KPathSet {
    pub entries:  Vec<KPathEntry>,
    pub shortest: f64,
}

impl KPathSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn costs(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.cost).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KPathEntry> {
        self.entries.iter()
    }
}

// ── RouteLedger ───────────────────────────────────────────────────────────────

pub struct RouteLedger<'a> {
    origin:           StationId,
    network:          &'a TransitNetwork,
    window:           f64,
    max_interchanges: usize,
    shortest:         f64,
    best:             Option<Vec<StationId>>,
    entries:          Vec<KPathEntry>,
    offered:          u64,
}

impl<'a> RouteLedger<'a> {
    pub fn new(
        origin: StationId,
        network: &'a TransitNetwork,
        window: f64,
        max_interchanges: usize,
    ) -> Self {
        Self {
            origin,
            network,
            window,
            max_interchanges,
            shortest: SHORTEST_SENTINEL,
            best: None,
            entries: Vec::new(),
            offered: 0,
        }
    }

    /// Offer one reported route.  See the module docs for the check order.
    pub fn offer(&mut self, route: &[StationId], cost: f64) -> Admission {
        self.offered += 1;

        if route.first() != Some(&self.origin) {
            return Admission::Malformed;
        }
        if cost - self.shortest > self.window {
            return Admission::OutsideWindow;
        }
        if cost < self.shortest {
            self.shortest = cost;
            self.best = Some(route.to_vec());
        }

        let entry = KPathEntry { stations: route.to_vec(), cost };
        if self.entries.is_empty() {
            self.entries.push(entry);
            return Admission::Admitted;
        }
        if self.entries.iter().any(|e| e.stations == route) {
            return Admission::Duplicate;
        }
        if self.interchanges_on(route) > self.max_interchanges {
            return Admission::TooManyInterchanges;
        }

        let at = self.entries.partition_point(|e| e.cost < cost);
        self.entries.insert(at, entry);
        Admission::Admitted
    }

    /// Distinct interchange stations `route` passes through, endpoints
    /// included.
    pub fn interchanges_on(&self, route: &[StationId]) -> usize {
        count_interchanges(self.network, route)
    }

    /// Cheapest cost admitted so far, or [`SHORTEST_SENTINEL`].
    pub fn shortest(&self) -> f64 {
        self.shortest
    }

    pub fn best_route(&self) -> Option<&[StationId]> {
        self.best.as_deref()
    }

    /// Entries held right now, before the final window cut.
    pub fn entries(&self) -> &[KPathEntry] {
        &self.entries
    }

    /// Number of routes offered, admitted or not.
    pub fn offered(&self) -> u64 {
        self.offered
    }

    /// Cut the list to the final window and transfer cap.  `None` when no
    /// route was ever admitted.
    pub fn finalize(self) -> Option<KPathSet> {
        if self.best.is_none() {
            return None;
        }
        let shortest = self.shortest;
        let window = self.window;
        let cap = self.max_interchanges;
        let network = self.network;

        let entries: Vec<KPathEntry> = self
            .entries
            .into_iter()
            .filter(|e| e.cost - shortest <= window)
            .filter(|e| count_interchanges(network, &e.stations) <= cap)
            .collect();

        if entries.is_empty() {
            return None;
        }
        Some(KPathSet { entries, shortest })
    }
}

fn count_interchanges(network: &TransitNetwork, route: &[StationId]) -> usize {
    let mut seen: Vec<StationId> = Vec::new();
    for &s in route {
        if network.is_interchange(s) && !seen.contains(&s) {
            seen.push(s);
        }
    }
    seen.len()
}
