//! Splitting OD demand across K-paths and accumulating per-edge flow.
//!
//! Each path gets a Gaussian attractiveness around the cheapest cost,
//!
//!   S_i = exp(−2 (C_i − C_min)² / 25)
//!
//! and the share of demand it carries is
//!
//!   P_i = S_i / Σ_{j≠i} S_j
//!
//! The denominator leaves path `i` itself out, so shares do not sum to one
//! in general.  An OD pair with a single path sends all of its demand along
//! it.

use std::collections::HashMap;

use kp_core::StationId;
use kp_world::TransitNetwork;

use crate::{KPathSet, RouteError, RouteResult};

/// `exp(-2 (cost - shortest)^2 / 25)`.
#[inline]
pub fn attractiveness(cost: f64, shortest: f64) -> f64 {
    let d = cost - shortest;
    (-2.0 * d * d / 25.0).exp()
}

/// Share of demand carried by each path, in the order of `costs`.
pub fn split_proportions(costs: &[f64], shortest: f64) -> Vec<f64> {
    if costs.len() <= 1 {
        return vec![1.0; costs.len()];
    }
    let s: Vec<f64> = costs.iter().map(|&c| attractiveness(c, shortest)).collect();
    let total: f64 = s.iter().sum();
    s.iter()
        .map(|&si| {
            let others = total - si;
            if others > 0.0 { si / others } else { 0.0 }
        })
        .collect()
}

// ── EdgeFlowTable ─────────────────────────────────────────────────────────────

/// Accumulated flow on every directed link of the network.
///
/// Entries are created up front, one per directed link, all zero; iteration
/// follows [`TransitNetwork::directed_edges`] order.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeFlowTable {
    edges: Vec<(StationId, StationId)>,
    flows: Vec<f64>,
    index: HashMap<(StationId, StationId), usize>,
}

impl EdgeFlowTable {
    pub fn new(network: &TransitNetwork) -> Self {
        let edges: Vec<(StationId, StationId)> =
            network.directed_edges().map(|(a, b, _)| (a, b)).collect();
        let index = edges.iter().enumerate().map(|(i, &e)| (e, i)).collect();
        Self { flows: vec![0.0; edges.len()], edges, index }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, from: StationId, to: StationId) -> bool {
        self.index.contains_key(&(from, to))
    }

    /// Add `amount` to the directed edge `from → to`.
    pub fn add(&mut self, from: StationId, to: StationId, amount: f64) -> RouteResult<()> {
        let &i = self
            .index
            .get(&(from, to))
            .ok_or(RouteError::UnknownEdge { from, to })?;
        self.flows[i] += amount;
        Ok(())
    }

    pub fn get(&self, from: StationId, to: StationId) -> Option<f64> {
        self.index.get(&(from, to)).map(|&i| self.flows[i])
    }

    /// `(from, to, flow)` for every directed link, zero entries included.
    pub fn iter(&self) -> impl Iterator<Item = (StationId, StationId, f64)> + '_ {
        self.edges.iter().zip(&self.flows).map(|(&(a, b), &f)| (a, b, f))
    }

    pub fn total(&self) -> f64 {
        self.flows.iter().sum()
    }

    /// Add every entry of `other` into `self`.  Both tables must come from
    /// the same network.
    pub fn merge(&mut self, other: &EdgeFlowTable) -> RouteResult<()> {
        for (a, b, f) in other.iter() {
            if f != 0.0 {
                self.add(a, b, f)?;
            }
        }
        Ok(())
    }
}

// ── FlowSplitter ──────────────────────────────────────────────────────────────

/// Applies the split rule to one OD pair's K-paths.
#[derive(Copy, Clone, Debug, Default)]
pub struct FlowSplitter;

impl FlowSplitter {
    /// Share of demand each path of `paths` carries.
    pub fn shares(&self, paths: &KPathSet) -> Vec<f64> {
        split_proportions(&paths.costs(), paths.shortest)
    }

    /// Add `demand × share` to every edge of every path and return the
    /// per-path volumes.
    ///
    /// Every edge is checked before any flow is written, so a failed call
    /// leaves `table` untouched.
    pub fn assign(
        &self,
        paths: &KPathSet,
        demand: f64,
        table: &mut EdgeFlowTable,
    ) -> RouteResult<Vec<f64>> {
        for (from, to) in paths.iter().flat_map(|p| p.edges()) {
            if !table.contains(from, to) {
                return Err(RouteError::UnknownEdge { from, to });
            }
        }

        let volumes: Vec<f64> = self.shares(paths).iter().map(|p| demand * p).collect();
        for (path, &volume) in paths.iter().zip(&volumes) {
            for (from, to) in path.edges() {
                table.add(from, to, volume)?;
            }
        }
        Ok(volumes)
    }
}
