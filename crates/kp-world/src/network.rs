//! Transit network representation and builder.
//!
//! # Data layout
//!
//! Stations are numbered densely by [`StationId`] in the order the builder
//! first sees their label.  Every per-station table (`links`, `station_lines`,
//! `interchanges`) is a `Vec` indexed by `StationId`, so the hot lookups the
//! ants make on every step are a bounds-checked index plus a short scan.
//!
//! Links are undirected in configuration and stored as two directed entries,
//! each sorted by destination.  A station's degree in a transit graph is tiny
//! (≤ 5 in the sample network), so a linear scan beats hashing here.

use std::collections::HashMap;

use kp_core::{LineId, StationId};

use crate::{WorldError, WorldResult};

// ── Public value types ────────────────────────────────────────────────────────

/// One directed link out of a station.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Link {
    to:      StationId,
    minutes: f64,
}

/// A named transit line: an ordered station sequence.
///
/// A `circular` line wraps from its last station back to its first; a linear
/// one has two termini.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub name:     String,
    pub stations: Vec<StationId>,
    pub circular: bool,
}

impl Line {
    /// Position of `station` along the line, if it is served.
    pub fn position(&self, station: StationId) -> Option<usize> {
        self.stations.iter().position(|&s| s == station)
    }

    pub fn contains(&self, station: StationId) -> bool {
        self.stations.contains(&station)
    }
}

/// Extra minutes charged for changing from `from_line` to `to_line` at one
/// interchange station.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterchangeRule {
    pub from_line: LineId,
    pub to_line:   LineId,
    pub penalty:   f64,
}

// ── TransitNetwork ────────────────────────────────────────────────────────────

/// Immutable transit graph shared read-only by every colony in a run.
///
/// Do not construct directly; use [`TransitNetworkBuilder`].
#[derive(Clone, Debug)]
pub struct TransitNetwork {
    labels:        Vec<String>,
    by_label:      HashMap<String, StationId>,
    links:         Vec<Vec<Link>>,
    lines:         Vec<Line>,
    station_lines: Vec<Vec<LineId>>,
    interchanges:  Vec<Vec<InterchangeRule>>,
}

impl TransitNetwork {
    // ── Stations ──────────────────────────────────────────────────────────

    pub fn station_count(&self) -> usize {
        self.labels.len()
    }

    /// Look a station up by its label.
    pub fn station(&self, label: &str) -> Option<StationId> {
        self.by_label.get(label).copied()
    }

    /// The label of `station`.
    ///
    /// # Panics
    /// Panics if `station` was not produced by this network.
    pub fn label(&self, station: StationId) -> &str {
        &self.labels[station.index()]
    }

    /// Iterator over every `StationId` in ascending order.
    pub fn stations(&self) -> impl Iterator<Item = StationId> + '_ {
        (0..self.labels.len()).map(|i| StationId(i as u32))
    }

    /// Join a station sequence into a `sep`-separated label string.
    pub fn join_labels(&self, route: &[StationId], sep: &str) -> String {
        route.iter().map(|&s| self.label(s)).collect::<Vec<_>>().join(sep)
    }

    // ── Links ─────────────────────────────────────────────────────────────

    /// Travel time from `from` to the directly linked `to`, or `None` when
    /// the two stations are not adjacent.
    #[inline]
    pub fn travel_time(&self, from: StationId, to: StationId) -> Option<f64> {
        self.links
            .get(from.index())?
            .iter()
            .find(|l| l.to == to)
            .map(|l| l.minutes)
    }

    #[inline]
    pub fn is_linked(&self, from: StationId, to: StationId) -> bool {
        self.travel_time(from, to).is_some()
    }

    /// Every directed link as `(from, to, minutes)`, grouped by source.
    pub fn directed_edges(&self) -> impl Iterator<Item = (StationId, StationId, f64)> + '_ {
        self.links.iter().enumerate().flat_map(|(i, out)| {
            out.iter().map(move |l| (StationId(i as u32), l.to, l.minutes))
        })
    }

    /// Number of directed links (twice the configured undirected count).
    pub fn edge_count(&self) -> usize {
        self.links.iter().map(Vec::len).sum()
    }

    // ── Lines ─────────────────────────────────────────────────────────────

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, id: LineId) -> &Line {
        &self.lines[id.index()]
    }

    pub fn line_by_name(&self, name: &str) -> Option<LineId> {
        self.lines
            .iter()
            .position(|l| l.name == name)
            .map(|i| LineId(i as u16))
    }

    /// Lines serving `station`, in configuration order.
    #[inline]
    pub fn lines_of(&self, station: StationId) -> &[LineId] {
        &self.station_lines[station.index()]
    }

    #[inline]
    pub fn on_line(&self, station: StationId, line: LineId) -> bool {
        self.lines_of(station).contains(&line)
    }

    // ── Interchanges ──────────────────────────────────────────────────────

    /// `true` if `station` carries at least one interchange rule.
    #[inline]
    pub fn is_interchange(&self, station: StationId) -> bool {
        !self.interchanges[station.index()].is_empty()
    }

    /// Interchange rules at `station` in configuration order.  Empty for
    /// ordinary stations.
    #[inline]
    pub fn interchange_rules(&self, station: StationId) -> &[InterchangeRule] {
        &self.interchanges[station.index()]
    }

    pub fn interchange_count(&self) -> usize {
        self.interchanges.iter().filter(|r| !r.is_empty()).count()
    }
}

// ── TransitNetworkBuilder ─────────────────────────────────────────────────────

/// Construct a [`TransitNetwork`] incrementally, then call [`build`](Self::build).
///
/// Stations are created implicitly by [`add_link`](Self::add_link) (or
/// explicitly by [`add_station`](Self::add_station)).  Lines and interchange
/// rules refer to stations and lines by name; the names are resolved in
/// `build()`, which reports the first unresolved one.
///
/// # Example
///
/// ```
/// use kp_world::TransitNetworkBuilder;
///
/// let mut b = TransitNetworkBuilder::new();
/// b.add_link("x", "y", 5.0);
/// b.add_line("red", &["x", "y"], false);
/// let net = b.build().unwrap();
/// assert_eq!(net.station_count(), 2);
/// assert_eq!(net.edge_count(), 2); // both directions
/// ```
pub struct TransitNetworkBuilder {
    labels:    Vec<String>,
    by_label:  HashMap<String, StationId>,
    raw_links: Vec<(StationId, StationId, f64)>,
    raw_lines: Vec<RawLine>,
    raw_rules: Vec<RawRule>,
}

struct RawLine {
    name:     String,
    stations: Vec<String>,
    circular: bool,
}

struct RawRule {
    station:   String,
    from_line: String,
    to_line:   String,
    penalty:   f64,
}

impl TransitNetworkBuilder {
    pub fn new() -> Self {
        Self {
            labels:    Vec::new(),
            by_label:  HashMap::new(),
            raw_links: Vec::new(),
            raw_lines: Vec::new(),
            raw_rules: Vec::new(),
        }
    }

    /// Add a station (idempotent) and return its `StationId`.
    pub fn add_station(&mut self, label: &str) -> StationId {
        if let Some(&id) = self.by_label.get(label) {
            return id;
        }
        let id = StationId(self.labels.len() as u32);
        self.labels.push(label.to_owned());
        self.by_label.insert(label.to_owned(), id);
        id
    }

    /// Add an undirected link taking `minutes` in either direction.
    pub fn add_link(&mut self, a: &str, b: &str, minutes: f64) -> (StationId, StationId) {
        let ia = self.add_station(a);
        let ib = self.add_station(b);
        self.raw_links.push((ia, ib, minutes));
        (ia, ib)
    }

    /// Add a named line serving `stations` in order.
    pub fn add_line(&mut self, name: &str, stations: &[&str], circular: bool) {
        self.raw_lines.push(RawLine {
            name:     name.to_owned(),
            stations: stations.iter().map(|s| (*s).to_owned()).collect(),
            circular,
        });
    }

    /// Charge `penalty` minutes for changing `from_line` → `to_line` at
    /// `station`.  Rules at one station are matched in the order added.
    pub fn add_interchange(&mut self, station: &str, from_line: &str, to_line: &str, penalty: f64) {
        self.raw_rules.push(RawRule {
            station:   station.to_owned(),
            from_line: from_line.to_owned(),
            to_line:   to_line.to_owned(),
            penalty,
        });
    }

    pub fn station_count(&self) -> usize {
        self.labels.len()
    }

    /// Validate every link, line, and rule and produce a [`TransitNetwork`].
    pub fn build(self) -> WorldResult<TransitNetwork> {
        let n = self.labels.len();

        // ── Links ─────────────────────────────────────────────────────────
        let mut links: Vec<Vec<Link>> = vec![Vec::new(); n];
        for &(a, b, minutes) in &self.raw_links {
            let (la, lb) = (&self.labels[a.index()], &self.labels[b.index()]);
            if a == b {
                return Err(WorldError::SelfLink(la.clone()));
            }
            if !(minutes.is_finite() && minutes > 0.0) {
                return Err(WorldError::InvalidTravelTime {
                    from: la.clone(),
                    to:   lb.clone(),
                    minutes,
                });
            }
            if let Some(existing) = links[a.index()].iter().find(|l| l.to == b) {
                if existing.minutes != minutes {
                    return Err(WorldError::ConflictingLink {
                        from:   la.clone(),
                        to:     lb.clone(),
                        first:  existing.minutes,
                        second: minutes,
                    });
                }
                continue; // exact duplicate, e.g. both directions listed
            }
            links[a.index()].push(Link { to: b, minutes });
            links[b.index()].push(Link { to: a, minutes });
        }
        for out in &mut links {
            out.sort_unstable_by_key(|l| l.to);
        }

        // ── Lines ─────────────────────────────────────────────────────────
        let mut lines: Vec<Line> = Vec::with_capacity(self.raw_lines.len());
        let mut station_lines: Vec<Vec<LineId>> = vec![Vec::new(); n];
        for raw in self.raw_lines {
            if lines.iter().any(|l| l.name == raw.name) {
                return Err(WorldError::DuplicateLine(raw.name));
            }
            let id = LineId(lines.len() as u16);
            let stations = raw
                .stations
                .iter()
                .map(|label| {
                    self.by_label.get(label).copied().ok_or_else(|| WorldError::UnknownStation {
                        label:   label.clone(),
                        context: "a line definition",
                    })
                })
                .collect::<WorldResult<Vec<_>>>()?;
            for &s in &stations {
                if !station_lines[s.index()].contains(&id) {
                    station_lines[s.index()].push(id);
                }
            }
            lines.push(Line { name: raw.name, stations, circular: raw.circular });
        }

        // ── Interchange rules ─────────────────────────────────────────────
        let line_id = |name: &str| -> WorldResult<LineId> {
            lines
                .iter()
                .position(|l| l.name == name)
                .map(|i| LineId(i as u16))
                .ok_or_else(|| WorldError::UnknownLine(name.to_owned()))
        };
        let mut interchanges: Vec<Vec<InterchangeRule>> = vec![Vec::new(); n];
        for raw in &self.raw_rules {
            let station = self.by_label.get(&raw.station).copied().ok_or_else(|| {
                WorldError::UnknownStation {
                    label:   raw.station.clone(),
                    context: "an interchange rule",
                }
            })?;
            let from_line = line_id(&raw.from_line)?;
            let to_line = line_id(&raw.to_line)?;
            let invalid = |reason: String| WorldError::InvalidInterchange {
                station: raw.station.clone(),
                reason,
            };
            if from_line == to_line {
                return Err(invalid(format!("line {:?} cannot change to itself", raw.from_line)));
            }
            if !(raw.penalty.is_finite() && raw.penalty >= 0.0) {
                return Err(invalid(format!("penalty {} must be non-negative", raw.penalty)));
            }
            if !station_lines[station.index()].contains(&from_line)
                || !station_lines[station.index()].contains(&to_line)
            {
                return Err(invalid(format!(
                    "station is not served by both {:?} and {:?}",
                    raw.from_line, raw.to_line
                )));
            }
            interchanges[station.index()].push(InterchangeRule {
                from_line,
                to_line,
                penalty: raw.penalty,
            });
        }

        Ok(TransitNetwork {
            labels: self.labels,
            by_label: self.by_label,
            links,
            lines,
            station_lines,
            interchanges,
        })
    }
}

impl Default for TransitNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
