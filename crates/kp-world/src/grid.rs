//! Rectangular grid layout that places stations on 8-connected cells.
//!
//! The layout is a plain text grid: one row per line, cells separated by a
//! delimiter, the token [`OBSTACLE`] for an empty cell and any other token for
//! the label of the station sitting there.
//!
//! ```text
//! 1,1,q,r,s,1
//! 1,p,1,j,1,u
//! ```
//!
//! Coordinates follow the text: `x` grows to the right, `y` grows downward.

use std::path::Path;

use kp_core::StationId;

use crate::{TransitNetwork, WorldError, WorldResult};

/// Token marking an obstacle (absent) cell.
pub const OBSTACLE: &str = "1";

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the eight compass directions between adjacent cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    W,
    SW,
    S,
    SE,
    E,
    NE,
    N,
    NW,
}

impl Direction {
    /// All directions in neighbor-scan order.
    pub const ALL: [Direction; 8] = [
        Direction::W,
        Direction::SW,
        Direction::S,
        Direction::SE,
        Direction::E,
        Direction::NE,
        Direction::N,
        Direction::NW,
    ];

    /// `(dx, dy)` step for this direction, with `y` growing downward.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::W  => (-1, 0),
            Direction::SW => (-1, 1),
            Direction::S  => (0, 1),
            Direction::SE => (1, 1),
            Direction::E  => (1, 0),
            Direction::NE => (1, -1),
            Direction::N  => (0, -1),
            Direction::NW => (-1, -1),
        }
    }
}

// ── GridPos ───────────────────────────────────────────────────────────────────

/// Cell coordinate.  `(0, 0)` is the top-left cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: usize,
    pub y: usize,
}

impl GridPos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The cell one step in `dir`, or `None` past the top/left edge.
    pub fn step(self, dir: Direction) -> Option<GridPos> {
        let (dx, dy) = dir.offset();
        let x = self.x.checked_add_signed(dx as isize)?;
        let y = self.y.checked_add_signed(dy as isize)?;
        Some(GridPos { x, y })
    }

    /// Chebyshev distance is one.
    pub fn is_adjacent(self, other: GridPos) -> bool {
        self != other && self.x.abs_diff(other.x) <= 1 && self.y.abs_diff(other.y) <= 1
    }
}

// ── GridLayout ────────────────────────────────────────────────────────────────

/// Immutable station placement, shared by every OD run.
#[derive(Clone, Debug)]
pub struct GridLayout {
    width:  usize,
    height: usize,
    /// Row-major cells; `None` is an obstacle.
    cells:  Vec<Option<StationId>>,
    /// Indexed by `StationId`; `None` for stations not drawn on the grid.
    positions: Vec<Option<GridPos>>,
}

impl GridLayout {
    /// Parse a layout, resolving every label against `network`.
    ///
    /// Tokens are trimmed; blank lines are skipped.  A label that names no
    /// network station is an error, as is a label appearing twice.
    pub fn parse(text: &str, delimiter: char, network: &TransitNetwork) -> WorldResult<Self> {
        let rows: Vec<Vec<&str>> = text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.split(delimiter).map(str::trim).collect())
            .collect();

        let height = rows.len();
        let width = rows.first().map(Vec::len).ok_or(WorldError::EmptyGrid)?;
        if width == 0 {
            return Err(WorldError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(width * height);
        let mut positions: Vec<Option<GridPos>> = vec![None; network.station_count()];

        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(WorldError::RaggedGrid { row: y, expected: width, got: row.len() });
            }
            for (x, &token) in row.iter().enumerate() {
                if token == OBSTACLE {
                    cells.push(None);
                    continue;
                }
                let id = network.station(token).ok_or_else(|| WorldError::UnknownStation {
                    label:   token.to_owned(),
                    context: "the grid layout",
                })?;
                if let Some(first) = positions[id.index()] {
                    return Err(WorldError::DuplicateCell {
                        label:  token.to_owned(),
                        first:  (first.x, first.y),
                        second: (x, y),
                    });
                }
                positions[id.index()] = Some(GridPos::new(x, y));
                cells.push(Some(id));
            }
        }

        Ok(Self { width, height, cells, positions })
    }

    /// Read and parse a layout file.
    pub fn load(
        path: impl AsRef<Path>,
        delimiter: char,
        network: &TransitNetwork,
    ) -> WorldResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, delimiter, network)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Station at `pos`; `None` for obstacles and out-of-bounds positions.
    #[inline]
    pub fn at(&self, pos: GridPos) -> Option<StationId> {
        if pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        self.cells[pos.y * self.width + pos.x]
    }

    #[inline]
    pub fn position(&self, station: StationId) -> Option<GridPos> {
        self.positions.get(station.index()).copied().flatten()
    }

    pub fn contains(&self, station: StationId) -> bool {
        self.position(station).is_some()
    }

    /// Stations in the eight cells around `station`, in [`Direction::ALL`]
    /// order.  All `None` if the station is not on the grid.
    pub fn neighbors(&self, station: StationId) -> [Option<StationId>; 8] {
        let mut out = [None; 8];
        if let Some(pos) = self.position(station) {
            for (slot, dir) in out.iter_mut().zip(Direction::ALL) {
                *slot = pos.step(dir).and_then(|p| self.at(p));
            }
        }
        out
    }

    /// Configured links an ant can never walk because their endpoints are not
    /// adjacent cells (or not on the grid at all).  Each undirected link is
    /// reported once, as `(lower id, higher id)`.
    pub fn unreachable_links(&self, network: &TransitNetwork) -> Vec<(StationId, StationId)> {
        network
            .directed_edges()
            .filter(|&(a, b, _)| a < b)
            .filter(|&(a, b, _)| match (self.position(a), self.position(b)) {
                (Some(pa), Some(pb)) => !pa.is_adjacent(pb),
                _ => true,
            })
            .map(|(a, b, _)| (a, b))
            .collect()
    }
}
