//! The per-OD pheromone field.
//!
//! Every station cell carries one [`CellState`]: a marker and a pheromone
//! pair.  Obstacle cells carry nothing, so the state table is indexed by
//! `StationId` rather than by grid position.
//!
//! Trails record where an ant came from: an ant heading for food lays *nest*
//! pheromone and an ant heading home lays *food* pheromone, so each trail
//! attracts ants travelling the opposite way.

use kp_core::StationId;

use crate::{GridLayout, WorldError, WorldResult};

// ── Mode / Marker ─────────────────────────────────────────────────────────────

/// What an ant is currently looking for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    SeekingFood,
    SeekingNest,
}

impl Mode {
    pub fn flipped(self) -> Mode {
        match self {
            Mode::SeekingFood => Mode::SeekingNest,
            Mode::SeekingNest => Mode::SeekingFood,
        }
    }

    /// The marker that ends a leg in this mode.
    pub fn target(self) -> Marker {
        match self {
            Mode::SeekingFood => Marker::Food,
            Mode::SeekingNest => Marker::Nest,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Marker {
    #[default]
    None,
    Food,
    Nest,
}

// ── Pheromone ─────────────────────────────────────────────────────────────────

/// Trail levels on one cell.  Both are always ≥ 0.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Pheromone {
    pub food: f64,
    pub nest: f64,
}

impl Pheromone {
    /// The trail an ant in `mode` follows: food trail when seeking food.
    #[inline]
    pub fn toward(self, mode: Mode) -> f64 {
        match mode {
            Mode::SeekingFood => self.food,
            Mode::SeekingNest => self.nest,
        }
    }

    /// `weight · toward(mode) + (1 − weight) · toward(mode.flipped())`.
    #[inline]
    pub fn weighted(self, mode: Mode, weight: f64) -> f64 {
        weight * self.toward(mode) + (1.0 - weight) * self.toward(mode.flipped())
    }

    pub fn total(self) -> f64 {
        self.food + self.nest
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CellState {
    pub marker:    Marker,
    pub pheromone: Pheromone,
}

// ── Environment ───────────────────────────────────────────────────────────────

/// Mutable field for one OD run, borrowing the shared layout.
pub struct Environment<'a> {
    layout: &'a GridLayout,
    cells:  Vec<CellState>,
    food:   Option<StationId>,
    nest:   Option<StationId>,
}

impl<'a> Environment<'a> {
    /// A clean field: no markers, zero pheromone everywhere.
    pub fn new(layout: &'a GridLayout, station_count: usize) -> Self {
        Self {
            layout,
            cells: vec![CellState::default(); station_count],
            food: None,
            nest: None,
        }
    }

    // ── Markers ───────────────────────────────────────────────────────────

    /// Place the single food marker, removing any previous one.
    pub fn set_food(&mut self, station: StationId) -> WorldResult<()> {
        self.place(station, Marker::Food)?;
        self.food = Some(station);
        Ok(())
    }

    /// Place the single nest marker, removing any previous one.
    pub fn set_nest(&mut self, station: StationId) -> WorldResult<()> {
        self.place(station, Marker::Nest)?;
        self.nest = Some(station);
        Ok(())
    }

    fn place(&mut self, station: StationId, marker: Marker) -> WorldResult<()> {
        if !self.layout.contains(station) || station.index() >= self.cells.len() {
            return Err(WorldError::NotOnGrid(station));
        }
        let previous = match marker {
            Marker::Food => self.food,
            Marker::Nest => self.nest,
            Marker::None => None,
        };
        if let Some(old) = previous {
            if self.cells[old.index()].marker == marker {
                self.cells[old.index()].marker = Marker::None;
            }
        }
        self.cells[station.index()].marker = marker;
        Ok(())
    }

    pub fn food(&self) -> Option<StationId> {
        self.food
    }

    pub fn nest(&self) -> Option<StationId> {
        self.nest
    }

    #[inline]
    pub fn marker(&self, station: StationId) -> Marker {
        self.cells.get(station.index()).map(|c| c.marker).unwrap_or_default()
    }

    // ── Pheromone ─────────────────────────────────────────────────────────

    #[inline]
    pub fn pheromone(&self, station: StationId) -> Pheromone {
        self.cells.get(station.index()).map(|c| c.pheromone).unwrap_or_default()
    }

    #[inline]
    pub fn neighbors(&self, station: StationId) -> [Option<StationId>; 8] {
        self.layout.neighbors(station)
    }

    /// Lay `amount` of the trail recording where an ant in `mode` came from.
    /// Negative or non-finite amounts are ignored.
    pub fn deposit(&mut self, station: StationId, mode: Mode, amount: f64) {
        if !(amount.is_finite() && amount > 0.0) {
            return;
        }
        if let Some(cell) = self.cells.get_mut(station.index()) {
            match mode {
                Mode::SeekingNest => cell.pheromone.food += amount,
                Mode::SeekingFood => cell.pheromone.nest += amount,
            }
        }
    }

    /// Multiply every trail level by `1 − rate`.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = (1.0 - rate).clamp(0.0, 1.0);
        for cell in &mut self.cells {
            cell.pheromone.food *= keep;
            cell.pheromone.nest *= keep;
        }
    }

    /// Sum of both trails over every cell.
    pub fn total_pheromone(&self) -> f64 {
        self.cells.iter().map(|c| c.pheromone.total()).sum()
    }
}
