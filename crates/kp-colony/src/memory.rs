//! Bounded memory of the stations an ant visited most recently.

use kp_core::StationId;

/// Fixed-capacity ring buffer of recent positions.
///
/// Once full, each `push` overwrites the oldest entry.  Capacity is fixed at
/// construction and never reallocates.
#[derive(Clone, Debug)]
pub struct RecentMemory {
    slots: Vec<StationId>,
    head:  usize,
    len:   usize,
}

impl RecentMemory {
    /// An empty buffer holding at most `capacity` stations (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![StationId::INVALID; capacity.max(1)],
            head:  0,
            len:   0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Record `station`, evicting the oldest entry when full.
    pub fn push(&mut self, station: StationId) {
        let cap = self.slots.len();
        let tail = (self.head + self.len) % cap;
        self.slots[tail] = station;
        if self.len < cap {
            self.len += 1;
        } else {
            self.head = (self.head + 1) % cap;
        }
    }

    pub fn contains(&self, station: StationId) -> bool {
        self.iter().any(|s| s == station)
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = StationId> + '_ {
        let cap = self.slots.len();
        (0..self.len).map(move |i| self.slots[(self.head + i) % cap])
    }
}
