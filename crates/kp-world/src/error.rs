//! World-subsystem error type.

use thiserror::Error;

use kp_core::{KpError, StationId};

/// Errors produced while building the network, parsing the grid, or placing
/// markers.  All of them are configuration errors: the run cannot proceed.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("unknown station {label:?} referenced by {context}")]
    UnknownStation { label: String, context: &'static str },

    #[error("unknown line {0:?}")]
    UnknownLine(String),

    #[error("line {0:?} defined more than once")]
    DuplicateLine(String),

    #[error("link {from}-{to} has invalid travel time {minutes}")]
    InvalidTravelTime { from: String, to: String, minutes: f64 },

    #[error("link {from}-{to} configured with conflicting times {first} and {second}")]
    ConflictingLink { from: String, to: String, first: f64, second: f64 },

    #[error("station {0:?} is linked to itself")]
    SelfLink(String),

    #[error("invalid interchange rule at {station:?}: {reason}")]
    InvalidInterchange { station: String, reason: String },

    #[error("grid is empty")]
    EmptyGrid,

    #[error("grid row {row} has {got} cells, expected {expected}")]
    RaggedGrid { row: usize, expected: usize, got: usize },

    #[error("station {label:?} appears twice in the grid ({first:?} and {second:?})")]
    DuplicateCell { label: String, first: (usize, usize), second: (usize, usize) },

    #[error("{0} has no cell on the grid")]
    NotOnGrid(StationId),

    #[error("network JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] KpError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WorldResult<T> = Result<T, WorldError>;
