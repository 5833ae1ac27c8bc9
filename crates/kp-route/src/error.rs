use thiserror::Error;

use kp_core::StationId;

#[derive(Debug, Error)]
pub enum RouteError {
    /// A K-path uses a station pair that is not a configured link.
    #[error("route edge {from} -> {to} is not a configured link")]
    UnknownEdge { from: StationId, to: StationId },

    #[error("demand row {row}: {reason}")]
    Demand { row: usize, reason: String },

    #[error("demand CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RouteResult<T> = Result<T, RouteError>;
