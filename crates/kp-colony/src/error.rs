use thiserror::Error;

use kp_core::StationId;

#[derive(Debug, Error)]
pub enum ColonyError {
    /// The grid let an ant step between two stations the network does not
    /// link.  The move has no cost, so the run cannot continue.
    #[error("no travel time configured for {from} -> {to}")]
    MissingLink { from: StationId, to: StationId },
}

pub type ColonyResult<T> = Result<T, ColonyError>;
