use thiserror::Error;

use kp_colony::ColonyError;
use kp_core::KpError;
use kp_route::RouteError;
use kp_world::WorldError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] KpError),

    #[error("world error: {0}")]
    World(#[from] WorldError),

    #[error("colony error: {0}")]
    Colony(#[from] ColonyError),

    #[error("route error: {0}")]
    Route(#[from] RouteError),
}

pub type SimResult<T> = Result<T, SimError>;
