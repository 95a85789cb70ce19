use ct_core::CoreError;
use ct_world::WorldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("world error: {0}")]
    World(#[from] WorldError),

    #[error("{what} length {got} exceeds courier population {expected}")]
    CourierCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },
}

pub type SimResult<T> = Result<T, SimError>;
