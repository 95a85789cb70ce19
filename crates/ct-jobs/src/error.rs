use thiserror::Error;

use ct_core::JobId;
use ct_world::WorldError;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("job {0} not found")]
    NotFound(JobId),

    #[error("job {0} is already claimed")]
    AlreadyClaimed(JobId),

    #[error("job {0} is not claimed")]
    NotClaimed(JobId),

    #[error("world error: {0}")]
    World(#[from] WorldError),
}

pub type JobResult<T> = Result<T, JobError>;
