//! World-subsystem error type.

use thiserror::Error;

use ct_core::{ClusterId, Point, RestaurantId};

/// Errors produced by `ct-world`.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("restaurant {0} not found in world")]
    RestaurantNotFound(RestaurantId),

    #[error("cluster {0} not found in world")]
    ClusterNotFound(ClusterId),

    #[error("point {point} lies outside the world (half extent {half_extent})")]
    OutOfBounds { point: Point, half_extent: f64 },

    #[error("world has no restaurants")]
    Empty,
}

pub type WorldResult<T> = Result<T, WorldError>;
