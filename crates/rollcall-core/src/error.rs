//! Error types for draw operations.

use rollcall_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The draw pool is empty: everyone eligible was already drawn or the
    /// group filter matches nobody.
    #[error("nothing to draw: no eligible students remain")]
    NothingToDraw,

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
