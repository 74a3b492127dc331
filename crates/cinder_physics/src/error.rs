//! Error types for the physics bindings

use crate::body::BodyRef;
use thiserror::Error;

/// Physics binding errors
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Operation attempted on a handle whose lifecycle state forbids it
    #[error("Cannot {operation} a rigid body in state {state:?}")]
    InvalidState {
        operation: &'static str,
        state: crate::rigid_body::BodyState,
    },

    /// The physics engine could not allocate a body or fixture
    #[error("Physics allocation failed: {0}")]
    AllocationFailure(String),

    /// Body reference no longer resolves to a live body
    #[error("Rigid body not found: {0:?}")]
    BodyNotFound(BodyRef),

    /// Body is already waiting on the disposal list
    #[error("Rigid body already queued for disposal: {0:?}")]
    AlreadyQueued(BodyRef),

    /// Fixture definition carries no shape
    #[error("Fixture definition has no shape")]
    MissingShape,

    /// Invalid configuration
    #[error("Invalid physics configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed
    #[error("Failed to parse physics configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
