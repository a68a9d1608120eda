use thiserror::Error;

use crate::config::ConfigError;
use crate::node::NodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Eviction(#[from] EvictionError),
}

impl From<ConfigError> for DomainError {
    fn from(err: ConfigError) -> Self {
        DomainError::ConfigError(err.to_string())
    }
}

/// Soft failures of buffer-pressure eviction.
///
/// Neither variant is fatal: the caller simply does not accept the message
/// that needed the space.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionError {
    #[error("Requested {requested} bytes exceeds buffer capacity of {capacity} bytes")]
    ExceedsCapacity { requested: u64, capacity: u64 },

    #[error("No evictable message left ({free} of {requested} bytes free)")]
    NoEvictableMessage { requested: u64, free: u64 },
}
