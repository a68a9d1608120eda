//! DTN Router Domain Layer
pub mod config;
pub mod errors;
pub mod message;
pub mod node;

pub use config::{
    CacheSettings, CliOverrides, Config, ConfigError, QueueMode, RouterConfig, RouterSettings,
};
pub use errors::{DomainError, EvictionError};
pub use message::{Message, MessageId, Tick};
pub use node::NodeId;
