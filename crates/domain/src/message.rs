use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::errors::DomainError;
use crate::node::NodeId;

/// Discrete simulation step.
pub type Tick = u64;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MessageId(Arc<str>);

impl MessageId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessageId {
    fn from(id: &str) -> Self {
        Self(Arc::from(id))
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bundle carried by the store-and-forward network.
///
/// Every node holds its own copy; relaying produces a new copy with the
/// hop count bumped and the receive tick reset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Message {
    pub id: MessageId,
    pub from: NodeId,
    pub to: NodeId,
    pub size: u64,
    pub created_at: Tick,
    pub received_at: Tick,
    #[serde(default)]
    pub ttl: Option<Tick>,
    #[serde(default)]
    pub hop_count: u32,
}

impl Message {
    pub fn new(
        id: impl Into<MessageId>,
        from: NodeId,
        to: NodeId,
        size: u64,
        created_at: Tick,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        if size == 0 {
            return Err(DomainError::InvalidMessage(format!(
                "message {} has zero size",
                id
            )));
        }
        if from == to {
            return Err(DomainError::InvalidMessage(format!(
                "message {} is addressed to its own source {}",
                id, from
            )));
        }

        Ok(Self {
            id,
            from,
            to,
            size,
            created_at,
            received_at: created_at,
            ttl: None,
            hop_count: 0,
        })
    }

    pub fn with_ttl(mut self, ttl: Tick) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Copy handed to the next hop at `now`.
    pub fn relayed(&self, now: Tick) -> Self {
        Self {
            received_at: now,
            hop_count: self.hop_count + 1,
            ..self.clone()
        }
    }

    pub fn is_expired(&self, now: Tick) -> bool {
        match self.ttl {
            Some(ttl) => now.saturating_sub(self.created_at) >= ttl,
            None => false,
        }
    }
}

impl From<String> for MessageId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}
