use dtn_router_domain::{ConfigError, NodeId, RouterConfig, RouterSettings};

use crate::services::{ContactCache, SendQueue};

use super::on_tick::ForwardMode;

/// Contact-frequency epidemic router owned by exactly one node.
///
/// Holds the node's contact history and send queue. The hosting node is
/// passed into every operation through [`crate::ports::NodeContext`].
#[derive(Debug, Clone)]
pub struct ContactRouter {
    settings: RouterSettings,
    pub(super) cache: ContactCache,
    pub(super) queue: SendQueue,
}

impl ContactRouter {
    pub fn new(settings: RouterSettings) -> Self {
        Self {
            cache: ContactCache::new(settings.cache),
            queue: SendQueue::new(settings.queue_mode, settings.queue_seed),
            settings,
        }
    }

    pub fn from_config(config: &RouterConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.settings()?))
    }

    /// New router for another node: same settings, no contact history.
    pub fn replicate(&self) -> Self {
        Self {
            settings: self.settings,
            cache: self.cache.fresh(),
            queue: self.queue.fresh(),
        }
    }

    pub fn settings(&self) -> &RouterSettings {
        &self.settings
    }

    pub fn cache(&self) -> &ContactCache {
        &self.cache
    }

    pub fn forward_mode(&self) -> ForwardMode {
        if self.cache.is_cold_start() {
            ForwardMode::Flood
        } else {
            ForwardMode::Selective
        }
    }

    /// Contact count of `node`, 0 when unknown.
    pub fn rank(&self, node: NodeId) -> u32 {
        self.cache.rank(node)
    }
}
