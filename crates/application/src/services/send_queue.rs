use dtn_router_domain::{Message, QueueMode};

use super::contact_cache::ContactCache;

/// Orders buffered messages before they are offered to peers.
#[derive(Debug, Clone)]
pub struct SendQueue {
    mode: QueueMode,
    seed: u64,
    rng: fastrand::Rng,
}

impl SendQueue {
    pub fn new(mode: QueueMode, seed: u64) -> Self {
        Self {
            mode,
            seed,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Queue with the same mode and seed, RNG rewound.
    pub fn fresh(&self) -> Self {
        Self::new(self.mode, self.seed)
    }

    /// Sort `messages` in place. Sorting is stable, so equal keys keep their
    /// buffer order.
    pub fn order(&mut self, messages: &mut [Message], cache: &ContactCache) {
        match self.mode {
            QueueMode::Lfu => messages.sort_by_key(|m| cache.rank(m.to)),
            QueueMode::Fifo => messages.sort_by_key(|m| m.received_at),
            QueueMode::Random => self.rng.shuffle(messages),
        }
    }
}
