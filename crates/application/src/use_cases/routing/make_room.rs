use dtn_router_domain::{EvictionError, MessageId};
use tracing::{debug, warn};

use crate::ports::NodeContext;

use super::router::ContactRouter;

impl ContactRouter {
    /// Free at least `size` bytes in the node's buffer.
    ///
    /// Victims are the non-transmitting messages whose destination has the
    /// highest contact count: those are the most likely to have reached
    /// their destination through someone else already. Returns the evicted
    /// message ids in eviction order.
    pub fn make_room<N: NodeContext + ?Sized>(
        &self,
        node: &mut N,
        size: u64,
    ) -> Result<Vec<MessageId>, EvictionError> {
        let capacity = node.capacity();
        if size > capacity {
            return Err(EvictionError::ExceedsCapacity {
                requested: size,
                capacity,
            });
        }

        let mut free = node.free_space();
        let mut evicted = Vec::new();

        while free < size {
            let victim = node
                .buffered_messages()
                .into_iter()
                .filter(|m| !node.is_sending(&m.id))
                .fold(None, |best: Option<(u32, _)>, m| {
                    let rank = self.cache.rank(m.to);
                    match best {
                        Some((best_rank, _)) if best_rank >= rank => best,
                        _ => Some((rank, m)),
                    }
                });

            let Some((rank, victim)) = victim else {
                warn!(
                    node = %node.local_id(),
                    requested = size,
                    free,
                    "Cannot make room, every buffered message is in flight"
                );
                return Err(EvictionError::NoEvictableMessage {
                    requested: size,
                    free,
                });
            };

            node.remove_message(&victim.id, true);
            free += victim.size;
            debug!(
                node = %node.local_id(),
                message = %victim.id,
                destination = %victim.to,
                rank,
                "Evicted message"
            );
            evicted.push(victim.id);
        }

        Ok(evicted)
    }
}
