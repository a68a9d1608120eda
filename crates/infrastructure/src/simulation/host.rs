use dtn_router_application::{ContactRouter, NodeContext, PeerLink};
use dtn_router_domain::{Message, MessageId, NodeId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;

use super::buffer::MessageBuffer;
use super::link::{transfer_ticks, Link, LinkKey, Transfer};

/// One simulated node: its router, its buffer and what reached it.
#[derive(Debug, Clone)]
pub struct SimHost {
    pub id: NodeId,
    pub router: ContactRouter,
    pub buffer: MessageBuffer,
    /// Messages this node was the final destination of
    pub delivered: FxHashSet<MessageId>,
}

impl SimHost {
    pub fn new(id: NodeId, router: ContactRouter, capacity: u64) -> Self {
        Self {
            id,
            router,
            buffer: MessageBuffer::new(capacity),
            delivered: FxHashSet::default(),
        }
    }

    /// Already holds or already received `id`.
    pub fn has_seen(&self, id: &MessageId) -> bool {
        self.buffer.contains(id) || self.delivered.contains(id)
    }

    pub fn view(&self) -> PeerView {
        PeerView {
            seen: self
                .buffer
                .iter()
                .map(|m| m.id.clone())
                .chain(self.delivered.iter().cloned())
                .collect(),
            messages: self.buffer.iter().cloned().collect(),
            capacity: self.buffer.capacity(),
        }
    }
}

/// What a node can learn about a peer before offering it a message.
#[derive(Debug, Clone, Default)]
pub struct PeerView {
    seen: FxHashSet<MessageId>,
    messages: Vec<Message>,
    capacity: u64,
}

impl PeerView {
    pub fn accepts(&self, message: &Message) -> bool {
        !self.seen.contains(&message.id) && message.size <= self.capacity
    }

    /// Buffered messages the peer holds for `node`, in buffer order.
    pub fn messages_for(&self, node: NodeId) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(move |m| m.to == node)
    }
}

/// [`NodeContext`] adapter over one host's buffer and the shared link table.
pub struct HostContext<'a> {
    id: NodeId,
    bandwidth: u64,
    buffer: &'a mut MessageBuffer,
    delivered: &'a FxHashSet<MessageId>,
    links: &'a mut BTreeMap<LinkKey, Link>,
    peers: &'a FxHashMap<NodeId, PeerView>,
}

impl<'a> HostContext<'a> {
    pub fn new(
        id: NodeId,
        bandwidth: u64,
        buffer: &'a mut MessageBuffer,
        delivered: &'a FxHashSet<MessageId>,
        links: &'a mut BTreeMap<LinkKey, Link>,
        peers: &'a FxHashMap<NodeId, PeerView>,
    ) -> Self {
        Self {
            id,
            bandwidth,
            buffer,
            delivered,
            links,
            peers,
        }
    }

    fn incident(&self) -> impl Iterator<Item = (&LinkKey, &Link)> {
        let id = self.id;
        self.links.iter().filter(move |(key, _)| key.touches(id))
    }

    fn link_ready(&self, peer: NodeId) -> bool {
        self.links
            .get(&LinkKey::new(self.id, peer))
            .is_some_and(|link| !link.is_busy())
    }

    fn peer_accepts(&self, peer: NodeId, message: &Message) -> bool {
        self.peers
            .get(&peer)
            .is_some_and(|view| view.accepts(message))
    }

    fn start(&mut self, from: NodeId, to: NodeId, message: Message) -> bool {
        let key = LinkKey::new(from, to);
        let ticks = transfer_ticks(message.size, self.bandwidth);
        match self.links.get_mut(&key) {
            Some(link) if !link.is_busy() => {
                link.start(Transfer {
                    from,
                    to,
                    message,
                    remaining_ticks: ticks,
                });
                true
            }
            _ => false,
        }
    }

    fn try_messages(&mut self, ids: &[MessageId], links: &[PeerLink]) -> Option<PeerLink> {
        for link in links {
            if !self.link_ready(link.peer) {
                continue;
            }
            for id in ids {
                let Some(message) = self.buffer.get(id) else {
                    continue;
                };
                if self.is_sending(id) || !self.peer_accepts(link.peer, message) {
                    continue;
                }
                let message = message.clone();
                if self.start(self.id, link.peer, message) {
                    return Some(*link);
                }
            }
        }
        None
    }
}

impl NodeContext for HostContext<'_> {
    fn local_id(&self) -> NodeId {
        self.id
    }

    fn is_transferring(&self) -> bool {
        self.incident().any(|(_, link)| link.is_busy())
    }

    fn can_start_transfer(&self) -> bool {
        !self.buffer.is_empty() && self.incident().next().is_some()
    }

    fn connections(&self) -> Vec<PeerLink> {
        self.incident()
            .filter(|(_, link)| !link.is_busy())
            .map(|(key, _)| PeerLink::new(key.other(self.id)))
            .collect()
    }

    fn buffered_messages(&self) -> Vec<Message> {
        self.buffer.iter().cloned().collect()
    }

    fn try_deliver_to_peer(&mut self, message: &MessageId, link: PeerLink) -> bool {
        self.try_messages(std::slice::from_ref(message), &[link])
            .is_some()
    }

    fn try_request_deliverable(&mut self, link: PeerLink) -> bool {
        if !self.link_ready(link.peer) {
            return false;
        }
        let Some(message) = self.peers.get(&link.peer).and_then(|view| {
            view.messages_for(self.id)
                .find(|m| !self.delivered.contains(&m.id))
                .cloned()
        }) else {
            return false;
        };
        self.start(link.peer, self.id, message)
    }

    fn try_ordered_send(&mut self, ordered: &[MessageId], links: &[PeerLink]) -> Option<PeerLink> {
        self.try_messages(ordered, links)
    }

    fn free_space(&self) -> u64 {
        self.buffer.free_space()
    }

    fn capacity(&self) -> u64 {
        self.buffer.capacity()
    }

    fn remove_message(&mut self, message: &MessageId, _drop: bool) -> Option<Message> {
        self.buffer.remove(message)
    }

    fn is_sending(&self, message: &MessageId) -> bool {
        self.incident().any(|(_, link)| {
            link.transfer()
                .is_some_and(|t| t.from == self.id && &t.message.id == message)
        })
    }
}
