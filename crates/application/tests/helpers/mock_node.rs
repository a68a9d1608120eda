#![allow(dead_code)]

use dtn_router_application::{ContactRouter, NodeContext, PeerLink};
use dtn_router_domain::{Message, MessageId, NodeId};
use rustc_hash::FxHashSet;

pub fn node(id: u32) -> NodeId {
    NodeId::new(id)
}

pub fn message(id: &str, to: u32, size: u64) -> Message {
    Message::new(id, node(0), node(to), size, 0).unwrap()
}

/// Scriptable `NodeContext`: records every transfer the router starts
/// without simulating it.
pub struct MockNode {
    pub id: NodeId,
    pub capacity: u64,
    pub buffer: Vec<Message>,
    pub links: Vec<PeerLink>,
    pub transferring: bool,
    pub sending: FxHashSet<MessageId>,
    /// Peers that accept relayed copies; `None` means everyone does
    pub accepting: Option<FxHashSet<NodeId>>,
    /// Peers holding a message addressed to this node
    pub holding_for_us: FxHashSet<NodeId>,
    pub started: Vec<(MessageId, NodeId)>,
    pub requested_from: Vec<NodeId>,
    pub last_order: Vec<MessageId>,
    pub dropped: Vec<MessageId>,
}

impl MockNode {
    pub fn new(id: u32) -> Self {
        Self {
            id: node(id),
            capacity: 1_000,
            buffer: Vec::new(),
            links: Vec::new(),
            transferring: false,
            sending: FxHashSet::default(),
            accepting: None,
            holding_for_us: FxHashSet::default(),
            started: Vec::new(),
            requested_from: Vec::new(),
            last_order: Vec::new(),
            dropped: Vec::new(),
        }
    }

    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_links(mut self, peers: &[u32]) -> Self {
        self.connect_only(peers);
        self
    }

    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.buffer = messages;
        self
    }

    pub fn connect_only(&mut self, peers: &[u32]) {
        self.links = peers.iter().map(|p| PeerLink::new(node(*p))).collect();
    }

    pub fn accept_only(&mut self, peers: &[u32]) {
        self.accepting = Some(peers.iter().map(|p| node(*p)).collect());
    }

    pub fn buffered_ids(&self) -> Vec<&str> {
        self.buffer.iter().map(|m| m.id.as_str()).collect()
    }

    fn accepts(&self, peer: NodeId) -> bool {
        self.accepting
            .as_ref()
            .map_or(true, |peers| peers.contains(&peer))
    }

    fn try_send(&mut self, ids: &[MessageId], links: &[PeerLink]) -> Option<PeerLink> {
        for link in links {
            if !self.accepts(link.peer) {
                continue;
            }
            if let Some(id) = ids.iter().find(|id| !self.sending.contains(*id)) {
                self.started.push((id.clone(), link.peer));
                return Some(*link);
            }
        }
        None
    }
}

impl NodeContext for MockNode {
    fn local_id(&self) -> NodeId {
        self.id
    }

    fn is_transferring(&self) -> bool {
        self.transferring
    }

    fn can_start_transfer(&self) -> bool {
        !self.links.is_empty() && !self.buffer.is_empty()
    }

    fn connections(&self) -> Vec<PeerLink> {
        self.links.clone()
    }

    fn buffered_messages(&self) -> Vec<Message> {
        self.buffer.clone()
    }

    fn try_deliver_to_peer(&mut self, message: &MessageId, link: PeerLink) -> bool {
        if self.sending.contains(message) {
            return false;
        }
        self.started.push((message.clone(), link.peer));
        true
    }

    fn try_request_deliverable(&mut self, link: PeerLink) -> bool {
        if self.holding_for_us.contains(&link.peer) {
            self.requested_from.push(link.peer);
            return true;
        }
        false
    }

    fn try_ordered_send(&mut self, ordered: &[MessageId], links: &[PeerLink]) -> Option<PeerLink> {
        self.last_order = ordered.to_vec();
        self.try_send(ordered, links)
    }

    fn free_space(&self) -> u64 {
        let used: u64 = self.buffer.iter().map(|m| m.size).sum();
        self.capacity.saturating_sub(used)
    }

    fn capacity(&self) -> u64 {
        self.capacity
    }

    fn remove_message(&mut self, message: &MessageId, drop: bool) -> Option<Message> {
        let pos = self.buffer.iter().position(|m| &m.id == message)?;
        let removed = self.buffer.remove(pos);
        if drop {
            self.dropped.push(removed.id.clone());
        }
        Some(removed)
    }

    fn is_sending(&self, message: &MessageId) -> bool {
        self.sending.contains(message)
    }
}

/// Drive ticks so that the router records one contact per entry of `peers`,
/// in order. Each peer must be reachable in the router's current mode:
/// anyone during cold start, cached peers afterwards.
pub fn record_contacts(router: &mut ContactRouter, peers: &[u32]) {
    for &peer in peers {
        let mut warm = MockNode::new(0)
            .with_links(&[peer])
            .with_messages(vec![message("warm-up", 999, 1)]);
        let outcome = router.on_tick(&mut warm);
        assert_eq!(
            outcome.peer(),
            Some(node(peer)),
            "warm-up tick towards {} did not start a transfer: {:?}",
            peer,
            outcome
        );
    }
}
