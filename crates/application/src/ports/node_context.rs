use dtn_router_domain::{Message, MessageId, NodeId};

/// A ready connection from the local node to one peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerLink {
    pub peer: NodeId,
}

impl PeerLink {
    pub fn new(peer: NodeId) -> Self {
        Self { peer }
    }
}

/// Port for everything a router needs from the node hosting it.
///
/// The hosting engine owns buffers, links and transfers; the router only
/// decides. All `try_*` methods initiate at most one transfer and report the
/// link it was started on.
pub trait NodeContext {
    fn local_id(&self) -> NodeId;

    /// True while an outgoing transfer is in flight or a channel is busy.
    fn is_transferring(&self) -> bool;

    /// True when there is at least one ready connection and a non-empty buffer.
    fn can_start_transfer(&self) -> bool;

    fn connections(&self) -> Vec<PeerLink>;

    /// Buffered messages in buffer order.
    fn buffered_messages(&self) -> Vec<Message>;

    /// Start handing `message` to the peer of `link`, which is its final
    /// destination.
    fn try_deliver_to_peer(&mut self, message: &MessageId, link: PeerLink) -> bool;

    /// Ask the peer of `link` to hand over a message addressed to this node.
    fn try_request_deliverable(&mut self, link: PeerLink) -> bool;

    /// Offer `ordered` messages, in the given order, to every link.
    fn try_ordered_send(&mut self, ordered: &[MessageId], links: &[PeerLink]) -> Option<PeerLink>;

    /// Flood: offer the whole buffer, already ordered by the caller, to
    /// every connection.
    fn try_broadcast_all(&mut self, ordered: &[MessageId], links: &[PeerLink]) -> Option<PeerLink> {
        self.try_ordered_send(ordered, links)
    }

    fn free_space(&self) -> u64;

    fn capacity(&self) -> u64;

    /// Delete a buffered message; `drop` marks it as discarded rather than
    /// consumed.
    fn remove_message(&mut self, message: &MessageId, drop: bool) -> Option<Message>;

    fn is_sending(&self, message: &MessageId) -> bool;
}
