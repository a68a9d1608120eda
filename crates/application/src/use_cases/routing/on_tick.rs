use dtn_router_domain::{Message, MessageId, NodeId};
use std::fmt;
use tracing::debug;

use crate::ports::{NodeContext, PeerLink};

use super::router::ContactRouter;

/// How relaying is done when no direct delivery was possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardMode {
    /// Cold start: every message to every peer.
    Flood,
    /// Only peers with contact history, least contacted destinations first.
    Selective,
}

impl fmt::Display for ForwardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flood => f.write_str("flood"),
            Self::Selective => f.write_str("selective"),
        }
    }
}

/// What a single tick ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Busy channel, no connection or nothing buffered.
    Idle,
    Delivered { peer: NodeId },
    Flooded { peer: NodeId },
    Forwarded { peer: NodeId },
    /// Relay pass ran but no peer accepted anything.
    NoAction { mode: ForwardMode },
}

impl TickOutcome {
    /// Peer a transfer was started with, if any.
    pub fn peer(&self) -> Option<NodeId> {
        match *self {
            Self::Delivered { peer } | Self::Flooded { peer } | Self::Forwarded { peer } => {
                Some(peer)
            }
            Self::Idle | Self::NoAction { .. } => None,
        }
    }
}

impl ContactRouter {
    /// Run one tick for the node behind `node`.
    ///
    /// At most one transfer is started. Every started transfer counts as a
    /// contact with its peer.
    pub fn on_tick<N: NodeContext + ?Sized>(&mut self, node: &mut N) -> TickOutcome {
        if node.is_transferring() || !node.can_start_transfer() {
            return TickOutcome::Idle;
        }

        let local = node.local_id();

        if let Some(link) = self.exchange_deliverable(node) {
            self.cache.record_contact(link.peer);
            debug!(node = %local, peer = %link.peer, "Direct delivery started");
            return TickOutcome::Delivered { peer: link.peer };
        }

        let mode = self.forward_mode();
        let outcome = match mode {
            ForwardMode::Flood => {
                let links = node.connections();
                let ordered = self.ordered_ids(node.buffered_messages());
                node.try_broadcast_all(&ordered, &links)
                    .map(|link| TickOutcome::Flooded { peer: link.peer })
            }
            ForwardMode::Selective => {
                let links: Vec<PeerLink> = node
                    .connections()
                    .into_iter()
                    .filter(|link| self.cache.contains(link.peer))
                    .collect();

                if links.is_empty() {
                    None
                } else {
                    let ordered = self.ordered_ids(node.buffered_messages());
                    node.try_ordered_send(&ordered, &links)
                        .map(|link| TickOutcome::Forwarded { peer: link.peer })
                }
            }
        };

        match outcome {
            Some(outcome) => {
                if let Some(peer) = outcome.peer() {
                    self.cache.record_contact(peer);
                }
                debug!(node = %local, ?outcome, %mode, "Relay started");
                outcome
            }
            None => {
                debug!(node = %local, %mode, "Nothing forwarded this tick");
                TickOutcome::NoAction { mode }
            }
        }
    }

    /// Messages whose final destination is a connected peer go first, in
    /// send queue order: ours to them, then theirs to us.
    fn exchange_deliverable<N: NodeContext + ?Sized>(&mut self, node: &mut N) -> Option<PeerLink> {
        let links = node.connections();
        let mut deliverable: Vec<Message> = node
            .buffered_messages()
            .into_iter()
            .filter(|m| links.iter().any(|link| link.peer == m.to))
            .collect();
        self.queue.order(&mut deliverable, &self.cache);

        for message in &deliverable {
            let link = PeerLink::new(message.to);
            if node.try_deliver_to_peer(&message.id, link) {
                return Some(link);
            }
        }

        links
            .into_iter()
            .find(|link| node.try_request_deliverable(*link))
    }

    fn ordered_ids(&mut self, mut messages: Vec<Message>) -> Vec<MessageId> {
        self.queue.order(&mut messages, &self.cache);
        messages.into_iter().map(|m| m.id).collect()
    }
}
