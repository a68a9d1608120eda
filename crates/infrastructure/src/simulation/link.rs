use dtn_router_domain::{Message, NodeId};

/// Unordered pair of node ids, smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkKey(NodeId, NodeId);

impl LinkKey {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.0 == node || self.1 == node
    }

    /// Endpoint opposite to `node`.
    pub fn other(&self, node: NodeId) -> NodeId {
        if self.0 == node {
            self.1
        } else {
            self.0
        }
    }
}

/// A message copy moving across a link.
#[derive(Debug, Clone)]
pub struct Transfer {
    pub from: NodeId,
    pub to: NodeId,
    pub message: Message,
    pub remaining_ticks: u64,
}

/// Shared half-duplex channel between two nodes in range of each other.
#[derive(Debug, Clone, Default)]
pub struct Link {
    transfer: Option<Transfer>,
}

impl Link {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.transfer.is_some()
    }

    pub fn transfer(&self) -> Option<&Transfer> {
        self.transfer.as_ref()
    }

    pub fn start(&mut self, transfer: Transfer) {
        self.transfer = Some(transfer);
    }

    /// Abort whatever is in flight.
    pub fn take_transfer(&mut self) -> Option<Transfer> {
        self.transfer.take()
    }

    /// Advance one tick; returns the transfer once its last tick elapsed.
    pub fn advance(&mut self) -> Option<Transfer> {
        let transfer = self.transfer.as_mut()?;
        transfer.remaining_ticks = transfer.remaining_ticks.saturating_sub(1);
        if transfer.remaining_ticks == 0 {
            self.transfer.take()
        } else {
            None
        }
    }
}

/// Ticks needed to push `size` bytes through a link of `bandwidth` bytes
/// per tick; never less than one.
pub fn transfer_ticks(size: u64, bandwidth: u64) -> u64 {
    size.div_ceil(bandwidth.max(1)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_key_is_order_independent() {
        let a = NodeId::new(4);
        let b = NodeId::new(2);
        assert_eq!(LinkKey::new(a, b), LinkKey::new(b, a));
        assert_eq!(LinkKey::new(a, b).other(a), b);
        assert!(LinkKey::new(a, b).touches(b));
        assert!(!LinkKey::new(a, b).touches(NodeId::new(3)));
    }

    #[test]
    fn test_transfer_ticks_rounds_up() {
        assert_eq!(transfer_ticks(250, 100), 3);
        assert_eq!(transfer_ticks(200, 100), 2);
        assert_eq!(transfer_ticks(1, 100), 1);
    }

    #[test]
    fn test_advance_completes_after_remaining_ticks() {
        let message =
            Message::new("m", NodeId::new(0), NodeId::new(1), 10, 0).unwrap();
        let mut link = Link::new();
        link.start(Transfer {
            from: NodeId::new(0),
            to: NodeId::new(1),
            message,
            remaining_ticks: 2,
        });

        assert!(link.advance().is_none());
        assert!(link.is_busy());
        let done = link.advance().unwrap();
        assert_eq!(done.to, NodeId::new(1));
        assert!(!link.is_busy());
    }
}
