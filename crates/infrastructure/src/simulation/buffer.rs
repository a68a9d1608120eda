use dtn_router_domain::{DomainError, Message, MessageId, Tick};

/// Capacity-bounded message store, kept in arrival order.
#[derive(Debug, Clone)]
pub struct MessageBuffer {
    capacity: u64,
    used: u64,
    messages: Vec<Message>,
}

impl MessageBuffer {
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            used: 0,
            messages: Vec::new(),
        }
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    pub fn free_space(&self) -> u64 {
        self.capacity - self.used
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn contains(&self, id: &MessageId) -> bool {
        self.messages.iter().any(|m| &m.id == id)
    }

    pub fn get(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| &m.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// Store `message`; the caller is expected to have made room first.
    pub fn insert(&mut self, message: Message) -> Result<(), DomainError> {
        if self.contains(&message.id) {
            return Err(DomainError::InvalidMessage(format!(
                "message {} is already buffered",
                message.id
            )));
        }
        if message.size > self.free_space() {
            return Err(DomainError::InvalidMessage(format!(
                "message {} ({} bytes) does not fit in {} free bytes",
                message.id,
                message.size,
                self.free_space()
            )));
        }

        self.used += message.size;
        self.messages.push(message);
        Ok(())
    }

    pub fn remove(&mut self, id: &MessageId) -> Option<Message> {
        let pos = self.messages.iter().position(|m| &m.id == id)?;
        let message = self.messages.remove(pos);
        self.used -= message.size;
        Some(message)
    }

    /// Remove and return every message whose TTL ran out at `now`.
    pub fn drain_expired(&mut self, now: Tick) -> Vec<Message> {
        let (expired, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.messages)
            .into_iter()
            .partition(|m| m.is_expired(now));
        self.messages = kept;
        self.used -= expired.iter().map(|m| m.size).sum::<u64>();
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtn_router_domain::NodeId;

    fn message(id: &str, size: u64) -> Message {
        Message::new(id, NodeId::new(0), NodeId::new(1), size, 0).unwrap()
    }

    #[test]
    fn test_insert_and_remove_track_used_space() {
        let mut buffer = MessageBuffer::new(100);
        buffer.insert(message("a", 30)).unwrap();
        buffer.insert(message("b", 50)).unwrap();

        assert_eq!(buffer.used(), 80);
        assert_eq!(buffer.free_space(), 20);

        let removed = buffer.remove(&"a".into()).unwrap();
        assert_eq!(removed.size, 30);
        assert_eq!(buffer.free_space(), 50);
        assert!(buffer.remove(&"a".into()).is_none());
    }

    #[test]
    fn test_insert_rejects_overflow_and_duplicates() {
        let mut buffer = MessageBuffer::new(100);
        buffer.insert(message("a", 60)).unwrap();

        assert!(buffer.insert(message("b", 41)).is_err());
        assert!(buffer.insert(message("a", 10)).is_err());
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.used(), 60);
    }

    #[test]
    fn test_drain_expired_keeps_order_of_survivors() {
        let mut buffer = MessageBuffer::new(100);
        buffer.insert(message("old", 10).with_ttl(5)).unwrap();
        buffer.insert(message("forever", 10)).unwrap();
        buffer.insert(message("young", 10).with_ttl(50)).unwrap();

        let expired = buffer.drain_expired(5);

        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].id.as_str(), "old");
        let ids: Vec<&str> = buffer.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["forever", "young"]);
        assert_eq!(buffer.used(), 20);
    }
}
