use dtn_router_domain::{DomainError, Message, MessageId, NodeId};

fn node(id: u32) -> NodeId {
    NodeId::new(id)
}

#[test]
fn test_node_id_display() {
    assert_eq!(node(7).to_string(), "n7");
    assert_eq!(NodeId::from(3).as_u32(), 3);
    assert_eq!(node(3).index(), 3);
}

#[test]
fn test_message_id_from_string() {
    let id = MessageId::from("M12".to_string());
    assert_eq!(id, MessageId::from("M12"));
    assert_eq!(id.to_string(), "M12");
}

#[test]
fn test_new_message_starts_at_creation() {
    let message = Message::new("M1", node(0), node(1), 100, 40).unwrap();

    assert_eq!(message.received_at, 40);
    assert_eq!(message.hop_count, 0);
    assert!(message.ttl.is_none());
}

#[test]
fn test_rejects_empty_message() {
    let result = Message::new("M1", node(0), node(1), 0, 0);
    assert!(matches!(result, Err(DomainError::InvalidMessage(_))));
}

#[test]
fn test_rejects_message_to_itself() {
    let result = Message::new("M1", node(4), node(4), 10, 0);
    assert!(matches!(result, Err(DomainError::InvalidMessage(_))));
}

#[test]
fn test_relayed_copy_counts_a_hop() {
    let message = Message::new("M1", node(0), node(1), 10, 5).unwrap();
    let copy = message.relayed(9).relayed(12);

    assert_eq!(copy.hop_count, 2);
    assert_eq!(copy.received_at, 12);
    assert_eq!(copy.created_at, 5);
    assert_eq!(copy.id, message.id);
}

#[test]
fn test_expiry_counts_from_creation() {
    let message = Message::new("M1", node(0), node(1), 10, 10)
        .unwrap()
        .with_ttl(5);

    assert!(!message.is_expired(14));
    assert!(message.is_expired(15));
    assert!(!Message::new("M2", node(0), node(1), 10, 0)
        .unwrap()
        .is_expired(u64::MAX));
}
