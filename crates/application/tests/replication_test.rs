use dtn_router_application::{ContactRouter, ForwardMode};
use dtn_router_domain::{CacheSettings, QueueMode, RouterSettings};

mod helpers;
use helpers::{node, record_contacts};

#[test]
fn test_replicas_keep_settings_but_not_history() {
    let prototype = ContactRouter::new(RouterSettings {
        cache: CacheSettings::new(8, 2, 0.5).unwrap(),
        queue_mode: QueueMode::Fifo,
        queue_seed: 11,
    });

    let mut first = prototype.replicate();
    let mut second = prototype.replicate();

    record_contacts(&mut first, &[2, 2, 3]);
    record_contacts(&mut second, &[4]);

    assert_eq!(first.settings(), second.settings());
    assert_eq!(first.settings(), prototype.settings());

    assert_eq!(first.rank(node(2)), 2);
    assert_eq!(second.rank(node(2)), 0);
    assert!(second.cache().contains(node(4)));
    assert!(!first.cache().contains(node(4)));
    assert!(prototype.cache().is_empty());
}

#[test]
fn test_replica_of_warm_router_starts_cold() {
    let mut prototype = ContactRouter::new(RouterSettings::default());
    record_contacts(&mut prototype, &[2, 3]);
    assert_eq!(prototype.forward_mode(), ForwardMode::Selective);

    let replica = prototype.replicate();

    assert_eq!(replica.forward_mode(), ForwardMode::Flood);
    assert_eq!(replica.cache().update_counter(), 0);
}
