use dtn_router_domain::config::{ContactEvent, ContactsConfig};
use dtn_router_domain::{NodeId, Tick};

/// Decides which links come up or go down at each tick.
///
/// Scripted events are applied first, then every pair of nodes rolls for a
/// random change when random encounters are enabled.
#[derive(Debug, Clone)]
pub struct ContactPlan {
    scripted: Vec<ContactEvent>,
    cursor: usize,
    random: Option<(f64, f64)>,
    rng: fastrand::Rng,
}

impl ContactPlan {
    pub fn from_config(config: &ContactsConfig, seed: u64) -> Self {
        let random = config
            .random
            .enabled
            .then_some((config.random.up_probability, config.random.down_probability));
        Self::new(config.events.clone(), random, seed)
    }

    /// Only the given events, no random encounters.
    pub fn scripted(events: Vec<ContactEvent>) -> Self {
        Self::new(events, None, 0)
    }

    fn new(mut scripted: Vec<ContactEvent>, random: Option<(f64, f64)>, seed: u64) -> Self {
        scripted.sort_by_key(|event| event.tick);
        Self {
            scripted,
            cursor: 0,
            random,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Link changes for `now` among nodes `0..nodes`; `is_linked` reports
    /// the current state of a pair.
    pub fn changes(
        &mut self,
        now: Tick,
        nodes: u32,
        is_linked: impl Fn(NodeId, NodeId) -> bool,
    ) -> Vec<ContactEvent> {
        let mut changes = Vec::new();

        while let Some(event) = self.scripted.get(self.cursor) {
            if event.tick > now {
                break;
            }
            if event.tick == now {
                changes.push(*event);
            }
            self.cursor += 1;
        }

        if let Some((up, down)) = self.random {
            for i in 0..nodes {
                for j in (i + 1)..nodes {
                    let (a, b) = (NodeId::new(i), NodeId::new(j));
                    let linked = is_linked(a, b);
                    let p = if linked { down } else { up };
                    if self.rng.f64() < p {
                        changes.push(ContactEvent {
                            tick: now,
                            a,
                            b,
                            up: !linked,
                        });
                    }
                }
            }
        }

        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(tick: Tick, a: u32, b: u32, up: bool) -> ContactEvent {
        ContactEvent {
            tick,
            a: NodeId::new(a),
            b: NodeId::new(b),
            up,
        }
    }

    #[test]
    fn test_scripted_events_fire_at_their_tick() {
        let mut plan = ContactPlan::scripted(vec![event(3, 0, 1, false), event(1, 0, 1, true)]);

        assert!(plan.changes(0, 2, |_, _| false).is_empty());
        assert_eq!(plan.changes(1, 2, |_, _| false), vec![event(1, 0, 1, true)]);
        assert!(plan.changes(2, 2, |_, _| true).is_empty());
        assert_eq!(plan.changes(3, 2, |_, _| true), vec![event(3, 0, 1, false)]);
    }

    #[test]
    fn test_random_plan_is_reproducible() {
        let config = ContactsConfig::default();
        let mut first = ContactPlan::from_config(&config, 9);
        let mut second = ContactPlan::from_config(&config, 9);

        for now in 0..50 {
            assert_eq!(
                first.changes(now, 10, |_, _| false),
                second.changes(now, 10, |_, _| false)
            );
        }
    }

    #[test]
    fn test_certain_probabilities_toggle_every_pair() {
        let mut config = ContactsConfig::default();
        config.random.up_probability = 1.0;
        config.random.down_probability = 1.0;
        let mut plan = ContactPlan::from_config(&config, 1);

        let ups = plan.changes(0, 4, |_, _| false);
        assert_eq!(ups.len(), 6);
        assert!(ups.iter().all(|c| c.up));

        let downs = plan.changes(1, 4, |_, _| true);
        assert_eq!(downs.len(), 6);
        assert!(downs.iter().all(|c| !c.up));
    }
}
