use dtn_router_domain::config::{EventsConfig, HostRange};
use dtn_router_domain::{Message, NodeId, Tick};

/// Periodically creates messages between random hosts of a [`HostRange`].
#[derive(Debug, Clone)]
pub struct MessageGenerator {
    hosts: HostRange,
    total_hosts: u32,
    interval: (u64, u64),
    size: (u64, u64),
    prefix: String,
    ttl: Option<Tick>,
    next_at: Tick,
    created: u64,
    rng: fastrand::Rng,
}

impl MessageGenerator {
    /// Build from a validated `[events]` section.
    pub fn new(config: &EventsConfig, seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let interval = (config.interval_min, config.interval_max);
        let next_at = rng.u64(interval.0..=interval.1);

        Self {
            hosts: config.hosts,
            total_hosts: config.hosts.len(),
            interval,
            size: (config.size_min, config.size_max),
            prefix: config.prefix.clone(),
            ttl: config.ttl,
            next_at,
            created: 0,
            rng,
        }
    }

    pub fn total_hosts(&self) -> u32 {
        self.total_hosts
    }

    /// Message due at `now`, if any.
    pub fn poll(&mut self, now: Tick) -> Option<Message> {
        if now < self.next_at || self.total_hosts < 2 {
            return None;
        }
        self.next_at = now + self.rng.u64(self.interval.0..=self.interval.1);

        let src = self.rng.u32(..self.total_hosts);
        let dst = (src + 1 + self.rng.u32(..self.total_hosts - 1)) % self.total_hosts;
        let size = self.rng.u64(self.size.0..=self.size.1);

        self.created += 1;
        let id = format!("{}{}", self.prefix, self.created);
        let message = Message::new(
            id,
            NodeId::new(self.hosts.start + src),
            NodeId::new(self.hosts.start + dst),
            size,
            now,
        )
        .ok()?;

        Some(match self.ttl {
            Some(ttl) => message.with_ttl(ttl),
            None => message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EventsConfig {
        EventsConfig {
            interval_min: 5,
            interval_max: 5,
            size_min: 10,
            size_max: 20,
            hosts: HostRange::new(3, 7),
            ttl: Some(100),
            ..EventsConfig::default()
        }
    }

    #[test]
    fn test_total_hosts_comes_from_range() {
        let generator = MessageGenerator::new(&config(), 1);
        assert_eq!(generator.total_hosts(), 4);
    }

    #[test]
    fn test_poll_respects_interval_and_range() {
        let mut generator = MessageGenerator::new(&config(), 1);
        let range = HostRange::new(3, 7);
        let mut produced = Vec::new();

        for now in 0..=20 {
            if let Some(message) = generator.poll(now) {
                produced.push((now, message));
            }
        }

        let ticks: Vec<Tick> = produced.iter().map(|(t, _)| *t).collect();
        assert_eq!(ticks, vec![5, 10, 15, 20]);
        for (now, message) in &produced {
            assert!(range.contains(message.from));
            assert!(range.contains(message.to));
            assert_ne!(message.from, message.to);
            assert!((10..=20).contains(&message.size));
            assert_eq!(message.created_at, *now);
            assert_eq!(message.ttl, Some(100));
        }
        assert_eq!(produced[0].1.id.as_str(), "M1");
        assert_eq!(produced[3].1.id.as_str(), "M4");
    }
}
