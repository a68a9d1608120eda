use dtn_router_application::{ContactRouter, TickOutcome};
use dtn_router_domain::{Config, DomainError, Message, NodeId, Tick};
use rustc_hash::FxHashMap;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::contacts::ContactPlan;
use super::generator::MessageGenerator;
use super::host::{HostContext, PeerView, SimHost};
use super::link::{Link, LinkKey, Transfer};
use super::report::{HostSummary, SimMetrics, SimReport};

/// In-memory network of hosts, each running its own replica of the
/// contact router.
///
/// A tick runs in a fixed order: link changes, transfer progress and
/// reception, TTL expiry, message generation, then one router tick per
/// host in id order.
pub struct World {
    hosts: Vec<SimHost>,
    links: BTreeMap<LinkKey, Link>,
    contacts: ContactPlan,
    generator: Option<MessageGenerator>,
    now: Tick,
    bandwidth: u64,
    metrics: SimMetrics,
}

impl World {
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        config.validate()?;

        let prototype = ContactRouter::from_config(&config.router)?;
        let sim = &config.simulation;
        let contacts = ContactPlan::from_config(&config.contacts, sim.seed);
        let generator = config
            .events
            .enabled
            .then(|| MessageGenerator::new(&config.events, sim.seed.wrapping_add(1)));

        info!(
            nodes = sim.nodes,
            buffer_capacity = sim.buffer_capacity,
            bandwidth = sim.bandwidth,
            queue_mode = prototype.settings().queue_mode.as_str(),
            "World created"
        );

        Ok(Self::with_parts(
            &prototype,
            sim.nodes,
            sim.buffer_capacity,
            sim.bandwidth,
            contacts,
            generator,
        ))
    }

    /// Every host gets a fresh replica of `prototype`.
    pub fn with_parts(
        prototype: &ContactRouter,
        nodes: u32,
        buffer_capacity: u64,
        bandwidth: u64,
        contacts: ContactPlan,
        generator: Option<MessageGenerator>,
    ) -> Self {
        let hosts = (0..nodes)
            .map(|id| SimHost::new(NodeId::new(id), prototype.replicate(), buffer_capacity))
            .collect();

        Self {
            hosts,
            links: BTreeMap::new(),
            contacts,
            generator,
            now: 0,
            bandwidth,
            metrics: SimMetrics::default(),
        }
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn metrics(&self) -> &SimMetrics {
        &self.metrics
    }

    pub fn host(&self, id: NodeId) -> Option<&SimHost> {
        self.hosts.get(id.index())
    }

    pub fn hosts(&self) -> &[SimHost] {
        &self.hosts
    }

    pub fn is_linked(&self, a: NodeId, b: NodeId) -> bool {
        self.links.contains_key(&LinkKey::new(a, b))
    }

    fn check_node(&self, node: NodeId) -> Result<(), DomainError> {
        if node.index() < self.hosts.len() {
            Ok(())
        } else {
            Err(DomainError::UnknownNode(node))
        }
    }

    /// Bring `a` and `b` into range. Self links and existing links are
    /// ignored.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> Result<(), DomainError> {
        self.check_node(a)?;
        self.check_node(b)?;
        if a == b {
            return Ok(());
        }
        if let Entry::Vacant(entry) = self.links.entry(LinkKey::new(a, b)) {
            entry.insert(Link::new());
            debug!(tick = self.now, %a, %b, "Link up");
        }
        Ok(())
    }

    /// Take the link down, aborting any transfer on it. Returns whether a
    /// transfer was aborted.
    pub fn disconnect(&mut self, a: NodeId, b: NodeId) -> bool {
        let Some(mut link) = self.links.remove(&LinkKey::new(a, b)) else {
            return false;
        };
        debug!(tick = self.now, %a, %b, "Link down");

        match link.take_transfer() {
            Some(transfer) => {
                self.metrics.aborted += 1;
                debug!(
                    message = %transfer.message.id,
                    from = %transfer.from,
                    to = %transfer.to,
                    "Transfer aborted"
                );
                true
            }
            None => false,
        }
    }

    /// Store a newly created message at its source, evicting as needed.
    pub fn inject_message(&mut self, message: Message) -> Result<(), DomainError> {
        self.check_node(message.from)?;

        let no_peers = FxHashMap::default();
        let host = &mut self.hosts[message.from.index()];
        if host.buffer.contains(&message.id) {
            return Err(DomainError::InvalidMessage(format!(
                "message {} is already buffered at {}",
                message.id, message.from
            )));
        }
        let mut node = HostContext::new(
            host.id,
            self.bandwidth,
            &mut host.buffer,
            &host.delivered,
            &mut self.links,
            &no_peers,
        );
        let evicted = host.router.make_room(&mut node, message.size)?;
        self.metrics.dropped += evicted.len() as u64;

        debug!(
            tick = self.now,
            message = %message.id,
            from = %message.from,
            to = %message.to,
            size = message.size,
            "Message created"
        );
        host.buffer.insert(message)?;
        self.metrics.created += 1;
        Ok(())
    }

    /// Advance the world by one tick.
    pub fn step(&mut self) {
        self.apply_contacts();

        let completed: Vec<Transfer> = self.links.values_mut().filter_map(Link::advance).collect();
        for transfer in completed {
            self.receive(transfer);
        }

        self.expire_messages();

        if let Some(message) = self.generator.as_mut().and_then(|g| g.poll(self.now)) {
            let id = message.id.clone();
            if let Err(err) = self.inject_message(message) {
                self.metrics.rejected += 1;
                warn!(tick = self.now, message = %id, error = %err, "Generated message rejected");
            }
        }

        self.route();
        self.now += 1;
    }

    /// Run `ticks` steps and summarize.
    pub fn run(&mut self, ticks: Tick) -> SimReport {
        info!(start = self.now, ticks, hosts = self.hosts.len(), "Simulation started");

        for _ in 0..ticks {
            self.step();
        }

        let report = self.report();
        info!(
            ticks = report.ticks,
            created = report.metrics.created,
            delivered = report.metrics.delivered,
            delivery_ratio = report.delivery_ratio,
            overhead_ratio = report.overhead_ratio,
            "Simulation finished"
        );
        report
    }

    pub fn report(&self) -> SimReport {
        let hosts = self
            .hosts
            .iter()
            .map(|host| HostSummary {
                node: host.id,
                buffered: host.buffer.len(),
                cache: host.router.cache().snapshot(),
            })
            .collect();
        SimReport::new(self.now, self.metrics.clone(), hosts)
    }

    fn apply_contacts(&mut self) {
        let links = &self.links;
        let changes = self
            .contacts
            .changes(self.now, self.hosts.len() as u32, |a, b| {
                links.contains_key(&LinkKey::new(a, b))
            });

        for change in changes {
            if change.up {
                if let Err(err) = self.connect(change.a, change.b) {
                    warn!(tick = self.now, error = %err, "Ignoring contact event");
                }
            } else {
                self.disconnect(change.a, change.b);
            }
        }
    }

    fn receive(&mut self, transfer: Transfer) {
        self.metrics.relayed += 1;
        let Transfer { from, to, message, .. } = transfer;
        let copy = message.relayed(self.now);

        let Some(receiver) = self.hosts.get_mut(to.index()) else {
            warn!(node = %to, "Transfer completed towards unknown node");
            return;
        };

        if copy.to == to {
            if receiver.delivered.insert(copy.id.clone()) {
                self.metrics
                    .record_delivery(self.now.saturating_sub(copy.created_at), copy.hop_count);
                debug!(
                    tick = self.now,
                    message = %copy.id,
                    node = %to,
                    hops = copy.hop_count,
                    "Message delivered"
                );
            }
            if let Some(sender) = self.hosts.get_mut(from.index()) {
                sender.buffer.remove(&copy.id);
            }
            return;
        }

        if receiver.has_seen(&copy.id) {
            return;
        }

        let no_peers = FxHashMap::default();
        let mut node = HostContext::new(
            receiver.id,
            self.bandwidth,
            &mut receiver.buffer,
            &receiver.delivered,
            &mut self.links,
            &no_peers,
        );
        match receiver.router.make_room(&mut node, copy.size) {
            Ok(evicted) => self.metrics.dropped += evicted.len() as u64,
            Err(err) => {
                self.metrics.rejected += 1;
                debug!(node = %to, message = %copy.id, error = %err, "Relayed copy rejected");
                return;
            }
        }

        if let Err(err) = receiver.buffer.insert(copy) {
            self.metrics.rejected += 1;
            warn!(node = %to, error = %err, "Relayed copy not stored");
        }
    }

    fn expire_messages(&mut self) {
        for host in &mut self.hosts {
            let expired = host.buffer.drain_expired(self.now);
            if !expired.is_empty() {
                self.metrics.expired += expired.len() as u64;
                debug!(tick = self.now, node = %host.id, count = expired.len(), "Messages expired");
            }
        }
    }

    fn route(&mut self) {
        let peers: FxHashMap<NodeId, PeerView> =
            self.hosts.iter().map(|host| (host.id, host.view())).collect();

        for host in &mut self.hosts {
            let mut node = HostContext::new(
                host.id,
                self.bandwidth,
                &mut host.buffer,
                &host.delivered,
                &mut self.links,
                &peers,
            );
            let outcome = host.router.on_tick(&mut node);
            if outcome != TickOutcome::Idle {
                debug!(tick = self.now, node = %host.id, ?outcome, "Router tick");
            }
            self.metrics.record_outcome(outcome);
        }
    }
}
