#![allow(dead_code)]
use dtn_router_application::ContactRouter;
use dtn_router_domain::{Message, NodeId, RouterSettings};
use dtn_router_infrastructure::simulation::{ContactPlan, World};

pub fn node(id: u32) -> NodeId {
    NodeId::new(id)
}

pub fn message(id: &str, from: u32, to: u32, size: u64) -> Message {
    Message::new(id, node(from), node(to), size, 0).unwrap()
}

/// World without random contacts or generated traffic; links and messages
/// are set up by the test.
pub struct WorldBuilder {
    nodes: u32,
    buffer_capacity: u64,
    bandwidth: u64,
    links: Vec<(u32, u32)>,
    messages: Vec<Message>,
}

impl WorldBuilder {
    pub fn new(nodes: u32) -> Self {
        Self {
            nodes,
            buffer_capacity: 1_000,
            bandwidth: 100,
            links: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn buffer_capacity(mut self, capacity: u64) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    pub fn bandwidth(mut self, bandwidth: u64) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    pub fn link(mut self, a: u32, b: u32) -> Self {
        self.links.push((a, b));
        self
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn build(self) -> World {
        let prototype = ContactRouter::new(RouterSettings::default());
        let mut world = World::with_parts(
            &prototype,
            self.nodes,
            self.buffer_capacity,
            self.bandwidth,
            ContactPlan::scripted(vec![]),
            None,
        );
        for (a, b) in self.links {
            world.connect(node(a), node(b)).unwrap();
        }
        for message in self.messages {
            world.inject_message(message).unwrap();
        }
        world
    }
}

pub fn buffered_ids(world: &World, id: u32) -> Vec<String> {
    world
        .host(node(id))
        .unwrap()
        .buffer
        .iter()
        .map(|m| m.id.as_str().to_string())
        .collect()
}
