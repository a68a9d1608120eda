use serde::{Deserialize, Serialize};

use crate::node::NodeId;

/// Half-open range of node ids `[start, end)` that create and receive
/// generated messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct HostRange {
    pub start: u32,
    pub end: u32,
}

impl HostRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Number of hosts covered by the range.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, node: NodeId) -> bool {
        (self.start..self.end).contains(&node.as_u32())
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (self.start..self.end).map(NodeId::new)
    }
}

impl From<(u32, u32)> for HostRange {
    fn from((start, end): (u32, u32)) -> Self {
        Self { start, end }
    }
}

impl From<HostRange> for (u32, u32) {
    fn from(range: HostRange) -> Self {
        (range.start, range.end)
    }
}

/// Message generation settings (`[events]`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventsConfig {
    #[serde(default = "crate::config::default_true")]
    pub enabled: bool,

    /// Ticks between two generated messages, drawn from `[min, max]`
    #[serde(default = "default_interval_min")]
    pub interval_min: u64,
    #[serde(default = "default_interval_max")]
    pub interval_max: u64,

    /// Message size in bytes, drawn from `[min, max]`
    #[serde(default = "default_size_min")]
    pub size_min: u64,
    #[serde(default = "default_size_max")]
    pub size_max: u64,

    #[serde(default = "default_hosts")]
    pub hosts: HostRange,

    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Message lifetime in ticks; messages live forever when unset
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_min: default_interval_min(),
            interval_max: default_interval_max(),
            size_min: default_size_min(),
            size_max: default_size_max(),
            hosts: default_hosts(),
            prefix: default_prefix(),
            ttl: None,
        }
    }
}

fn default_interval_min() -> u64 {
    25
}

fn default_interval_max() -> u64 {
    35
}

fn default_size_min() -> u64 {
    500_000
}

fn default_size_max() -> u64 {
    1_000_000
}

fn default_hosts() -> HostRange {
    HostRange::new(0, 20)
}

fn default_prefix() -> String {
    "M".to_string()
}
