use serde::{Deserialize, Serialize};

/// World parameters (`[simulation]`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Number of nodes, ids `0..nodes`
    #[serde(default = "default_nodes")]
    pub nodes: u32,

    #[serde(default = "default_ticks")]
    pub ticks: u64,

    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Per node buffer capacity in bytes
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: u64,

    /// Link bandwidth in bytes per tick
    #[serde(default = "default_bandwidth")]
    pub bandwidth: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            nodes: default_nodes(),
            ticks: default_ticks(),
            seed: default_seed(),
            buffer_capacity: default_buffer_capacity(),
            bandwidth: default_bandwidth(),
        }
    }
}

fn default_nodes() -> u32 {
    20
}

fn default_ticks() -> u64 {
    43_200
}

fn default_seed() -> u64 {
    42
}

fn default_buffer_capacity() -> u64 {
    5_000_000
}

fn default_bandwidth() -> u64 {
    250_000
}
