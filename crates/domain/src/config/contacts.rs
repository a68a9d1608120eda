use serde::{Deserialize, Serialize};

use crate::message::Tick;
use crate::node::NodeId;

/// Connectivity plan (`[contacts]`): scripted link changes, random
/// encounters, or both.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactsConfig {
    #[serde(default)]
    pub random: RandomContactsConfig,

    #[serde(default)]
    pub events: Vec<ContactEvent>,
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            random: RandomContactsConfig::default(),
            events: vec![],
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct RandomContactsConfig {
    #[serde(default = "crate::config::default_true")]
    pub enabled: bool,

    /// Per tick probability that a disconnected pair comes into range
    #[serde(default = "default_up_probability")]
    pub up_probability: f64,

    /// Per tick probability that a connected pair drifts apart
    #[serde(default = "default_down_probability")]
    pub down_probability: f64,
}

impl Default for RandomContactsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            up_probability: default_up_probability(),
            down_probability: default_down_probability(),
        }
    }
}

fn default_up_probability() -> f64 {
    0.005
}

fn default_down_probability() -> f64 {
    0.1
}

/// A scripted link change applied at the start of `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactEvent {
    pub tick: Tick,
    pub a: NodeId,
    pub b: NodeId,
    pub up: bool,
}
