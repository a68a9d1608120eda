use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::errors::ConfigError;

/// Raw `[router]` section as written by the operator.
///
/// Values are checked by [`RouterConfig::settings`]; negative thresholds
/// parse and are rejected there.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouterConfig {
    /// Contact recordings between two compaction passes
    #[serde(default = "default_counter_threshold")]
    pub counter_threshold: i64,

    /// Entries with a count at or below this value are purged on compaction
    #[serde(default = "default_update_threshold")]
    pub update_threshold: i64,

    /// Fraction of `counter_threshold` that defines the cold start threshold
    #[serde(default = "default_cache_factor")]
    pub cache_factor: f64,

    #[serde(default = "default_send_queue_mode")]
    pub send_queue_mode: String,

    /// Seed for the random send queue mode
    #[serde(default)]
    pub queue_seed: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            counter_threshold: default_counter_threshold(),
            update_threshold: default_update_threshold(),
            cache_factor: default_cache_factor(),
            send_queue_mode: default_send_queue_mode(),
            queue_seed: 0,
        }
    }
}

impl RouterConfig {
    pub fn settings(&self) -> Result<RouterSettings, ConfigError> {
        RouterSettings::try_from(self)
    }
}

fn default_counter_threshold() -> i64 {
    10
}

fn default_update_threshold() -> i64 {
    1
}

fn default_cache_factor() -> f64 {
    0.1
}

fn default_send_queue_mode() -> String {
    "lfu".to_string()
}

/// Order in which buffered messages are offered in selective mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueMode {
    Random,
    Fifo,
    /// Ascending contact count of the destination
    #[default]
    Lfu,
}

impl FromStr for QueueMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" | "1" => Ok(Self::Random),
            "fifo" | "2" => Ok(Self::Fifo),
            "lfu" | "3" => Ok(Self::Lfu),
            _ => Err(ConfigError::Validation(format!(
                "Invalid send queue mode: {}",
                s
            ))),
        }
    }
}

impl QueueMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Fifo => "fifo",
            Self::Lfu => "lfu",
        }
    }
}

/// Validated, immutable contact cache parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheSettings {
    counter_threshold: u32,
    update_threshold: u32,
    cache_factor: f64,
    cold_start_threshold: usize,
}

impl CacheSettings {
    pub fn new(
        counter_threshold: i64,
        update_threshold: i64,
        cache_factor: f64,
    ) -> Result<Self, ConfigError> {
        if counter_threshold < 1 {
            return Err(ConfigError::Validation(format!(
                "counter_threshold must be at least 1, got {}",
                counter_threshold
            )));
        }
        let counter_threshold = u32::try_from(counter_threshold).map_err(|_| {
            ConfigError::Validation(format!(
                "counter_threshold {} is too large",
                counter_threshold
            ))
        })?;

        if update_threshold < 0 {
            return Err(ConfigError::Validation(format!(
                "update_threshold cannot be negative, got {}",
                update_threshold
            )));
        }
        let update_threshold = u32::try_from(update_threshold).map_err(|_| {
            ConfigError::Validation(format!(
                "update_threshold {} is too large",
                update_threshold
            ))
        })?;

        if !cache_factor.is_finite() || !(0.0..1.0).contains(&cache_factor) {
            return Err(ConfigError::Validation(format!(
                "cache_factor must be in [0, 1), got {}",
                cache_factor
            )));
        }

        let cold_start_threshold = (cache_factor * counter_threshold as f64).floor() as usize;

        Ok(Self {
            counter_threshold,
            update_threshold,
            cache_factor,
            cold_start_threshold,
        })
    }

    pub fn counter_threshold(&self) -> u32 {
        self.counter_threshold
    }

    pub fn update_threshold(&self) -> u32 {
        self.update_threshold
    }

    pub fn cache_factor(&self) -> f64 {
        self.cache_factor
    }

    pub fn cold_start_threshold(&self) -> usize {
        self.cold_start_threshold
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            counter_threshold: 10,
            update_threshold: 1,
            cache_factor: 0.1,
            cold_start_threshold: 1,
        }
    }
}

/// Everything a router instance needs, checked once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RouterSettings {
    pub cache: CacheSettings,
    pub queue_mode: QueueMode,
    pub queue_seed: u64,
}

impl TryFrom<&RouterConfig> for RouterSettings {
    type Error = ConfigError;

    fn try_from(config: &RouterConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            cache: CacheSettings::new(
                config.counter_threshold,
                config.update_threshold,
                config.cache_factor,
            )?,
            queue_mode: config.send_queue_mode.parse()?,
            queue_seed: config.queue_seed,
        })
    }
}
