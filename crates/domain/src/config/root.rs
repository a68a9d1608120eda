use serde::{Deserialize, Serialize};

use super::contacts::ContactsConfig;
use super::errors::ConfigError;
use super::events::EventsConfig;
use super::logging::LoggingConfig;
use super::router::RouterConfig;
use super::simulation::SimulationConfig;

const LOCAL_CONFIG_FILE: &str = "dtn-router.toml";

/// Main configuration structure for the DTN router simulation
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Contact cache and send queue parameters
    #[serde(default)]
    pub router: RouterConfig,

    /// World size, duration and link parameters
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Message generation
    #[serde(default)]
    pub events: EventsConfig,

    /// Connectivity plan
    #[serde(default)]
    pub contacts: ContactsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dtn-router.toml in current directory
    /// 3. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_FILE).exists() {
            Self::from_file(LOCAL_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(ticks) = overrides.ticks {
            self.simulation.ticks = ticks;
        }
        if let Some(seed) = overrides.seed {
            self.simulation.seed = seed;
        }
        if let Some(mode) = overrides.send_queue_mode {
            self.router.send_queue_mode = mode;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.router.settings()?;

        let sim = &self.simulation;
        if sim.nodes < 2 {
            return Err(ConfigError::Validation(format!(
                "At least 2 nodes are required, got {}",
                sim.nodes
            )));
        }
        if sim.buffer_capacity == 0 {
            return Err(ConfigError::Validation(
                "Buffer capacity cannot be 0".to_string(),
            ));
        }
        if sim.bandwidth == 0 {
            return Err(ConfigError::Validation("Bandwidth cannot be 0".to_string()));
        }

        let events = &self.events;
        if events.hosts.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "Event host range [{}, {}) must contain at least 2 hosts",
                events.hosts.start, events.hosts.end
            )));
        }
        if events.hosts.end > sim.nodes {
            return Err(ConfigError::Validation(format!(
                "Event host range ends at {} but only {} nodes exist",
                events.hosts.end, sim.nodes
            )));
        }
        if events.interval_min == 0 || events.interval_min > events.interval_max {
            return Err(ConfigError::Validation(format!(
                "Invalid event interval [{}, {}]",
                events.interval_min, events.interval_max
            )));
        }
        if events.size_min == 0 || events.size_min > events.size_max {
            return Err(ConfigError::Validation(format!(
                "Invalid message size range [{}, {}]",
                events.size_min, events.size_max
            )));
        }

        let random = &self.contacts.random;
        if random.enabled {
            for (name, p) in [
                ("up_probability", random.up_probability),
                ("down_probability", random.down_probability),
            ] {
                if !(0.0..=1.0).contains(&p) {
                    return Err(ConfigError::Validation(format!(
                        "{} must be in [0, 1], got {}",
                        name, p
                    )));
                }
            }
        }

        for event in &self.contacts.events {
            if event.a == event.b {
                return Err(ConfigError::Validation(format!(
                    "Contact event at tick {} links {} to itself",
                    event.tick, event.a
                )));
            }
            if event.a.as_u32() >= sim.nodes || event.b.as_u32() >= sim.nodes {
                return Err(ConfigError::Validation(format!(
                    "Contact event at tick {} references unknown node ({} - {})",
                    event.tick, event.a, event.b
                )));
            }
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = self.to_toml()?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub ticks: Option<u64>,
    pub seed: Option<u64>,
    pub send_queue_mode: Option<String>,
    pub log_level: Option<String>,
}
