pub mod contacts;
pub mod errors;
pub mod events;
pub mod logging;
pub mod root;
pub mod router;
pub mod simulation;

pub use contacts::{ContactEvent, ContactsConfig, RandomContactsConfig};
pub use errors::ConfigError;
pub use events::{EventsConfig, HostRange};
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use router::{CacheSettings, QueueMode, RouterConfig, RouterSettings};
pub use simulation::SimulationConfig;

pub(crate) fn default_true() -> bool {
    true
}
