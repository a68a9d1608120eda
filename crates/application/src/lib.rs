//! DTN Router Application Layer
//!
//! Contact-frequency epidemic routing expressed against the [`ports::NodeContext`]
//! capability interface. Nothing here knows how links, buffers or transfers
//! are actually implemented.
pub mod ports;
pub mod services;
pub mod use_cases;

pub use ports::{NodeContext, PeerLink};
pub use services::{ContactCache, SendQueue};
pub use use_cases::routing::{ContactRouter, ForwardMode, TickOutcome};
