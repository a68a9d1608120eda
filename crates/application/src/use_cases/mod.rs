pub mod routing;

pub use routing::{ContactRouter, ForwardMode, TickOutcome};
