//! DTN Router Infrastructure Layer
//!
//! In-memory, tick-driven simulation engine hosting one
//! [`dtn_router_application::ContactRouter`] per node.
pub mod simulation;
