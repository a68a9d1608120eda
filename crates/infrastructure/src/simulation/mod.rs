pub mod buffer;
pub mod contacts;
pub mod generator;
pub mod host;
pub mod link;
pub mod report;
pub mod world;

pub use buffer::MessageBuffer;
pub use contacts::ContactPlan;
pub use generator::MessageGenerator;
pub use host::{HostContext, PeerView, SimHost};
pub use link::{Link, LinkKey, Transfer};
pub use report::{HostSummary, SimMetrics, SimReport};
pub use world::World;
