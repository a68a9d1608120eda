pub mod contact_cache;
pub mod send_queue;

pub use contact_cache::ContactCache;
pub use send_queue::SendQueue;
