mod make_room;
mod on_tick;
mod router;

pub use on_tick::{ForwardMode, TickOutcome};
pub use router::ContactRouter;
