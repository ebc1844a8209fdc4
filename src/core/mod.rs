pub mod driver;
pub mod event;
pub mod observer;
pub mod ready;
pub mod state;
pub mod trace;

pub use driver::SchedCore;
pub use event::SchedCoreEvent;
pub use ready::{Precedence, ReadyPool};
pub use state::{Priority, ProcState, Process, ProcessKey, SchedCtx, Ticks};
pub use trace::{IDLE, Segment, Slot, Trace};
