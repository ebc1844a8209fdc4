pub mod priority;

use crate::core::state::{ProcessKey, SchedCtx};
pub use priority::PriorityScheduler;

pub type EnqueueFlags = u64;

// Process just arrived
pub const ENQ_WAKEUP: EnqueueFlags = 1 << 0;
// Process ran for a unit and still needs service
pub const ENQ_REENQ: EnqueueFlags = 1 << 40;

pub trait Scheduler {
    fn init(ctx: &mut SchedCtx) -> Self;

    fn enqueue(&mut self, ctx: &mut SchedCtx, process: ProcessKey, flags: EnqueueFlags);

    /// Pick the process to run for the current unit; `None` leaves the CPU idle.
    fn dispatch(&mut self, ctx: &mut SchedCtx) -> Option<ProcessKey>;
}
